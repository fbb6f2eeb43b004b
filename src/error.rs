use thiserror::Error;

/// 单个请求或单个单元（书 / 节 / 活动部分）上的错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 登录接口返回失败或缺少会话字段
    #[error("登录被拒绝: {message}")]
    AuthRejected { message: String },

    /// 首页中找不到配置 meta 标签
    #[error("页面 {url} 中未找到配置标签")]
    ConfigNotFound { url: String },

    /// 配置标签解码后缺少指定字段
    #[error("配置中缺少字段: {path}")]
    KeyNotFound { path: String },

    /// 读取接口返回 success=false 或结构不完整
    #[error("读取失败 ({endpoint}): {message}")]
    FetchRejected { endpoint: String, message: String },

    /// 传输层失败（连接、超时、读取响应体）
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 提交接口报告失败
    #[error("提交被拒绝 (活动 {activity_id} 第 {part} 部分): status={status}, body={body}")]
    SubmitRejected {
        activity_id: String,
        part: u32,
        status: u16,
        body: String,
    },

    /// 响应体不是合法 JSON
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 错误的严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// 整次运行无法继续
    Fatal,
    /// 只影响当前单元，继续处理下一个兄弟单元
    Recoverable,
}

impl AppError {
    /// 仅按错误种类判断严重程度
    ///
    /// 上下文可以升级严重程度：登录或获取 build key 阶段的网络错误同样是致命的，
    /// 这一点由 [`RunError`] 表达。
    pub fn severity(&self) -> Severity {
        match self {
            AppError::AuthRejected { .. }
            | AppError::ConfigNotFound { .. }
            | AppError::KeyNotFound { .. }
            | AppError::Config(_) => Severity::Fatal,
            AppError::FetchRejected { .. }
            | AppError::Network { .. }
            | AppError::SubmitRejected { .. }
            | AppError::Decode { .. } => Severity::Recoverable,
        }
    }

    /// 创建网络错误
    ///
    /// 请求 URL 的查询串里带有 auth_token，这里去掉 URL 再保存
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Network {
            endpoint: endpoint.into(),
            source: source.without_url(),
        }
    }

    /// 创建读取失败错误
    pub fn fetch_rejected(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::FetchRejected {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// 创建 JSON 解析错误
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }
}

/// 整次运行级别的错误：一旦出现，不会再发出任何提交请求
#[derive(Debug, Error)]
pub enum RunError {
    /// 配置或 HTTP 客户端初始化失败
    #[error("初始化失败: {0}")]
    Setup(#[source] AppError),

    #[error("登录失败: {0}")]
    Login(#[source] AppError),

    #[error("获取 build key 失败: {0}")]
    BuildKey(#[source] AppError),

    /// 书籍列表都拿不到，没有可遍历的内容
    #[error("获取书籍列表失败: {0}")]
    Books(#[source] AppError),
}

impl RunError {
    /// 取出底层的单元错误
    pub fn inner(&self) -> &AppError {
        match self {
            RunError::Setup(e) | RunError::Login(e) | RunError::BuildKey(e) | RunError::Books(e) => e,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        RunError::Setup(AppError::Config(err))
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 缺少登录凭据
    #[error("缺少登录凭据: {field}")]
    MissingCredential { field: String },

    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_by_kind() {
        assert_eq!(
            AppError::AuthRejected {
                message: "bad".to_string()
            }
            .severity(),
            Severity::Fatal
        );
        assert_eq!(
            AppError::KeyNotFound {
                path: "APP.BUILDKEY".to_string()
            }
            .severity(),
            Severity::Fatal
        );
        assert_eq!(
            AppError::fetch_rejected("/zybooks", "success=false").severity(),
            Severity::Recoverable
        );
        assert_eq!(
            AppError::SubmitRejected {
                activity_id: "1".to_string(),
                part: 0,
                status: 500,
                body: String::new(),
            }
            .severity(),
            Severity::Recoverable
        );
    }

    #[test]
    fn test_run_error_from_config_error() {
        let err: RunError = ConfigError::MissingCredential {
            field: "email".to_string(),
        }
        .into();

        assert!(matches!(err, RunError::Setup(AppError::Config(_))));
        assert_eq!(err.inner().severity(), Severity::Fatal);
    }

    #[tokio::test]
    async fn test_network_error_hides_query_string() {
        // 绑定后立即释放，得到一个没有监听者的端口
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{}/v1/user/42/items", port);
        let source = reqwest::Client::new()
            .get(&url)
            .query(&[("auth_token", "secret-token-value")])
            .send()
            .await
            .unwrap_err();

        let message = AppError::network(&url, source).to_string();
        assert!(message.contains("网络请求失败"));
        assert!(message.contains("/v1/user/42/items"));
        assert!(!message.contains("secret-token-value"));
    }
}

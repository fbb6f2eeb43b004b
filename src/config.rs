use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 默认配置文件名（当前目录下存在时自动加载）
pub const DEFAULT_CONFIG_FILE: &str = "autobookz.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// zyServer API 根地址
    pub api_base_url: String,
    /// 前端站点地址（build key 所在页面，也用作 Origin 头）
    pub web_url: String,
    pub email: String,
    pub password: String,
    /// 只处理这些书（为空表示全部）
    pub book_codes: Vec<String>,
    /// 只处理这些章节号（为空表示全部）
    pub chapters: Vec<u32>,
    /// 只遍历和列出活动，不提交
    pub dry_run: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 失败单元记录文件
    pub failure_log_file: String,
    /// 单个请求超时秒数，0 表示不设置
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://zyserver.zybooks.com/v1".to_string(),
            web_url: "https://learn.zybooks.com".to_string(),
            email: String::new(),
            password: String::new(),
            book_codes: Vec::new(),
            chapters: Vec::new(),
            dry_run: false,
            verbose_logging: false,
            failure_log_file: "failures.txt".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载，未出现的字段取默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: display,
            source,
        })
    }

    /// 按 `AUTOBOOKZ_CONFIG` → `autobookz.toml` → 默认值 的顺序加载，再叠加环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("AUTOBOOKZ_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 用 `lookup` 提供的变量覆盖当前配置
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("AUTOBOOKZ_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("AUTOBOOKZ_WEB_URL") {
            self.web_url = v;
        }
        if let Some(v) = lookup("AUTOBOOKZ_EMAIL") {
            self.email = v;
        }
        if let Some(v) = lookup("AUTOBOOKZ_PASSWORD") {
            self.password = v;
        }
        if let Some(v) = lookup("AUTOBOOKZ_BOOKS") {
            self.book_codes = split_list(&v).map(str::to_string).collect();
        }
        if let Some(v) = lookup("AUTOBOOKZ_CHAPTERS") {
            self.chapters = split_list(&v)
                .map(|item| parse_var("AUTOBOOKZ_CHAPTERS", item, "u32"))
                .collect::<Result<_, _>>()?;
        }
        if let Some(v) = lookup("AUTOBOOKZ_DRY_RUN") {
            self.dry_run = parse_var("AUTOBOOKZ_DRY_RUN", &v, "bool")?;
        }
        if let Some(v) = lookup("AUTOBOOKZ_VERBOSE") {
            self.verbose_logging = parse_var("AUTOBOOKZ_VERBOSE", &v, "bool")?;
        }
        if let Some(v) = lookup("AUTOBOOKZ_FAILURE_LOG") {
            self.failure_log_file = v;
        }
        if let Some(v) = lookup("AUTOBOOKZ_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("AUTOBOOKZ_TIMEOUT_SECS", &v, "u64")?;
        }
        Ok(self)
    }

    /// 返回 (email, password)，任一为空即报错
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        if self.email.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                field: "email".to_string(),
            });
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingCredential {
                field: "password".to_string(),
            });
        }
        Ok((self.email.trim(), &self.password))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// 书籍白名单
    pub fn allows_book(&self, code: &str) -> bool {
        self.book_codes.is_empty() || self.book_codes.iter().any(|c| c == code)
    }

    /// 章节白名单
    pub fn allows_chapter(&self, number: u32) -> bool {
        self.chapters.is_empty() || self.chapters.contains(&number)
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}

/// zyBooks API 客户端
///
/// 封装所有与 zyServer 及前端站点相关的调用逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{HttpExecutor, HttpReply};
use crate::models::Session;
use crate::utils::logging;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, USER_AGENT};
use serde_json::{json, Value};
use tracing::debug;

/// 路径段转义：只保留字母数字和 `-_.~`
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/67.0.3396.99 Safari/537.36";

/// zyBooks API 客户端
pub struct ZyClient {
    http: HttpExecutor,
    api_base_url: String,
    web_url: String,
}

impl ZyClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            http: HttpExecutor::new(config.request_timeout())?,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            web_url: config.web_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    /// 登录
    ///
    /// # 返回
    /// 返回完整的登录响应 JSON；响应体不是 JSON，或非 2xx 却声称成功时返回 `AuthRejected`
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Value> {
        let url = format!("{}/signin", self.api_base_url);
        let reply = self
            .http
            .post_json(
                &url,
                &json!({ "email": email, "password": password }),
                HeaderMap::new(),
            )
            .await?;

        match reply.json() {
            Some(value) if reply.is_success() || !Self::is_success_response(&value) => Ok(value),
            _ => Err(AppError::AuthRejected {
                message: format!("HTTP {}", reply.status),
            }),
        }
    }

    /// 获取前端首页 HTML（不需要登录）
    pub async fn landing_page(&self) -> AppResult<String> {
        self.http.get_text(&self.web_url).await
    }

    /// 获取用户的书籍列表
    pub async fn books(&self, session: &Session) -> AppResult<Value> {
        let url = format!("{}/user/{}/items", self.api_base_url, session.user_id);
        self.http
            .get_json(
                &url,
                &[("items", r#"["zybooks"]"#), ("auth_token", session.token.as_str())],
            )
            .await
    }

    /// 获取一本书的章节结构
    pub async fn chapters(&self, session: &Session, book_code: &str) -> AppResult<Value> {
        let url = format!("{}/zybooks", self.api_base_url);
        let codes = serde_json::to_string(&[book_code]).map_err(|e| AppError::decode(&url, e))?;
        self.http
            .get_json(&url, &[("zybooks", codes.as_str()), ("auth_token", session.token.as_str())])
            .await
    }

    /// 获取某一节的内容（活动列表）
    pub async fn section(
        &self,
        session: &Session,
        book_code: &str,
        chapter_number: u32,
        section_number: u32,
    ) -> AppResult<Value> {
        let url = self.section_url(book_code, chapter_number, section_number);
        self.http
            .get_json(&url, &[("auth_token", session.token.as_str())])
            .await
    }

    /// 提交活动的某一部分
    pub async fn submit_activity(&self, activity_id: &str, payload: &Value) -> AppResult<HttpReply> {
        let url = self.activity_url(activity_id);
        debug!("提交 Payload: {}", Self::redact_payload(payload));
        self.http
            .post_json(&url, payload, self.browser_headers())
            .await
    }

    pub fn section_url(&self, book_code: &str, chapter_number: u32, section_number: u32) -> String {
        format!(
            "{}/zybook/{}/chapter/{}/section/{}",
            self.api_base_url,
            utf8_percent_encode(book_code, PATH_SEGMENT),
            chapter_number,
            section_number
        )
    }

    pub fn activity_url(&self, activity_id: &str) -> String {
        format!("{}/content_resource/{}/activity", self.api_base_url, activity_id)
    }

    /// 用于日志的 payload 副本，auth_token 只保留前缀
    fn redact_payload(payload: &Value) -> Value {
        let mut redacted = payload.clone();
        if let Some(token) = redacted.get_mut("auth_token") {
            if let Some(raw) = token.as_str() {
                *token = Value::String(logging::mask(raw));
            }
        }
        redacted
    }

    /// 模拟浏览器的请求头
    fn browser_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(origin) = HeaderValue::from_str(&self.web_url) {
            headers.insert(ORIGIN, origin);
        }
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers
    }

    /// 检查 API 响应是否成功（`success == true`）
    pub fn is_success_response(result: &Value) -> bool {
        result
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// 检查响应是否明确报告失败（`success == false`）
    pub fn is_explicit_failure(result: &Value) -> bool {
        result.get("success").and_then(Value::as_bool) == Some(false)
    }
}

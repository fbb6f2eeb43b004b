//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"发请求"的能力

use crate::error::{AppError, AppResult};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

/// 原始响应（状态码 + 响应体）
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 响应体按 JSON 解析，失败返回 None
    pub fn json(&self) -> Option<JsonValue> {
        serde_json::from_str(&self.body).ok()
    }
}

/// HTTP 执行器
///
/// 职责：
/// - 持有唯一的 reqwest Client
/// - 把传输层失败统一转换为 `AppError::Network`
/// - 不认识书 / 章节 / 活动
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// 创建执行器，`timeout` 为单个请求的超时
    pub fn new(timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::network("client", e))?;
        Ok(Self { client })
    }

    /// GET 并返回文本，非 2xx 视为读取失败
    pub async fn get_text(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::network(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(url, e))?;

        debug!("GET {} -> {} ({} 字节)", url, status, body.len());

        if !status.is_success() {
            return Err(AppError::fetch_rejected(url, format!("HTTP {}", status)));
        }
        Ok(body)
    }

    /// GET 并按 JSON 解析
    ///
    /// 非 2xx 但响应体是 JSON 时照常返回，由调用方根据 `success` 字段判断。
    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> AppResult<JsonValue> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::network(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(url, e))?;

        debug!("GET {} -> {}", url, status);

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => {
                Err(AppError::fetch_rejected(url, format!("HTTP {}", status)))
            }
            Err(e) => Err(AppError::decode(url, e)),
        }
    }

    /// POST JSON，不检查状态码
    pub async fn post_json(
        &self,
        url: &str,
        body: &JsonValue,
        headers: HeaderMap,
    ) -> AppResult<HttpReply> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::network(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(url, e))?;

        debug!("POST {} -> {}", url, status);

        Ok(HttpReply { status, body })
    }
}

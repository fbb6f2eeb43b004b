//! build key 获取服务 - 业务能力层
//!
//! build key 发布在前端首页的一个 meta 标签里：
//! `<meta name="zybooks-web/config/environment" content="%7B%22APP%22...">`
//! content 经 URL 编码的 JSON，路径 `APP.BUILDKEY`。

use crate::clients::ZyClient;
use crate::error::{AppError, AppResult};
use crate::models::BuildKey;
use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

/// 存放前端配置的 meta 标签 name
pub const CONFIG_META_NAME: &str = "zybooks-web/config/environment";

const BUILD_KEY_POINTER: &str = "/APP/BUILDKEY";
const BUILD_KEY_PATH: &str = "APP.BUILDKEY";

pub struct BuildKeyService;

impl BuildKeyService {
    pub fn new() -> Self {
        Self
    }

    /// 读取首页并提取 build key，不重试
    pub async fn fetch_build_key(&self, client: &ZyClient) -> AppResult<BuildKey> {
        let html = client.landing_page().await?;
        let key = Self::extract_build_key(&html, client.web_url())?;
        info!("✓ 已获取 build key");
        Ok(key)
    }

    /// 从首页 HTML 中提取 build key
    ///
    /// # 参数
    /// - `html`: 首页 HTML
    /// - `source_url`: 页面地址（仅用于错误信息）
    pub fn extract_build_key(html: &str, source_url: &str) -> AppResult<BuildKey> {
        let not_found = || AppError::ConfigNotFound {
            url: source_url.to_string(),
        };

        let selector = Selector::parse(&format!(r#"meta[name="{}"]"#, CONFIG_META_NAME))
            .map_err(|_| not_found())?;
        let document = Html::parse_document(html);
        let content = document
            .select(&selector)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .ok_or_else(not_found)?;

        let decoded = percent_decode_str(content).decode_utf8_lossy();
        debug!("配置标签解码后长度: {}", decoded.len());

        let config: JsonValue =
            serde_json::from_str(&decoded).map_err(|e| AppError::decode(source_url, e))?;

        config
            .pointer(BUILD_KEY_POINTER)
            .and_then(JsonValue::as_str)
            .filter(|key| !key.is_empty())
            .map(BuildKey::new)
            .ok_or_else(|| AppError::KeyNotFound {
                path: BUILD_KEY_PATH.to_string(),
            })
    }
}

impl Default for BuildKeyService {
    fn default() -> Self {
        Self::new()
    }
}

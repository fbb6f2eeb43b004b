//! 内容树遍历服务 - 业务能力层
//!
//! 只负责"读取一层内容"能力：书籍列表、章节结构、某一节的活动。
//! 按服务端返回顺序输出，不排序、不去重。

use crate::clients::ZyClient;
use crate::error::{AppError, AppResult};
use crate::models::{Activity, Book, Session, Term};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

pub struct ContentWalker;

impl ContentWalker {
    pub fn new() -> Self {
        Self
    }

    /// 用户可访问的所有书（未过滤角色）
    pub async fn list_books(&self, client: &ZyClient, session: &Session) -> AppResult<Vec<Book>> {
        let response = client.books(session).await?;
        let books: Vec<Book> = Self::extract_list(&response, "/items/zybooks", "books", true)?;
        debug!("获取到 {} 本书", books.len());
        Ok(books)
    }

    /// 只保留学生身份的书，保持原顺序
    pub fn eligible_books(books: Vec<Book>) -> Vec<Book> {
        books.into_iter().filter(Book::is_eligible).collect()
    }

    /// 一本书的 学期 → 章 → 节 结构
    pub async fn list_chapters(
        &self,
        client: &ZyClient,
        session: &Session,
        book_code: &str,
    ) -> AppResult<Vec<Term>> {
        let response = client.chapters(session, book_code).await?;
        Self::extract_list(&response, "/zybooks", book_code, true)
    }

    /// 某一节下的活动列表
    ///
    /// 该接口不一定携带 `success` 字段，只有明确为 false 时才视为失败。
    pub async fn list_activities(
        &self,
        client: &ZyClient,
        session: &Session,
        book_code: &str,
        chapter_number: u32,
        section_number: u32,
    ) -> AppResult<Vec<Activity>> {
        let response = client
            .section(session, book_code, chapter_number, section_number)
            .await?;
        let unit = format!("{} {}.{}", book_code, chapter_number, section_number);
        Self::extract_list(&response, "/section/content_resources", &unit, false)
    }

    /// 校验 success 并反序列化 `pointer` 处的数组
    fn extract_list<T: DeserializeOwned>(
        response: &JsonValue,
        pointer: &str,
        unit: &str,
        require_success: bool,
    ) -> AppResult<Vec<T>> {
        let rejected = if require_success {
            !ZyClient::is_success_response(response)
        } else {
            ZyClient::is_explicit_failure(response)
        };
        if rejected {
            return Err(AppError::fetch_rejected(unit, "success != true"));
        }

        let items = response
            .pointer(pointer)
            .ok_or_else(|| AppError::fetch_rejected(unit, format!("响应缺少 {}", pointer)))?;

        serde_json::from_value(items.clone()).map_err(|e| AppError::decode(unit, e))
    }
}

impl Default for ContentWalker {
    fn default() -> Self {
        Self::new()
    }
}

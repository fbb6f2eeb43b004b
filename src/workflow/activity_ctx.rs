//! 活动处理上下文
//!
//! 封装"我正在处理哪本书哪一节的第几个活动"这一信息

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct ActivityCtx {
    pub book_code: String,
    pub chapter_number: u32,
    pub section_number: u32,

    /// 活动在本节中的序号（从1开始，仅用于日志显示）
    pub activity_index: usize,
}

impl ActivityCtx {
    pub fn new(
        book_code: impl Into<String>,
        chapter_number: u32,
        section_number: u32,
        activity_index: usize,
    ) -> Self {
        Self {
            book_code: book_code.into(),
            chapter_number,
            section_number,
            activity_index,
        }
    }
}

impl Display for ActivityCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}.{} 活动#{}]",
            self.book_code, self.chapter_number, self.section_number, self.activity_index
        )
    }
}

//! 内容树数据模型：书 → 学期 → 章 → 节 → 活动

use serde::{Deserialize, Deserializer};
use std::fmt;

/// 不可提交的纯展示类活动
pub const HTML_ACTIVITY_TYPE: &str = "html";

/// 用户在一本书中的角色
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BookRole {
    Student,
    Instructor,
    Other(String),
}

impl From<String> for BookRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Student" => BookRole::Student,
            "Instructor" => BookRole::Instructor,
            _ => BookRole::Other(value),
        }
    }
}

impl Default for BookRole {
    fn default() -> Self {
        BookRole::Other(String::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    #[serde(rename = "zybook_code")]
    pub code: String,
    #[serde(rename = "user_zybook_role", default)]
    pub role: BookRole,
}

impl Book {
    /// 只有学生身份的书才允许遍历
    pub fn is_eligible(&self) -> bool {
        self.role == BookRole::Student
    }
}

/// `/zybooks` 接口返回的顶层条目，内含章节列表
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub number: u32,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parts: Option<u32>,
}

impl Activity {
    pub fn part_count(&self) -> u32 {
        self.parts.unwrap_or(0)
    }

    pub fn is_submittable(&self) -> bool {
        self.kind != HTML_ACTIVITY_TYPE
    }

    /// 需要发送的请求数：`parts == 0` 视为只有第 0 部分
    pub fn effective_parts(&self) -> u32 {
        self.part_count().max(1)
    }
}

/// 接受字符串或整数形式的 id
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Visitor;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_role_parsing() {
        let books: Vec<Book> = serde_json::from_value(json!([
            {"zybook_code": "ABC123", "user_zybook_role": "Student"},
            {"zybook_code": "DEF456", "user_zybook_role": "Instructor"},
            {"zybook_code": "GHI789", "user_zybook_role": "TA"},
            {"zybook_code": "JKL000"}
        ]))
        .unwrap();

        assert_eq!(books[0].role, BookRole::Student);
        assert_eq!(books[1].role, BookRole::Instructor);
        assert_eq!(books[2].role, BookRole::Other("TA".to_string()));
        assert!(books[0].is_eligible());
        assert!(!books[1].is_eligible());
        assert!(!books[3].is_eligible());
    }

    #[test]
    fn test_activity_id_string_or_number() {
        let activities: Vec<Activity> = serde_json::from_value(json!([
            {"id": 999, "type": "challenge", "parts": 2},
            {"id": "1000", "type": "html"}
        ]))
        .unwrap();

        assert_eq!(activities[0].id, "999");
        assert_eq!(activities[1].id, "1000");
        assert_eq!(activities[1].part_count(), 0);
    }

    #[test]
    fn test_zero_parts_means_one_request() {
        let single = Activity {
            id: "1".to_string(),
            kind: "multiple_choice".to_string(),
            parts: Some(0),
        };
        let multi = Activity {
            parts: Some(3),
            ..single.clone()
        };
        let missing = Activity {
            parts: None,
            ..single.clone()
        };

        assert_eq!(single.effective_parts(), 1);
        assert_eq!(multi.effective_parts(), 3);
        assert_eq!(missing.effective_parts(), 1);
    }

    #[test]
    fn test_html_is_not_submittable() {
        let activity = Activity {
            id: "5".to_string(),
            kind: "html".to_string(),
            parts: Some(1),
        };
        assert!(!activity.is_submittable());
    }

    #[test]
    fn test_term_chapter_section_tree() {
        let terms: Vec<Term> = serde_json::from_value(json!([
            {"chapters": [
                {"number": 1, "sections": [{"number": 1}, {"number": 2}]},
                {"number": 2}
            ]}
        ]))
        .unwrap();

        assert_eq!(terms[0].chapters.len(), 2);
        assert_eq!(terms[0].chapters[0].sections[1].number, 2);
        assert!(terms[0].chapters[1].sections.is_empty());
    }
}

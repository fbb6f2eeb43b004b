#![allow(dead_code)]

use async_trait::async_trait;
use autobookz::{Activity, ActivityCtx, ActivityOutcome, AppError, Book, Config, FailedUnit, ProgressSink};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN: &str = "tok-123456";
pub const USER_ID: u64 = 42;
pub const BUILD_KEY: &str = "bk-abcdef";

/// 记录所有回调的 sink
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub books: Vec<String>,
    pub activities: Vec<(String, u32, u32, String, ActivityOutcome)>,
    pub failures: Vec<(FailedUnit, String)>,
}

impl RecordingSink {
    pub fn activity_ids(&self) -> Vec<&str> {
        self.activities.iter().map(|a| a.3.as_str()).collect()
    }
}

#[async_trait]
impl ProgressSink for RecordingSink {
    async fn book_started(&mut self, book: &Book) {
        self.books.push(book.code.clone());
    }

    async fn activity_finished(&mut self, ctx: &ActivityCtx, activity: &Activity, outcome: ActivityOutcome) {
        self.activities.push((
            ctx.book_code.clone(),
            ctx.chapter_number,
            ctx.section_number,
            activity.id.clone(),
            outcome,
        ));
    }

    async fn unit_failed(&mut self, unit: &FailedUnit, error: &AppError) {
        self.failures.push((unit.clone(), error.to_string()));
    }
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        api_base_url: format!("{}/v1", server.uri()),
        web_url: server.uri(),
        email: "student@example.edu".to_string(),
        password: "secret".to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn landing_page(build_key: &str) -> String {
    format!(
        r#"<html><head><meta name="zybooks-web/config/environment" content="%7B%22APP%22%3A%7B%22BUILDKEY%22%3A%22{}%22%7D%7D"></head><body></body></html>"#,
        build_key
    )
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "session": {"auth_token": TOKEN},
            "user": {"user_id": USER_ID}
        })))
        .mount(server)
        .await;
}

pub async fn mount_landing_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(landing_page(BUILD_KEY)))
        .mount(server)
        .await;
}

pub async fn mount_books(server: &MockServer, books: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/user/{}/items", USER_ID)))
        .and(query_param("auth_token", TOKEN))
        .and(query_param("items", r#"["zybooks"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "items": {"zybooks": books}
        })))
        .mount(server)
        .await;
}

/// 每章的节号列表 → 章节结构
pub async fn mount_chapters(server: &MockServer, book_code: &str, chapters: &[(u32, Vec<u32>)]) {
    let chapters: Vec<Value> = chapters
        .iter()
        .map(|(number, sections)| {
            let sections: Vec<Value> = sections.iter().map(|s| json!({"number": s})).collect();
            json!({"number": number, "sections": sections})
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/v1/zybooks"))
        .and(query_param("zybooks", format!(r#"["{}"]"#, book_code)))
        .and(query_param("auth_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "zybooks": [{"chapters": chapters}]
        })))
        .mount(server)
        .await;
}

pub async fn mount_section(
    server: &MockServer,
    book_code: &str,
    chapter: u32,
    section: u32,
    resources: Value,
) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/v1/zybook/{}/chapter/{}/section/{}",
            book_code, chapter, section
        )))
        .and(query_param("auth_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "section": {"content_resources": resources}
        })))
        .mount(server)
        .await;
}

pub async fn mount_submit_ok(server: &MockServer, activity_id: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/content_resource/{}/activity", activity_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(server)
        .await;
}

/// 所有活动提交请求，按到达顺序
pub async fn submissions(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path().contains("/content_resource/"))
        .collect()
}

pub fn body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

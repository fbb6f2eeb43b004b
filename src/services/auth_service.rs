//! 登录服务 - 业务能力层
//!
//! 用邮箱和密码换取会话 token 与用户 id

use crate::clients::ZyClient;
use crate::error::{AppError, AppResult};
use crate::models::Session;
use serde_json::Value as JsonValue;
use tracing::info;

pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    /// 登录并返回会话
    ///
    /// `success` 不为 true 或缺少 token / user_id 时返回 `AuthRejected`
    pub async fn sign_in(&self, client: &ZyClient, email: &str, password: &str) -> AppResult<Session> {
        let response = client.sign_in(email, password).await?;
        let session = Self::parse_session(&response)?;
        info!("✓ 登录成功，用户 ID: {}", session.user_id);
        Ok(session)
    }

    /// 从登录响应中提取会话
    pub fn parse_session(response: &JsonValue) -> AppResult<Session> {
        if !ZyClient::is_success_response(response) {
            let message = response
                .pointer("/error/message")
                .and_then(JsonValue::as_str)
                .unwrap_or("success != true")
                .to_string();
            return Err(AppError::AuthRejected { message });
        }

        let token = response
            .pointer("/session/auth_token")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| AppError::AuthRejected {
                message: "响应缺少 session.auth_token".to_string(),
            })?;

        let user_id = match response.pointer("/user/user_id") {
            Some(JsonValue::String(id)) => id.clone(),
            Some(JsonValue::Number(id)) => id.to_string(),
            _ => {
                return Err(AppError::AuthRejected {
                    message: "响应缺少 user.user_id".to_string(),
                })
            }
        };

        Ok(Session {
            token: token.to_string(),
            user_id,
        })
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

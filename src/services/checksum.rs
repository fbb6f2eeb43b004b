//! 请求签名
//!
//! `__cs__ = md5("content_resource/{id}/activity" + timestamp + token + buildkey)`，
//! 以小写十六进制输出。MD5 由服务端决定，这里不承担安全用途。

use chrono::{Local, NaiveDateTime};
use md5::{Digest, Md5};

/// 提交时间戳格式：精确到分钟，固定 `.000` 后缀，无时区
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M.000";

/// 计算单个活动的校验和
pub fn sign(activity_id: &str, timestamp: &str, token: &str, build_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(format!("content_resource/{}/activity", activity_id).as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(token.as_bytes());
    hasher.update(build_key.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// 本地当前时间的提交时间戳
pub fn current_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

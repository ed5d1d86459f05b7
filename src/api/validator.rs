//! 响应结构校验

use super::types::ApiResponse;
use crate::error::PollError;
use serde_json::Value;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// 检查接口响应是否符合文档约定
///
/// 只检查结构，不修改内容：顶层必须是对象，`homeworks` 必须存在且为数组。
/// `current_date` 是可选的，缺失时由调用方回退到本地时间。
pub fn validate(response: Value) -> Result<ApiResponse, PollError> {
    let Value::Object(mut map) = response else {
        return Err(PollError::Shape);
    };

    let homeworks = match map.remove(HOMEWORKS_KEY) {
        None => return Err(PollError::MissingKey(HOMEWORKS_KEY)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(PollError::Type { key: HOMEWORKS_KEY }),
    };

    let current_date = map.get(CURRENT_DATE_KEY).and_then(Value::as_i64);

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

//! 把一条作业记录翻译成通知文本

use super::types::HomeworkStatus;
use crate::error::PollError;
use serde_json::Value;

pub const STATUS_KEY: &str = "status";
pub const NAME_KEY: &str = "homework_name";

/// 生成状态变更通知文本
///
/// 记录缺少 `status` 或 `homework_name` 时返回 `MissingField`，
/// 状态值不在已知集合内时返回 `UnknownStatus`。
pub fn interpret(record: &Value) -> Result<String, PollError> {
    let status = record.get(STATUS_KEY).ok_or(PollError::MissingField(STATUS_KEY))?;
    let name = record.get(NAME_KEY).ok_or(PollError::MissingField(NAME_KEY))?;

    let status = status
        .as_str()
        .and_then(|s| s.parse::<HomeworkStatus>().ok())
        .ok_or_else(|| PollError::UnknownStatus(display_value(status)))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        display_value(name),
        status.verdict()
    ))
}

/// 字符串原样输出，其他 JSON 值按紧凑格式输出
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

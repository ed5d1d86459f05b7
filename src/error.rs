//! 错误类型 - 单次轮询周期内可能出现的全部失败
//!
//! 除 [`ConfigError`] 外，所有错误都在轮询循环边界被捕获并转成诊断消息，
//! 不会终止进程。

use thiserror::Error;

/// 单次轮询周期的失败
#[derive(Debug, Error)]
pub enum PollError {
    /// 网络请求本身未完成（DNS、连接被拒、超时）
    #[error("Эндпоинт недоступен: {0}")]
    Transport(String),

    /// 响应状态码不是 200
    #[error("API вернул код {0}, ожидался 200")]
    StatusCode(u16),

    /// 响应体不是合法 JSON
    #[error("Проблема в переводе в json: {0}")]
    Decode(String),

    /// 顶层不是 JSON 对象
    #[error("Ответ API не является словарем")]
    Shape,

    /// 缺少必需的键
    #[error("Нет ключа {0}")]
    MissingKey(&'static str),

    /// 键存在但类型不对
    #[error("{key} не является списком")]
    Type { key: &'static str },

    /// 作业记录缺少字段
    #[error("В домашней работе нет поля {0}")]
    MissingField(&'static str),

    /// 未知的作业状态
    #[error("Неизвестный статус домашней работы: {0}")]
    UnknownStatus(String),
}

impl PollError {
    /// 错误种类名，用于结构化日志
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::StatusCode(_) => "status_code",
            Self::Decode(_) => "decode",
            Self::Shape => "shape",
            Self::MissingKey(_) => "missing_key",
            Self::Type { .. } => "type",
            Self::MissingField(_) => "missing_field",
            Self::UnknownStatus(_) => "unknown_status",
        }
    }
}

/// 启动配置错误（唯一的致命错误）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Отсутствует обязательная переменная окружения: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

//! Homework Status Bot - 轮询 Practicum 作业状态并把变化推送到 Telegram

pub mod api;
pub mod config;
pub mod error;
pub mod notification;
pub mod watcher;

pub use api::{ApiResponse, HomeworkStatus, StatusClient, StatusClientConfig, StatusSource};
pub use config::{Credentials, Settings};
pub use error::{ConfigError, PollError};
pub use notification::{MessageSender, Notifier, SendResult, TelegramConfig, TelegramSender};
pub use watcher::{CycleOutcome, HomeworkWatcher, NotificationState, PollCursor};

//! 通知层 - 发送 trait、尽力而为的 Notifier 与具体渠道

pub mod channel;
pub mod channels;

pub use channel::{MessageSender, Notifier, SendResult};
pub use channels::{TelegramConfig, TelegramSender};

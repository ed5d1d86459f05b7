//! 通知发送 trait 与尽力而为的 Notifier

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error};

/// 消息发送能力：按 chat id 发送纯文本
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 发送失败（已记录日志）
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// 通知器 - 绑定目标 chat，发送失败只记录日志，不向调用方传播
pub struct Notifier<M> {
    sender: M,
    chat_id: String,
}

impl<M: MessageSender> Notifier<M> {
    pub fn new(sender: M, chat_id: impl Into<String>) -> Self {
        Self {
            sender,
            chat_id: chat_id.into(),
        }
    }

    pub fn sender(&self) -> &M {
        &self.sender
    }

    pub async fn notify(&self, text: &str) -> SendResult {
        match self.sender.send(&self.chat_id, text).await {
            Ok(()) => {
                debug!(channel = self.sender.name(), chat_id = %self.chat_id, "Сообщение отправлено.");
                SendResult::Sent
            }
            Err(e) => {
                error!(channel = self.sender.name(), chat_id = %self.chat_id, "Сбой в отправке сообщения: {:#}", e);
                SendResult::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    struct Recording {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl MessageSender for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat_id.to_string(), text.to_string()));
            if self.fail {
                Err(anyhow!("chat not found"))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_notify_sends_to_bound_chat() {
        let notifier = Notifier::new(Recording { sent: Mutex::new(vec![]), fail: false }, "42");
        assert_eq!(notifier.notify("hello").await, SendResult::Sent);

        let sent = notifier.sender().sent.lock().unwrap().clone();
        assert_eq!(sent, vec![("42".to_string(), "hello".to_string())]);
    }

    #[tokio::test]
    async fn test_notify_swallows_failure() {
        let notifier = Notifier::new(Recording { sent: Mutex::new(vec![]), fail: true }, "42");
        let result = notifier.notify("hello").await;
        assert_eq!(result, SendResult::Failed("chat not found".to_string()));
        assert!(!result.is_sent());
    }
}

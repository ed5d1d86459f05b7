//! Telegram Bot API 渠道

use crate::notification::channel::MessageSender;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Telegram 渠道配置
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API 基础 URL（如 https://api.telegram.org）
    pub api_base: String,
    /// Bot token
    pub bot_token: String,
    /// 超时时间
    pub timeout: Duration,
}

/// sendMessage 请求载荷
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API 响应
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// 通过 Bot API 的 sendMessage 发送消息
#[derive(Debug)]
pub struct TelegramSender {
    client: Client,
    config: TelegramConfig,
}

impl TelegramSender {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        if config.bot_token.is_empty() {
            return Err(anyhow!("bot_token is required"));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessagePayload { chat_id, text })
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e.without_url()))?;

        let status = response.status();
        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse response (HTTP {}): {}", status, e.without_url()))?;

        if body.ok {
            Ok(())
        } else {
            Err(anyhow!(body
                .description
                .unwrap_or_else(|| format!("Telegram returned HTTP {}", status))))
        }
    }
}

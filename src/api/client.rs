//! 作业状态接口客户端

use crate::error::PollError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 状态数据来源
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// 查询 `from_date` 之后的作业状态，返回解码后的原始 JSON
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError>;
}

/// 客户端配置
#[derive(Debug, Clone)]
pub struct StatusClientConfig {
    pub endpoint: String,
    pub api_token: String,
    pub timeout: Duration,
}

/// Practicum 作业状态接口客户端，不做重试
#[derive(Debug)]
pub struct StatusClient {
    client: Client,
    config: StatusClientConfig,
}

impl StatusClient {
    pub fn new(config: StatusClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, PollError> {
        debug!(endpoint = %self.config.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.config.endpoint)
            .header("Authorization", format!("OAuth {}", self.config.api_token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::StatusCode(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| PollError::Decode(e.to_string()))
    }
}

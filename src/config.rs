//! 启动配置 - 凭据从环境变量读取，其余参数来自命令行

use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;

/// Practicum 作业状态接口
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API 基础 URL
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// 默认轮询间隔（秒）
pub const RETRY_PERIOD_SECS: u64 = 600;

/// 默认 HTTP 超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// 三项必需凭据，进程生命周期内不可变
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// 从进程环境加载（先读取工作目录下的 `.env`）
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过任意查找函数加载，空白值视为缺失
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| {
            match lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(value) => value,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let api_token = read(PRACTICUM_TOKEN_VAR);
        let bot_token = read(TELEGRAM_TOKEN_VAR);
        let chat_id = read(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Self {
            api_token,
            bot_token,
            chat_id,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"***")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// 运行参数
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub telegram_api: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub from_date: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api: DEFAULT_TELEGRAM_API.to_string(),
            interval: Duration::from_secs(RETRY_PERIOD_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            from_date: 0,
        }
    }
}

//! Homework Status Bot CLI
//!
//! 每隔固定间隔查询 Practicum 作业状态，状态变化时发到 Telegram

use anyhow::Result;
use clap::Parser;
use homework_status_bot::config::{
    Credentials, Settings, DEFAULT_ENDPOINT, DEFAULT_TELEGRAM_API, DEFAULT_TIMEOUT_SECS,
    RETRY_PERIOD_SECS,
};
use homework_status_bot::{
    CycleOutcome, HomeworkWatcher, Notifier, StatusClient, StatusClientConfig, TelegramConfig,
    TelegramSender,
};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Homework Status Bot - 轮询作业状态并推送到 Telegram")]
#[command(version)]
struct Cli {
    /// 轮询间隔（秒）
    #[arg(long, short, default_value_t = RETRY_PERIOD_SECS)]
    interval: u64,

    /// 初始查询游标（epoch 秒）
    #[arg(long, default_value_t = 0)]
    from_date: i64,

    /// 作业状态接口 URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Telegram Bot API 基础 URL
    #[arg(long, default_value = DEFAULT_TELEGRAM_API)]
    telegram_api: String,

    /// HTTP 请求超时（秒）
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// 只执行一个周期后退出
    #[arg(long)]
    once: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            endpoint: self.endpoint.clone(),
            telegram_api: self.telegram_api.clone(),
            interval: Duration::from_secs(self.interval),
            timeout: Duration::from_secs(self.timeout),
            from_date: self.from_date,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_status_bot=debug,homework_bot=debug"));

    fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    // 凭据缺失时在创建任何 HTTP 客户端之前退出
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            error!("Работа программы завершена");
            std::process::exit(1);
        }
    };
    let settings = cli.settings();

    let client = StatusClient::new(StatusClientConfig {
        endpoint: settings.endpoint.clone(),
        api_token: credentials.api_token.clone(),
        timeout: settings.timeout,
    })?;
    let sender = TelegramSender::new(TelegramConfig {
        api_base: settings.telegram_api.clone(),
        bot_token: credentials.bot_token.clone(),
        timeout: settings.timeout,
    })?;

    info!(
        endpoint = %settings.endpoint,
        interval_secs = settings.interval.as_secs(),
        from_date = settings.from_date,
        "Homework Status Bot 启动"
    );

    let mut watcher = HomeworkWatcher::new(
        client,
        Notifier::new(sender, credentials.chat_id.clone()),
        settings.interval,
    )
    .with_from_date(settings.from_date);

    if cli.once {
        let outcome = watcher.run_cycle().await;
        match &outcome {
            CycleOutcome::Failed { error, .. } => info!(kind = error.kind(), "Single cycle finished with failure"),
            other => info!(outcome = ?other, "Single cycle finished"),
        }
        return Ok(());
    }

    watcher.run().await;
    Ok(())
}

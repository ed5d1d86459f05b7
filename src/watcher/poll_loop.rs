//! 轮询循环 - 查询、校验、解释、去重、通知

use super::state::{NotificationState, PollCursor};
use crate::api::{interpret, validate, StatusSource};
use crate::error::PollError;
use crate::notification::{MessageSender, Notifier, SendResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 诊断消息前缀
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// 单个周期的结果
#[derive(Debug)]
pub enum CycleOutcome {
    /// 响应里没有作业记录
    NoUpdate,
    /// 状态消息与上次相同，未发送
    Unchanged,
    /// 状态变化，已发送（或尝试发送）
    Notified(SendResult),
    /// 周期失败；`notified` 为 `None` 表示相同诊断已发送过，本次被抑制
    Failed {
        error: PollError,
        notified: Option<SendResult>,
    },
}

/// 构造失败诊断文本
pub fn failure_message(error: &PollError) -> String {
    format!("{}: {}", FAILURE_PREFIX, error)
}

fn wall_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 作业状态监控器
///
/// 独占游标和去重状态，一个周期跑完才开始下一个。
pub struct HomeworkWatcher<S, M> {
    source: S,
    notifier: Notifier<M>,
    cursor: PollCursor,
    state: NotificationState,
    interval: Duration,
    clock: fn() -> i64,
}

impl<S: StatusSource, M: MessageSender> HomeworkWatcher<S, M> {
    pub fn new(source: S, notifier: Notifier<M>, interval: Duration) -> Self {
        Self {
            source,
            notifier,
            cursor: PollCursor::new(0),
            state: NotificationState::new(),
            interval,
            clock: wall_clock,
        }
    }

    /// 设置初始游标
    pub fn with_from_date(mut self, from_date: i64) -> Self {
        self.cursor = PollCursor::new(from_date);
        self
    }

    /// 替换时钟（测试用）
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    pub fn notifier(&self) -> &Notifier<M> {
        &self.notifier
    }

    /// 无限轮询，永不返回
    pub async fn run(&mut self) {
        info!(interval_secs = self.interval.as_secs(), "Homework watcher started");
        loop {
            self.run_cycle().await;
            sleep(self.interval).await;
        }
    }

    /// 执行一个完整周期（不含休眠）
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.check().await {
            Ok(outcome) => outcome,
            Err(err) => self.report_failure(err).await,
        }
    }

    async fn check(&mut self) -> Result<CycleOutcome, PollError> {
        let raw = self.source.fetch(self.cursor.value()).await?;
        let response = validate(raw)?;

        let Some(record) = response.latest() else {
            debug!(from_date = self.cursor.value(), "Отсутствие в ответе новых статусов.");
            return Ok(CycleOutcome::NoUpdate);
        };

        let message = interpret(record)?;
        if !self.state.is_new(&message) {
            debug!(message = %message, "Status unchanged, skipping notification");
            return Ok(CycleOutcome::Unchanged);
        }

        let result = self.notifier.notify(&message).await;
        self.state.record(message.as_str());
        self.cursor.advance(response.current_date, (self.clock)());
        info!(
            cursor = self.cursor.value(),
            sent = result.is_sent(),
            message = %message,
            "Homework status changed"
        );

        Ok(CycleOutcome::Notified(result))
    }

    async fn report_failure(&mut self, err: PollError) -> CycleOutcome {
        let message = failure_message(&err);
        error!(kind = err.kind(), "{}", message);

        let notified = if self.state.is_new(&message) {
            let result = self.notifier.notify(&message).await;
            self.state.record(message);
            Some(result)
        } else {
            debug!("Repeated failure, notification suppressed");
            None
        };

        CycleOutcome::Failed { error: err, notified }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct Scripted(Mutex<VecDeque<Result<Value, PollError>>>);

    #[async_trait]
    impl StatusSource for Scripted {
        async fn fetch(&self, _from_date: i64) -> Result<Value, PollError> {
            self.0.lock().unwrap().pop_front().expect("script exhausted")
        }
    }

    #[derive(Default)]
    struct Inbox(Mutex<Vec<String>>);

    #[async_trait]
    impl MessageSender for Inbox {
        fn name(&self) -> &str {
            "inbox"
        }

        async fn send(&self, _chat_id: &str, text: &str) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn watcher(script: Vec<Result<Value, PollError>>) -> HomeworkWatcher<Scripted, Inbox> {
        HomeworkWatcher::new(
            Scripted(Mutex::new(script.into())),
            Notifier::new(Inbox::default(), "1"),
            Duration::from_secs(600),
        )
        .with_clock(|| 7777)
    }

    fn sent(w: &HomeworkWatcher<Scripted, Inbox>) -> Vec<String> {
        w.notifier().sender().0.lock().unwrap().clone()
    }

    #[test]
    fn test_failure_message_format() {
        assert_eq!(
            failure_message(&PollError::MissingKey("homeworks")),
            "Сбой в работе программы: Нет ключа homeworks"
        );
    }

    #[tokio::test]
    async fn test_empty_homeworks_is_no_update() {
        let mut w = watcher(vec![Ok(json!({"homeworks": [], "current_date": 5}))]);
        assert!(matches!(w.run_cycle().await, CycleOutcome::NoUpdate));
        assert!(sent(&w).is_empty());
        assert_eq!(w.cursor().value(), 0);
    }

    #[tokio::test]
    async fn test_cursor_falls_back_to_clock() {
        let mut w = watcher(vec![Ok(json!({"homeworks": [{"homework_name": "a", "status": "reviewing"}]}))]);
        assert!(matches!(w.run_cycle().await, CycleOutcome::Notified(SendResult::Sent)));
        assert_eq!(w.cursor().value(), 7777);
    }

    #[tokio::test]
    async fn test_unchanged_status_keeps_cursor() {
        let body = json!({"homeworks": [{"homework_name": "a", "status": "reviewing"}], "current_date": 10});
        let later = json!({"homeworks": [{"homework_name": "a", "status": "reviewing"}], "current_date": 20});
        let mut w = watcher(vec![Ok(body), Ok(later)]);

        w.run_cycle().await;
        assert_eq!(w.cursor().value(), 10);
        assert!(matches!(w.run_cycle().await, CycleOutcome::Unchanged));
        assert_eq!(w.cursor().value(), 10);
        assert_eq!(sent(&w).len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_failure_is_suppressed() {
        let mut w = watcher(vec![
            Err(PollError::StatusCode(500)),
            Err(PollError::StatusCode(500)),
            Err(PollError::StatusCode(502)),
        ]);

        assert!(matches!(
            w.run_cycle().await,
            CycleOutcome::Failed { notified: Some(SendResult::Sent), .. }
        ));
        assert!(matches!(
            w.run_cycle().await,
            CycleOutcome::Failed { notified: None, .. }
        ));
        assert!(matches!(
            w.run_cycle().await,
            CycleOutcome::Failed { notified: Some(_), .. }
        ));

        let messages = sent(&w);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with(FAILURE_PREFIX));
        assert!(messages[1].contains("502"));
    }

    #[tokio::test]
    async fn test_recovery_after_failure_notifies_status() {
        let record = json!({"homeworks": [{"homework_name": "hw", "status": "rejected"}], "current_date": 3});
        let mut w = watcher(vec![Err(PollError::Decode("eof".into())), Ok(record)]);

        w.run_cycle().await;
        assert!(matches!(w.run_cycle().await, CycleOutcome::Notified(_)));
        assert_eq!(sent(&w).len(), 2);
        assert_eq!(w.cursor().value(), 3);
    }

    #[tokio::test]
    async fn test_validation_and_interpretation_errors_are_cycle_failures() {
        let mut w = watcher(vec![
            Ok(json!({"homeworks": "x"})),
            Ok(json!({"homeworks": [{"homework_name": "hw", "status": "lost"}]})),
        ]);

        match w.run_cycle().await {
            CycleOutcome::Failed { error, .. } => assert!(matches!(error, PollError::Type { .. })),
            other => panic!("unexpected outcome: {:?}", other),
        }
        match w.run_cycle().await {
            CycleOutcome::Failed { error, .. } => assert!(matches!(error, PollError::UnknownStatus(_))),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(w.cursor().value(), 0);
    }
}

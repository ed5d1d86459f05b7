//! 轮询循环持有的内存状态：查询游标与最近一次通知

/// 下一次查询的时间下界（epoch 秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(from_date: i64) -> Self {
        Self(from_date)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// 优先使用服务端时间，没有时使用本地时间
    pub fn advance(&mut self, current_date: Option<i64>, now: i64) {
        self.0 = current_date.unwrap_or(now);
    }
}

/// 最近一次发送（或尝试发送）的消息，用于去重
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    last_message: Option<String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 与上一条消息不同才需要发送
    pub fn is_new(&self, message: &str) -> bool {
        self.last_message.as_deref() != Some(message)
    }

    pub fn record(&mut self, message: impl Into<String>) {
        self.last_message = Some(message.into());
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

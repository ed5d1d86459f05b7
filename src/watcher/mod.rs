//! Watcher 模块 - 作业状态轮询循环

pub mod poll_loop;
pub mod state;

pub use poll_loop::{failure_message, CycleOutcome, HomeworkWatcher, FAILURE_PREFIX};
pub use state::{NotificationState, PollCursor};

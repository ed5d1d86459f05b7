//! Practicum 作业状态接口 - 请求、结构校验、状态解释

pub mod client;
pub mod status;
pub mod types;
pub mod validator;

pub use client::{StatusClient, StatusClientConfig, StatusSource};
pub use status::interpret;
pub use types::{ApiResponse, HomeworkStatus};
pub use validator::validate;

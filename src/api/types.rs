//! 作业状态接口的数据类型

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 通过结构校验后的接口响应
///
/// `homeworks` 中的记录保持原始 JSON，字段级别的校验交给
/// [`interpret`](crate::api::interpret)。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub homeworks: Vec<Value>,
    /// 服务端时间戳，缺失或非整数时为 `None`
    pub current_date: Option<i64>,
}

impl ApiResponse {
    /// 最新一条作业记录
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// 作业审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// 面向用户的审核结论
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

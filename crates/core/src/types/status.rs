//! Project lifecycle status.
//!
//! Statuses are stored and exchanged with their Chinese display labels,
//! which the front end renders verbatim.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// 规划
    #[serde(rename = "规划")]
    Planning,
    /// 方案
    #[serde(rename = "方案")]
    Proposal,
    /// 设计
    #[serde(rename = "设计")]
    Design,
    /// 开发
    #[serde(rename = "开发")]
    Development,
    /// 测试
    #[serde(rename = "测试")]
    Testing,
    /// 已上
    #[serde(rename = "已上")]
    Launched,
    /// 暂停
    #[serde(rename = "暂停")]
    Paused,
}

impl ProjectStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Planning,
        Self::Proposal,
        Self::Design,
        Self::Development,
        Self::Testing,
        Self::Launched,
        Self::Paused,
    ];

    /// The wire label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "规划",
            Self::Proposal => "方案",
            Self::Design => "设计",
            Self::Development => "开发",
            Self::Testing => "测试",
            Self::Launched => "已上",
            Self::Paused => "暂停",
        }
    }

    /// Parse a wire label.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStatus`] for unknown labels.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus {
                value: s.to_owned(),
                allowed: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

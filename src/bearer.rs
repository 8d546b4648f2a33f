//! 承载配置与静态承载命名表。
//! Bearer configuration and the static bearer-naming table.

use crate::types::BearerId;
use std::time::Duration;

const RB_NAMES: [&str; 11] = [
    "SRB0", "SRB1", "SRB2", "DRB1", "DRB2", "DRB3", "DRB4", "DRB5", "DRB6", "DRB7", "DRB8",
];

/// Returns a human-readable label for a bearer, used in diagnostics.
///
/// 返回承载的可读名称，用于诊断。
pub fn rb_name(bearer: BearerId) -> &'static str {
    RB_NAMES
        .get(bearer.0 as usize)
        .copied()
        .unwrap_or("invalid bearer id")
}

/// Whether a bearer carries signalling or user data.
/// 承载类型：信令或用户数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerType {
    Srb,
    Drb,
}

/// The link-layer mode underneath the bearer.
/// 承载下层链路的模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlcMode {
    /// Acknowledged mode.
    Am,
    /// Unacknowledged mode.
    Um,
}

/// PDCP sequence number length.
/// PDCP 序列号长度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnLength {
    Bits12,
    Bits18,
}

impl SnLength {
    pub fn bits(self) -> u8 {
        match self {
            SnLength::Bits12 => 12,
            SnLength::Bits18 => 18,
        }
    }
}

/// Configuration handed to a protocol entity when a bearer is added.
///
/// The manager does not interpret any of these fields; it forwards the value
/// unchanged to the entity owning the connection.
///
/// 添加承载时交给协议实体的配置。管理器不解释这些字段，只是原样转发给该连接的实体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerConfig {
    pub bearer_type: BearerType,
    pub rlc_mode: RlcMode,
    pub sn_length: SnLength,
    /// `None` means SDUs are never discarded by timer.
    /// `None` 表示 SDU 永不因定时器而丢弃。
    pub discard_timer: Option<Duration>,
    pub t_reordering: Duration,
    pub status_report_required: bool,
}

impl BearerConfig {
    /// A default configuration for a signalling bearer.
    /// 信令承载的默认配置。
    pub fn srb() -> Self {
        Self {
            bearer_type: BearerType::Srb,
            rlc_mode: RlcMode::Am,
            sn_length: SnLength::Bits12,
            discard_timer: None,
            t_reordering: Duration::ZERO,
            status_report_required: false,
        }
    }

    /// A default configuration for a data bearer.
    /// 数据承载的默认配置。
    pub fn drb(rlc_mode: RlcMode) -> Self {
        Self {
            bearer_type: BearerType::Drb,
            rlc_mode,
            sn_length: SnLength::Bits18,
            discard_timer: Some(Duration::from_millis(100)),
            t_reordering: Duration::from_millis(50),
            status_report_required: rlc_mode == RlcMode::Am,
        }
    }
}

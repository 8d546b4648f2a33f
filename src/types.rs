//! 跨模块共享的基本标识类型。
//! Basic identifier types shared across modules.

use std::fmt;

/// Identifies one active connection. Supplied by the owning system, never
/// generated here.
///
/// 标识一个活跃连接。由所属系统提供，本库从不生成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u16);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl From<u16> for ConnectionId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Identifies a logical channel within one connection. Not globally unique.
///
/// 标识连接内的逻辑信道。仅在单个连接内唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BearerId(pub u32);

impl BearerId {
    /// Logical channel ids 0..=2 carry signalling radio bearers.
    /// 逻辑信道 0..=2 承载信令无线承载。
    pub const MAX_SRB: u32 = 2;

    /// Returns `true` for signalling bearers (SRB0..SRB2).
    /// 对信令承载（SRB0..SRB2）返回 `true`。
    pub fn is_srb(self) -> bool {
        self.0 <= Self::MAX_SRB
    }
}

impl fmt::Display for BearerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BearerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The direction(s) in which a protection mechanism applies.
/// 保护机制生效的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tx,
    Rx,
    TxRx,
}

impl Direction {
    pub fn includes_tx(self) -> bool {
        matches!(self, Direction::Tx | Direction::TxRx)
    }

    pub fn includes_rx(self) -> bool {
        matches!(self, Direction::Rx | Direction::TxRx)
    }
}

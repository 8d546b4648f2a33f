//! 协议实体接口及其面向的抽象能力。
//! The protocol entity contract and the abstract capabilities it is written against.
//!
//! A protocol entity holds the per-connection protocol state (ciphering,
//! integrity, sequencing). It knows nothing about which connection it belongs
//! to: it talks to the outside world only through the [`Sinks`] it receives in
//! [`ProtocolEntity::init`], and the adapters behind those sinks re-attach the
//! connection id.
//!
//! 协议实体持有每个连接的协议状态。它不知道自己属于哪个连接：只通过
//! [`ProtocolEntity::init`] 中得到的 [`Sinks`] 与外界交互，由这些接收端背后的适配器
//! 重新附加连接标识。

pub mod transparent;

pub use transparent::{BearerState, TransparentEntity};

use crate::{
    bearer::BearerConfig,
    error::Result,
    security::SecurityConfig,
    types::{BearerId, ConnectionId, Direction},
};
use bytes::Bytes;
use std::sync::Arc;

/// Downstream capability: the link layer as seen from one entity.
/// 下行能力：单个实体视角下的链路层。
pub trait LinkSink: Send + Sync {
    fn write_sdu(&self, bearer: BearerId, sdu: Bytes) -> Result<()>;
    fn discard_sdu(&self, bearer: BearerId, sn: u32) -> Result<()>;
    fn rb_is_um(&self, bearer: BearerId) -> bool;
    fn sdu_queue_is_full(&self, bearer: BearerId) -> bool;
}

/// Upstream capability: the control plane as seen from one entity.
///
/// The broadcast and paging callbacks are part of the contract because an
/// entity may be asked to deliver them, but a per-connection sink must reject
/// them.
///
/// 上行能力：单个实体视角下的控制面。广播与寻呼回调属于接口的一部分，
/// 但按连接的接收端必须拒绝它们。
pub trait ControlSink: Send + Sync {
    fn write_pdu(&self, bearer: BearerId, pdu: Bytes) -> Result<()>;
    fn write_pdu_bcch_bch(&self, pdu: Bytes) -> Result<()>;
    fn write_pdu_bcch_dlsch(&self, pdu: Bytes) -> Result<()>;
    fn write_pdu_pcch(&self, pdu: Bytes) -> Result<()>;
    fn get_rb_name(&self, bearer: BearerId) -> &'static str;
}

/// Upstream capability: the data adaptation layer as seen from one entity.
/// 上行能力：单个实体视角下的数据适配层。
pub trait DataSink: Send + Sync {
    fn write_pdu(&self, bearer: BearerId, pdu: Bytes) -> Result<()>;
}

/// The three capabilities handed to an entity at initialization.
/// 初始化时交给实体的三个能力。
#[derive(Clone)]
pub struct Sinks {
    pub link: Arc<dyn LinkSink>,
    pub control: Arc<dyn ControlSink>,
    pub data: Arc<dyn DataSink>,
}

impl std::fmt::Debug for Sinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sinks").finish_non_exhaustive()
    }
}

/// Per-connection protocol state machine.
///
/// All methods run to completion on the caller's thread. Timers and deferred
/// work, if any, belong to the implementation and must be released in
/// [`stop`](ProtocolEntity::stop).
///
/// 每个连接的协议状态机。所有方法都在调用者线程上执行完毕。
/// 定时器等延迟工作由实现自行管理，并必须在 [`stop`](ProtocolEntity::stop) 中释放。
pub trait ProtocolEntity: Send {
    /// Wires the entity's downstream and upstream targets.
    /// 连接实体的上下行目标。
    fn init(&mut self, sinks: Sinks);

    /// Releases timers and pending bookkeeping. Called once before the entity
    /// is destroyed.
    ///
    /// 释放定时器和挂起的状态。在实体销毁前调用一次。
    fn stop(&mut self);

    fn add_bearer(&mut self, bearer: BearerId, config: BearerConfig);

    /// Clears per-connection protocol counters without dropping bearers.
    /// 清除连接级协议计数器，但保留承载。
    fn reset(&mut self);

    fn config_security(&mut self, bearer: BearerId, config: SecurityConfig);
    fn enable_integrity(&mut self, bearer: BearerId, direction: Direction);
    fn enable_encryption(&mut self, bearer: BearerId, direction: Direction);

    /// A PDU received from the link layer.
    /// 从链路层收到的 PDU。
    fn write_pdu(&mut self, bearer: BearerId, pdu: Bytes);

    /// An SDU from an upper layer, to be transmitted.
    /// 来自上层、待发送的 SDU。
    fn write_sdu(&mut self, bearer: BearerId, sdu: Bytes);

    fn notify_delivery(&mut self, bearer: BearerId, sns: &[u32]);
    fn notify_failure(&mut self, bearer: BearerId, sns: &[u32]);
}

/// Creates a fresh protocol entity for a connection.
/// 为连接创建新的协议实体。
pub trait EntityFactory: Send {
    fn create(&mut self, id: ConnectionId) -> Box<dyn ProtocolEntity>;
}

impl<F> EntityFactory for F
where
    F: FnMut(ConnectionId) -> Box<dyn ProtocolEntity> + Send,
{
    fn create(&mut self, id: ConnectionId) -> Box<dyn ProtocolEntity> {
        self(id)
    }
}

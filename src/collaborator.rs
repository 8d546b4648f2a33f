//! 共享协作者服务的接口。
//! Interfaces of the shared collaborator services.
//!
//! Collaborators are process-wide services owned by the surrounding system:
//! the link layer below, and the control plane and data adaptation layer above.
//! Every call is qualified by the connection it concerns.
//!
//! 协作者是由外部系统拥有的进程级服务：下方的链路层，以及上方的控制面和数据适配层。
//! 每次调用都带有所涉及连接的标识。

use crate::types::{BearerId, ConnectionId};
use bytes::Bytes;
use std::sync::{Arc, Weak};

/// The link layer underneath the protocol entities.
/// 协议实体下方的链路层。
pub trait LinkLayer: Send + Sync {
    /// Queues an SDU for transmission on a bearer of a connection.
    /// 将 SDU 排入某连接某承载的发送队列。
    fn write_sdu(&self, id: ConnectionId, bearer: BearerId, sdu: Bytes);

    /// Whether the bearer runs in unacknowledged mode.
    fn rb_is_um(&self, id: ConnectionId, bearer: BearerId) -> bool;

    /// Whether the bearer's transmit queue can take no more SDUs.
    fn sdu_queue_is_full(&self, id: ConnectionId, bearer: BearerId) -> bool;
}

/// The control plane above the protocol entities (unicast signalling).
/// 协议实体上方的控制面（单播信令）。
pub trait ControlPlane: Send + Sync {
    fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes);
}

/// The data adaptation layer above the protocol entities (user traffic).
/// 协议实体上方的数据适配层（用户流量）。
pub trait DataAdaptation: Send + Sync {
    fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes);
}

/// The system-wide control plane sink for broadcast and paging channels.
///
/// Only [`BroadcastControlAdapter`](crate::adapter::BroadcastControlAdapter)
/// talks to it; no per-connection adapter ever does.
///
/// 用于广播和寻呼信道的系统级控制面接收端。只有
/// [`BroadcastControlAdapter`](crate::adapter::BroadcastControlAdapter) 会调用它。
pub trait BroadcastControl: Send + Sync {
    fn write_pdu_bcch_bch(&self, pdu: Bytes);
    fn write_pdu_bcch_dlsch(&self, pdu: Bytes);
    fn write_pdu_pcch(&self, pdu: Bytes);
}

/// Non-owning handles to the three shared collaborators.
///
/// The owning system keeps the `Arc`s alive; the manager and its adapters only
/// hold `Weak` references and check liveness on every call.
///
/// 三个共享协作者的非拥有句柄。外部系统持有 `Arc`；管理器及其适配器只持有 `Weak`
/// 引用，并在每次调用时检查其是否仍然存活。
#[derive(Clone)]
pub struct Collaborators {
    pub(crate) link: Weak<dyn LinkLayer>,
    pub(crate) control: Weak<dyn ControlPlane>,
    pub(crate) data: Weak<dyn DataAdaptation>,
}

impl Collaborators {
    pub fn new<L, C, D>(link: &Arc<L>, control: &Arc<C>, data: &Arc<D>) -> Self
    where
        L: LinkLayer + 'static,
        C: ControlPlane + 'static,
        D: DataAdaptation + 'static,
    {
        Self {
            link: Arc::downgrade(link) as Weak<dyn LinkLayer>,
            control: Arc::downgrade(control) as Weak<dyn ControlPlane>,
            data: Arc::downgrade(data) as Weak<dyn DataAdaptation>,
        }
    }

    /// Returns `true` while all three collaborators are still alive.
    /// 三个协作者均存活时返回 `true`。
    pub fn is_alive(&self) -> bool {
        self.link.strong_count() > 0
            && self.control.strong_count() > 0
            && self.data.strong_count() > 0
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("link_alive", &(self.link.strong_count() > 0))
            .field("control_alive", &(self.control.strong_count() > 0))
            .field("data_alive", &(self.data.strong_count() > 0))
            .finish()
    }
}

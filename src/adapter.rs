//! 按连接绑定的适配器集合。
//! Connection-bound adapters.
//!
//! Each adapter closes over one [`ConnectionId`] and a non-owning handle to a
//! shared collaborator. It implements the abstract capability an entity is
//! written against and re-attaches the connection id on every call.
//!
//! The three adapters of a connection share a closed flag. Once the connection
//! is torn down, any handle still held elsewhere refuses to forward and reports
//! [`Error::UnknownConnection`], as the manager does for the same id.
//!
//! 每个适配器绑定一个 [`ConnectionId`] 和一个共享协作者的非拥有句柄。
//! 它实现实体所依赖的抽象能力，并在每次调用时重新附加连接标识。
//! 同一连接的三个适配器共享一个关闭标志；连接销毁后，其他地方仍持有的句柄不再转发，
//! 而是返回 [`Error::UnknownConnection`]。

mod broadcast;
mod control;
mod data;
mod link;

pub use broadcast::BroadcastControlAdapter;
pub use control::ControlAdapter;
pub use data::DataAdapter;
pub use link::LinkAdapter;

use crate::{
    collaborator::Collaborators,
    entity::Sinks,
    error::{Error, Result},
    logging::{Logger, log_at},
    types::ConnectionId,
};
use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

/// The three adapters of one connection.
///
/// Cloning is cheap and yields handles to the same adapters.
///
/// 一个连接的三个适配器。克隆开销很小，得到的是指向相同适配器的句柄。
#[derive(Debug, Clone)]
pub struct AdapterSet {
    link: Arc<LinkAdapter>,
    control: Arc<ControlAdapter>,
    data: Arc<DataAdapter>,
    closed: Arc<AtomicBool>,
}

impl AdapterSet {
    pub(crate) fn new(id: ConnectionId, collaborators: &Collaborators, log: &Logger) -> Self {
        let closed = Arc::new(AtomicBool::new(false));
        let binding = |name: &'static str| Binding {
            id,
            closed: closed.clone(),
            log: log.clone(),
            name,
        };
        Self {
            link: Arc::new(LinkAdapter::new(binding("link"), collaborators.link.clone())),
            control: Arc::new(ControlAdapter::new(
                binding("control plane"),
                collaborators.control.clone(),
            )),
            data: Arc::new(DataAdapter::new(
                binding("data adaptation"),
                collaborators.data.clone(),
            )),
            closed,
        }
    }

    /// Marks the connection as gone. Every clone of this set, and every sink
    /// handed to the entity, stops forwarding.
    ///
    /// 将连接标记为已销毁。此集合的所有克隆以及交给实体的所有接收端都将停止转发。
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether the connection has been removed from its manager.
    /// 连接是否已从其管理器中移除。
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// The connection all three adapters are bound to.
    /// 三个适配器所绑定的连接。
    pub fn id(&self) -> ConnectionId {
        self.link.id()
    }

    pub fn link(&self) -> &LinkAdapter {
        &self.link
    }

    pub fn control(&self) -> &ControlAdapter {
        &self.control
    }

    pub fn data(&self) -> &DataAdapter {
        &self.data
    }

    /// The adapters as the abstract capabilities handed to an entity.
    /// 以抽象能力的形式交给实体的适配器。
    pub fn sinks(&self) -> Sinks {
        Sinks {
            link: self.link.clone(),
            control: self.control.clone(),
            data: self.data.clone(),
        }
    }
}

/// What every adapter of one connection shares: the id, the closed flag and
/// the manager's logger. `name` is the collaborator the adapter talks to.
#[derive(Debug)]
pub(crate) struct Binding {
    id: ConnectionId,
    closed: Arc<AtomicBool>,
    log: Logger,
    name: &'static str,
}

impl Binding {
    pub(crate) fn id(&self) -> ConnectionId {
        self.id
    }

    pub(crate) fn log(&self) -> &Logger {
        &self.log
    }

    /// Resolves the collaborator for one forwarded call. Fails if the
    /// connection was torn down or the owner dropped the collaborator.
    pub(crate) fn resolve<T: ?Sized>(&self, weak: &Weak<T>, operation: &'static str) -> Result<Arc<T>> {
        let id = self.id;
        if self.closed.load(Ordering::Acquire) {
            log_at!(self.log, ERROR, id = %id, operation, "Can't {}. User doesn't exist", operation);
            return Err(Error::UnknownConnection { id, operation });
        }
        weak.upgrade().ok_or_else(|| {
            log_at!(self.log, ERROR, id = %id, collaborator = self.name, "Collaborator is gone, dropping call");
            Error::CollaboratorGone {
                id,
                collaborator: self.name,
            }
        })
    }
}

//! 连接管理器：每个连接一个协议实体。
//! The connection manager: one protocol entity per connection.
//!
//! The manager owns a connection table of entries, each holding a protocol
//! entity and the adapters it was wired to. Callers address every operation by
//! [`ConnectionId`]; the manager looks up the entry and forwards. Operations on
//! unknown connections are logged and dropped, and reported as
//! [`Error::UnknownConnection`].
//!
//! 管理器拥有一个连接表，每个条目包含一个协议实体及其适配器。调用者通过
//! [`ConnectionId`] 指定每个操作；管理器查找条目并转发。对未知连接的操作会被记录并丢弃，
//! 并返回 [`Error::UnknownConnection`]。

mod table;

use crate::{
    adapter::AdapterSet,
    bearer::{BearerConfig, rb_name},
    collaborator::Collaborators,
    config::Config,
    entity::{EntityFactory, ProtocolEntity},
    error::{Error, Result},
    logging::{Logger, log_at},
    security::SecurityConfig,
    types::{BearerId, ConnectionId, Direction},
};
use bytes::Bytes;
use table::{ConnectionEntry, ConnectionTable};

/// Multiplexes per-connection protocol entities.
///
/// Not internally synchronized: one thread of control is expected to drive
/// it, or callers go through [`actor::spawn`](crate::actor::spawn).
///
/// 多路复用每个连接的协议实体。内部不做同步：应由单一控制线程驱动，
/// 或通过 [`actor::spawn`](crate::actor::spawn) 调用。
pub struct PdcpManager {
    config: Config,
    log: Logger,
    collaborators: Collaborators,
    factory: Box<dyn EntityFactory>,
    users: ConnectionTable,
}

impl PdcpManager {
    /// Creates a manager bound to the shared collaborators.
    ///
    /// Logging verbosity for this manager and every adapter it creates is
    /// taken from `config.log`.
    ///
    /// 创建绑定到共享协作者的管理器。此管理器及其创建的所有适配器的日志详细程度取自
    /// `config.log`。
    pub fn init<F>(config: Config, collaborators: Collaborators, factory: F) -> Self
    where
        F: EntityFactory + 'static,
    {
        let log = Logger::new(&config.name, config.log);
        log_at!(log, DEBUG, level = %config.log.level, hex_limit = config.log.hex_limit, "Manager initialized");
        Self {
            config,
            log,
            collaborators,
            factory: Box::new(factory),
            users: ConnectionTable::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stops every entity and empties the table. The manager stays usable.
    /// Returns how many connections were stopped.
    ///
    /// 停止所有实体并清空连接表。管理器仍可继续使用。返回被停止的连接数。
    pub fn stop(&mut self) -> usize {
        let entries = self.users.drain();
        let count = entries.len();
        for (id, entry) in entries {
            log_at!(self.log, DEBUG, id = %id, "Stopping user");
            entry.teardown();
        }
        log_at!(self.log, INFO, count, "Manager stopped");
        count
    }

    /// Adds a connection if it is not present yet. Returns `true` if a new
    /// entry was created.
    ///
    /// 若连接尚不存在则添加。创建了新条目时返回 `true`。
    pub fn add_user(&mut self, id: ConnectionId) -> bool {
        if self.users.contains(id) {
            log_at!(self.log, DEBUG, id = %id, "User already exists");
            return false;
        }
        if !self.collaborators.is_alive() {
            log_at!(self.log, WARN, id = %id, "Adding user while a collaborator is gone");
        }

        let adapters = AdapterSet::new(id, &self.collaborators, &self.log);
        let mut entity = self.factory.create(id);
        entity.init(adapters.sinks());
        self.users.insert(id, ConnectionEntry { entity, adapters });

        log_at!(self.log, INFO, id = %id, users = self.users.len(), "Added user");
        true
    }

    /// Stops and removes a connection. Absent connections are not an error.
    /// Returns `true` if an entry was removed.
    ///
    /// 停止并移除连接。连接不存在不视为错误。移除了条目时返回 `true`。
    pub fn rem_user(&mut self, id: ConnectionId) -> bool {
        match self.users.remove(id) {
            Some(entry) => {
                entry.teardown();
                log_at!(self.log, INFO, id = %id, users = self.users.len(), "Removed user");
                true
            }
            None => {
                log_at!(self.log, DEBUG, id = %id, "Removing unknown user, nothing to do");
                false
            }
        }
    }

    pub fn contains_user(&self, id: ConnectionId) -> bool {
        self.users.contains(id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Active connection ids in ascending order.
    pub fn user_ids(&self) -> Vec<ConnectionId> {
        self.users.ids()
    }

    /// The adapters bound to a connection, if present.
    /// 连接所绑定的适配器（若存在）。
    pub fn adapters(&self, id: ConnectionId) -> Option<AdapterSet> {
        self.users.get(id).map(|entry| entry.adapters.clone())
    }

    pub fn add_bearer(&mut self, id: ConnectionId, bearer: BearerId, config: BearerConfig) -> Result<()> {
        log_at!(self.log, DEBUG, id = %id, bearer = %bearer, rb = rb_name(bearer), "Adding bearer");
        self.with_user(id, "add_bearer", |entity| entity.add_bearer(bearer, config))
    }

    pub fn reset(&mut self, id: ConnectionId) -> Result<()> {
        self.with_user(id, "reset", |entity| entity.reset())
    }

    pub fn config_security(&mut self, id: ConnectionId, bearer: BearerId, config: SecurityConfig) -> Result<()> {
        log_at!(self.log, DEBUG, id = %id, bearer = %bearer, ?config, "Configuring security");
        self.with_user(id, "config_security", |entity| entity.config_security(bearer, config))
    }

    /// Enables integrity protection in both directions.
    /// 在收发两个方向启用完整性保护。
    pub fn enable_integrity(&mut self, id: ConnectionId, bearer: BearerId) -> Result<()> {
        self.with_user(id, "enable_integrity", |entity| {
            entity.enable_integrity(bearer, Direction::TxRx)
        })
    }

    /// Enables ciphering in both directions.
    /// 在收发两个方向启用加密。
    pub fn enable_encryption(&mut self, id: ConnectionId, bearer: BearerId) -> Result<()> {
        self.with_user(id, "enable_encryption", |entity| {
            entity.enable_encryption(bearer, Direction::TxRx)
        })
    }

    /// Hands a PDU received from the link layer to the connection's entity.
    /// 将从链路层收到的 PDU 交给连接的实体。
    pub fn write_pdu(&mut self, id: ConnectionId, bearer: BearerId, pdu: Bytes) -> Result<()> {
        log_at!(self.log, TRACE, id = %id, bearer = %bearer, len = pdu.len(), payload = %self.log.hex_dump(&pdu), "RX PDU");
        self.with_user(id, "write_pdu", |entity| entity.write_pdu(bearer, pdu))
    }

    /// Hands an SDU from an upper layer to the connection's entity for
    /// transmission.
    ///
    /// 将来自上层的 SDU 交给连接的实体以便发送。
    pub fn write_sdu(&mut self, id: ConnectionId, bearer: BearerId, sdu: Bytes) -> Result<()> {
        log_at!(self.log, TRACE, id = %id, bearer = %bearer, len = sdu.len(), payload = %self.log.hex_dump(&sdu), "TX SDU");
        self.with_user(id, "write_sdu", |entity| entity.write_sdu(bearer, sdu))
    }

    pub fn notify_delivery(&mut self, id: ConnectionId, bearer: BearerId, sns: &[u32]) -> Result<()> {
        self.with_user(id, "notify_delivery", |entity| entity.notify_delivery(bearer, sns))
    }

    pub fn notify_failure(&mut self, id: ConnectionId, bearer: BearerId, sns: &[u32]) -> Result<()> {
        self.with_user(id, "notify_failure", |entity| entity.notify_failure(bearer, sns))
    }

    /// Runs `f` on the connection's entity, or logs and drops the operation
    /// when the connection doesn't exist.
    fn with_user<F>(&mut self, id: ConnectionId, operation: &'static str, f: F) -> Result<()>
    where
        F: FnOnce(&mut dyn ProtocolEntity),
    {
        match self.users.get_mut(id) {
            Some(entry) => {
                f(entry.entity.as_mut());
                Ok(())
            }
            None => {
                log_at!(self.log, ERROR, id = %id, operation, "Can't {}. User doesn't exist", operation);
                Err(Error::UnknownConnection { id, operation })
            }
        }
    }
}

impl std::fmt::Debug for PdcpManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdcpManager")
            .field("config", &self.config)
            .field("collaborators", &self.collaborators)
            .field("users", &self.users)
            .finish_non_exhaustive()
    }
}

//! 透明协议实体：不加密、不编号，仅按承载转发。
//! A transparent protocol entity: no ciphering, no sequencing, per-bearer forwarding only.
//!
//! Useful as a stand-in where no full PDCP implementation is available, and as
//! the entity behind end-to-end routing tests.
//!
//! 在没有完整 PDCP 实现时可作为替代，也用于端到端路由测试。

use super::{ProtocolEntity, Sinks};
use crate::{
    bearer::{BearerConfig, rb_name},
    security::SecurityConfig,
    types::{BearerId, ConnectionId, Direction},
};
use bytes::Bytes;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Observable state of one bearer inside a [`TransparentEntity`].
/// [`TransparentEntity`] 中单个承载的可观察状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerState {
    pub config: BearerConfig,
    pub security: Option<SecurityConfig>,
    pub integrity: Option<Direction>,
    pub encryption: Option<Direction>,
    /// SDUs handed to the link layer.
    pub tx_count: u64,
    /// PDUs delivered upward.
    pub rx_count: u64,
    pub delivered: u64,
    pub failed: u64,
}

impl BearerState {
    fn new(config: BearerConfig) -> Self {
        Self {
            config,
            security: None,
            integrity: None,
            encryption: None,
            tx_count: 0,
            rx_count: 0,
            delivered: 0,
            failed: 0,
        }
    }

    fn clear_counters(&mut self) {
        self.tx_count = 0;
        self.rx_count = 0;
        self.delivered = 0;
        self.failed = 0;
    }
}

/// Widens an activation so that enabling `Tx` then `Rx` yields `TxRx`.
fn widen(current: Option<Direction>, added: Direction) -> Direction {
    let tx = added.includes_tx() || current.is_some_and(Direction::includes_tx);
    let rx = added.includes_rx() || current.is_some_and(Direction::includes_rx);
    match (tx, rx) {
        (true, false) => Direction::Tx,
        (false, true) => Direction::Rx,
        _ => Direction::TxRx,
    }
}

#[derive(Debug)]
pub struct TransparentEntity {
    /// Only used for logging.
    /// 仅用于日志。
    id: ConnectionId,
    sinks: Option<Sinks>,
    bearers: HashMap<BearerId, BearerState>,
}

impl TransparentEntity {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            sinks: None,
            bearers: HashMap::new(),
        }
    }

    /// An entity factory producing one `TransparentEntity` per connection.
    /// 为每个连接创建一个 `TransparentEntity` 的实体工厂。
    pub fn factory() -> impl FnMut(ConnectionId) -> Box<dyn ProtocolEntity> + Send {
        |id| Box::new(TransparentEntity::new(id)) as Box<dyn ProtocolEntity>
    }

    pub fn bearer_state(&self, bearer: BearerId) -> Option<&BearerState> {
        self.bearers.get(&bearer)
    }

    pub fn is_initialized(&self) -> bool {
        self.sinks.is_some()
    }

    /// Looks up a configured bearer together with the sinks, logging why the
    /// operation is dropped otherwise.
    fn route(&mut self, bearer: BearerId, operation: &'static str) -> Option<(&Sinks, &mut BearerState)> {
        let Some(sinks) = self.sinks.as_ref() else {
            warn!(id = %self.id, bearer = %bearer, operation, "Entity not initialized, dropping");
            return None;
        };
        match self.bearers.get_mut(&bearer) {
            Some(state) => Some((sinks, state)),
            None => {
                warn!(id = %self.id, bearer = %bearer, operation, "Bearer not configured, dropping");
                None
            }
        }
    }
}

impl ProtocolEntity for TransparentEntity {
    fn init(&mut self, sinks: Sinks) {
        self.sinks = Some(sinks);
    }

    fn stop(&mut self) {
        debug!(id = %self.id, bearers = self.bearers.len(), "Stopping transparent entity");
        self.bearers.clear();
        self.sinks = None;
    }

    fn add_bearer(&mut self, bearer: BearerId, config: BearerConfig) {
        debug!(
            id = %self.id,
            bearer = %bearer,
            rb = rb_name(bearer),
            sn_bits = config.sn_length.bits(),
            rlc_mode = ?config.rlc_mode,
            "Adding bearer"
        );
        self.bearers.insert(bearer, BearerState::new(config));
    }

    fn reset(&mut self) {
        for state in self.bearers.values_mut() {
            state.clear_counters();
        }
    }

    fn config_security(&mut self, bearer: BearerId, config: SecurityConfig) {
        match self.bearers.get_mut(&bearer) {
            Some(state) => state.security = Some(config),
            None => warn!(id = %self.id, bearer = %bearer, "Security config for unknown bearer ignored"),
        }
    }

    fn enable_integrity(&mut self, bearer: BearerId, direction: Direction) {
        if let Some(state) = self.bearers.get_mut(&bearer) {
            state.integrity = Some(widen(state.integrity, direction));
        }
    }

    fn enable_encryption(&mut self, bearer: BearerId, direction: Direction) {
        if let Some(state) = self.bearers.get_mut(&bearer) {
            state.encryption = Some(widen(state.encryption, direction));
        }
    }

    fn write_pdu(&mut self, bearer: BearerId, pdu: Bytes) {
        let id = self.id;
        let Some((sinks, state)) = self.route(bearer, "write_pdu") else {
            return;
        };
        let result = if bearer.is_srb() {
            sinks.control.write_pdu(bearer, pdu)
        } else {
            sinks.data.write_pdu(bearer, pdu)
        };
        match result {
            Ok(()) => state.rx_count += 1,
            Err(e) => warn!(id = %id, bearer = %bearer, error = %e, "Upward delivery failed"),
        }
    }

    fn write_sdu(&mut self, bearer: BearerId, sdu: Bytes) {
        let id = self.id;
        let Some((sinks, state)) = self.route(bearer, "write_sdu") else {
            return;
        };
        if sinks.link.sdu_queue_is_full(bearer) {
            warn!(id = %id, bearer = %bearer, len = sdu.len(), "Link queue full, dropping SDU");
            return;
        }
        match sinks.link.write_sdu(bearer, sdu) {
            Ok(()) => state.tx_count += 1,
            Err(e) => warn!(id = %id, bearer = %bearer, error = %e, "Downward delivery failed"),
        }
    }

    fn notify_delivery(&mut self, bearer: BearerId, sns: &[u32]) {
        if let Some(state) = self.bearers.get_mut(&bearer) {
            trace!(id = %self.id, bearer = %bearer, ?sns, "Delivery confirmed");
            state.delivered += sns.len() as u64;
        }
    }

    fn notify_failure(&mut self, bearer: BearerId, sns: &[u32]) {
        if let Some(state) = self.bearers.get_mut(&bearer) {
            trace!(id = %self.id, bearer = %bearer, ?sns, "Delivery failed");
            state.failed += sns.len() as u64;
        }
    }
}

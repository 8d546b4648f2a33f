//! 面向控制面的单播适配器。
//! The unicast control-plane-facing adapter.

use super::Binding;
use crate::{
    bearer::rb_name,
    collaborator::ControlPlane,
    entity::ControlSink,
    error::{Error, Result},
    logging::log_at,
    types::{BearerId, ConnectionId},
};
use bytes::Bytes;
use std::sync::Weak;

/// Forwards unicast signalling from an entity to the shared control plane.
///
/// Broadcast and paging payloads are never valid on a single connection and
/// are rejected with [`Error::InvalidChannelContext`].
///
/// 将实体的单播信令转发给共享控制面。广播和寻呼载荷在单个连接上永远无效，
/// 会以 [`Error::InvalidChannelContext`] 拒绝。
#[derive(Debug)]
pub struct ControlAdapter {
    binding: Binding,
    control: Weak<dyn ControlPlane>,
}

impl ControlAdapter {
    pub(crate) fn new(binding: Binding, control: Weak<dyn ControlPlane>) -> Self {
        Self { binding, control }
    }

    pub fn id(&self) -> ConnectionId {
        self.binding.id()
    }

    fn reject(&self, channel: &'static str, pdu: &Bytes) -> Result<()> {
        let id = self.id();
        log_at!(self.binding.log(), ERROR, id = %id, channel, len = pdu.len(), "Received {} on unicast connection", channel);
        Err(Error::InvalidChannelContext { id, channel })
    }
}

impl ControlSink for ControlAdapter {
    fn write_pdu(&self, bearer: BearerId, pdu: Bytes) -> Result<()> {
        let control = self.binding.resolve(&self.control, "write_pdu")?;
        control.write_pdu(self.id(), bearer, pdu);
        Ok(())
    }

    fn write_pdu_bcch_bch(&self, pdu: Bytes) -> Result<()> {
        self.reject("BCCH-BCH", &pdu)
    }

    fn write_pdu_bcch_dlsch(&self, pdu: Bytes) -> Result<()> {
        self.reject("BCCH-DLSCH", &pdu)
    }

    fn write_pdu_pcch(&self, pdu: Bytes) -> Result<()> {
        self.reject("PCCH", &pdu)
    }

    fn get_rb_name(&self, bearer: BearerId) -> &'static str {
        rb_name(bearer)
    }
}

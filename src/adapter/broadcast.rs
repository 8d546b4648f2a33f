//! 无连接的广播/寻呼控制面适配器。
//! The connection-less broadcast and paging control-plane adapter.

use crate::{
    collaborator::BroadcastControl,
    config::LogConfig,
    error::{Error, Result},
    logging::{Logger, log_at},
};
use bytes::Bytes;
use std::sync::{Arc, Weak};

/// The only adapter that accepts broadcast and paging payloads.
///
/// It is system-wide and bound to no connection; the manager never creates
/// one per connection.
///
/// 唯一接受广播和寻呼载荷的适配器。它是系统级的，不绑定任何连接；
/// 管理器从不为单个连接创建它。
#[derive(Debug)]
pub struct BroadcastControlAdapter {
    broadcast: Weak<dyn BroadcastControl>,
    log: Logger,
}

impl BroadcastControlAdapter {
    pub fn new<B: BroadcastControl + 'static>(broadcast: &Arc<B>, log: LogConfig) -> Self {
        Self {
            broadcast: Arc::downgrade(broadcast) as Weak<dyn BroadcastControl>,
            log: Logger::new("PDCP-BCAST", log),
        }
    }

    fn resolve(&self, channel: &'static str) -> Result<Arc<dyn BroadcastControl>> {
        self.broadcast.upgrade().ok_or_else(|| {
            log_at!(self.log, ERROR, channel, "Broadcast collaborator is gone, dropping");
            Error::BroadcastGone { channel }
        })
    }

    pub fn write_pdu_bcch_bch(&self, pdu: Bytes) -> Result<()> {
        self.resolve("BCCH-BCH")?.write_pdu_bcch_bch(pdu);
        Ok(())
    }

    pub fn write_pdu_bcch_dlsch(&self, pdu: Bytes) -> Result<()> {
        self.resolve("BCCH-DLSCH")?.write_pdu_bcch_dlsch(pdu);
        Ok(())
    }

    pub fn write_pdu_pcch(&self, pdu: Bytes) -> Result<()> {
        self.resolve("PCCH")?.write_pdu_pcch(pdu);
        Ok(())
    }
}

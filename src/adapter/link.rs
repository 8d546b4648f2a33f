//! 面向链路层的适配器。
//! The link-layer-facing adapter.

use super::Binding;
use crate::{
    collaborator::LinkLayer,
    entity::LinkSink,
    error::{Error, Result},
    logging::log_at,
    types::{BearerId, ConnectionId},
};
use bytes::Bytes;
use std::sync::{
    Weak,
    atomic::{AtomicU64, Ordering},
};

/// Forwards an entity's downstream traffic and state queries to the shared
/// link layer, qualified by the bound connection.
///
/// 将实体的下行流量和状态查询转发给共享链路层，并附加所绑定的连接。
#[derive(Debug)]
pub struct LinkAdapter {
    binding: Binding,
    link: Weak<dyn LinkLayer>,
    /// Number of `discard_sdu` requests seen so far.
    discard_requests: AtomicU64,
}

impl LinkAdapter {
    pub(crate) fn new(binding: Binding, link: Weak<dyn LinkLayer>) -> Self {
        Self {
            binding,
            link,
            discard_requests: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.binding.id()
    }

    /// How many discard requests this adapter has rejected.
    /// 此适配器已拒绝的丢弃请求数。
    pub fn discard_requests(&self) -> u64 {
        self.discard_requests.load(Ordering::Relaxed)
    }
}

impl LinkSink for LinkAdapter {
    fn write_sdu(&self, bearer: BearerId, sdu: Bytes) -> Result<()> {
        let link = self.binding.resolve(&self.link, "write_sdu")?;
        link.write_sdu(self.id(), bearer, sdu);
        Ok(())
    }

    fn discard_sdu(&self, bearer: BearerId, sn: u32) -> Result<()> {
        self.discard_requests.fetch_add(1, Ordering::Relaxed);
        let id = self.id();
        log_at!(self.binding.log(), WARN, id = %id, bearer = %bearer, sn, "discard_sdu is not implemented");
        Err(Error::UnimplementedCapability {
            id,
            capability: "discard_sdu",
        })
    }

    fn rb_is_um(&self, bearer: BearerId) -> bool {
        self.binding
            .resolve(&self.link, "rb_is_um")
            .map(|link| link.rb_is_um(self.id(), bearer))
            .unwrap_or(false)
    }

    fn sdu_queue_is_full(&self, bearer: BearerId) -> bool {
        // A missing link layer or a closed connection can take nothing.
        self.binding
            .resolve(&self.link, "sdu_queue_is_full")
            .map(|link| link.sdu_queue_is_full(self.id(), bearer))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    const ID: ConnectionId = ConnectionId(7);

    #[test]
    fn test_write_sdu_attaches_connection_id() {
        let fixture = Fixture::new();
        let adapters = fixture.adapters(ID);

        adapters
            .link()
            .write_sdu(BearerId(3), Bytes::from_static(b"abc"))
            .unwrap();

        assert_eq!(
            fixture.link.sdus(),
            vec![(ID, BearerId(3), Bytes::from_static(b"abc"))]
        );
    }

    #[test]
    fn test_state_queries_pass_through() {
        let fixture = Fixture::new();
        let adapters = fixture.adapters(ID);
        fixture.link.set_um(ID, BearerId(4));

        assert!(adapters.link().rb_is_um(BearerId(4)));
        assert!(!adapters.link().rb_is_um(BearerId(3)));
        assert!(!fixture.adapters(ConnectionId(8)).link().rb_is_um(BearerId(4)));

        assert!(!adapters.link().sdu_queue_is_full(BearerId(4)));
        fixture.link.set_queue_full(true);
        assert!(adapters.link().sdu_queue_is_full(BearerId(4)));
    }

    #[test]
    fn test_discard_sdu_reports_unimplemented() {
        let fixture = Fixture::new();
        let adapters = fixture.adapters(ID);

        let err = adapters.link().discard_sdu(BearerId(3), 17).unwrap_err();
        assert_eq!(
            err,
            Error::UnimplementedCapability {
                id: ID,
                capability: "discard_sdu"
            }
        );
        adapters.link().discard_sdu(BearerId(3), 18).unwrap_err();
        assert_eq!(adapters.link().discard_requests(), 2);
        assert!(fixture.link.sdus().is_empty());
    }

    #[test]
    fn test_dropped_link_layer() {
        let fixture = Fixture::new();
        let adapters = fixture.adapters(ID);
        let Fixture { link, .. } = fixture;
        drop(link);

        let err = adapters
            .link()
            .write_sdu(BearerId(3), Bytes::from_static(b"abc"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::CollaboratorGone {
                id: ID,
                collaborator: "link"
            }
        );
        assert!(!adapters.link().rb_is_um(BearerId(3)));
        assert!(adapters.link().sdu_queue_is_full(BearerId(3)));
    }

    #[test]
    fn test_closed_connection_stops_forwarding() {
        let fixture = Fixture::new();
        let adapters = fixture.adapters(ID);
        let sinks = adapters.sinks();
        fixture.link.set_um(ID, BearerId(4));
        adapters.close();

        assert!(adapters.is_closed());
        assert_eq!(
            sinks.link.write_sdu(BearerId(4), Bytes::from_static(b"late")),
            Err(Error::UnknownConnection {
                id: ID,
                operation: "write_sdu"
            })
        );
        assert!(!adapters.link().rb_is_um(BearerId(4)));
        assert!(adapters.link().sdu_queue_is_full(BearerId(4)));
        assert!(fixture.link.sdus().is_empty());
    }
}

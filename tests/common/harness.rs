//! tests/common/harness.rs
use bytes::Bytes;
use kestrel_pdcp::{
    BearerId, Collaborators, Config, ConnectionId, Direction, PdcpManager,
    bearer::BearerConfig,
    collaborator::{ControlPlane, DataAdaptation, LinkLayer},
    entity::{ProtocolEntity, Sinks, TransparentEntity},
    security::SecurityConfig,
};
use std::sync::{
    Arc, Mutex, Once,
    atomic::{AtomicUsize, Ordering},
};

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "kestrel_pdcp=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

pub type Delivery = (ConnectionId, BearerId, Bytes);

#[derive(Debug, Default)]
pub struct LinkRecorder {
    sdus: Mutex<Vec<Delivery>>,
}

impl LinkRecorder {
    pub fn sdus(&self) -> Vec<Delivery> {
        self.sdus.lock().unwrap().clone()
    }
}

impl LinkLayer for LinkRecorder {
    fn write_sdu(&self, id: ConnectionId, bearer: BearerId, sdu: Bytes) {
        self.sdus.lock().unwrap().push((id, bearer, sdu));
    }

    fn rb_is_um(&self, _id: ConnectionId, _bearer: BearerId) -> bool {
        false
    }

    fn sdu_queue_is_full(&self, _id: ConnectionId, _bearer: BearerId) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct UpperRecorder {
    pdus: Mutex<Vec<Delivery>>,
}

impl UpperRecorder {
    pub fn pdus(&self) -> Vec<Delivery> {
        self.pdus.lock().unwrap().clone()
    }
}

impl ControlPlane for UpperRecorder {
    fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes) {
        self.pdus.lock().unwrap().push((id, bearer, pdu));
    }
}

impl DataAdaptation for UpperRecorder {
    fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes) {
        self.pdus.lock().unwrap().push((id, bearer, pdu));
    }
}

/// A transparent entity that also counts how often it was stopped.
pub struct CountingEntity {
    inner: TransparentEntity,
    stops: Arc<AtomicUsize>,
}

impl ProtocolEntity for CountingEntity {
    fn init(&mut self, sinks: Sinks) {
        self.inner.init(sinks);
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.inner.stop();
    }

    fn add_bearer(&mut self, bearer: BearerId, config: BearerConfig) {
        self.inner.add_bearer(bearer, config);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn config_security(&mut self, bearer: BearerId, config: SecurityConfig) {
        self.inner.config_security(bearer, config);
    }

    fn enable_integrity(&mut self, bearer: BearerId, direction: Direction) {
        self.inner.enable_integrity(bearer, direction);
    }

    fn enable_encryption(&mut self, bearer: BearerId, direction: Direction) {
        self.inner.enable_encryption(bearer, direction);
    }

    fn write_pdu(&mut self, bearer: BearerId, pdu: Bytes) {
        self.inner.write_pdu(bearer, pdu);
    }

    fn write_sdu(&mut self, bearer: BearerId, sdu: Bytes) {
        self.inner.write_sdu(bearer, sdu);
    }

    fn notify_delivery(&mut self, bearer: BearerId, sns: &[u32]) {
        self.inner.notify_delivery(bearer, sns);
    }

    fn notify_failure(&mut self, bearer: BearerId, sns: &[u32]) {
        self.inner.notify_failure(bearer, sns);
    }
}

/// A manager wired to recording collaborators, as the surrounding stack would
/// wire it.
pub struct TestStack {
    pub manager: PdcpManager,
    pub link: Arc<LinkRecorder>,
    pub control: Arc<UpperRecorder>,
    pub data: Arc<UpperRecorder>,
    pub stops: Arc<AtomicUsize>,
}

impl TestStack {
    pub fn new() -> Self {
        init_tracing();
        let link = Arc::new(LinkRecorder::default());
        let control = Arc::new(UpperRecorder::default());
        let data = Arc::new(UpperRecorder::default());
        let stops = Arc::new(AtomicUsize::new(0));

        let factory_stops = stops.clone();
        let manager = PdcpManager::init(
            Config::default(),
            Collaborators::new(&link, &control, &data),
            move |id: ConnectionId| {
                Box::new(CountingEntity {
                    inner: TransparentEntity::new(id),
                    stops: factory_stops.clone(),
                }) as Box<dyn ProtocolEntity>
            },
        );

        Self {
            manager,
            link,
            control,
            data,
            stops,
        }
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

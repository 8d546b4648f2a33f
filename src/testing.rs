//! 测试辅助工具模块
//! Test utilities module

#![cfg(test)]

use crate::{
    adapter::AdapterSet,
    bearer::BearerConfig,
    collaborator::{BroadcastControl, Collaborators, ControlPlane, DataAdaptation, LinkLayer},
    config::LogConfig,
    entity::{ProtocolEntity, Sinks},
    logging::Logger,
    security::SecurityConfig,
    types::{BearerId, ConnectionId, Direction},
};
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tracing::level_filters::LevelFilter;

pub type Delivery = (ConnectionId, BearerId, Bytes);

/// A log sink shared between a scoped subscriber and the test reading it.
#[derive(Debug, Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber that records every event as one plain-text line,
/// and returns those lines.
pub fn capture_logs(f: impl FnOnce()) -> Vec<String> {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_owned)
        .collect()
}

/// A link layer that records every SDU it is handed.
#[derive(Debug, Default)]
pub struct RecordingLink {
    sdus: Mutex<Vec<Delivery>>,
    um: Mutex<HashSet<(ConnectionId, BearerId)>>,
    queue_full: AtomicBool,
}

impl RecordingLink {
    pub fn sdus(&self) -> Vec<Delivery> {
        self.sdus.lock().unwrap().clone()
    }

    pub fn set_um(&self, id: ConnectionId, bearer: BearerId) {
        self.um.lock().unwrap().insert((id, bearer));
    }

    pub fn set_queue_full(&self, full: bool) {
        self.queue_full.store(full, Ordering::SeqCst);
    }
}

impl LinkLayer for RecordingLink {
    fn write_sdu(&self, id: ConnectionId, bearer: BearerId, sdu: Bytes) {
        self.sdus.lock().unwrap().push((id, bearer, sdu));
    }

    fn rb_is_um(&self, id: ConnectionId, bearer: BearerId) -> bool {
        self.um.lock().unwrap().contains(&(id, bearer))
    }

    fn sdu_queue_is_full(&self, _id: ConnectionId, _bearer: BearerId) -> bool {
        self.queue_full.load(Ordering::SeqCst)
    }
}

/// An upper layer (control plane or data adaptation) that records PDUs.
#[derive(Debug, Default)]
pub struct RecordingUpper {
    pdus: Mutex<Vec<Delivery>>,
}

impl RecordingUpper {
    pub fn pdus(&self) -> Vec<Delivery> {
        self.pdus.lock().unwrap().clone()
    }
}

impl ControlPlane for RecordingUpper {
    fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes) {
        self.pdus.lock().unwrap().push((id, bearer, pdu));
    }
}

impl DataAdaptation for RecordingUpper {
    fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes) {
        self.pdus.lock().unwrap().push((id, bearer, pdu));
    }
}

#[derive(Debug, Default)]
pub struct RecordingBroadcast {
    received: Mutex<Vec<(&'static str, Bytes)>>,
}

impl RecordingBroadcast {
    pub fn received(&self) -> Vec<(&'static str, Bytes)> {
        self.received.lock().unwrap().clone()
    }
}

impl BroadcastControl for RecordingBroadcast {
    fn write_pdu_bcch_bch(&self, pdu: Bytes) {
        self.received.lock().unwrap().push(("BCCH-BCH", pdu));
    }

    fn write_pdu_bcch_dlsch(&self, pdu: Bytes) {
        self.received.lock().unwrap().push(("BCCH-DLSCH", pdu));
    }

    fn write_pdu_pcch(&self, pdu: Bytes) {
        self.received.lock().unwrap().push(("PCCH", pdu));
    }
}

/// The three recording collaborators, owned the way the surrounding system
/// would own them.
pub struct Fixture {
    pub link: Arc<RecordingLink>,
    pub control: Arc<RecordingUpper>,
    pub data: Arc<RecordingUpper>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            link: Arc::new(RecordingLink::default()),
            control: Arc::new(RecordingUpper::default()),
            data: Arc::new(RecordingUpper::default()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators::new(&self.link, &self.control, &self.data)
    }

    /// Adapters bound to `id`, logging at trace level.
    pub fn adapters(&self, id: ConnectionId) -> AdapterSet {
        let log = Logger::new(
            "test",
            LogConfig {
                level: LevelFilter::TRACE,
                hex_limit: 16,
            },
        );
        AdapterSet::new(id, &self.collaborators(), &log)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityCall {
    Init,
    Stop,
    AddBearer(BearerId),
    Reset,
    ConfigSecurity(BearerId),
    EnableIntegrity(BearerId, Direction),
    EnableEncryption(BearerId, Direction),
    WritePdu(BearerId, Bytes),
    WriteSdu(BearerId, Bytes),
    NotifyDelivery(BearerId, Vec<u32>),
    NotifyFailure(BearerId, Vec<u32>),
}

/// Calls observed by every [`MockEntity`] sharing this log.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(ConnectionId, EntityCall)>>>);

impl CallLog {
    fn push(&self, id: ConnectionId, call: EntityCall) {
        self.0.lock().unwrap().push((id, call));
    }

    /// Returns and clears the recorded calls.
    pub fn take(&self) -> Vec<(ConnectionId, EntityCall)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    pub fn count(&self, call: &EntityCall) -> usize {
        self.0.lock().unwrap().iter().filter(|(_, c)| c == call).count()
    }
}

/// Records every call. SDUs are looped to the link sink unchanged so routing
/// through the adapters can be observed.
pub struct MockEntity {
    id: ConnectionId,
    calls: CallLog,
    sinks: Option<Sinks>,
}

impl MockEntity {
    pub fn new(id: ConnectionId, calls: CallLog) -> Self {
        Self {
            id,
            calls,
            sinks: None,
        }
    }

    pub fn factory(calls: CallLog) -> impl FnMut(ConnectionId) -> Box<dyn ProtocolEntity> + Send {
        move |id| Box::new(MockEntity::new(id, calls.clone())) as Box<dyn ProtocolEntity>
    }
}

impl ProtocolEntity for MockEntity {
    fn init(&mut self, sinks: Sinks) {
        self.sinks = Some(sinks);
        self.calls.push(self.id, EntityCall::Init);
    }

    fn stop(&mut self) {
        self.calls.push(self.id, EntityCall::Stop);
    }

    fn add_bearer(&mut self, bearer: BearerId, _config: BearerConfig) {
        self.calls.push(self.id, EntityCall::AddBearer(bearer));
    }

    fn reset(&mut self) {
        self.calls.push(self.id, EntityCall::Reset);
    }

    fn config_security(&mut self, bearer: BearerId, _config: SecurityConfig) {
        self.calls.push(self.id, EntityCall::ConfigSecurity(bearer));
    }

    fn enable_integrity(&mut self, bearer: BearerId, direction: Direction) {
        self.calls
            .push(self.id, EntityCall::EnableIntegrity(bearer, direction));
    }

    fn enable_encryption(&mut self, bearer: BearerId, direction: Direction) {
        self.calls
            .push(self.id, EntityCall::EnableEncryption(bearer, direction));
    }

    fn write_pdu(&mut self, bearer: BearerId, pdu: Bytes) {
        self.calls.push(self.id, EntityCall::WritePdu(bearer, pdu));
    }

    fn write_sdu(&mut self, bearer: BearerId, sdu: Bytes) {
        self.calls
            .push(self.id, EntityCall::WriteSdu(bearer, sdu.clone()));
        if let Some(sinks) = &self.sinks {
            let _ = sinks.link.write_sdu(bearer, sdu);
        }
    }

    fn notify_delivery(&mut self, bearer: BearerId, sns: &[u32]) {
        self.calls
            .push(self.id, EntityCall::NotifyDelivery(bearer, sns.to_vec()));
    }

    fn notify_failure(&mut self, bearer: BearerId, sns: &[u32]) {
        self.calls
            .push(self.id, EntityCall::NotifyFailure(bearer, sns.to_vec()));
    }
}

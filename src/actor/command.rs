//! Commands consumed by the manager actor.

use crate::{
    bearer::BearerConfig,
    security::SecurityConfig,
    types::{BearerId, ConnectionId},
};
use bytes::Bytes;
use tokio::sync::oneshot;

/// Commands sent to the manager task.
///
/// Lifecycle commands carry a reply channel; data-path commands are
/// fire-and-forget and their failures are only logged.
///
/// 发送到管理器任务的命令。生命周期命令携带应答通道；数据面命令不等待结果，
/// 失败只会被记录。
#[derive(Debug)]
pub enum ManagerCommand {
    AddUser {
        id: ConnectionId,
        response_tx: oneshot::Sender<bool>,
    },
    RemUser {
        id: ConnectionId,
        response_tx: oneshot::Sender<bool>,
    },
    AddBearer {
        id: ConnectionId,
        bearer: BearerId,
        config: BearerConfig,
    },
    Reset {
        id: ConnectionId,
    },
    ConfigSecurity {
        id: ConnectionId,
        bearer: BearerId,
        config: SecurityConfig,
    },
    EnableIntegrity {
        id: ConnectionId,
        bearer: BearerId,
    },
    EnableEncryption {
        id: ConnectionId,
        bearer: BearerId,
    },
    WritePdu {
        id: ConnectionId,
        bearer: BearerId,
        pdu: Bytes,
    },
    WriteSdu {
        id: ConnectionId,
        bearer: BearerId,
        sdu: Bytes,
    },
    NotifyDelivery {
        id: ConnectionId,
        bearer: BearerId,
        sns: Vec<u32>,
    },
    NotifyFailure {
        id: ConnectionId,
        bearer: BearerId,
        sns: Vec<u32>,
    },
    /// Stops every connection; replies with how many were stopped.
    /// 停止所有连接；应答被停止的连接数。
    Stop {
        response_tx: oneshot::Sender<usize>,
    },
    UserCount {
        response_tx: oneshot::Sender<usize>,
    },
}

//! 在专用任务中运行管理器的 actor。
//! An actor running the manager inside a dedicated task.
//!
//! The manager is not internally synchronized. [`spawn`] moves it into a tokio
//! task that applies [`ManagerCommand`]s one at a time, in arrival order, so
//! any number of [`ManagerHandle`] clones can drive it.
//!
//! 管理器内部不做同步。[`spawn`] 将其移入一个 tokio 任务，按到达顺序逐个处理
//! [`ManagerCommand`]，因此任意数量的 [`ManagerHandle`] 克隆都可以驱动它。

pub mod command;

pub use command::ManagerCommand;

use crate::{
    bearer::BearerConfig,
    error::{Error, Result},
    manager::PdcpManager,
    security::SecurityConfig,
    types::{BearerId, ConnectionId},
};
use bytes::Bytes;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info};

/// Moves `manager` into a new task and returns a handle to it.
///
/// The task ends once every handle has been dropped; its join handle yields
/// the manager back.
///
/// 将 `manager` 移入新任务并返回其句柄。所有句柄被丢弃后任务结束，
/// 其 join handle 会返回该管理器。
pub fn spawn(manager: PdcpManager, capacity: usize) -> (ManagerHandle, JoinHandle<PdcpManager>) {
    let (command_tx, command_rx) = mpsc::channel(capacity);
    let actor = ManagerActor {
        manager,
        command_rx,
    };
    let task = tokio::spawn(actor.run());
    (ManagerHandle { command_tx }, task)
}

struct ManagerActor {
    manager: PdcpManager,
    command_rx: mpsc::Receiver<ManagerCommand>,
}

impl ManagerActor {
    async fn run(mut self) -> PdcpManager {
        info!(name = %self.manager.config().name, "Manager task started");
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        info!(
            name = %self.manager.config().name,
            users = self.manager.user_count(),
            "All handles dropped, manager task exiting"
        );
        self.manager
    }

    fn handle_command(&mut self, command: ManagerCommand) {
        let manager = &mut self.manager;
        // Data-path failures are already logged by the manager.
        let result = match command {
            ManagerCommand::AddUser { id, response_tx } => {
                let _ = response_tx.send(manager.add_user(id));
                Ok(())
            }
            ManagerCommand::RemUser { id, response_tx } => {
                let _ = response_tx.send(manager.rem_user(id));
                Ok(())
            }
            ManagerCommand::AddBearer { id, bearer, config } => {
                manager.add_bearer(id, bearer, config)
            }
            ManagerCommand::Reset { id } => manager.reset(id),
            ManagerCommand::ConfigSecurity { id, bearer, config } => {
                manager.config_security(id, bearer, config)
            }
            ManagerCommand::EnableIntegrity { id, bearer } => manager.enable_integrity(id, bearer),
            ManagerCommand::EnableEncryption { id, bearer } => {
                manager.enable_encryption(id, bearer)
            }
            ManagerCommand::WritePdu { id, bearer, pdu } => manager.write_pdu(id, bearer, pdu),
            ManagerCommand::WriteSdu { id, bearer, sdu } => manager.write_sdu(id, bearer, sdu),
            ManagerCommand::NotifyDelivery { id, bearer, sns } => {
                manager.notify_delivery(id, bearer, &sns)
            }
            ManagerCommand::NotifyFailure { id, bearer, sns } => {
                manager.notify_failure(id, bearer, &sns)
            }
            ManagerCommand::Stop { response_tx } => {
                let _ = response_tx.send(manager.stop());
                Ok(())
            }
            ManagerCommand::UserCount { response_tx } => {
                let _ = response_tx.send(manager.user_count());
                Ok(())
            }
        };
        if let Err(e) = result {
            debug!(error = %e, "Command dropped");
        }
    }
}

/// A cloneable handle to a manager running in its own task.
///
/// 指向在独立任务中运行的管理器的可克隆句柄。
#[derive(Debug, Clone)]
pub struct ManagerHandle {
    command_tx: mpsc::Sender<ManagerCommand>,
}

impl ManagerHandle {
    async fn send(&self, command: ManagerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| Error::ManagerClosed)
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> ManagerCommand) -> Result<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(make(response_tx)).await?;
        response_rx.await.map_err(|_| Error::ManagerClosed)
    }

    pub async fn add_user(&self, id: ConnectionId) -> Result<bool> {
        self.request(|response_tx| ManagerCommand::AddUser { id, response_tx })
            .await
    }

    pub async fn rem_user(&self, id: ConnectionId) -> Result<bool> {
        self.request(|response_tx| ManagerCommand::RemUser { id, response_tx })
            .await
    }

    pub async fn stop(&self) -> Result<usize> {
        self.request(|response_tx| ManagerCommand::Stop { response_tx })
            .await
    }

    pub async fn user_count(&self) -> Result<usize> {
        self.request(|response_tx| ManagerCommand::UserCount { response_tx })
            .await
    }

    pub async fn add_bearer(&self, id: ConnectionId, bearer: BearerId, config: BearerConfig) -> Result<()> {
        self.send(ManagerCommand::AddBearer { id, bearer, config })
            .await
    }

    pub async fn reset(&self, id: ConnectionId) -> Result<()> {
        self.send(ManagerCommand::Reset { id }).await
    }

    pub async fn config_security(&self, id: ConnectionId, bearer: BearerId, config: SecurityConfig) -> Result<()> {
        self.send(ManagerCommand::ConfigSecurity { id, bearer, config })
            .await
    }

    pub async fn enable_integrity(&self, id: ConnectionId, bearer: BearerId) -> Result<()> {
        self.send(ManagerCommand::EnableIntegrity { id, bearer })
            .await
    }

    pub async fn enable_encryption(&self, id: ConnectionId, bearer: BearerId) -> Result<()> {
        self.send(ManagerCommand::EnableEncryption { id, bearer })
            .await
    }

    pub async fn write_pdu(&self, id: ConnectionId, bearer: BearerId, pdu: Bytes) -> Result<()> {
        self.send(ManagerCommand::WritePdu { id, bearer, pdu })
            .await
    }

    pub async fn write_sdu(&self, id: ConnectionId, bearer: BearerId, sdu: Bytes) -> Result<()> {
        self.send(ManagerCommand::WriteSdu { id, bearer, sdu })
            .await
    }

    pub async fn notify_delivery(&self, id: ConnectionId, bearer: BearerId, sns: Vec<u32>) -> Result<()> {
        self.send(ManagerCommand::NotifyDelivery { id, bearer, sns })
            .await
    }

    pub async fn notify_failure(&self, id: ConnectionId, bearer: BearerId, sns: Vec<u32>) -> Result<()> {
        self.send(ManagerCommand::NotifyFailure { id, bearer, sns })
            .await
    }
}

//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use crate::types::ConnectionId;
use thiserror::Error;

/// The primary error type for the PDCP multiplexer.
/// PDCP 多路复用器的主要错误类型。
///
/// None of these are fatal: every variant describes an operation that was
/// logged and dropped.
///
/// 这些错误都不是致命的：每个变体都表示一个已被记录并丢弃的操作。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operation referenced a connection that has no entry in the table.
    /// 操作引用了一个在连接表中不存在的连接。
    #[error("{operation}: connection {id} doesn't exist")]
    UnknownConnection {
        id: ConnectionId,
        operation: &'static str,
    },

    /// A broadcast or paging payload reached a per-connection (unicast) adapter.
    /// 广播或寻呼载荷到达了一个按连接（单播）的适配器。
    #[error("received {channel} on unicast connection {id}")]
    InvalidChannelContext {
        id: ConnectionId,
        channel: &'static str,
    },

    /// A declared capability has no implementation.
    /// 已声明但尚未实现的能力。
    #[error("{capability} is not implemented (connection {id})")]
    UnimplementedCapability {
        id: ConnectionId,
        capability: &'static str,
    },

    /// The owning system dropped a collaborator that an adapter still refers to.
    /// 所属系统已经释放了适配器仍在引用的协作者。
    #[error("{collaborator} collaborator is gone (connection {id})")]
    CollaboratorGone {
        id: ConnectionId,
        collaborator: &'static str,
    },

    /// The broadcast/paging collaborator was dropped. Broadcast traffic belongs
    /// to no connection, so no id is reported.
    /// 广播/寻呼协作者已被释放。广播流量不属于任何连接，因此不报告连接标识。
    #[error("broadcast control collaborator is gone, dropping {channel}")]
    BroadcastGone { channel: &'static str },

    /// A configured log level string could not be parsed.
    /// 无法解析配置的日志级别字符串。
    #[error("invalid log level: {0:?}")]
    InvalidLogLevel(String),

    /// The manager task has terminated and no longer accepts commands.
    /// 管理器任务已终止，不再接受命令。
    #[error("manager task is closed")]
    ManagerClosed,
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            Error::UnknownConnection { .. } => ErrorKind::NotFound,
            Error::InvalidChannelContext { .. } => ErrorKind::InvalidData,
            Error::UnimplementedCapability { .. } => ErrorKind::Unsupported,
            Error::CollaboratorGone { .. } | Error::BroadcastGone { .. } => {
                ErrorKind::NotConnected
            }
            Error::InvalidLogLevel(_) => ErrorKind::InvalidInput,
            Error::ManagerClosed => ErrorKind::BrokenPipe,
        };
        std::io::Error::new(kind, err)
    }
}

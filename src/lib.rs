#![deny(clippy::expect_used, clippy::unwrap_used)]

//! A per-connection PDCP multiplexer.
//! 按连接的 PDCP 多路复用器。
//!
//! [`PdcpManager`] owns one protocol entity per connection, routes control and
//! data operations to it by [`ConnectionId`], and wires each entity to the
//! shared link, control-plane and data-adaptation services through adapters
//! bound to that connection.
//!
//! [`PdcpManager`] 为每个连接持有一个协议实体，按 [`ConnectionId`] 将控制和数据操作
//! 路由给它，并通过绑定到该连接的适配器把实体连接到共享的链路层、控制面和数据适配服务。

pub mod actor;
pub mod adapter;
pub mod bearer;
pub mod collaborator;
pub mod config;
pub mod entity;
pub mod error;
mod logging;
pub mod manager;
pub mod security;
pub mod types;

#[cfg(test)]
mod testing;

pub use collaborator::Collaborators;
pub use config::{Config, LogConfig};
pub use error::{Error, Result};
pub use manager::PdcpManager;
pub use types::{BearerId, ConnectionId, Direction};

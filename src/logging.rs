//! 按实例的日志上下文。
//! Per-instance logging context.
//!
//! A [`Logger`] pairs a [`LogConfig`] with a tracing span. Each manager owns one
//! and hands clones to the adapters it creates, so verbosity is decided per
//! manager rather than by a process-wide logger.
//!
//! 每个管理器拥有一个 [`Logger`]，并将其克隆交给它创建的适配器，
//! 因此日志详细程度按管理器决定，而不是由全局日志器决定。

use crate::config::LogConfig;
use tracing::{Level, Span};

/// Emits a tracing event under a [`Logger`]'s span, if the logger's level
/// allows it.
macro_rules! log_at {
    ($logger:expr, $lvl:ident, $($arg:tt)+) => {
        if $logger.enabled(::tracing::Level::$lvl) {
            ::tracing::event!(parent: $logger.span(), ::tracing::Level::$lvl, $($arg)+);
        }
    };
}
pub(crate) use log_at;

#[derive(Debug, Clone)]
pub(crate) struct Logger {
    config: LogConfig,
    span: Span,
}

impl Logger {
    pub(crate) fn new(name: &str, config: LogConfig) -> Self {
        Self {
            config,
            span: tracing::info_span!("pdcp", name = %name),
        }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level <= self.config.level
    }

    pub(crate) fn span(&self) -> &Span {
        &self.span
    }

    /// Hex-encodes at most `hex_limit` bytes of `payload`, appending `..` when
    /// bytes were cut off. A limit of 0 dumps no bytes at all.
    /// 最多以十六进制编码 `hex_limit` 个字节，截断时追加 `..`。限制为 0 时不转储任何字节。
    pub(crate) fn hex_dump(&self, payload: &[u8]) -> String {
        let limit = self.config.hex_limit.min(payload.len());
        let mut out = hex::encode(&payload[..limit]);
        if limit < payload.len() {
            out.push_str("..");
        }
        out
    }
}

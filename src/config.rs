//! 定义了管理器的可配置参数。
//! Defines configurable parameters for the connection manager.

use crate::error::{Error, Result};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// A structure containing all configurable parameters for a manager instance.
///
/// 包含管理器实例所有可配置参数的结构体。
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the manager instance. Used as the name of its tracing span.
    /// 管理器实例的名称。用作其 tracing span 的名称。
    pub name: String,

    /// Logging-related parameters.
    /// 日志相关参数。
    pub log: LogConfig,
}

/// Logging-related parameters.
///
/// These apply to a single manager (and the adapters it creates), never to
/// the whole process, so several managers can run with different verbosity.
///
/// 日志相关参数。仅作用于单个管理器（及其创建的适配器），而不是整个进程，
/// 因此多个管理器可以使用不同的详细程度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// The most verbose level this manager emits.
    /// 此管理器输出的最详细日志级别。
    pub level: LevelFilter,
    /// Maximum number of payload bytes dumped as hex in trace output. `0`
    /// disables the dump; a non-empty payload then shows only as `..`.
    /// 在 trace 输出中以十六进制转储的最大载荷字节数。`0` 表示不转储；
    /// 非空载荷只显示为 `..`。
    pub hex_limit: usize,
}

impl LogConfig {
    /// Builds a log config from a level string such as `"info"` or `"debug"`.
    /// `"none"` is accepted as an alias for `"off"`.
    ///
    /// 从级别字符串（如 `"info"` 或 `"debug"`）构建日志配置。`"none"` 等同于 `"off"`。
    pub fn from_level_str(level: &str, hex_limit: usize) -> Result<Self> {
        let normalized = level.trim().to_ascii_lowercase();
        let level = match normalized.as_str() {
            "none" => LevelFilter::OFF,
            "warning" => LevelFilter::WARN,
            other => LevelFilter::from_str(other)
                .map_err(|_| Error::InvalidLogLevel(level.to_string()))?,
        };
        Ok(Self { level, hex_limit })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "PDCP-NR".to_string(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            hex_limit: 32,
        }
    }
}

//! 承载的安全配置：算法标识与密钥。
//! Bearer security configuration: algorithm identifiers and keys.

use std::fmt;

/// A 256-bit key.
pub type Key = [u8; 32];

/// Ciphering algorithm identifiers.
/// 加密算法标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CipherAlgorithm {
    /// Null ciphering.
    #[default]
    Nea0,
    Nea1,
    Nea2,
    Nea3,
}

/// Integrity protection algorithm identifiers.
/// 完整性保护算法标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrityAlgorithm {
    /// Null integrity.
    #[default]
    Nia0,
    Nia1,
    Nia2,
    Nia3,
}

/// Cipher/integrity algorithms and keys installed on a bearer.
///
/// `Debug` never prints key material.
///
/// 安装在承载上的加密/完整性算法与密钥。`Debug` 输出不会打印密钥。
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SecurityConfig {
    pub cipher_algo: CipherAlgorithm,
    pub integrity_algo: IntegrityAlgorithm,
    pub k_rrc_enc: Key,
    pub k_rrc_int: Key,
    pub k_up_enc: Key,
    pub k_up_int: Key,
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("cipher_algo", &self.cipher_algo)
            .field("integrity_algo", &self.integrity_algo)
            .field("keys", &"<redacted>")
            .finish()
    }
}

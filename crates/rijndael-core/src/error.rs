//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Input validation failures raised before any transformation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Master key length is not 16, 24 or 32 bytes.
    #[error("invalid key length `{len}` bytes, expected 16, 24 or 32")]
    KeyLength {
        /// Length of the rejected key.
        len: usize,
    },

    /// Plaintext or ciphertext block is not exactly 16 bytes.
    #[error("invalid block length `{len}` bytes, expected 16")]
    BlockLength {
        /// Length of the rejected block.
        len: usize,
    },
}

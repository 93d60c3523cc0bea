//! Rijndael-family block cipher core.
//!
//! This crate provides:
//! - GF(2^8) multiplication and the fixed substitution tables.
//! - The four round layers (substitution, row permutation, column mixing,
//!   key mixing) and their inverses.
//! - Key expansion for 16, 24 and 32-byte master keys.
//! - Single-block encryption and decryption, both as free functions that
//!   expand the key on every call and through [`Rijndael`], which caches the
//!   schedule.
//!
//! The round structure and key schedule are this crate's own: round keys are
//! as long as the master key and the last two forward rounds skip column
//! mixing. Ciphertexts do not interoperate with FIPS-197 AES. Nothing here is
//! constant-time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod round;
mod sbox;
mod schedule;

pub use crate::block::{block_from_slice, Block, BLOCK_LEN};
pub use crate::cipher::{decrypt_block, encrypt_block, Rijndael};
pub use crate::error::CipherError;
pub use crate::gf::gf_mul;
pub use crate::key::{KeySize, RoundKey, RoundKeys, MAX_KEY_LEN, MAX_ROUNDS};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
pub use crate::sbox::{inv_sbox, sbox};
pub use crate::schedule::{expand_decryption_key, expand_key};

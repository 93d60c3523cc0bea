//! Single-block encryption and decryption.

use crate::block::{block_from_slice, Block};
use crate::error::CipherError;
use crate::key::{KeySize, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::schedule::expand_validated;

/// Encrypts one 16-byte block, expanding `master_key` for this call only.
pub fn encrypt_block(plaintext: &[u8], master_key: &[u8]) -> Result<Block, CipherError> {
    let size = KeySize::from_len(master_key.len())?;
    let block = block_from_slice(plaintext)?;
    let round_keys = expand_validated(master_key, size);
    Ok(encrypt_with(&block, &round_keys))
}

/// Decrypts one 16-byte block, expanding `master_key` for this call only.
pub fn decrypt_block(ciphertext: &[u8], master_key: &[u8]) -> Result<Block, CipherError> {
    let size = KeySize::from_len(master_key.len())?;
    let block = block_from_slice(ciphertext)?;
    let round_keys = expand_validated(master_key, size).reversed();
    Ok(decrypt_with(&block, &round_keys))
}

/// Runs the forward pipeline with a forward schedule.
///
/// Rounds `Nr - 1` and `Nr` both skip column mixing.
fn encrypt_with(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.key_size().rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0).as_bytes());

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        if round != rounds - 1 {
            mix_columns(&mut state);
        }
        add_round_key(&mut state, round_keys.get(round).as_bytes());
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds).as_bytes());

    state
}

/// Runs the inverse pipeline with a reversed schedule.
///
/// Forward round `i` used reversed key `Nr - i`; the step undoing it skips
/// inverse column mixing when `i == Nr - 1`.
fn decrypt_with(block: &Block, reversed_keys: &RoundKeys) -> Block {
    let rounds = reversed_keys.key_size().rounds();
    let mut state = *block;

    add_round_key(&mut state, reversed_keys.get(0).as_bytes());

    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, reversed_keys.get(rounds - round).as_bytes());
        if round != rounds - 1 {
            inv_mix_columns(&mut state);
        }
    }

    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, reversed_keys.get(rounds).as_bytes());

    state
}

/// Block cipher with its key schedule expanded once.
///
/// Immutable after construction, so one instance can serve any number of
/// threads encrypting blocks under the same key.
#[derive(Clone, Debug)]
pub struct Rijndael {
    encrypt_keys: RoundKeys,
    decrypt_keys: RoundKeys,
}

impl Rijndael {
    /// Validates `master_key` and expands both schedules.
    pub fn new(master_key: &[u8]) -> Result<Self, CipherError> {
        let size = KeySize::from_len(master_key.len())?;
        let encrypt_keys = expand_validated(master_key, size);
        let decrypt_keys = encrypt_keys.reversed();
        log::debug!(
            "rijndael schedule ready: {}-byte key, {} rounds",
            size.key_len(),
            size.rounds()
        );
        Ok(Self {
            encrypt_keys,
            decrypt_keys,
        })
    }

    /// Size of the master key.
    pub fn key_size(&self) -> KeySize {
        self.encrypt_keys.key_size()
    }

    /// Number of rounds (`Nr`).
    pub fn rounds(&self) -> usize {
        self.key_size().rounds()
    }

    /// Forward round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.encrypt_keys
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, plaintext: &Block) -> Block {
        encrypt_with(plaintext, &self.encrypt_keys)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, ciphertext: &Block) -> Block {
        decrypt_with(ciphertext, &self.decrypt_keys)
    }
}

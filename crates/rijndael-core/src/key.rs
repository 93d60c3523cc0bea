//! Key sizes and expanded round keys.

use crate::error::CipherError;

/// Longest supported master key, in bytes.
pub const MAX_KEY_LEN: usize = 32;

/// Largest round count, reached with 32-byte keys.
pub const MAX_ROUNDS: usize = 14;

/// Supported master key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 16-byte key, 10 rounds.
    Aes128,
    /// 24-byte key, 12 rounds.
    Aes192,
    /// 32-byte key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Picks the key size matching a key of `len` bytes.
    pub fn from_len(len: usize) -> Result<Self, CipherError> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            _ => Err(CipherError::KeyLength { len }),
        }
    }

    /// Key length in bytes (`Nk`).
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Number of rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }
}

/// One round key, as long as the master key it was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKey {
    bytes: [u8; MAX_KEY_LEN],
    len: usize,
}

impl RoundKey {
    /// Builds a zeroed round key of `size.key_len()` bytes.
    pub(crate) fn zeroed(size: KeySize) -> Self {
        Self {
            bytes: [0u8; MAX_KEY_LEN],
            len: size.key_len(),
        }
    }

    /// Copies `bytes` into a round key. The caller has validated the length.
    pub(crate) fn from_validated(bytes: &[u8]) -> Self {
        let mut key = [0u8; MAX_KEY_LEN];
        key[..bytes.len()].copy_from_slice(bytes);
        Self {
            bytes: key,
            len: bytes.len(),
        }
    }

    /// Key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }

    /// Key length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for keys produced by expansion; present for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for RoundKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Expanded round keys, `Nr + 1` of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    size: KeySize,
    keys: [RoundKey; MAX_ROUNDS + 1],
}

impl RoundKeys {
    pub(crate) fn new(size: KeySize) -> Self {
        Self {
            size,
            keys: [RoundKey::zeroed(size); MAX_ROUNDS + 1],
        }
    }

    /// Key size the schedule was expanded from.
    #[inline]
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Number of round keys (`Nr + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.size.rounds() + 1
    }

    /// Never true: a schedule always holds at least the master key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the round key at `round` (0..=Nr).
    ///
    /// # Panics
    ///
    /// Panics if `round` exceeds the round count.
    #[inline]
    pub fn get(&self, round: usize) -> &RoundKey {
        &self.as_slice()[round]
    }

    pub(crate) fn get_mut(&mut self, round: usize) -> &mut RoundKey {
        let len = self.len();
        &mut self.keys[..len][round]
    }

    /// All round keys in order.
    #[inline]
    pub fn as_slice(&self) -> &[RoundKey] {
        &self.keys[..self.len()]
    }

    /// Iterates over the round keys in order.
    pub fn iter(&self) -> core::slice::Iter<'_, RoundKey> {
        self.as_slice().iter()
    }

    /// Returns the schedule with its keys in reverse order.
    pub fn reversed(&self) -> Self {
        let mut out = *self;
        out.keys[..self.len()].reverse();
        out
    }
}

impl<'a> IntoIterator for &'a RoundKeys {
    type Item = &'a RoundKey;
    type IntoIter = core::slice::Iter<'a, RoundKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Key expansion.

use crate::error::CipherError;
use crate::gf::gf_mul;
use crate::key::{KeySize, RoundKey, RoundKeys};
use crate::sbox::sbox;

const RCON: [u8; 11] = [
    0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

/// Round constant for `round`. Past the end of [`RCON`] the sequence keeps doubling.
fn rcon(round: usize) -> u8 {
    match RCON.get(round) {
        Some(&constant) => constant,
        None => (RCON.len()..=round).fold(RCON[RCON.len() - 1], |c, _| gf_mul(c, 0x02)),
    }
}

/// Expands a 16, 24 or 32-byte master key into `Nr + 1` round keys.
///
/// Round key 0 is the master key. Each later key is derived from the one
/// before it and has the same length.
pub fn expand_key(master_key: &[u8]) -> Result<RoundKeys, CipherError> {
    let size = KeySize::from_len(master_key.len())?;
    Ok(expand_validated(master_key, size))
}

/// Expands the decryption schedule: the forward schedule in reverse order.
pub fn expand_decryption_key(master_key: &[u8]) -> Result<RoundKeys, CipherError> {
    expand_key(master_key).map(|keys| keys.reversed())
}

pub(crate) fn expand_validated(master_key: &[u8], size: KeySize) -> RoundKeys {
    let nk = size.key_len();
    let mut keys = RoundKeys::new(size);
    *keys.get_mut(0) = RoundKey::from_validated(master_key);

    for round in 1..=size.rounds() {
        let prev_key = *keys.get(round - 1);
        let prev = prev_key.as_bytes();
        let next = keys.get_mut(round).as_bytes_mut();
        for j in 0..nk {
            next[j] = if j == 0 {
                sbox(prev[1 % nk]) ^ prev[0] ^ rcon(round)
            } else if nk > 24 && j == 16 {
                sbox(next[j - 1]) ^ prev[j]
            } else {
                // Offset `j - Nk` wraps to `j`, which is still zero here.
                next[j] ^ prev[j]
            };
        }
    }

    log::trace!(
        "expanded {} round keys of {} bytes",
        keys.len(),
        size.key_len()
    );
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_constants() {
        assert_eq!(rcon(0), 0x8d);
        assert_eq!(rcon(1), 0x01);
        assert_eq!(rcon(10), 0x36);
        assert_eq!(rcon(11), 0x6c);
        assert_eq!(rcon(12), 0xd8);
        assert_eq!(rcon(13), 0xab);
        assert_eq!(rcon(14), 0x4d);
    }

    #[test]
    fn schedule_lengths_follow_key_size() {
        for (key_len, count) in [(16usize, 11usize), (24, 13), (32, 15)] {
            let master = vec![0x42u8; key_len];
            let keys = expand_key(&master).expect("valid key");
            assert_eq!(keys.len(), count);
            assert!(keys.iter().all(|k| k.len() == key_len));
            assert_eq!(keys.get(0).as_bytes(), master.as_slice());
        }
    }

    #[test]
    fn rejects_bad_key_lengths() {
        for len in [0usize, 15, 17, 23, 25, 31, 33] {
            let master = vec![0u8; len];
            assert_eq!(expand_key(&master), Err(CipherError::KeyLength { len }));
            assert_eq!(
                expand_decryption_key(&master),
                Err(CipherError::KeyLength { len })
            );
        }
    }

    #[test]
    fn first_round_key_all_ones() {
        let keys = expand_key(&[0xff; 16]).expect("valid key");
        let mut expected = [0xffu8; 16];
        expected[0] = 0xe8;
        assert_eq!(keys.get(1).as_bytes(), &expected);
    }

    #[test]
    fn long_keys_also_refresh_byte_sixteen() {
        let keys = expand_key(&[0xff; 32]).expect("valid key");
        let first = keys.get(1).as_bytes();
        assert_eq!(first[0], 0xe8);
        assert_eq!(first[16], 0xe9);
        assert!(first
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 0 && *i != 16)
            .all(|(_, &b)| b == 0xff));

        let medium = expand_key(&[0xff; 24]).expect("valid key");
        assert_eq!(medium.get(1).as_bytes()[16], 0xff);
    }

    #[test]
    fn sequential_key_last_round() {
        let master: Vec<u8> = (0u8..16).collect();
        let keys = expand_key(&master).expect("valid key");
        let mut expected = master.clone();
        expected[0] = 0xd2;
        assert_eq!(keys.get(10).as_bytes(), expected.as_slice());
    }

    #[test]
    fn decryption_schedule_is_reversed() {
        let master: Vec<u8> = (0u8..24).collect();
        let forward = expand_key(&master).expect("valid key");
        let backward = expand_decryption_key(&master).expect("valid key");
        assert_eq!(backward.len(), forward.len());
        for i in 0..forward.len() {
            assert_eq!(backward.get(i), forward.get(forward.len() - 1 - i));
        }
        assert_eq!(backward.get(12).as_bytes(), master.as_slice());
    }
}

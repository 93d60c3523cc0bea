//! Round layers and their inverses.
//!
//! Every layer works in place on a [`Block`]. Byte `p` of the state sits in
//! column `p / 4`, row `p % 4`.

use crate::block::{xor_prefix_in_place, Block};
use crate::gf::gf_mul;
use crate::sbox::{inv_sbox, sbox};

const MIX_MATRIX: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

const INV_MIX_MATRIX: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Substitutes every state byte through the forward table.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Substitutes every state byte through the inverse table.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Rotates row `r` left by `r` columns.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let src = *state;
    for (pos, byte) in state.iter_mut().enumerate() {
        let (col, row) = (pos / 4, pos % 4);
        *byte = src[((col + row) % 4) * 4 + row];
    }
}

/// Rotates row `r` right by `r` columns, undoing [`shift_rows`].
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let src = *state;
    for (pos, byte) in state.iter_mut().enumerate() {
        let (col, row) = (pos / 4, pos % 4);
        *byte = src[((col + 4 - row) % 4) * 4 + row];
    }
}

fn mix_single_column(column: &mut [u8], matrix: &[[u8; 4]; 4]) {
    let input = [column[0], column[1], column[2], column[3]];
    for (out, coefficients) in column.iter_mut().zip(matrix.iter()) {
        *out = coefficients
            .iter()
            .zip(input.iter())
            .fold(0, |acc, (&m, &x)| acc ^ gf_mul(m, x));
    }
}

/// Multiplies each column by the forward mixing matrix.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        mix_single_column(column, &MIX_MATRIX);
    }
}

/// Multiplies each column by the inverse mixing matrix.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        mix_single_column(column, &INV_MIX_MATRIX);
    }
}

/// XORs a round key into the state.
///
/// Bytes are paired by position up to the shorter of the two, so a 24 or
/// 32-byte round key only touches the 16 state bytes and an empty key leaves
/// the state as it is.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &[u8]) {
    xor_prefix_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn random_block(rng: &mut impl RngCore) -> Block {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        block
    }

    #[test]
    fn shift_rows_moves_rows_across_columns() {
        let identity: Block = core::array::from_fn(|i| i as u8);
        let mut state = identity;
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        inv_shift_rows(&mut state);
        assert_eq!(state, identity);
    }

    #[test]
    fn mix_columns_known_column() {
        let mut state = [
            0xdb, 0x13, 0x53, 0x45, 0xf2, 0x0a, 0x22, 0x5c, 0x01, 0x01, 0x01, 0x01, 0xc6, 0xc6,
            0xc6, 0xc6,
        ];
        mix_columns(&mut state);
        assert_eq!(
            state,
            [
                0x8e, 0x4d, 0xa1, 0xbc, 0x9f, 0xdc, 0x58, 0x9d, 0x01, 0x01, 0x01, 0x01, 0xc6,
                0xc6, 0xc6, 0xc6,
            ]
        );
    }

    #[test]
    fn layers_invert_on_random_states() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let original = random_block(&mut rng);

            let mut state = original;
            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            assert_eq!(state, original);

            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(state, original);

            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(state, original);

            inv_mix_columns(&mut state);
            mix_columns(&mut state);
            assert_eq!(state, original);
        }
    }

    #[test]
    fn add_round_key_is_self_inverse() {
        let mut rng = rand::thread_rng();
        for key_len in [16usize, 24, 32] {
            let original = random_block(&mut rng);
            let mut key = vec![0u8; key_len];
            rng.fill_bytes(&mut key);

            let mut state = original;
            add_round_key(&mut state, &key);
            assert_ne!(state, original);
            add_round_key(&mut state, &key);
            assert_eq!(state, original);
        }
    }

    #[test]
    fn add_round_key_with_empty_or_short_key() {
        let mut state = [0x5a; 16];
        add_round_key(&mut state, &[]);
        assert_eq!(state, [0x5a; 16]);

        add_round_key(&mut state, &[0xff, 0xff]);
        assert_eq!(&state[..2], &[0xa5, 0xa5]);
        assert_eq!(&state[2..], &[0x5a; 14]);
    }
}

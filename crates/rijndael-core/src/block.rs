//! Block representation helpers.

use crate::error::CipherError;

/// Block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Cipher state of 16 bytes, a 4x4 matrix stored column by column.
pub type Block = [u8; BLOCK_LEN];

/// Copies `bytes` into a [`Block`], rejecting anything that is not 16 bytes.
pub fn block_from_slice(bytes: &[u8]) -> Result<Block, CipherError> {
    bytes
        .try_into()
        .map_err(|_| CipherError::BlockLength { len: bytes.len() })
}

/// XORs `rhs` into `dst` position by position, stopping at the shorter of the two.
#[inline]
pub(crate) fn xor_prefix_in_place(dst: &mut Block, rhs: &[u8]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_from_slice_accepts_sixteen_bytes() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let block = block_from_slice(&bytes).expect("16 bytes");
        assert_eq!(block[0], 0);
        assert_eq!(block[15], 15);
    }

    #[test]
    fn block_from_slice_rejects_other_lengths() {
        for len in [0usize, 1, 15, 17, 32] {
            let bytes = vec![0u8; len];
            assert_eq!(
                block_from_slice(&bytes),
                Err(CipherError::BlockLength { len })
            );
        }
    }

    #[test]
    fn xor_prefix_leaves_tail_untouched() {
        let mut block = [0xaa; 16];
        xor_prefix_in_place(&mut block, &[0xff; 4]);
        assert_eq!(&block[..4], &[0x55; 4]);
        assert_eq!(&block[4..], &[0xaa; 12]);
    }
}

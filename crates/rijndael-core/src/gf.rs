//! Arithmetic in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.

/// Low byte of the reduction polynomial `0x11b`; the x^8 term is the bit shifted out.
const REDUCTION: u8 = 0x1b;

/// Multiplies `a` and `b` in GF(2^8).
///
/// Shift-and-add: for every set bit of `b` the current multiple of `a` is
/// accumulated, and `a` is doubled (reduced on overflow) between steps. The
/// loop ends as soon as either operand is exhausted, after at most 8 steps.
pub fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while a != 0 && b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let overflow = a & 0x80 != 0;
        a <<= 1;
        if overflow {
            a ^= REDUCTION;
        }
        b >>= 1;
    }
    product
}

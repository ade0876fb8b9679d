// Rounding 0b111...1 up to fewer bits carries into a single-bit mantissa.

use zzint::mpmath::{normalize, RoundingMode};
use zzint::BigInt;

#[test]
fn test() {
    let man = (BigInt::from(1) << 130u32) - BigInt::from(1);
    let f = normalize(false, &man, &BigInt::ZERO, 130, 64, RoundingMode::Nearest).unwrap();
    assert_eq!(f.man, 1);
    assert_eq!(f.exp, 130);
    assert_eq!(f.bc, 1);
}

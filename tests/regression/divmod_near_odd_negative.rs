// Halving an odd negative divisor rounds toward negative infinity, so the
// tie test has to compare `2 * r` against the divisor itself.

use zzint::BigInt;

#[test]
fn test() {
    let (q, r) = BigInt::from(7).try_divmod_near(&BigInt::from(-3)).unwrap();
    assert_eq!((q, r), (BigInt::from(-2), BigInt::from(1)));
    let (q, r) = BigInt::from(-7).try_divmod_near(&BigInt::from(-3)).unwrap();
    assert_eq!((q, r), (BigInt::from(2), BigInt::from(-1)));
}

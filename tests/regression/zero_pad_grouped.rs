// Zeros inserted by sign-aware zero padding are grouped with the digits, and
// a separator never leads.

use zzint::BigInt;

#[test]
fn test() {
    let fmt = |n: i64, spec: &str| BigInt::from(n).format(spec).unwrap();
    assert_eq!(fmt(1234, "09,"), "0,001,234");
    assert_eq!(fmt(1234, "08,"), "0,001,234");
    assert_eq!(fmt(1234, "07,"), "001,234");
    assert_eq!(fmt(-1234, "+010,"), "-0,001,234");
    assert_eq!(fmt(-1, "0=11,"), "-00,000,001");
    assert_eq!(fmt(255, "010_x"), "0_0000_00ff");
    assert_eq!(fmt(255, "#011_x"), "0x0000_00ff");
    assert_eq!(fmt(5, "#010_b"), "0b000_0101");

    // Only sign-aware zero fill is grouped.
    assert_eq!(fmt(1234, "0>9,"), "00001,234");
    assert_eq!(fmt(1234, "<09,"), "1,2340000");
    assert_eq!(fmt(1234, "*=9,"), "****1,234");
}

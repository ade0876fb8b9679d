use zzint::BigInt;

#[test]
fn test() {
    let n = -(BigInt::from(1) << 200u32);
    assert_eq!(&n >> 200u32, -1);
    assert_eq!(&n >> 199u32, -2);
    assert_eq!(&n >> 201u32, -1);
    assert_eq!(n.try_shr(u64::MAX).unwrap(), -1);
}

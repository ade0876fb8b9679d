use zzint::BigInt;

#[test]
fn test() {
    let n = BigInt::from(i64::MIN);
    assert_eq!(n.to_i64().unwrap(), i64::MIN);
    assert_eq!(n.to_string(), "-9223372036854775808");
    assert_eq!(-&n, 9223372036854775808u64);
    assert_eq!((-&n).to_i64().unwrap_err().classify(), zzint::Category::Overflow);
    assert_eq!(n.to_bytes(8, zzint::ByteOrder::Big, true).unwrap(), i64::MIN.to_be_bytes());
}

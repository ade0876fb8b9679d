use zzint::mpmath::{create, normalize, RoundingMode};
use zzint::value::{mpmath_create, mpmath_normalize};
use zzint::{BigInt, Value};

fn big(s: &str) -> BigInt {
    s.parse().unwrap()
}

fn tuple(negative: bool, man: &str, exp: i64, bc: u64) -> (bool, BigInt, BigInt, u64) {
    (negative, big(man), BigInt::from(exp), bc)
}

const WIDE: &str = "6277101735386680763495507056286727952638980837032266301441";

#[test]
fn test_normalize() {
    let cases = [
        ((false, "11", 0, 3, 'n'), tuple(false, "3", 2, 2)),
        ((true, "11", 0, 3, 'f'), tuple(true, "3", 2, 2)),
        ((false, "9727076909039105", -48, 53, 'u'), tuple(false, "4863538454519553", -47, 53)),
        ((true, "9727076909039105", -48, 53, 'u'), tuple(true, "4863538454519553", -47, 53)),
        ((true, WIDE, 0, 64, 'f'), tuple(true, "1", 192, 1)),
        ((false, WIDE, 0, 64, 'n'), tuple(false, "18446744073709551615", 128, 64)),
        ((false, "12345678901234567890123", 10, 30, 'n'), tuple(false, "701770597", 54, 30)),
        ((true, "12345678901234567890123", 10, 30, 'c'), tuple(true, "175442649", 56, 28)),
    ];
    for ((negative, man, exp, prec, rnd), expected) in cases {
        let man = big(man);
        let rnd = RoundingMode::try_from(rnd).unwrap();
        let f = normalize(negative, &man, &BigInt::from(exp), man.bit_length(), prec, rnd).unwrap();
        assert_eq!(f.into_tuple(), expected, "{} {} {}", man, prec, rnd);
    }
}

#[test]
fn test_normalize_wide_mantissa() {
    let man = (BigInt::from(1) << 200u32) - BigInt::from(1);
    let down = normalize(false, &man, &BigInt::from(-7), 200, 100, RoundingMode::Down).unwrap();
    assert_eq!(
        down.into_tuple(),
        tuple(false, "1267650600228229401496703205375", 93, 100)
    );
    let up = normalize(false, &man, &BigInt::from(-7), 200, 100, RoundingMode::Ceiling).unwrap();
    assert_eq!(up.into_tuple(), tuple(false, "1", 193, 1));
}

#[test]
fn test_normalize_huge_exponent() {
    let exp = big("-100000000000000000000000000000");
    let f = normalize(false, &BigInt::from(12), &exp, 4, 53, RoundingMode::Nearest).unwrap();
    assert_eq!(f.man, 3);
    assert_eq!(f.exp, big("-99999999999999999999999999998"));
    assert_eq!(f.bc, 2);
}

#[test]
fn test_create() {
    let cases = [
        (("-".to_owned() + WIDE, 0, 64, RoundingMode::Floor), tuple(true, "1", 192, 1)),
        (
            ("-".to_owned() + WIDE, 0, 64, RoundingMode::Ceiling),
            tuple(true, "18446744073709551615", 128, 64),
        ),
        (("96".to_owned(), -3, 0, RoundingMode::Nearest), tuple(false, "3", 2, 2)),
        (("-96".to_owned(), 5, 0, RoundingMode::Nearest), tuple(true, "3", 10, 2)),
        (("0".to_owned(), 5, 10, RoundingMode::Nearest), tuple(false, "0", 0, 0)),
        (("255".to_owned(), 0, 4, RoundingMode::Nearest), tuple(false, "1", 8, 1)),
        (("-255".to_owned(), 0, 4, RoundingMode::Down), tuple(true, "15", 4, 4)),
        (
            ("1000000000000000000000000000000".to_owned(), -5, 20, RoundingMode::Up),
            tuple(false, "827181", 75, 20),
        ),
    ];
    for ((man, exp, prec, rnd), expected) in cases {
        let f = create(&big(&man), &BigInt::from(exp), prec, rnd).unwrap();
        assert_eq!(f.into_tuple(), expected, "{} {} {}", man, prec, rnd);
    }
}

#[test]
fn test_dynamic_normalize() {
    let args = [
        Value::from(1),
        Value::from(big("9727076909039105")),
        Value::from(-48),
        Value::from(54),
        Value::from(53),
        Value::from("u"),
    ];
    let f = mpmath_normalize(&args).unwrap();
    assert_eq!(f.into_tuple(), tuple(true, "4863538454519553", -47, 53));

    // The sign only matters as zero or non-zero.
    let mut args = args;
    args[0] = Value::from(big("-5"));
    assert!(mpmath_normalize(&args).unwrap().negative);
    args[0] = Value::from(false);
    assert!(!mpmath_normalize(&args).unwrap().negative);
}

#[test]
fn test_dynamic_normalize_errors() {
    let good = || {
        vec![
            Value::from(0),
            Value::from(BigInt::from(11)),
            Value::from(0),
            Value::from(4),
            Value::from(3),
            Value::from("n"),
        ]
    };
    assert!(mpmath_normalize(&good()).is_ok());
    assert!(mpmath_normalize(&good()[..5]).unwrap_err().is_type());

    let mut args = good();
    args[1] = Value::from(11);
    assert!(mpmath_normalize(&args).unwrap_err().is_type());

    let mut args = good();
    args[1] = Value::from(BigInt::from(-11));
    assert!(mpmath_normalize(&args).unwrap_err().is_value());

    let mut args = good();
    args[5] = Value::from("x");
    assert!(mpmath_normalize(&args).unwrap_err().is_value());

    let mut args = good();
    args[5] = Value::from(1);
    assert!(mpmath_normalize(&args).unwrap_err().is_value());

    let mut args = good();
    args[4] = Value::from(-1);
    assert!(mpmath_normalize(&args).unwrap_err().is_value());

    let mut args = good();
    args[2] = Value::from(1.5);
    assert!(mpmath_normalize(&args).unwrap_err().is_type());
}

#[test]
fn test_dynamic_create() {
    let args = [Value::from(-96), Value::from(5)];
    assert_eq!(mpmath_create(&args).unwrap().into_tuple(), tuple(true, "3", 10, 2));

    let args = [
        Value::from(big("1000000000000000000000000000000")),
        Value::from(-5),
        Value::from(20),
        Value::from("u"),
    ];
    assert_eq!(mpmath_create(&args).unwrap().into_tuple(), tuple(false, "827181", 75, 20));

    let args = [Value::from(255), Value::from(0), Value::from(4)];
    assert_eq!(mpmath_create(&args).unwrap().into_tuple(), tuple(false, "1", 8, 1));
}

#[test]
fn test_dynamic_create_errors() {
    assert!(mpmath_create(&[Value::from(1)]).unwrap_err().is_type());
    let five = vec![Value::from(1); 5];
    assert!(mpmath_create(&five).unwrap_err().is_type());
    assert!(mpmath_create(&[Value::from(1.0), Value::from(0)]).unwrap_err().is_type());
    assert!(mpmath_create(&[Value::from(1), Value::from("0")]).unwrap_err().is_type());

    let args = [Value::from(1), Value::from(0), Value::from(BigInt::from(10))];
    assert!(mpmath_create(&args).unwrap_err().is_type());
    let args = [Value::from(1), Value::from(0), Value::from(-1)];
    assert!(mpmath_create(&args).unwrap_err().is_value());
    let args = [Value::from(1), Value::from(0), Value::from(10), Value::from("q")];
    assert!(mpmath_create(&args).unwrap_err().is_value());
}

#![feature(test)]

extern crate test;

use test::Bencher;
use zzint::BigInt;

fn operand(bits: u32) -> BigInt {
    // 0xaaaa... with the top bit set
    let ones = (BigInt::from(1) << bits) - BigInt::from(1);
    &ones / &BigInt::from(3) * BigInt::from(2) + BigInt::from(1)
}

#[bench]
fn bench_mul_schoolbook(b: &mut Bencher) {
    let x = operand(1000);
    b.iter(|| x.try_mul(&x).unwrap());
}

#[bench]
fn bench_mul_karatsuba(b: &mut Bencher) {
    let x = operand(100_000);
    b.iter(|| x.try_mul(&x).unwrap());
}

#[bench]
fn bench_divmod(b: &mut Bencher) {
    let x = operand(20_000);
    let y = operand(7_000);
    b.iter(|| x.try_divmod(&y).unwrap());
}

#[bench]
fn bench_to_decimal(b: &mut Bencher) {
    let x = operand(20_000);
    b.iter(|| x.to_str_radix(10).unwrap());
}

#[bench]
fn bench_from_decimal(b: &mut Bencher) {
    let text = operand(20_000).to_string();
    b.bytes = text.len() as u64;
    b.iter(|| BigInt::from_str_radix(&text, 10).unwrap());
}

#[bench]
fn bench_format_grouped(b: &mut Bencher) {
    let x = operand(2_000);
    b.iter(|| x.format("+,").unwrap());
}

#[bench]
fn bench_factorial(b: &mut Bencher) {
    b.iter(|| zzint::factorial(test::black_box(5000)).unwrap());
}

#[bench]
fn bench_gcd(b: &mut Bencher) {
    let x = operand(4_000);
    let y = operand(3_001);
    b.iter(|| zzint::gcd(&[&x, &y]).unwrap());
}

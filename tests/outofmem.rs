use parking_lot::Mutex;
use std::thread;
use zzint::{BigInt, Category};

// The memory ceiling is process-wide.
static LIMIT: Mutex<()> = parking_lot::const_mutex(());

struct Ceiling;

impl Ceiling {
    fn set(bytes: usize) -> Ceiling {
        zzint::set_memory_limit(Some(bytes));
        Ceiling
    }
}

impl Drop for Ceiling {
    fn drop(&mut self) {
        zzint::set_memory_limit(None);
    }
}

#[test]
fn test_square_outofmem() {
    let _guard = LIMIT.lock();
    for start in [49846727467293u64, 149846727467293, 249846727467293] {
        let baseline = zzint::memory_in_use();
        let ceiling = Ceiling::set(baseline + (1 << 20));
        let mut x = BigInt::from(start);
        let mut i = 1;
        let err = loop {
            match x.try_mul(&x) {
                Ok(square) => x = square,
                Err(err) => break err,
            }
            i += 1;
        };
        assert_eq!(err.classify(), Category::Memory);
        assert!(err.is_out_of_memory());
        assert!(i > 5, "failed after {} squarings", i);

        // Nothing from the failed product is still held.
        drop(x);
        assert_eq!(zzint::memory_in_use(), baseline);

        // The failure is transient.
        let small = BigInt::from(start).try_mul(&BigInt::from(start)).unwrap();
        assert_eq!(small, start as u128 * start as u128);
        drop(ceiling);
    }
}

#[test]
fn test_factorial_outofmem() {
    let _guard = LIMIT.lock();
    let baseline = zzint::memory_in_use();
    let _ceiling = Ceiling::set(baseline + (256 << 10));
    let mut n = 12811u64;
    let err = loop {
        match zzint::factorial(n) {
            Ok(_) => n *= 2,
            Err(err) => break err,
        }
    };
    assert!(err.is_out_of_memory(), "{:?}", err);
    assert_eq!(zzint::memory_in_use(), baseline);
    assert_eq!(zzint::factorial(20).unwrap(), 2432902008176640000u64);
}

#[test]
fn test_text_outofmem() {
    let _guard = LIMIT.lock();
    let x = (BigInt::from(1) << 100_000u32) - BigInt::from(1);
    let baseline = zzint::memory_in_use();
    let ceiling = Ceiling::set(baseline + 64);
    assert!(x.to_str_radix(10).unwrap_err().is_out_of_memory());
    assert!(x.try_add(&x).unwrap_err().is_out_of_memory());
    assert_eq!(zzint::memory_in_use(), baseline);
    drop(ceiling);
    assert_eq!(x.to_str_radix(16).unwrap().len(), 25_000);
}

#[test]
fn test_limit_round_trip() {
    let _guard = LIMIT.lock();
    assert_eq!(zzint::set_memory_limit(Some(1 << 30)), None);
    assert_eq!(zzint::set_memory_limit(None), Some(1 << 30));
    assert_eq!(zzint::set_memory_limit(None), None);
}

#[test]
fn test_free_cache() {
    let _guard = LIMIT.lock();
    let values: Vec<BigInt> = (0..10u32).map(|i| BigInt::from(1) << (64 * i + 100)).collect();
    drop(values);
    assert!(zzint::free_cache() >= 1);
    assert_eq!(zzint::free_cache(), 0);
}

#[test]
fn test_concurrent_arithmetic() {
    let _guard = LIMIT.lock();
    let baseline = zzint::memory_in_use();
    let workers: Vec<_> = (0..8u64)
        .map(|t| {
            thread::spawn(move || {
                let base = BigInt::from(t + 2) << (200 + 64 * t as u32);
                for i in 0..500u64 {
                    let x = &base + BigInt::from(i);
                    let y = BigInt::from(i * 7 + 3);
                    let square = &x * &x;
                    let (q, r) = square.try_divmod(&y).unwrap();
                    assert_eq!(q * &y + r, square);
                    let (q, r) = square.try_divmod(&x).unwrap();
                    assert_eq!(q, x);
                    assert!(r.is_zero());
                    if i % 50 == 0 {
                        zzint::free_cache();
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(zzint::memory_in_use(), baseline);
}

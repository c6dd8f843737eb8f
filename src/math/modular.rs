/*!
# 64-Bit Modular Arithmetic

Multiplication, exponentiation and a deterministic Miller–Rabin primality
test over `u64`. All routines accept operands up to `2^63 - 1`; larger
inputs cannot be handled without 128-bit intermediates and are rejected
with [`Error::Overflow`].
*/

use crate::error::{Error, Result};

const U63_LIMIT: u64 = 1 << 63;

/// Witnesses making Miller–Rabin deterministic for all 64-bit inputs.
const MILLER_RABIN_WITNESSES: [u64; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];

fn check_operand(x: u64, what: &str) -> Result<()> {
    if x >= U63_LIMIT {
        return Err(Error::Overflow(format!(
            "{what} {x} >= 2^63, intermediate values would exceed 64 bits"
        )));
    }
    Ok(())
}

/// Greatest common divisor by the Euclidean algorithm.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `(a * b) mod m` by doubling-and-adding `a` over the bits of `b`; every
/// intermediate stays below `2^64` as long as the operands stay below
/// `2^63`.
pub(crate) fn mulmod_raw(a: u64, b: u64, m: u64) -> u64 {
    debug_assert!(a < U63_LIMIT && b < U63_LIMIT && m < U63_LIMIT && m > 0);

    let mut acc: u64 = 0;
    let mut base = a % m;
    let mut exp = b;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = (acc + base) % m;
        }
        base = (base << 1) % m;
        exp >>= 1;
    }
    acc
}

pub(crate) fn powmod_raw(base: u64, exp: u64, m: u64) -> u64 {
    let mut acc: u64 = 1 % m;
    let mut base = base % m;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mulmod_raw(acc, base, m);
        }
        base = mulmod_raw(base, base, m);
        exp >>= 1;
    }
    acc
}

/// `(a * b) mod m` for operands below `2^63`.
///
/// Fails with [`Error::Overflow`] for larger operands and with
/// [`Error::InvalidArgument`] for `m == 0`.
pub fn mulmod(a: u64, b: u64, m: u64) -> Result<u64> {
    check_operand(a, "factor")?;
    check_operand(b, "factor")?;
    check_operand(m, "modulus")?;
    if m == 0 {
        return Err(Error::invalid_argument("modulus must be non-zero"));
    }
    Ok(mulmod_raw(a, b, m))
}

/// `base^exp mod m` by square-and-multiply on top of [`mulmod`].
pub fn powmod(base: u64, exp: u64, m: u64) -> Result<u64> {
    check_operand(base, "base")?;
    check_operand(m, "modulus")?;
    if m == 0 {
        return Err(Error::invalid_argument("modulus must be non-zero"));
    }
    Ok(powmod_raw(base, exp, m))
}

pub(crate) fn is_prime_raw(n: u64) -> bool {
    for &p in &MILLER_RABIN_WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }
    if n < *MILLER_RABIN_WITNESSES.last().unwrap() {
        return false;
    }

    // n - 1 = d * 2^s with d odd
    let mut d = n - 1;
    let mut s = 0;
    while d & 1 == 0 {
        d >>= 1;
        s += 1;
    }

    'witness: for &a in &MILLER_RABIN_WITNESSES {
        let mut x = powmod_raw(a, d, n);
        if x == 1 {
            continue;
        }
        for _ in 0..s {
            if x == n - 1 {
                continue 'witness;
            }
            x = mulmod_raw(x, x, n);
        }
        return false;
    }
    true
}

/// Deterministic Miller–Rabin primality test for inputs below `2^63`.
pub fn is_prime(n: u64) -> Result<bool> {
    check_operand(n, "input")?;
    Ok(is_prime_raw(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mulmod_small() {
        assert_eq!(mulmod(7, 8, 5).unwrap(), 1);
        assert_eq!(mulmod(0, 123, 7).unwrap(), 0);
        assert_eq!(mulmod(1, 1, 1).unwrap(), 0);
    }

    #[test]
    fn mulmod_large_operands() {
        // values near 2^63 - 1 must not wrap
        let m = (1 << 63) - 25; // prime-ish large modulus is not required
        let a = m - 1;
        let b = m - 2;
        // (m-1)(m-2) mod m == 2
        assert_eq!(mulmod(a, b, m).unwrap(), 2);
    }

    #[test]
    fn rejects_oversized_operands() {
        assert!(matches!(
            mulmod(1 << 63, 2, 7),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(
            powmod(2, 10, 1 << 63),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(is_prime(u64::MAX), Err(Error::Overflow(_))));
    }

    #[test]
    fn powmod_small() {
        assert_eq!(powmod(2, 10, 1000).unwrap(), 24);
        assert_eq!(powmod(5, 0, 7).unwrap(), 1);
        assert_eq!(powmod(5, 117, 19).unwrap(), 1);
    }

    #[test]
    fn fermat_little_theorem() {
        for p in [5u64, 13, 97, 1_000_003] {
            for a in [2u64, 3, 10, 1234] {
                assert_eq!(powmod(a, p - 1, p).unwrap(), 1 % p);
            }
        }
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(0, 9), 9);
        assert_eq!(gcd(9, 0), 9);
    }

    #[test]
    fn small_primes() {
        let primes: Vec<u64> = (2..100).filter(|&n| is_prime(n).unwrap()).collect();
        assert_eq!(
            primes,
            vec![
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73,
                79, 83, 89, 97
            ]
        );
    }

    #[test]
    fn known_large_primes_and_composites() {
        assert!(is_prime(1_000_003).unwrap());
        assert!(is_prime(100_000_037).unwrap());
        assert!(is_prime(2_147_483_647).unwrap()); // 2^31 - 1
        assert!(is_prime(9_223_372_036_854_775_783).unwrap()); // largest prime < 2^63

        assert!(!is_prime(0).unwrap());
        assert!(!is_prime(1).unwrap());
        assert!(!is_prime(1_000_003u64.pow(2)).unwrap());
        assert!(!is_prime(3_215_031_751).unwrap()); // strong pseudoprime to 2,3,5,7
    }
}

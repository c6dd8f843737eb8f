/*!
# Integer Factorization

The prime factorization of `n` is a sorted vector of primes multiplying to
`n`, with repeated factors according to their multiplicity. For 0, 1 and
primes, the factorization is the one-element vector `[n]`.

[`prime_factorize`] combines trial division by a 6k±1 wheel below a cutoff,
Miller–Rabin primality testing, and Pollard's rho algorithm with Brent's
batching for whatever remains. Rho draws its start values from a caller
supplied random source, so runs are reproducible given the seed.
*/

use rand::Rng;

use super::modular::{gcd, is_prime_raw, mulmod_raw};
use crate::error::{Error, Result};

/// Default largest factor removed by trial division before switching to
/// Pollard rho.
pub const TRIAL_DIVISION_CUTOFF: u64 = 1_000_000;

/// All primes below `limit` by a sieve of Eratosthenes.
pub fn primes_below(limit: u64) -> Vec<u64> {
    if limit <= 2 {
        return Vec::new();
    }
    let limit = limit as usize;
    let mut composite = vec![false; limit];
    let mut primes = Vec::new();
    for i in 2..limit {
        if !composite[i] {
            primes.push(i as u64);
            for j in (i * i..limit).step_by(i) {
                composite[j] = true;
            }
        }
    }
    primes
}

/// Fermat's factorization: returns a (not necessarily prime) factor of odd
/// `n` by searching `x, y` with `x^2 - y^2 = n`. Efficient when `n` has two
/// factors near `sqrt(n)`, otherwise roughly as slow as trial division.
///
/// On failure to split `n` (in particular for primes), the result is `1`
/// or `n` itself; callers must check for both.
pub fn fermat(n: u64) -> Result<u64> {
    if n >= 1 << 63 {
        return Err(Error::Overflow(format!("input {n} >= 2^63")));
    }
    if n == 0 {
        return Err(Error::invalid_argument("cannot factor 0"));
    }
    if n % 2 == 0 {
        return Ok(2.min(n));
    }

    let mut x = n.isqrt() as i64;
    let mut y = 0i64;
    let n = n as i64;
    let mut r = x * x - y * y - n;
    while r != 0 {
        if r < 0 {
            r += x + x + 1;
            x += 1;
        } else {
            r -= y + y + 1;
            y += 1;
        }
    }
    Ok(if x == y { (x + y) as u64 } else { (x - y) as u64 })
}

/// One round of Pollard's rho with Brent's cycle detection and batched
/// gcds. Returns a non-trivial factor of composite odd `n`, or `n` itself
/// when the round fails; callers retry with fresh randomness.
pub fn pollard_rho_brent<R: Rng + ?Sized>(n: u64, rng: &mut R) -> u64 {
    debug_assert!(n > 3);
    if n % 2 == 0 {
        return 2;
    }

    let mut y = rng.random_range(1..n);
    let c = rng.random_range(1..n);
    let m = rng.random_range(1..n);

    let mut g: u64 = 1;
    let mut r: u64 = 1;
    let mut q: u64 = 1;
    let mut x: u64 = 0;
    let mut ys: u64 = 0;

    while g == 1 {
        x = y;
        for _ in 0..r {
            y = (mulmod_raw(y, y, n) + c) % n;
        }
        let mut k = 0;
        while k < r && g == 1 {
            ys = y;
            for _ in 0..m.min(r - k) {
                y = (mulmod_raw(y, y, n) + c) % n;
                q = mulmod_raw(q, x.abs_diff(y), n);
            }
            g = gcd(q, n);
            k += m;
        }
        r <<= 1;
    }

    if g == n {
        // batch overshot the factor: back off and advance one step at a time
        loop {
            ys = (mulmod_raw(ys, ys, n) + c) % n;
            g = gcd(x.abs_diff(ys), n);
            if g > 1 {
                break;
            }
        }
    }

    g
}

/// Prime factorization of `n < 2^63` as a sorted multiset, using the
/// default trial-division cutoff.
pub fn prime_factorize<R: Rng + ?Sized>(n: u64, rng: &mut R) -> Result<Vec<u64>> {
    prime_factorize_with_cutoff(n, TRIAL_DIVISION_CUTOFF, rng)
}

/// Like [`prime_factorize`], with an explicit bound on the largest factor
/// removed by trial division.
pub fn prime_factorize_with_cutoff<R: Rng + ?Sized>(
    mut n: u64,
    cutoff: u64,
    rng: &mut R,
) -> Result<Vec<u64>> {
    if n >= 1 << 63 {
        return Err(Error::Overflow(format!("input {n} >= 2^63")));
    }
    if n <= 3 {
        return Ok(vec![n]);
    }

    let mut factors = Vec::new();
    while n % 2 == 0 {
        factors.push(2);
        n /= 2;
    }
    while n % 3 == 0 {
        factors.push(3);
        n /= 3;
    }

    // trial division by 6k ± 1 candidates
    let mut i: u64 = 5;
    let mut w: u64 = 2;
    while i <= cutoff && i * i <= n {
        while n % i == 0 {
            factors.push(i);
            n /= i;
        }
        i += w;
        w = 6 - w;
    }

    // rho handles whatever the wheel left behind
    while n > cutoff && !is_prime_raw(n) {
        let p = loop {
            let p = pollard_rho_brent(n, rng);
            if p != n {
                break p;
            }
        };

        let mut sub = prime_factorize_with_cutoff(p, cutoff, rng)?;
        factors.append(&mut sub);
        n /= p;
    }

    if n != 1 {
        factors.push(n);
    }

    factors.sort_unstable();
    Ok(factors)
}

/// Euler's totient of `n`, computed from the prime factorization.
pub fn euler_phi<R: Rng + ?Sized>(n: u64, rng: &mut R) -> Result<u64> {
    if n == 0 {
        return Ok(0);
    }
    if n == 1 {
        return Ok(1);
    }

    let mut phi = 1u64;
    let mut last = 0u64;
    for p in prime_factorize(n, rng)? {
        phi *= if p == last { p } else { p - 1 };
        last = p;
    }
    Ok(phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::modular::is_prime;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn validate(n: u64, factors: &[u64]) {
        if n <= 3 || is_prime(n).unwrap() {
            assert_eq!(factors, &[n]);
            return;
        }
        let mut prod: u64 = 1;
        for &f in factors {
            assert!(is_prime(f).unwrap(), "{f} is not prime");
            prod *= f;
        }
        assert_eq!(prod, n);
        assert!(factors.is_sorted());
    }

    #[test]
    fn sieve() {
        assert_eq!(primes_below(2), Vec::<u64>::new());
        assert_eq!(primes_below(20), vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(primes_below(100).len(), 25);
    }

    #[test]
    fn small_numbers_exhaustively() {
        let rng = &mut Pcg64::seed_from_u64(1);
        for n in 0..2000u64 {
            let factors = prime_factorize(n, rng).unwrap();
            validate(n, &factors);
        }
    }

    #[test]
    fn spec_example() {
        // 2^2 * 3 * 1000003 * 100000037 ~ 1.200036e15
        let n: u64 = 4 * 3 * 1_000_003 * 100_000_037;
        let rng = &mut Pcg64::seed_from_u64(2);
        assert_eq!(
            prime_factorize(n, rng).unwrap(),
            vec![2, 2, 3, 1_000_003, 100_000_037]
        );
    }

    #[test]
    fn large_inputs() {
        let rng = &mut Pcg64::seed_from_u64(3);
        let tests: [u64; 5] = [
            3 * 3 * 5 * 7 * 9949 * 9967 * 1_000_003,
            2 * 1_000_003 * 1_000_000_007,
            999_961 * 1_000_033,
            357_267_896_789_127_671,
            2u64.pow(6) * 3u64.pow(4) * 25 * 49 * 35_336_848_213,
        ];
        for n in tests {
            let factors = prime_factorize(n, rng).unwrap();
            validate(n, &factors);
        }
    }

    #[test]
    fn reproducible_given_seed() {
        let n = 999_961 * 1_000_033;
        let a = prime_factorize(n, &mut Pcg64::seed_from_u64(7)).unwrap();
        let b = prime_factorize(n, &mut Pcg64::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fermat_close_factors() {
        assert_eq!(fermat(1_000_003 * 100_000_037).unwrap(), 1_000_003);
        assert_eq!(fermat(35 * 37).unwrap(), 35);
        assert_eq!(fermat(8).unwrap(), 2);
    }

    #[test]
    fn fermat_failure_contract() {
        // primes cannot be split: the result collapses to 1
        assert_eq!(fermat(101).unwrap(), 1);
        assert_eq!(fermat(13).unwrap(), 1);
        // 1 trivially "factors" as 1
        assert_eq!(fermat(1).unwrap(), 1);
    }

    #[test]
    fn totient() {
        let rng = &mut Pcg64::seed_from_u64(4);
        assert_eq!(euler_phi(1, rng).unwrap(), 1);
        assert_eq!(euler_phi(10, rng).unwrap(), 4);
        assert_eq!(euler_phi(36, rng).unwrap(), 12);
        assert_eq!(euler_phi(97, rng).unwrap(), 96);
        assert_eq!(euler_phi(1_000_003, rng).unwrap(), 1_000_002);

        // multiplicative for coprime arguments
        let (a, b) = (35u64, 64u64);
        assert_eq!(
            euler_phi(a * b, rng).unwrap(),
            euler_phi(a, rng).unwrap() * euler_phi(b, rng).unwrap()
        );
    }
}

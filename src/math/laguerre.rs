/*!
# Laguerre's Method

Root finding for polynomials with **complex** coefficients. One root is
polished at a time from a starting guess; full factorization repeatedly
finds a root of the deflated polynomial, re-polishes it against the
original polynomial, and deflates by synthetic division.

Roots are found to a tolerance of `EPS` in absolute or relative error,
whichever is reached first. The random starting guesses come from a caller
supplied source, so runs are reproducible given the seed.
*/

use rand::Rng;

use super::poly::{Complex64, derivative, horner_eval};
use crate::error::{Error, Result};

const EPS: f64 = 1e-15;
const ITERATIONS: usize = 10_000;

/// Three-way comparison of `|a|` and `|b|` within `eps`.
fn comp(a: Complex64, b: Complex64, eps: f64) -> i32 {
    let diff = a.norm() - b.norm();
    if diff < -eps {
        -1
    } else if diff > eps {
        1
    } else {
        0
    }
}

/// Polishes one root of `p` starting from `x0`.
///
/// Laguerre step: with `G = p'(x)/p(x)` and `H = G^2 - p''(x)/p(x)`, the
/// update is `a = n / (G ± sqrt((n-1)(nH - G^2)))` with the sign chosen to
/// maximize the denominator's modulus. Terminates when `|p(x)|` or the step
/// size drops below `EPS`; fails with [`Error::DoesNotConverge`] once the
/// iteration bound is exhausted.
pub fn find_one_root(p: &[Complex64], x0: Complex64) -> Result<Complex64> {
    let n = p.len() as f64 - 1.0;
    let p1 = derivative(p);
    let p2 = derivative(&p1);

    let zero = Complex64::new(0.0, 0.0);
    let mut x = x0;
    for _ in 0..ITERATIONS {
        let y0 = horner_eval(p, x).0;
        if comp(y0, zero, EPS) == 0 {
            return Ok(x);
        }
        let g = horner_eval(&p1, x).0 / y0;
        let h = g * g - horner_eval(&p2, x).0 / y0;
        let r = (Complex64::new(n - 1.0, 0.0) * (h * n - g * g)).sqrt();
        let (d1, d2) = (g + r, g - r);
        let a = Complex64::new(n, 0.0) / if comp(d1, d2, EPS) > 0 { d1 } else { d2 };
        x -= a;
        if comp(a, zero, EPS) == 0 {
            return Ok(x);
        }
    }

    Err(Error::DoesNotConverge(format!(
        "Laguerre iteration did not settle within {ITERATIONS} steps from {x0}"
    )))
}

/// Finds all `deg(p)` roots of the complex polynomial `p`.
///
/// Fails with [`Error::InvalidArgument`] on an empty coefficient vector or
/// a zero leading coefficient, and propagates
/// [`Error::DoesNotConverge`] from the per-root iteration.
pub fn find_all_roots<R: Rng + ?Sized>(p: &[Complex64], rng: &mut R) -> Result<Vec<Complex64>> {
    if p.is_empty() {
        return Err(Error::invalid_argument("empty coefficient vector"));
    }
    if p.last().unwrap().norm() == 0.0 && p.len() > 1 {
        return Err(Error::invalid_argument("zero leading coefficient"));
    }

    let mut res = Vec::with_capacity(p.len() - 1);
    let mut q = p.to_vec();
    while q.len() > 2 {
        let guess = Complex64::new(rng.random::<f64>(), rng.random::<f64>());
        // a root of the deflated polynomial, re-polished against the
        // original to stop deflation errors from accumulating
        let z = find_one_root(p, find_one_root(&q, guess)?)?;
        q = horner_eval(&q, z).1;
        res.push(z);
    }
    if q.len() == 2 {
        res.push(-q[0] / q[1]);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::poly::{eval_real, from_roots};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn real_poly(coeffs: &[f64]) -> Vec<Complex64> {
        coeffs.iter().map(|&x| c(x, 0.0)).collect()
    }

    fn sorted_roots(mut roots: Vec<Complex64>) -> Vec<Complex64> {
        roots.sort_by(|a, b| (a.re, a.im).partial_cmp(&(b.re, b.im)).unwrap());
        roots
    }

    #[test]
    fn cubic_with_integer_roots() {
        // (x + 4)(x - 5)(x - 7) = 140 - 13x - 8x^2 + x^3
        let p = real_poly(&[140.0, -13.0, -8.0, 1.0]);
        let rng = &mut Pcg64::seed_from_u64(1);

        let roots = sorted_roots(find_all_roots(&p, rng).unwrap());
        let expected = [c(-4.0, 0.0), c(5.0, 0.0), c(7.0, 0.0)];
        for (r, e) in roots.iter().zip(expected) {
            assert!((r - e).norm() < 1e-7, "{roots:?}");
        }
    }

    #[test]
    fn complex_coefficients() {
        // ((2 + 3i)x + 6)(x + i)(2x + (6 + 4i))(xi + 1)
        let p = vec![
            c(-24.0, 36.0),
            c(-26.0, 12.0),
            c(-30.0, 40.0),
            c(-26.0, 12.0),
            c(-6.0, 4.0),
        ];
        let rng = &mut Pcg64::seed_from_u64(2);

        let roots = sorted_roots(find_all_roots(&p, rng).unwrap());
        let expected = [
            c(-3.0, -2.0),
            c(-12.0 / 13.0, 18.0 / 13.0),
            c(0.0, -1.0),
            c(0.0, 1.0),
        ];
        for (r, e) in roots.iter().zip(expected) {
            assert!((r - e).norm() < 1e-5, "{roots:?}");
        }
    }

    #[test]
    fn linear_polynomial() {
        let p = real_poly(&[3.0, 2.0]);
        let rng = &mut Pcg64::seed_from_u64(3);
        let roots = find_all_roots(&p, rng).unwrap();
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - c(-1.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn constant_has_no_roots() {
        let rng = &mut Pcg64::seed_from_u64(4);
        assert!(find_all_roots(&real_poly(&[5.0]), rng).unwrap().is_empty());
    }

    #[test]
    fn invalid_inputs() {
        let rng = &mut Pcg64::seed_from_u64(5);
        assert!(matches!(
            find_all_roots(&[], rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            find_all_roots(&real_poly(&[1.0, 2.0, 0.0]), rng),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn roots_reconstruct_random_polynomials() {
        use rand::prelude::IteratorRandom;

        let rng = &mut Pcg64::seed_from_u64(6);

        for _ in 0..10 {
            let degree = rng.random_range(1..6);
            let true_roots: Vec<Complex64> = (-8i32..=8)
                .choose_multiple(rng, degree)
                .into_iter()
                .map(|r| c(r as f64, 0.0))
                .collect();
            let coeffs = from_roots(c(1.0, 0.0), &true_roots);

            let roots = find_all_roots(&coeffs, rng).unwrap();
            assert_eq!(roots.len(), degree);

            let real_coeffs: Vec<f64> = coeffs.iter().map(|x| x.re).collect();
            for &r in &roots {
                assert!(eval_real(&real_coeffs, r).norm() < 1e-6, "{roots:?}");
            }
        }
    }
}

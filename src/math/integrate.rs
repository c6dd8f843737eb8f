/*!
# Adaptive Simpson Quadrature

Definite integration of a continuous function by recursive interval
bisection. An interval is accepted once the two half-interval Simpson
estimates agree with the full-interval estimate within the tolerance;
otherwise both halves are refined recursively.

The recursion depth is bounded by roughly `log2((b - a) / eps)`, so plain
recursion is fine here.
*/

/// Simpson's three-point estimate on `[a, b]`.
fn simpson<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> f64 {
    (f(a) + 4.0 * f((a + b) / 2.0) + f(b)) * (b - a) / 6.0
}

fn adapt<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, eps: f64, whole: f64) -> f64 {
    let m = (a + b) / 2.0;
    let am = simpson(f, a, m);
    let mb = simpson(f, m, b);
    if (am + mb - whole).abs() < eps {
        return am + mb;
    }
    adapt(f, a, m, eps, am) + adapt(f, m, b, eps, mb)
}

/// Integrates `f` over `[a, b]` to absolute tolerance `eps`.
pub fn simpson_integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, eps: f64) -> f64 {
    adapt(&f, a, b, eps, simpson(&f, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, PI};

    #[test]
    fn sine_quarter_wave() {
        let result = simpson_integrate(f64::sin, 0.0, PI / 2.0, 1e-12);
        assert!((result - 1.0).abs() < 1e-10);
    }

    #[test]
    fn polynomial_is_exact() {
        // Simpson's rule is exact for cubics
        let result = simpson_integrate(|x| x * x * x - 2.0 * x + 1.0, -1.0, 3.0, 1e-12);
        assert!((result - (20.0 - 8.0 + 4.0)).abs() < 1e-10);
    }

    #[test]
    fn exponential() {
        let result = simpson_integrate(f64::exp, 0.0, 1.0, 1e-12);
        assert!((result - (E - 1.0)).abs() < 1e-10);
    }

    #[test]
    fn oscillatory_integrand() {
        // integral of sin(10 x) over [0, pi] = (1 - cos(10 pi)) / 10 = 0
        let result = simpson_integrate(|x| (10.0 * x).sin(), 0.0, PI, 1e-10);
        assert!(result.abs() < 1e-8);
    }

    #[test]
    fn reversed_interval_is_negated() {
        let forward = simpson_integrate(f64::sin, 0.0, 1.0, 1e-10);
        let backward = simpson_integrate(f64::sin, 1.0, 0.0, 1e-10);
        assert!((forward + backward).abs() < 1e-9);
    }

    #[test]
    fn zero_width_interval() {
        assert_eq!(simpson_integrate(f64::exp, 2.0, 2.0, 1e-12), 0.0);
    }
}

/*!
# Polynomial Helpers

Shared plumbing for the root finders. A polynomial is a coefficient vector
indexed by degree: `p[i]` is the coefficient of `x^i`. The degree is
`p.len() - 1`; the leading coefficient is the last entry.
*/

use num::Complex;

/// Complex number over `f64`, the scalar of the root finders.
pub type Complex64 = Complex<f64>;

/// Evaluates `p` at `x` with Horner's method and returns the value together
/// with the quotient `p(x) / (x - x0)` of the synthetic division, which is
/// the deflated polynomial once `x` is a root.
pub fn horner_eval(p: &[Complex64], x: Complex64) -> (Complex64, Vec<Complex64>) {
    let n = p.len();
    let mut b = vec![Complex64::new(0.0, 0.0); (n - 1).max(1)];
    for i in (1..n).rev() {
        b[i - 1] = p[i] + if i < n - 1 { b[i] * x } else { Complex64::new(0.0, 0.0) };
    }
    (p[0] + b[0] * x, b)
}

/// Coefficient vector of `p'`.
pub fn derivative(p: &[Complex64]) -> Vec<Complex64> {
    let n = p.len();
    let mut res = vec![Complex64::new(0.0, 0.0); (n - 1).max(1)];
    for i in 1..n {
        res[i - 1] = p[i] * Complex64::new(i as f64, 0.0);
    }
    res
}

/// Evaluates a real-coefficient polynomial at a complex point.
pub fn eval_real(p: &[f64], x: Complex64) -> Complex64 {
    p.iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

/// Expands `leading * prod (x - r)` back into a coefficient vector; used to
/// verify that a computed root multiset reconstructs its polynomial.
pub fn from_roots(leading: Complex64, roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![leading];
    for &r in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i + 1] += c;
            next[i] -= r * c;
        }
        coeffs = next;
    }
    coeffs
}

/*!
# Numerics Toolkit

64-bit modular arithmetic, primality testing and factoring, polynomial
root finding and adaptive quadrature. Modular routines accept operands up
to `2^63 - 1`; polynomial routines operate on IEEE-754 binary64.

The two root finders cover complementary ground: [`laguerre`] handles
polynomials with complex coefficients, [`rpoly`] (Jenkins–Traub) handles
real coefficients with the full battery of numerical safeguards.
*/

pub mod factor;
pub mod integrate;
pub mod laguerre;
pub mod modular;
pub mod poly;
pub mod rpoly;

pub use factor::{
    TRIAL_DIVISION_CUTOFF, euler_phi, fermat, pollard_rho_brent, prime_factorize,
    prime_factorize_with_cutoff, primes_below,
};
pub use integrate::simpson_integrate;
pub use modular::{gcd, is_prime, mulmod, powmod};
pub use poly::{Complex64, derivative, eval_real, from_roots, horner_eval};

/*!
# RPOLY: Jenkins–Traub for Real Coefficients

Finds every complex root of a polynomial with real coefficients, following
the three-stage Jenkins–Traub algorithm of TOMS algorithm 493:

1. five no-shift iterations refining the auxiliary polynomial `K`,
2. fixed-shift iterations with a shift rotating on a circle whose radius is
   a Cauchy lower bound on the root moduli, monitoring the `s`- and
   `v`-sequences for convergence,
3. a final variable-shift iteration, either on a real root candidate
   (Newton-like) or on a quadratic factor, followed by deflation by one or
   two orders.

Roots come out in discovery order, real roots as well as conjugate pairs.
The numerical safeguards of TOMS 493 (underflow rescaling, stalled-step
detection via `relstp`, the cluster retry after 20 shift rotations) are
kept; they carry the algorithm on ill-conditioned inputs.
*/

use super::poly::Complex64;
use crate::error::{Error, Result};

const EPSILON: f64 = f64::EPSILON;

/// Working state of one factorization run. The polynomials are stored with
/// **descending** powers (`p[0]` is the leading coefficient); `p` has
/// `n + 1` entries for degree `n` and the auxiliary polynomial `k` has `n`.
struct Rpoly {
    p: Vec<f64>,
    qp: Vec<f64>,
    k: Vec<f64>,
    qk: Vec<f64>,
    svk: Vec<f64>,

    // scalars of the quadratic synthetic division and the K-polynomial
    // recurrences, shared between the stages
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    a1: f64,
    a3: f64,
    a7: f64,

    // most recent root candidates
    szr: f64,
    szi: f64,
    lzr: f64,
    lzi: f64,
}

/// Divides the degree-`n-1` polynomial `p[..n]` by `x^2 + u x + v`,
/// storing the quotient in `q` and returning the two trailing remainder
/// scalars `(a, b)`.
fn divide_quadratic(n: usize, u: f64, v: f64, p: &[f64], q: &mut [f64]) -> (f64, f64) {
    let mut b = p[0];
    q[0] = b;
    let mut a = p[1] - b * u;
    q[1] = a;
    for i in 2..n {
        q[i] = p[i] - (a * u + b * v);
        b = a;
        a = q[i];
    }
    (a, b)
}

/// Solves `a x^2 + b1 x + c = 0` avoiding cancellation and overflow,
/// returning `(sr, si, lr, li)` with the smaller root first.
fn solve_quadratic(a: f64, b1: f64, c: f64) -> (f64, f64, f64, f64) {
    let (mut sr, mut si, mut lr, mut li) = (0.0, 0.0, 0.0, 0.0);
    if a == 0.0 {
        if b1 != 0.0 {
            sr = -c / b1;
        }
        return (sr, si, lr, li);
    }
    if c == 0.0 {
        lr = -b1 / a;
        return (sr, si, lr, li);
    }

    let b = b1 / 2.0;
    let (d, e);
    if b.abs() < c.abs() {
        let mut ee = if c >= 0.0 { a } else { -a };
        ee = b * (b / c.abs()) - ee;
        d = ee.abs().sqrt() * c.abs().sqrt();
        e = ee;
    } else {
        let ee = 1.0 - (a / b) * (c / b);
        d = ee.abs().sqrt() * b.abs();
        e = ee;
    }

    if e >= 0.0 {
        let d = if b >= 0.0 { -d } else { d };
        lr = (d - b) / a;
        if lr != 0.0 {
            sr = c / lr / a;
        }
    } else {
        lr = -b / a;
        sr = lr;
        si = (d / a).abs();
        li = -si;
    }
    (sr, si, lr, li)
}

impl Rpoly {
    fn new(degree: usize) -> Self {
        let zeros = vec![0.0; degree + 1];
        Self {
            p: zeros.clone(),
            qp: zeros.clone(),
            k: zeros.clone(),
            qk: zeros.clone(),
            svk: zeros,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
            g: 0.0,
            h: 0.0,
            a1: 0.0,
            a3: 0.0,
            a7: 0.0,
            szr: 0.0,
            szi: 0.0,
            lzr: 0.0,
            lzi: 0.0,
        }
    }

    fn divide_p(&mut self, nn: usize, u: f64, v: f64) {
        (self.a, self.b) = divide_quadratic(nn, u, v, &self.p, &mut self.qp);
    }

    /// Divides `k` by the current quadratic and classifies the outcome:
    /// type 3 means `k` is (numerically) divisible, types 1/2 select which
    /// of `c`, `d` dominates for the recurrence scalars.
    fn calc_sc(&mut self, n: usize, u: f64, v: f64) -> u8 {
        (self.c, self.d) = divide_quadratic(n, u, v, &self.k, &mut self.qk);

        if self.c.abs() <= 100.0 * EPSILON * self.k[n - 1].abs()
            && self.d.abs() <= 100.0 * EPSILON * self.k[n - 2].abs()
        {
            return 3;
        }

        self.h = v * self.b;
        if self.d.abs() >= self.c.abs() {
            self.e = self.a / self.d;
            self.f = self.c / self.d;
            self.g = u * self.b;
            self.a1 = self.f * self.b - self.a;
            self.a3 = self.e * (self.g + self.a) + self.h * (self.b / self.d);
            self.a7 = self.h + (self.f + u) * self.a;
            return 2;
        }
        self.e = self.a / self.c;
        self.f = self.d / self.c;
        self.g = self.e * u;
        self.a1 = -(self.a * (self.d / self.c)) + self.b;
        self.a3 = self.e * self.a + (self.g + self.h / self.c) * self.b;
        self.a7 = self.g * self.d + self.h * self.f + self.a;
        1
    }

    /// Computes the next `K` polynomial, scaled to avoid overflow when the
    /// leading recurrence scalar `a1` is tiny.
    fn next_k(&mut self, n: usize, flag: u8) {
        if flag == 3 {
            self.k[0] = 0.0;
            self.k[1] = 0.0;
            for i in 2..n {
                self.k[i] = self.qk[i - 2];
            }
            return;
        }

        let base = if flag == 1 { self.b } else { self.a };
        if self.a1.abs() > 10.0 * EPSILON * base.abs() {
            self.a7 /= self.a1;
            self.a3 /= self.a1;
            self.k[0] = self.qp[0];
            self.k[1] = self.qp[1] - self.a7 * self.qp[0];
            for i in 2..n {
                self.k[i] = self.qp[i] - self.a7 * self.qp[i - 1] + self.a3 * self.qk[i - 2];
            }
        } else {
            self.k[0] = 0.0;
            self.k[1] = -self.a7 * self.qp[0];
            for i in 2..n {
                self.k[i] = self.a3 * self.qk[i - 2] - self.a7 * self.qp[i - 1];
            }
        }
    }

    /// Estimates the next quadratic factor `(uu, vv)` from the scalars of
    /// the latest `K` iteration. Returns `(0, 0)` when no estimate exists.
    fn estimate_quadratic(&self, flag: u8, u: f64, v: f64, n: usize) -> (f64, f64) {
        if flag == 3 {
            return (0.0, 0.0);
        }

        let (a4, a5) = if flag != 2 {
            (
                self.a + u * self.b + self.h * self.f,
                self.c + (u + v * self.f) * self.d,
            )
        } else {
            (
                (self.a + self.g) * self.f + self.h,
                (self.f + u) * self.c + v * self.d,
            )
        };

        let b1 = -self.k[n - 1] / self.p[n];
        let b2 = -(self.k[n - 2] + b1 * self.p[n - 1]) / self.p[n];
        let c1 = v * b2 * self.a1;
        let c2 = b1 * self.a7;
        let c3 = b1 * b1 * self.a3;
        let c4 = c1 - c2 - c3;
        let temp = b1 * a4 - c4 + a5;
        if temp == 0.0 {
            return (0.0, 0.0);
        }

        (
            u - (u * (c3 + c2) + v * (b1 * self.a1 + b2 * self.a7)) / temp,
            v * (1.0 + c4 / temp),
        )
    }

    /// Stage-3 iteration on a quadratic factor starting from `(uu, vv)`.
    /// Returns the number of roots found (0 or 2); on success the roots are
    /// in `szr/szi` and `lzr/lzi` and `qp` holds the deflated polynomial.
    fn quadratic_iterate(&mut self, nn: usize, uu: f64, vv: f64) -> usize {
        let deg = nn - 1;
        let mut steps = 0;
        let mut tried = false;
        let mut omp = 0.0;
        let mut relstp = 0.0;
        let mut u = uu;
        let mut v = vv;

        loop {
            (self.szr, self.szi, self.lzr, self.lzi) = solve_quadratic(1.0, u, v);

            // give up once the two roots of the trial quadratic drift apart
            if (self.szr.abs() - self.lzr.abs()).abs() > 0.01 * self.lzr.abs() {
                return 0;
            }

            self.divide_p(nn, u, v);
            let mp = (self.a - self.szr * self.b).abs() + (self.szi * self.b).abs();

            // a posteriori rounding-error bound for the evaluated quadratic
            let zm = v.abs().sqrt();
            let mut ee = 2.0 * self.qp[0].abs();
            let t = -self.szr * self.b;
            for i in 1..deg {
                ee = ee * zm + self.qp[i].abs();
            }
            ee = ee * zm + (self.a + t).abs();
            ee = ee * 9.0 + 2.0 * t.abs() - 7.0 * ((self.a + t).abs() + zm * self.b.abs());
            ee *= EPSILON;

            if mp <= 20.0 * ee {
                return 2;
            }

            steps += 1;
            if steps > 20 {
                return 0;
            }

            // stalled progress: perturb the quadratic and run five extra
            // K iterations before trying again, once
            if steps >= 2 && relstp <= 0.01 && mp >= omp && !tried {
                relstp = if relstp < EPSILON {
                    EPSILON.sqrt()
                } else {
                    relstp.sqrt()
                };
                u -= u * relstp;
                v += v * relstp;
                self.divide_p(nn, u, v);
                for _ in 0..5 {
                    let flag = self.calc_sc(deg, u, v);
                    self.next_k(deg, flag);
                }
                tried = true;
                steps = 0;
            }
            omp = mp;

            let flag = self.calc_sc(deg, u, v);
            self.next_k(deg, flag);
            let flag = self.calc_sc(deg, u, v);
            let (ui, vi) = self.estimate_quadratic(flag, u, v, deg);

            if vi == 0.0 {
                return 0;
            }
            relstp = ((vi - v) / vi).abs();
            u = ui;
            v = vi;
        }
    }

    /// Stage-3 iteration on a real root starting near `sss`. Returns
    /// `(stalled, roots_found, s)`: `stalled` requests a quadratic retry
    /// around the final `s`.
    fn real_iterate(&mut self, nn: usize, sss: f64) -> (bool, usize, f64) {
        let n = nn - 1;
        let mut steps = 0;
        let mut omp = 0.0;
        let mut t = 0.0;
        let mut s = sss;

        loop {
            // evaluate p at s, remembering the quotient for deflation
            let mut pv = self.p[0];
            self.qp[0] = pv;
            for i in 1..nn {
                pv = pv * s + self.p[i];
                self.qp[i] = pv;
            }

            let mp = pv.abs();
            let ms = s.abs();
            let mut ee = 0.5 * self.qp[0].abs();
            for i in 1..nn {
                ee = ee * ms + self.qp[i].abs();
            }

            if mp <= 20.0 * EPSILON * (2.0 * ee - mp) {
                self.szr = s;
                self.szi = 0.0;
                return (false, 1, s);
            }

            steps += 1;
            if steps > 10 {
                return (false, 0, s);
            }

            if steps >= 2 && t.abs() <= 0.001 * (s - t).abs() && mp > omp {
                return (true, 0, s);
            }
            omp = mp;

            // one K iteration and a Newton-like step -pv / K(s)
            let mut kv = self.k[0];
            self.qk[0] = kv;
            for i in 1..n {
                kv = kv * s + self.k[i];
                self.qk[i] = kv;
            }

            if kv.abs() > self.k[n - 1].abs() * 10.0 * EPSILON {
                t = -pv / kv;
                self.k[0] = self.qp[0];
                for i in 1..n {
                    self.k[i] = t * self.qk[i - 1] + self.qp[i];
                }
            } else {
                self.k[0] = 0.0;
                for i in 1..n {
                    self.k[i] = self.qk[i - 1];
                }
            }

            let mut kv = self.k[0];
            for i in 1..n {
                kv = kv * s + self.k[i];
            }
            t = if self.k[n - 1].abs() * 10.0 * EPSILON < kv.abs() {
                -pv / kv
            } else {
                0.0
            };
            s += t;
        }
    }

    /// Stage 2: up to `l2` fixed-shift K iterations around `sr ± ...` with
    /// the quadratic `x^2 + u x + v`, watching both the real-root sequence
    /// `ss` and the quadratic sequence `vv` for convergence, and branching
    /// into the matching stage-3 iteration. Returns the number of roots
    /// found (0, 1 or 2).
    fn fixed_shift(&mut self, l2: usize, nn: usize, sr: f64, bnd: f64, u: f64) -> usize {
        let n = nn - 1;
        let v = bnd;

        let mut betav = 0.25;
        let mut betas = 0.25;
        let mut oss = sr;
        let mut ovv = v;
        let mut ots = 0.0;
        let mut otv = 0.0;

        let mut sflag = true;

        self.divide_p(nn, u, v);
        let mut flag = self.calc_sc(n, u, v);

        for j in 0..l2 {
            let mut fflag = true;

            self.next_k(n, flag);
            flag = self.calc_sc(n, u, v);
            let (mut ui, mut vi) = self.estimate_quadratic(flag, u, v, n);

            let vv = vi;
            let ss = if self.k[n - 1] != 0.0 {
                -self.p[n] / self.k[n - 1]
            } else {
                0.0
            };
            let mut ts = 1.0;
            let mut tv = 1.0;

            if j != 0 && flag != 3 {
                if vv != 0.0 {
                    tv = ((vv - ovv) / vv).abs();
                }
                if ss != 0.0 {
                    ts = ((ss - oss) / ss).abs();
                }
                let tvv = if tv < otv { tv * otv } else { 1.0 };
                let tss = if ts < ots { ts * ots } else { 1.0 };
                let vpass = tvv < betav;
                let spass = tss < betas;

                if spass || vpass {
                    // at least one sequence converged: save K and try the
                    // matching variable-shift iteration(s)
                    self.svk[..n].copy_from_slice(&self.k[..n]);
                    let mut s = ss;
                    let mut stry = false;
                    let mut vtry = false;

                    loop {
                        if !(fflag && spass && (!vpass || tss < tvv)) {
                            let nz = self.quadratic_iterate(nn, ui, vi);
                            if nz > 0 {
                                return nz;
                            }
                            sflag = true;
                            vtry = true;
                            betav *= 0.25;
                            if stry || !spass {
                                sflag = false;
                            } else {
                                self.k[..n].copy_from_slice(&self.svk[..n]);
                            }
                        }
                        fflag = false;

                        if sflag {
                            let (stalled, nz, s_new) = self.real_iterate(nn, s);
                            s = s_new;
                            sflag = stalled;
                            if nz > 0 {
                                return nz;
                            }
                            stry = true;
                            betas *= 0.25;
                            if stalled {
                                // retry as a quadratic around the stall point
                                ui = -(s + s);
                                vi = s * s;
                                continue;
                            }
                        }

                        self.k[..n].copy_from_slice(&self.svk[..n]);
                        if !vpass || vtry {
                            break;
                        }
                    }

                    self.divide_p(nn, u, v);
                    flag = self.calc_sc(n, u, v);
                }
            }

            ovv = vv;
            oss = ss;
            otv = tv;
            ots = ts;
        }

        0
    }
}

/// Finds all complex roots of a polynomial with real coefficients, given
/// in ascending order (`coeffs[i]` is the coefficient of `x^i`).
///
/// Fails with [`Error::InvalidArgument`] on an empty coefficient vector or
/// a zero leading coefficient, and with [`Error::DoesNotConverge`] when 20
/// shift rotations fail on some deflation level (which does not occur for
/// well-posed inputs).
pub fn find_all_roots(coeffs: &[f64]) -> Result<Vec<Complex64>> {
    if coeffs.is_empty() {
        return Err(Error::invalid_argument("empty coefficient vector"));
    }
    if coeffs.len() > 1 && *coeffs.last().unwrap() == 0.0 {
        return Err(Error::invalid_argument("zero leading coefficient"));
    }

    let degree = coeffs.len() - 1;
    let mut roots = Vec::with_capacity(degree);
    if degree == 0 {
        return Ok(roots);
    }

    let mut st = Rpoly::new(degree);
    // descending order internally, as in the reference
    for (i, &c) in coeffs.iter().rev().enumerate() {
        st.p[i] = c;
    }

    let mut n = degree;
    // roots at the origin come off the trailing zero coefficients
    while st.p[n] == 0.0 {
        roots.push(Complex64::new(0.0, 0.0));
        n -= 1;
    }

    let mut nn = n + 1;
    st.p.truncate(nn);

    // direction of the rotating shift persists across deflations
    let mut xx = 0.5f64.sqrt();
    let mut yy = -xx;

    while n >= 1 {
        if n <= 2 {
            if n < 2 {
                roots.push(Complex64::new(-st.p[1] / st.p[0], 0.0));
            } else {
                let (szr, szi, lzr, lzi) = solve_quadratic(st.p[0], st.p[1], st.p[2]);
                roots.push(Complex64::new(szr, szi));
                roots.push(Complex64::new(lzr, lzi));
            }
            break;
        }

        // rescale to protect against over-/underflow of the coefficients
        let mut moduli_max = 0.0f64;
        let mut moduli_min = f64::MAX;
        for &x in &st.p[..nn] {
            let x = x.abs();
            if x > moduli_max {
                moduli_max = x;
            }
            if x != 0.0 && x < moduli_min {
                moduli_min = x;
            }
        }
        let sc = f64::MIN_POSITIVE / EPSILON / moduli_min;
        if (sc < 2.0 && moduli_max >= 10.0) || (sc > 1.0 && f64::MAX / sc >= moduli_max) {
            let sc = if sc == 0.0 { f64::MIN_POSITIVE } else { sc };
            let factor = 2.0f64.powf(sc.ln() / 2.0f64.ln());
            if factor != 1.0 {
                for x in &mut st.p[..nn] {
                    *x *= factor;
                }
            }
        }

        // Cauchy lower bound on the smallest root modulus
        let mut pt: Vec<f64> = st.p[..nn].iter().map(|x| x.abs()).collect();
        pt[n] = -pt[n];
        let nm1 = n - 1;

        let mut x = (((-pt[n]).ln() - pt[0].ln()) / n as f64).exp();
        if pt[nm1] != 0.0 {
            let xm = -pt[n] / pt[nm1];
            if xm < x {
                x = xm;
            }
        }

        let mut xm = x;
        loop {
            x = xm;
            xm = 0.1 * x;
            let mut ff = pt[0];
            for &c in &pt[1..nn] {
                ff = ff * xm + c;
            }
            if ff <= 0.0 {
                break;
            }
        }

        loop {
            let mut ff = pt[0];
            let mut df = pt[0];
            for &c in &pt[1..n] {
                ff = x * ff + c;
                df = x * df + ff;
            }
            ff = x * ff + pt[n];
            let dx = ff / df;
            x -= dx;
            if (dx / x).abs() <= 0.005 {
                break;
            }
        }
        let bnd = x;

        // K is initialized as the scaled derivative
        for i in 1..n {
            st.k[i] = (n - i) as f64 * st.p[i] / n as f64;
        }
        st.k[0] = st.p[0];

        // five no-shift iterations
        let aa = st.p[n];
        let bb = st.p[nm1];
        let mut zero = st.k[nm1] == 0.0;
        for _ in 0..5 {
            let cc = st.k[nm1];
            if zero {
                for i in 0..nm1 {
                    let j = nm1 - i;
                    st.k[j] = st.k[j - 1];
                }
                st.k[0] = 0.0;
                zero = st.k[nm1] == 0.0;
            } else {
                let t = -aa / cc;
                for i in 0..nm1 {
                    let j = nm1 - i;
                    st.k[j] = t * st.k[j - 1] + st.p[j];
                }
                st.k[0] = st.p[0];
                zero = st.k[nm1].abs() <= bb.abs() * EPSILON * 10.0;
            }
        }
        let temp: Vec<f64> = st.k[..n].to_vec();

        // stage 2: rotate the shift by 94 degrees per attempt
        const DEG: f64 = 0.01745329251994329576923690768489;
        let (sin94, cos94) = (94.0 * DEG).sin_cos();

        let mut nz = 0;
        for jj in 1..=20 {
            let xxx = -sin94 * yy + cos94 * xx;
            yy = sin94 * xx + cos94 * yy;
            xx = xxx;

            let sr = bnd * xx;
            let u = -2.0 * sr;
            st.qk[..nn].fill(0.0);
            st.svk[..nn].fill(0.0);

            nz = st.fixed_shift(20 * jj, nn, sr, bnd, u);
            if nz != 0 {
                roots.push(Complex64::new(st.szr, st.szi));
                if nz != 1 {
                    roots.push(Complex64::new(st.lzr, st.lzi));
                }
                nn -= nz;
                n = nn - 1;
                st.p[..nn].copy_from_slice(&st.qp[..nn]);
                break;
            }
            st.k[..n].copy_from_slice(&temp);
        }

        if nz == 0 {
            return Err(Error::DoesNotConverge(format!(
                "no root isolated after 20 shift rotations at degree {n}"
            )));
        }
    }

    Ok(roots)
}

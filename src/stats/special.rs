//! Gamma/beta special functions and the Student-t distribution.

use std::f64::consts::PI;

/// ln Γ(x) via the Lanczos approximation (g = 7, 9 terms).
///
/// Relative error is below 1e-10 for x > 0; reflection handles x < 0.5.
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const LANCZOS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let series = LANCZOS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS[0], |acc, (i, &c)| acc + c / (z + i as f64 + 1.0));
    let t = z + G + 0.5;
    0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + series.ln()
}

fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Regularized incomplete beta function I_x(a, b).
///
/// Continued fraction evaluated with the modified Lentz method; the
/// symmetry `I_x(a, b) = 1 − I_{1−x}(b, a)` keeps the fraction in its
/// fast-converging region. Returns exactly 0 at x ≤ 0 and 1 at x ≥ 1.
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - regularized_incomplete_beta(1.0 - x, b, a);
    }

    let front = (a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b)).exp() / a;
    front * incomplete_beta_fraction(x, a, b)
}

fn incomplete_beta_fraction(x: f64, a: f64, b: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-15;
    const FLOOR: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < FLOOR { FLOOR } else { v };

    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - (a + b) * x / (a + 1.0));
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let two_m = 2.0 * m;

        let even = m * (b - m) * x / ((a + two_m - 1.0) * (a + two_m));
        d = 1.0 / guard(1.0 + even * d);
        c = guard(1.0 + even / c);
        h *= d * c;

        let odd = -(a + m) * (a + b + m) * x / ((a + two_m) * (a + two_m + 1.0));
        d = 1.0 / guard(1.0 + odd * d);
        c = guard(1.0 + odd / c);
        let step = d * c;
        h *= step;

        if (step - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

// ---------------------------------------------------------------------------
// Student's t
// ---------------------------------------------------------------------------

/// Location-scale Student-t distribution.
///
/// With `location = 0` and `scale = 1` this is the standard t distribution
/// used by the one-sample test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentT {
    pub df: f64,
    pub location: f64,
    pub scale: f64,
}

impl StudentT {
    /// Returns `None` unless `df` and `scale` are finite and positive.
    pub fn new(df: f64, location: f64, scale: f64) -> Option<Self> {
        let valid = df.is_finite() && df > 0.0 && scale.is_finite() && scale > 0.0;
        (valid && location.is_finite()).then_some(Self {
            df,
            location,
            scale,
        })
    }

    pub fn standard(df: f64) -> Option<Self> {
        Self::new(df, 0.0, 1.0)
    }

    pub fn pdf(&self, x: f64) -> f64 {
        let t = (x - self.location) / self.scale;
        let half = self.df / 2.0;
        let ln_norm = ln_gamma(half + 0.5) - ln_gamma(half) - 0.5 * (self.df * PI).ln();
        (ln_norm - (half + 0.5) * (t * t / self.df).ln_1p()).exp() / self.scale
    }

    pub fn cdf(&self, x: f64) -> f64 {
        let t = (x - self.location) / self.scale;
        if t == 0.0 {
            return 0.5;
        }
        let tail = 0.5 * self.tail_beta(t);
        if t > 0.0 { 1.0 - tail } else { tail }
    }

    /// P(|T| ≥ |x|) on the standardized scale.
    ///
    /// Computed from the incomplete beta directly rather than as
    /// `2·(1 − cdf)`, so it depends on `x` only through `x²` and is exact
    /// (1.0) at the centre.
    pub fn two_tailed_p(&self, x: f64) -> f64 {
        let t = (x - self.location) / self.scale;
        self.tail_beta(t).clamp(0.0, 1.0)
    }

    /// The mode of the distribution and the density there.
    pub fn peak(&self) -> (f64, f64) {
        (self.location, self.pdf(self.location))
    }

    fn tail_beta(&self, t: f64) -> f64 {
        regularized_incomplete_beta(self.df / (self.df + t * t), self.df / 2.0, 0.5)
    }
}

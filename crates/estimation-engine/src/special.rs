//! Special functions and random samplers backing the Beta-sum estimators.
//!
//! Everything here is allocation-free and takes its random source as an
//! explicit `rand::Rng` parameter, so callers control seeding and tests can
//! reproduce exact sample sequences.

use rand::Rng;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
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

/// Natural log of the Gamma function (Lanczos approximation, g = 7).
pub fn ln_gamma(z: f64) -> f64 {
    use std::f64::consts::PI;

    if z < 0.5 {
        // Reflection: ln Γ(z) = ln(π / sin(πz)) − ln Γ(1 − z)
        return (PI / (PI * z).sin()).ln() - ln_gamma(1.0 - z);
    }

    let z = z - 1.0;
    let mut acc = LANCZOS_COEFFS[0];
    for (i, coeff) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += coeff / (z + i as f64);
    }

    let t = z + LANCZOS_G + 0.5;
    (2.0 * PI).sqrt().ln() + (z + 0.5) * t.ln() - t + acc.ln()
}

/// Beta(α, β) probability density at `x`; zero outside the open interval
/// (0, 1). Evaluated in log space so large shape parameters cannot overflow
/// the intermediate Gamma terms.
pub fn beta_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }
    let ln_val = ln_gamma(alpha + beta) - ln_gamma(alpha) - ln_gamma(beta)
        + (alpha - 1.0) * x.ln()
        + (beta - 1.0) * (1.0 - x).ln();
    ln_val.exp()
}

/// Standard normal draw via the Box–Muller transform. Uniform draws of
/// exactly zero are re-drawn so the log term stays finite.
pub fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    use std::f64::consts::PI;

    let mut u1: f64 = rng.gen();
    while u1 == 0.0 {
        u1 = rng.gen();
    }
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Gamma(α, 1) draw using the Marsaglia–Tsang squeeze method.
///
/// For α < 1 the shape is boosted: Gamma(α) = Gamma(α + 1) · U^(1/α).
pub fn sample_gamma<R: Rng + ?Sized>(rng: &mut R, alpha: f64) -> f64 {
    if alpha < 1.0 {
        let mut u: f64 = rng.gen();
        while u == 0.0 {
            u = rng.gen();
        }
        return sample_gamma(rng, alpha + 1.0) * u.powf(1.0 / alpha);
    }

    let d = alpha - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = sample_standard_normal(rng);
        let t = 1.0 + c * x;
        if t <= 0.0 {
            continue;
        }
        let v = t * t * t;
        let u: f64 = rng.gen();
        // Cheap squeeze first, exact log test on the rare misses.
        if u < 1.0 - 0.0331 * x * x * x * x {
            return d * v;
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

/// Beta(α, β) draw composed from two Gamma draws.
pub fn sample_beta<R: Rng + ?Sized>(rng: &mut R, alpha: f64, beta: f64) -> f64 {
    let g1 = sample_gamma(rng, alpha);
    let g2 = sample_gamma(rng, beta);
    g1 / (g1 + g2)
}

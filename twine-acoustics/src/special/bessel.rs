use std::f64::consts::PI;

use num_complex::Complex64;

/// Modulus below which the power series is summed.
///
/// Above it the Hankel asymptotic expansion is accurate to near machine
/// precision while the series starts losing digits to cancellation.
const SERIES_LIMIT: f64 = 17.0;

const MAX_SERIES_TERMS: u32 = 500;
const MAX_ASYMPTOTIC_TERMS: u32 = 60;

/// Exponentially scaled Bessel function of the first kind, `Jₙ(z)·e^{−|Im z|}`.
///
/// The scaling keeps the value bounded for arguments far from the real axis,
/// such as the shear wave numbers `k·sqrt(−j)` of the loss models, and
/// cancels in ratios of Bessel functions of the same argument.
///
/// Uses the power series for `|z| ≤ 17` and Hankel's asymptotic expansion
/// beyond, which requires `|arg z| < π`.
///
/// # Example
///
/// ```
/// use num_complex::Complex64;
/// use twine_acoustics::special::jve;
///
/// let j0 = jve(0, Complex64::new(1.0, 0.0));
/// assert!((j0.re - 0.765_197_686_557_966_6).abs() < 1e-14);
/// ```
#[must_use]
pub fn jve(order: u32, z: Complex64) -> Complex64 {
    if z.norm() <= SERIES_LIMIT {
        power_series(order, z) * (-z.im.abs()).exp()
    } else {
        hankel_asymptotic(order, z)
    }
}

/// `Jₙ(z) = (z/2)ⁿ Σ (−z²/4)ᵏ / (k! (n+k)!)`.
fn power_series(order: u32, z: Complex64) -> Complex64 {
    let half = z / 2.0;
    let factorial: f64 = (1..=order).map(f64::from).product();

    let mut term = half.powu(order) / factorial;
    let mut sum = term;
    let step = -half * half;

    for k in 1..=MAX_SERIES_TERMS {
        term *= step / f64::from(k * (k + order));
        sum += term;
        if term.norm() <= f64::EPSILON * sum.norm() {
            break;
        }
    }

    sum
}

/// `Jₙ(z) ≈ sqrt(2/(πz)) (P cos χ − Q sin χ)` with `χ = z − (n/2 + 1/4)π`.
///
/// `cos χ` and `sin χ` are formed with the `e^{−|Im z|}` factor already
/// applied so they cannot overflow.
fn hankel_asymptotic(order: u32, z: Complex64) -> Complex64 {
    let mu = 4.0 * f64::from(order * order);

    let mut p = Complex64::new(1.0, 0.0);
    let mut q = Complex64::new(0.0, 0.0);
    let mut term = Complex64::new(1.0, 0.0);
    let mut last = f64::INFINITY;

    // The expansion diverges: stop at its smallest term.
    for k in 1..=MAX_ASYMPTOTIC_TERMS {
        let odd = f64::from(2 * k - 1);
        term *= (mu - odd * odd) / (8.0 * f64::from(k) * z);

        let size = term.norm();
        if size > last {
            break;
        }
        last = size;

        let sign = if (k / 2) % 2 == 1 { -1.0 } else { 1.0 };
        if k % 2 == 1 {
            q += sign * term;
        } else {
            p += sign * term;
        }

        if size < f64::EPSILON {
            break;
        }
    }

    let i = Complex64::i();
    let chi = z - (f64::from(order) / 2.0 + 0.25) * PI;
    let damping = z.im.abs();
    let forward = (i * chi - damping).exp();
    let backward = (-i * chi - damping).exp();
    let cos = (forward + backward) / 2.0;
    let sin = (forward - backward) / (2.0 * i);

    (2.0 / (PI * z)).sqrt() * (p * cos - q * sin)
}

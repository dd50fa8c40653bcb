//! # Descriptive Statistics
//!
//! Small, allocation-light statistics over `f64` slices. Every function is
//! total: empty or degenerate input yields `0.0` rather than NaN, so the
//! feature vector stays finite for any non-degenerate ledger.
//!
//! Sums are accumulated left to right. Results can differ from pairwise
//! summation in the last few ulps, which is well below anything that moves
//! a rounded score.

/// Moment sums (and the kurtosis numerator and denominator) whose magnitude
/// falls below this are treated as zero.
const FP_ERR_FLOOR: f64 = 1e-14;

/// Arithmetic mean. `0.0` for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (ddof = 0). `0.0` for an empty slice.
pub fn std_pop(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    var.sqrt()
}

/// Pearson correlation of two equal-length slices, clamped to `[-1, 1]`.
///
/// Returns `0.0` when the lengths differ, the slices are empty, or either
/// side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (ma, mb) = (mean(a), mean(b));
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }
    let denom = (va * vb).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

/// Sums of 2nd, 3rd and 4th powers of deviations from the mean.
fn central_sums(xs: &[f64]) -> (f64, f64, f64) {
    let m = mean(xs);
    xs.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), x| {
        let d = x - m;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
    })
}

fn zero_out_fp_err(v: f64) -> f64 {
    if v.abs() < FP_ERR_FLOOR {
        0.0
    } else {
        v
    }
}

/// Bias-adjusted Fisher–Pearson skewness (G1).
///
/// `0.0` when `n < 3` or the series has no variance.
pub fn skewness(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 3 {
        return 0.0;
    }
    let nf = n as f64;
    let (m2, m3, _) = central_sums(xs);
    let m2 = zero_out_fp_err(m2);
    let m3 = zero_out_fp_err(m3);
    if m2 == 0.0 {
        return 0.0;
    }
    nf * (nf - 1.0).sqrt() / (nf - 2.0) * (m3 / m2.powf(1.5))
}

/// Bias-adjusted excess kurtosis (G2).
///
/// `0.0` when `n < 4` or the denominator `(n-2)(n-3)·m2²` is
/// indistinguishable from zero.
pub fn excess_kurtosis(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 4 {
        return 0.0;
    }
    let nf = n as f64;
    let (m2, _, m4) = central_sums(xs);
    let numer = zero_out_fp_err(nf * (nf + 1.0) * (nf - 1.0) * m4);
    let denom = zero_out_fp_err((nf - 2.0) * (nf - 3.0) * (m2 * m2));
    if denom == 0.0 {
        return 0.0;
    }
    let adj = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    numer / denom - adj
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_std() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(close(mean(&xs), 5.0));
        assert!(close(std_pop(&xs), 2.0));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_pop(&[]), 0.0);
        assert_eq!(skewness(&[]), 0.0);
        assert_eq!(excess_kurtosis(&[]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_pearson_perfect() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        let c = [8.0, 6.0, 4.0, 2.0];
        assert!(close(pearson(&a, &b), 1.0));
        assert!(close(pearson(&a, &c), -1.0));
        assert!(pearson(&a, &b) <= 1.0);
    }

    #[test]
    fn test_pearson_constant_side() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        assert!(close(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0));
    }

    #[test]
    fn test_skewness_known_value() {
        // Deviation sums for [1, 2, 3, 10]: m2 = 50, m3 = 180.
        let g = skewness(&[1.0, 2.0, 3.0, 10.0]);
        assert!((g - 1.763632615).abs() < 1e-6, "got {g}");
    }

    #[test]
    fn test_kurtosis_known_value() {
        // G2 of [1, 2, 3, 4, 5] is -1.2.
        assert!(close(excess_kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]), -1.2));
    }

    #[test]
    fn test_kurtosis_tiny_amounts_flush_to_zero() {
        // One spike: G2 is 4 at unit scale, but at 1e-5 the numerator and
        // denominator both fall under the floor.
        assert!(close(excess_kurtosis(&[0.0, 0.0, 0.0, 1.0]), 4.0));
        assert_eq!(excess_kurtosis(&[0.0, 0.0, 0.0, 1e-5]), 0.0);
    }

    #[test]
    fn test_degenerate_moments() {
        assert_eq!(skewness(&[3.0, 3.0, 3.0]), 0.0);
        assert_eq!(excess_kurtosis(&[3.0, 3.0, 3.0, 3.0]), 0.0);
        assert_eq!(skewness(&[1.0, 2.0]), 0.0);
        assert_eq!(excess_kurtosis(&[1.0, 2.0, 3.0]), 0.0);
    }
}

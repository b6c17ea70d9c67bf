//! Statistical helpers for comparing quantification channels.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1); NaN with fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Mean ratio between two groups of values.
pub fn fold_change(a: &[f64], b: &[f64]) -> f64 {
    mean(a) / mean(b)
}

/// Signal-to-noise ratio between two groups of values.
pub fn snr(a: &[f64], b: &[f64]) -> f64 {
    (mean(a) - mean(b)) / (std_dev(a) + std_dev(b))
}

/// Two-sided p-value from a standard two-sample t-test with pooled variance
/// (dof = n1 + n2 - 2). NaN when either group has fewer than two values or
/// the pooled variance is zero.
pub fn p_value(a: &[f64], b: &[f64]) -> f64 {
    let (n1, n2) = (a.len(), b.len());
    if n1 < 2 || n2 < 2 {
        return f64::NAN;
    }
    let (m1, m2) = (mean(a), mean(b));
    let (s1, s2) = (std_dev(a), std_dev(b));
    let dof = (n1 + n2 - 2) as f64;
    let pooled = ((n1 - 1) as f64 * s1 * s1 + (n2 - 1) as f64 * s2 * s2) / dof;
    let denom = (pooled * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let t = (m1 - m2) / denom;
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => 2.0 * dist.cdf(-t.abs()),
        Err(_) => f64::NAN,
    }
}

/// Cumulative base-2 fold change of a series relative to its first element,
/// skipping zero-valued entries. NaN when the series is empty or starts at
/// zero.
pub fn log_cum_fold_change(vals: &[f64]) -> f64 {
    match vals.first() {
        Some(&first) if first != 0.0 => vals[1..]
            .iter()
            .filter(|&&v| v != 0.0)
            .map(|&v| (v / first).log2().abs())
            .sum(),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mean_and_std() {
        let vals = [1.0, 2.0, 3.0, 4.0];
        assert!((mean(&vals) - 2.5).abs() < 1e-12);
        assert!((std_dev(&vals) - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!(mean(&[]).is_nan());
        assert!(std_dev(&[1.0]).is_nan());
    }

    #[test]
    fn two_group_stats() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert!((fold_change(&a, &b) - 0.4).abs() < 1e-12);
        assert!((snr(&a, &b) + 1.5).abs() < 1e-12);
    }

    #[test]
    fn t_test_matches_reference() {
        // scipy.stats.ttest_ind([1,2,3], [4,5,6]) -> p = 0.0213116411
        let p = p_value(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert!((p - 0.0213116411).abs() < 1e-6);
        assert!(p_value(&[1.0], &[4.0, 5.0]).is_nan());
        // identical constant groups have zero pooled variance
        assert!(p_value(&[2.0, 2.0], &[2.0, 2.0]).is_nan());
    }

    #[test]
    fn cumulative_fold_change() {
        assert!((log_cum_fold_change(&[1.0, 2.0, 4.0]) - 3.0).abs() < 1e-12);
        // zero entries are skipped, zero reference is degenerate
        assert!((log_cum_fold_change(&[2.0, 0.0, 8.0]) - 2.0).abs() < 1e-12);
        assert!(log_cum_fold_change(&[0.0, 1.0]).is_nan());
        assert!(log_cum_fold_change(&[]).is_nan());
        assert_eq!(log_cum_fold_change(&[5.0]), 0.0);
    }
}

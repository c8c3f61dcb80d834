// src/data_analysis/polyfit.rs

use ndarray::{s, Array1, Array2, Axis};

use crate::constants::EXTRAPOLATE_SAMPLES;
use crate::error::{AnalysisError, AnalysisResult};

/// A polynomial fit evaluated over the normalized domain [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Extrapolation {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Highest power first.
    pub coeffs: Vec<f64>,
}

impl Extrapolation {
    /// Value at the end of the domain (x = 1).
    pub fn last_value(&self) -> Option<f64> {
        self.y.last().copied()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// `n` evenly spaced samples from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Evaluates a polynomial (highest power first) with Horner's scheme.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Ordinary least-squares polynomial fit of degree `order`.
///
/// Returns coefficients highest power first. The Vandermonde columns are
/// scaled to unit norm before a Householder QR solve; a column whose
/// triangular factor falls below `len * eps` of the largest one makes the
/// problem rank deficient and the fit is rejected.
pub fn polyfit(x: &[f64], y: &[f64], order: usize) -> AnalysisResult<Vec<f64>> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch(x.len(), y.len()));
    }
    let n_coeffs = order + 1;
    let m = x.len();
    if m < n_coeffs {
        return Err(AnalysisError::InsufficientPoints {
            order,
            required: n_coeffs,
            found: m,
        });
    }

    let mut vander = Array2::<f64>::zeros((m, n_coeffs));
    for (i, &xi) in x.iter().enumerate() {
        for j in 0..n_coeffs {
            vander[[i, j]] = xi.powi((order - j) as i32);
        }
    }

    let scale: Array1<f64> = vander.map_axis(Axis(0), |col| col.dot(&col).sqrt());
    if scale.iter().any(|&sc| sc == 0.0 || !sc.is_finite()) {
        return Err(AnalysisError::SingularFit);
    }
    for (mut col, &sc) in vander.axis_iter_mut(Axis(1)).zip(scale.iter()) {
        col /= sc;
    }

    let solution = solve_least_squares(vander, Array1::from(y.to_vec()))?;
    Ok(solution
        .iter()
        .zip(scale.iter())
        .map(|(c, sc)| c / sc)
        .collect())
}

/// Fits `y` on `x` and evaluates the fit over `linspace(0, 1, 100)`.
pub fn extrapolate(x: &[f64], y: &[f64], order: usize) -> AnalysisResult<Extrapolation> {
    let coeffs = polyfit(x, y, order)?;
    let x_range = linspace(0.0, 1.0, EXTRAPOLATE_SAMPLES);
    let y_range = x_range.iter().map(|&xi| polyval(&coeffs, xi)).collect();
    Ok(Extrapolation {
        x: x_range,
        y: y_range,
        coeffs,
    })
}

/// Sum of squared residuals of `coeffs` against the samples.
pub fn residual_sum_of_squares(coeffs: &[f64], x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (yi - polyval(coeffs, xi)).powi(2))
        .sum()
}

// Householder QR least squares for a tall matrix `a` (m >= n).
fn solve_least_squares(mut a: Array2<f64>, mut b: Array1<f64>) -> AnalysisResult<Array1<f64>> {
    let (m, n) = a.dim();
    let mut r_diag = vec![0.0; n];

    for k in 0..n {
        let column = a.slice(s![k.., k]);
        let norm = column.dot(&column).sqrt();
        if norm == 0.0 {
            continue;
        }
        let alpha = if a[[k, k]] > 0.0 { -norm } else { norm };
        let mut v = a.slice(s![k.., k]).to_owned();
        v[0] -= alpha;
        let v_norm_sq = v.dot(&v);
        if v_norm_sq > 0.0 {
            for j in k..n {
                let mut col = a.slice_mut(s![k.., j]);
                let factor = 2.0 * v.dot(&col) / v_norm_sq;
                col.scaled_add(-factor, &v);
            }
            let mut tail = b.slice_mut(s![k..]);
            let factor = 2.0 * v.dot(&tail) / v_norm_sq;
            tail.scaled_add(-factor, &v);
        }
        r_diag[k] = a[[k, k]];
    }

    let max_diag = r_diag.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    let tolerance = m as f64 * f64::EPSILON * max_diag;
    if max_diag == 0.0 || r_diag.iter().any(|d| d.abs() <= tolerance) {
        return Err(AnalysisError::SingularFit);
    }

    let mut solution = Array1::<f64>::zeros(n);
    for k in (0..n).rev() {
        let mut acc = b[k];
        for j in (k + 1)..n {
            acc -= a[[k, j]] * solution[j];
        }
        solution[k] = acc / a[[k, k]];
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.0, 1.0, 100);
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[99], 1.0);
        assert!((values[1] - 1.0 / 99.0).abs() < 1e-15);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_polyval_horner() {
        // 2x^2 - 3x + 1
        let coeffs = [2.0, -3.0, 1.0];
        assert_eq!(polyval(&coeffs, 0.0), 1.0);
        assert_eq!(polyval(&coeffs, 2.0), 3.0);
        assert_eq!(polyval(&[], 5.0), 0.0);
    }

    #[test]
    fn test_polyfit_recovers_exact_line() {
        let x = [0.0, 100.0, 200.0, 300.0, 400.0];
        let y: Vec<f64> = x.iter().map(|v| 2.5e-5 * v - 0.01).collect();
        let coeffs = polyfit(&x, &y, 1).unwrap();
        assert!((coeffs[0] - 2.5e-5).abs() < 1e-15);
        assert!((coeffs[1] + 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_polyfit_recovers_cubic() {
        let x = linspace(0.0, 1.0, 30);
        let y: Vec<f64> = x
            .iter()
            .map(|v| 120.0 * v * v * v + 300.0 * v * v - 10.0 * v + 4.0)
            .collect();
        let coeffs = polyfit(&x, &y, 3).unwrap();
        let expected = [120.0, 300.0, -10.0, 4.0];
        for (c, e) in coeffs.iter().zip(expected.iter()) {
            assert!((c - e).abs() < 1e-8, "coefficient {} != {}", c, e);
        }
    }

    #[test]
    fn test_polyfit_large_abscissa_quadratic() {
        // Angular velocities in the thousands still fit cleanly.
        let x = linspace(200.0, 3000.0, 25);
        let y: Vec<f64> = x.iter().map(|w| 8.0e-5 * w * w + 0.01 * w - 3.0).collect();
        let coeffs = polyfit(&x, &y, 2).unwrap();
        assert!((coeffs[0] - 8.0e-5).abs() < 1e-12);
        assert!((coeffs[1] - 0.01).abs() < 1e-8);
        assert!((coeffs[2] + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_polyfit_is_least_squares_minimum() {
        let x = [0.0, 50.0, 120.0, 300.0, 450.0, 700.0, 960.0];
        let y = [0.001, 0.0022, 0.0041, 0.0079, 0.0113, 0.0178, 0.0239];
        let coeffs = polyfit(&x, &y, 1).unwrap();
        let best = residual_sum_of_squares(&coeffs, &x, &y);
        for (d_slope, d_intercept) in [(1e-7, 0.0), (-1e-7, 0.0), (0.0, 1e-5), (0.0, -1e-5), (1e-7, -1e-5)] {
            let perturbed = [coeffs[0] + d_slope, coeffs[1] + d_intercept];
            assert!(residual_sum_of_squares(&perturbed, &x, &y) >= best);
        }
    }

    #[test]
    fn test_polyfit_rejects_too_few_points() {
        match polyfit(&[1.0], &[2.0], 1) {
            Err(AnalysisError::InsufficientPoints { required, found, .. }) => {
                assert_eq!(required, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected InsufficientPoints, got {:?}", other),
        }
    }

    #[test]
    fn test_polyfit_rejects_identical_abscissae() {
        let x = [100.0; 5];
        let y = [0.1, 0.2, 0.3, 0.4, 0.5];
        assert!(matches!(polyfit(&x, &y, 1), Err(AnalysisError::SingularFit)));
        assert!(matches!(polyfit(&[0.0; 4], &y[..4], 1), Err(AnalysisError::SingularFit)));
    }

    #[test]
    fn test_polyfit_length_mismatch() {
        assert!(matches!(
            polyfit(&[0.0, 1.0, 2.0], &[0.0, 1.0], 1),
            Err(AnalysisError::LengthMismatch(3, 2))
        ));
    }

    #[test]
    fn test_extrapolate_ends_at_unit_command() {
        let x = [0.1, 0.3, 0.5, 0.7, 0.8];
        let y: Vec<f64> = x.iter().map(|v| 500.0 * v * v).collect();
        let fit = extrapolate(&x, &y, 3).unwrap();
        assert_eq!(fit.x.len(), EXTRAPOLATE_SAMPLES);
        assert_eq!(fit.x[0], 0.0);
        assert_eq!(fit.x[EXTRAPOLATE_SAMPLES - 1], 1.0);
        assert!((fit.last_value().unwrap() - 500.0).abs() < 1e-6);
        assert_eq!(fit.points().len(), EXTRAPOLATE_SAMPLES);
    }
}

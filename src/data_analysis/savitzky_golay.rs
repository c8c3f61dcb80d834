// src/data_analysis/savitzky_golay.rs

//! Savitzky-Golay smoothing with nearest-edge padding.
//!
//! A polynomial of degree `poly_order` is least-squares fitted to each window
//! of `window` samples and evaluated at window position `(window - 1) / 2`.
//! For odd windows that is the centre sample. For even windows the window
//! covers `i - (window/2 - 1) ..= i + window/2` and the fit is evaluated half
//! a sample after `i`. Indices past either end repeat the edge sample.

use crate::error::{AnalysisError, AnalysisResult};

/// Smoothing weights for one window, in sample order.
pub fn savgol_coefficients(window: usize, poly_order: usize) -> AnalysisResult<Vec<f64>> {
    if poly_order >= window {
        return Err(AnalysisError::FilterOrder {
            order: poly_order,
            window,
        });
    }

    let p = poly_order + 1;
    let centre = (window as f64 - 1.0) / 2.0;
    let positions: Vec<f64> = (0..window).map(|j| j as f64 - centre).collect();

    // Normal matrix G[r][c] = sum_j t_j^(r + c), augmented with e0.
    let mut aug = vec![vec![0.0; p + 1]; p];
    for (r, row) in aug.iter_mut().enumerate() {
        for c in 0..p {
            row[c] = positions.iter().map(|t| t.powi((r + c) as i32)).sum();
        }
    }
    aug[0][p] = 1.0;

    // Gauss-Jordan with partial pivoting.
    for col in 0..p {
        let mut max_row = col;
        for row in (col + 1)..p {
            if aug[row][col].abs() > aug[max_row][col].abs() {
                max_row = row;
            }
        }
        aug.swap(col, max_row);

        let pivot = aug[col][col];
        if pivot.abs() < 1e-12 {
            return Err(AnalysisError::SingularFit);
        }
        for value in aug[col].iter_mut() {
            *value /= pivot;
        }
        for row in 0..p {
            if row != col {
                let factor = aug[row][col];
                if factor != 0.0 {
                    for c in 0..=p {
                        aug[row][c] -= factor * aug[col][c];
                    }
                }
            }
        }
    }

    let z: Vec<f64> = aug.iter().map(|row| row[p]).collect();
    Ok(positions
        .iter()
        .map(|t| z.iter().enumerate().map(|(k, zk)| zk * t.powi(k as i32)).sum())
        .collect())
}

/// Savitzky-Golay filter with cached coefficients.
#[derive(Debug, Clone)]
pub struct SavitzkyGolay {
    window: usize,
    coeffs: Vec<f64>,
}

impl SavitzkyGolay {
    pub fn new(window: usize, poly_order: usize) -> AnalysisResult<Self> {
        let coeffs = savgol_coefficients(window, poly_order)?;
        Ok(Self { window, coeffs })
    }

    /// Smooths `data`, padding both ends with the nearest sample.
    pub fn smooth(&self, data: &[f64]) -> Vec<f64> {
        let n = data.len();
        if n == 0 {
            return Vec::new();
        }
        let left = (self.window as i64 - 1) / 2;
        let last = n as i64 - 1;

        (0..n as i64)
            .map(|i| {
                self.coeffs
                    .iter()
                    .enumerate()
                    .map(|(j, &c)| {
                        let idx = (i - left + j as i64).clamp(0, last) as usize;
                        c * data[idx]
                    })
                    .sum()
            })
            .collect()
    }
}

/// One-shot smoothing.
pub fn savgol_smooth(data: &[f64], window: usize, poly_order: usize) -> AnalysisResult<Vec<f64>> {
    Ok(SavitzkyGolay::new(window, poly_order)?.smooth(data))
}

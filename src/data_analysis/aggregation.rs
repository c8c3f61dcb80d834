// src/data_analysis/aggregation.rs

use ndarray::{Array2, Axis};

use crate::data_analysis::alignment::AlignedRun;
use crate::error::{AnalysisError, AnalysisResult};

/// Column-wise mean across runs of one propeller.
///
/// Rows are averaged by position. Runs are neither resampled nor
/// interpolated, so every run must have the same row count as the first;
/// otherwise `RowCountMismatch` names the first offending run (1-based).
pub fn aggregate_runs(runs: &[AlignedRun]) -> AnalysisResult<AlignedRun> {
    let first = runs.first().ok_or(AnalysisError::NoValidRuns)?;
    let expected = first.len();
    if let Some((idx, run)) = runs.iter().enumerate().find(|(_, run)| run.len() != expected) {
        return Err(AnalysisError::RowCountMismatch {
            run: idx + 1,
            expected,
            found: run.len(),
        });
    }

    let mut mean = AlignedRun::default();
    for (col_idx, target) in mean.columns_mut().into_iter().enumerate() {
        let mut stacked = Array2::<f64>::zeros((runs.len(), expected));
        for (run_idx, run) in runs.iter().enumerate() {
            for (row_idx, &value) in run.columns()[col_idx].iter().enumerate() {
                stacked[[run_idx, row_idx]] = value;
            }
        }
        *target = match stacked.mean_axis(Axis(0)) {
            Some(column) => column.to_vec(),
            None => Vec::new(),
        };
    }
    Ok(mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(offset: f64, rows: usize) -> AlignedRun {
        let mut run = AlignedRun::default();
        for i in 0..rows {
            let x = i as f64;
            run.push(x / 10.0, 10.0 * x + offset, 100.0 * x + offset, 16.0 + offset, x + offset);
        }
        run
    }

    #[test]
    fn test_mean_of_identical_shapes_is_elementwise() {
        let runs = [run(0.0, 4), run(2.0, 4)];
        let mean = aggregate_runs(&runs).unwrap();
        assert_eq!(mean.len(), 4);
        assert_eq!(mean.cmd, vec![0.0, 0.1, 0.2, 0.3]);
        assert_eq!(mean.thrust, vec![1.0, 11.0, 21.0, 31.0]);
        assert_eq!(mean.omega, vec![1.0, 101.0, 201.0, 301.0]);
        assert_eq!(mean.voltage, vec![17.0; 4]);
        assert_eq!(mean.current, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_single_run_is_unchanged() {
        let only = run(0.5, 3);
        assert_eq!(aggregate_runs(std::slice::from_ref(&only)).unwrap(), only);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(aggregate_runs(&[]), Err(AnalysisError::NoValidRuns)));
    }

    #[test]
    fn test_differing_row_counts_are_flagged() {
        // Positional averaging would pair unrelated commands here.
        let runs = [run(0.0, 5), run(0.0, 5), run(0.0, 4)];
        match aggregate_runs(&runs) {
            Err(AnalysisError::RowCountMismatch { run, expected, found }) => {
                assert_eq!((run, expected, found), (3, 5, 4));
            }
            other => panic!("expected RowCountMismatch, got {:?}", other),
        }
    }
}

// src/data_analysis/aggregation.rs

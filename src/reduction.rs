// src/reduction.rs

use log::{info, warn};

use crate::data_analysis::aggregation::aggregate_runs;
use crate::data_analysis::alignment::{align_run, AlignedRun, RunAlignment};
use crate::data_analysis::curves::PropellerCurves;
use crate::data_input::run_discovery::{RunCatalog, RunGroup};
use crate::error::{AnalysisError, AnalysisResult};

/// Aligns every paired run of one propeller and drops those failing the
/// timestamp check.
pub fn valid_runs(group: &RunGroup) -> AnalysisResult<Vec<AlignedRun>> {
    let mut runs = Vec::new();
    for (run_idx, (tts, psu)) in group.paired_runs()?.into_iter().enumerate() {
        match align_run(tts, psu)? {
            RunAlignment::Aligned(run) => runs.push(run),
            RunAlignment::Misaligned { row, delta } => {
                warn!("Timestamp error: {} Run {}", group.identifier, run_idx + 1);
                log::debug!(
                    "'{}' row {} is {:.3} from the nearest power-supply sample",
                    tts.source.display(),
                    row,
                    delta
                );
            }
        }
    }
    Ok(runs)
}

/// Mean aligned run per propeller, in catalog order.
///
/// Propellers left without valid runs, or whose runs disagree in row count,
/// are reported and skipped. Every other error is returned.
pub fn reduce_propellers(catalog: &RunCatalog) -> AnalysisResult<Vec<(String, AlignedRun)>> {
    let mut reduced = Vec::with_capacity(catalog.len());
    for group in catalog.groups() {
        let runs = valid_runs(group)?;
        match aggregate_runs(&runs) {
            Ok(mean) => {
                info!("{}: averaged {} run(s), {} rows", group.identifier, runs.len(), mean.len());
                reduced.push((group.identifier.clone(), mean));
            }
            Err(err @ (AnalysisError::NoValidRuns | AnalysisError::RowCountMismatch { .. })) => {
                warn!("Skipping {}: {}", group.identifier, err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(reduced)
}

/// Derives every curve for each reduced propeller.
pub fn derive_all_curves(reduced: &[(String, AlignedRun)], thrust_fit_order: usize) -> AnalysisResult<Vec<PropellerCurves>> {
    reduced
        .iter()
        .map(|(identifier, mean)| PropellerCurves::derive(identifier, mean, thrust_fit_order))
        .collect()
}


// src/reduction.rs

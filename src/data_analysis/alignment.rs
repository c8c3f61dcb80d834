// src/data_analysis/alignment.rs

use crate::constants::{DSHOT_CMD_MAX, DSHOT_CMD_MIN, TIMESTAMP_TOLERANCE};
use crate::data_input::log_data::{PsuTable, TtsTable};
use crate::error::{AnalysisError, AnalysisResult};

/// Column-oriented merge of one thrust-test run with its power-supply run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AlignedRun {
    pub cmd: Vec<f64>,     // Normalized 0..1.
    pub thrust: Vec<f64>,  // Grams.
    pub omega: Vec<f64>,   // rad/s.
    pub voltage: Vec<f64>, // V.
    pub current: Vec<f64>, // A.
}

impl AlignedRun {
    pub fn len(&self) -> usize {
        self.cmd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmd.is_empty()
    }

    pub fn push(&mut self, cmd: f64, thrust: f64, omega: f64, voltage: f64, current: f64) {
        self.cmd.push(cmd);
        self.thrust.push(thrust);
        self.omega.push(omega);
        self.voltage.push(voltage);
        self.current.push(current);
    }

    /// The five columns in a fixed order (cmd, thrust, omega, voltage, current).
    pub fn columns(&self) -> [&[f64]; 5] {
        [&self.cmd, &self.thrust, &self.omega, &self.voltage, &self.current]
    }

    pub(crate) fn columns_mut(&mut self) -> [&mut Vec<f64>; 5] {
        [
            &mut self.cmd,
            &mut self.thrust,
            &mut self.omega,
            &mut self.voltage,
            &mut self.current,
        ]
    }
}

/// Outcome of aligning one trial.
#[derive(Debug, Clone, PartialEq)]
pub enum RunAlignment {
    Aligned(AlignedRun),
    /// The first thrust-test row whose nearest power-supply sample was too far away.
    Misaligned { row: usize, delta: f64 },
}

/// Maps a DShot code from [0, 2000] onto [0, 1].
pub fn normalize_command(code: f64) -> AnalysisResult<f64> {
    if !(DSHOT_CMD_MIN..=DSHOT_CMD_MAX).contains(&code) {
        return Err(AnalysisError::CommandOutOfRange(code));
    }
    Ok((code - DSHOT_CMD_MIN) / (DSHOT_CMD_MAX - DSHOT_CMD_MIN))
}

/// Index and absolute distance of the sample nearest to `target`.
/// Ties resolve to the lowest index.
pub fn nearest_index<I: IntoIterator<Item = f64>>(timestamps: I, target: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, ts) in timestamps.into_iter().enumerate() {
        let delta = (ts - target).abs();
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((idx, delta)),
        }
    }
    best
}

/// Matches every thrust-test row to its nearest power-supply row.
///
/// A single row further than the tolerance away from any power-supply
/// sample rejects the whole run.
pub fn align_run(tts: &TtsTable, psu: &PsuTable) -> AnalysisResult<RunAlignment> {
    let mut aligned = AlignedRun::default();

    for (row, tts_row) in tts.rows.iter().enumerate() {
        let (psu_idx, delta) =
            nearest_index(psu.timestamps(), tts_row.timestamp).ok_or(AnalysisError::EmptyTable(tts.rows.len()))?;
        if delta > TIMESTAMP_TOLERANCE {
            return Ok(RunAlignment::Misaligned { row, delta });
        }
        let psu_row = &psu.rows[psu_idx];
        aligned.push(
            normalize_command(tts_row.dshot_cmd)?,
            tts_row.thrust,
            tts_row.omega,
            psu_row.voltage,
            psu_row.current,
        );
    }
    Ok(RunAlignment::Aligned(aligned))
}


// src/data_analysis/alignment.rs

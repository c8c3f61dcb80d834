// src/data_analysis/calibration.rs

//! Load-cell calibration: interactive sample collection, baseline zeroing,
//! and the two independent first-order fits (weight -> reading and
//! reading -> weight).

use std::io::{BufRead, Write};

use crate::constants::{CALIBRATION_STOP_WEIGHT_G, PROMPT_BASELINE, PROMPT_WEIGHT};
use crate::data_analysis::polyfit::{polyfit, polyval};
use crate::error::{AnalysisError, AnalysisResult};
use crate::formatting::format_sci;

/// Collected (weight, reading) pairs in collection order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CalibrationSamples {
    pub weights: Vec<f64>,  // Grams, non-decreasing, first is 0.
    pub readings: Vec<f64>, // Raw load-cell output.
}

impl CalibrationSamples {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn push(&mut self, weight: f64, reading: f64) {
        self.weights.push(weight);
        self.readings.push(reading);
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.weights
            .iter()
            .copied()
            .zip(self.readings.iter().copied())
            .collect()
    }
}

/// Subtracts the first reading from every reading.
pub fn zero_readings(samples: &mut CalibrationSamples) {
    if let Some(&baseline) = samples.readings.first() {
        for reading in samples.readings.iter_mut() {
            *reading -= baseline;
        }
    }
}

fn prompt_number<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> AnalysisResult<f64> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AnalysisError::UnexpectedEndOfInput);
    }
    let trimmed = line.trim();
    trimmed.parse::<f64>().map_err(|_| AnalysisError::InvalidNumber {
        input: trimmed.to_string(),
    })
}

/// Interactively collects calibration samples.
///
/// The first prompt records the zero-weight reading. Every following step
/// asks for the weight added and the new reading. Collection ends once the
/// accumulated weight exceeds 950 g.
pub fn collect_samples<R: BufRead, W: Write>(mut input: R, mut output: W) -> AnalysisResult<CalibrationSamples> {
    let mut samples = CalibrationSamples::default();
    let mut weight = 0.0;

    loop {
        let reading = if samples.is_empty() {
            prompt_number(&mut input, &mut output, PROMPT_BASELINE)?
        } else {
            weight += prompt_number(&mut input, &mut output, PROMPT_WEIGHT)?;
            let prompt = format!("{weight:.2} (g) {PROMPT_BASELINE}");
            prompt_number(&mut input, &mut output, &prompt)?
        };
        samples.push(weight, reading);

        if weight > CALIBRATION_STOP_WEIGHT_G {
            break;
        }
    }
    log::info!("Collected {} calibration samples", samples.len());
    Ok(samples)
}

/// y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    pub fn fit(x: &[f64], y: &[f64]) -> AnalysisResult<Self> {
        let coeffs = polyfit(x, y, 1)?;
        Ok(Self {
            slope: coeffs[0],
            intercept: coeffs[1],
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        polyval(&[self.slope, self.intercept], x)
    }
}

/// Both calibration directions, each fitted independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationFit {
    pub weight_to_reading: LinearModel,
    pub reading_to_weight: LinearModel,
}

impl CalibrationFit {
    /// Console report lines.
    pub fn report(&self) -> String {
        let f = self.weight_to_reading;
        let g = self.reading_to_weight;
        format!(
            "Weight (g) --> Load cell:\n\tf(x) = {} x + {}\nLoad cell --> Weight (g):\n\tg(x) = {:.8} x + {:.8}",
            format_sci(f.slope, 8, true),
            format_sci(f.intercept, 8, true),
            g.slope,
            g.intercept
        )
    }

    /// Plot title for the weight -> reading fit.
    pub fn title(&self) -> String {
        format!(
            "f(x)={} x + {}",
            format_sci(self.weight_to_reading.slope, 4, true),
            format_sci(self.weight_to_reading.intercept, 4, true)
        )
    }
}

pub fn fit_calibration(samples: &CalibrationSamples) -> AnalysisResult<CalibrationFit> {
    Ok(CalibrationFit {
        weight_to_reading: LinearModel::fit(&samples.weights, &samples.readings)?,
        reading_to_weight: LinearModel::fit(&samples.readings, &samples.weights)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::polyfit::residual_sum_of_squares;

    #[test]
    fn test_collect_stops_after_exceeding_stop_weight() {
        let input = "0.0021\n500\n0.0144\n400\n0.0262\n100\n0.0291\n";
        let mut prompts = Vec::new();
        let samples = collect_samples(input.as_bytes(), &mut prompts).unwrap();
        assert_eq!(samples.weights, vec![0.0, 500.0, 900.0, 1000.0]);
        assert_eq!(samples.readings, vec![0.0021, 0.0144, 0.0262, 0.0291]);

        let prompts = String::from_utf8(prompts).unwrap();
        assert!(prompts.starts_with("lc_output: Input weight (g): 500.00 (g) lc_output: "));
        assert!(prompts.ends_with("1000.00 (g) lc_output: "));
    }

    #[test]
    fn test_collect_exactly_stop_weight_continues() {
        // 950 is not > 950, so another step is requested.
        let input = "0.0\n950\n0.5\n1\n0.6\n";
        let samples = collect_samples(input.as_bytes(), Vec::new()).unwrap();
        assert_eq!(samples.weights, vec![0.0, 950.0, 951.0]);
    }

    #[test]
    fn test_collect_rejects_malformed_input() {
        let input = "0.0\nfive hundred\n";
        match collect_samples(input.as_bytes(), Vec::new()) {
            Err(AnalysisError::InvalidNumber { input }) => assert_eq!(input, "five hundred"),
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_rejects_early_eof() {
        let input = "0.0\n200\n";
        assert!(matches!(
            collect_samples(input.as_bytes(), Vec::new()),
            Err(AnalysisError::UnexpectedEndOfInput)
        ));
    }

    #[test]
    fn test_zero_readings_first_is_exactly_zero() {
        let mut samples = CalibrationSamples {
            weights: vec![0.0, 100.0, 200.0],
            readings: vec![0.0279361, 0.0304, 0.0329],
        };
        zero_readings(&mut samples);
        assert_eq!(samples.readings[0], 0.0);
        assert!((samples.readings[2] - (0.0329 - 0.0279361)).abs() < 1e-15);
    }

    #[test]
    fn test_fit_directions_are_independent() {
        let samples = CalibrationSamples {
            weights: vec![0.0, 100.0, 250.0, 500.0, 750.0, 1000.0],
            readings: vec![0.0, 0.00251, 0.00612, 0.01238, 0.01841, 0.02466],
        };
        let fit = fit_calibration(&samples).unwrap();
        let f = fit.weight_to_reading;
        let g = fit.reading_to_weight;
        assert!(f.slope > 0.0 && g.slope > 0.0);
        // Approximate inverses only.
        let product = f.slope * g.slope;
        assert!((product - 1.0).abs() < 1e-3);
        assert!(product != 1.0);

        let best = residual_sum_of_squares(&[f.slope, f.intercept], &samples.weights, &samples.readings);
        let nudged = residual_sum_of_squares(&[f.slope * 1.001, f.intercept], &samples.weights, &samples.readings);
        assert!(nudged > best);
    }

    #[test]
    fn test_fit_rejects_single_weight() {
        let samples = CalibrationSamples {
            weights: vec![0.0],
            readings: vec![0.0],
        };
        assert!(matches!(
            fit_calibration(&samples),
            Err(AnalysisError::InsufficientPoints { .. })
        ));
    }

    #[test]
    fn test_report_format() {
        let fit = CalibrationFit {
            weight_to_reading: LinearModel { slope: 2.46324555e-5, intercept: -1.2e-4 },
            reading_to_weight: LinearModel { slope: 40597.1, intercept: 4.87 },
        };
        assert_eq!(
            fit.report(),
            "Weight (g) --> Load cell:\n\tf(x) = 2.46324555E-05 x + -1.20000000E-04\n\
             Load cell --> Weight (g):\n\tg(x) = 40597.10000000 x + 4.87000000"
        );
        assert_eq!(fit.title(), "f(x)=2.4632E-05 x + -1.2000E-04");
    }
}

// src/data_analysis/calibration.rs

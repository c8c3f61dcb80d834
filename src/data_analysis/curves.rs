// src/data_analysis/curves.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::{
    MOTOR_COUNT, REFERENCE_MASS_G, SG_EFFICIENCY_ORDER, SG_EFFICIENCY_WINDOW, SG_OMEGA_ORDER,
    SG_OMEGA_WINDOW, SG_THRUST_OMEGA_ORDER, SG_THRUST_OMEGA_WINDOW, THRUST_OMEGA_FIT_ORDER,
    THRUST_OMEGA_REFERENCE,
};
use crate::data_analysis::alignment::AlignedRun;
use crate::data_analysis::polyfit::{extrapolate, polyval, Extrapolation};
use crate::data_analysis::savitzky_golay::savgol_smooth;
use crate::error::AnalysisResult;
use crate::formatting::{format_fixed, format_sci};

fn zip_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

/// Peak thrust scaled by motor count over vehicle mass.
pub fn thrust_to_weight(peak_thrust: f64, mass_g: f64) -> f64 {
    peak_thrust * MOTOR_COUNT / mass_g
}

/// Raw thrust against command, plus the extrapolated fit.
#[derive(Debug, Clone)]
pub struct ThrustCurve {
    pub raw: Vec<(f64, f64)>,
    pub fit: Extrapolation,
    /// Fitted thrust at command 1.
    pub peak_thrust: f64,
    pub twr: f64,
}

pub fn thrust_curve(aggregate: &AlignedRun, order: usize) -> AnalysisResult<ThrustCurve> {
    let fit = extrapolate(&aggregate.cmd, &aggregate.thrust, order)?;
    let peak_thrust = fit.last_value().unwrap_or(f64::NAN);
    Ok(ThrustCurve {
        raw: zip_points(&aggregate.cmd, &aggregate.thrust),
        peak_thrust,
        twr: thrust_to_weight(peak_thrust, REFERENCE_MASS_G),
        fit,
    })
}

/// Smoothed angular velocity against command.
#[derive(Debug, Clone)]
pub struct OmegaCurve {
    pub points: Vec<(f64, f64)>,
}

pub fn omega_curve(aggregate: &AlignedRun) -> AnalysisResult<OmegaCurve> {
    let omega = savgol_smooth(&aggregate.omega, SG_OMEGA_WINDOW, SG_OMEGA_ORDER)?;
    Ok(OmegaCurve {
        points: zip_points(&aggregate.cmd, &omega),
    })
}

/// Smoothed thrust per electrical watt (g/W) against command.
#[derive(Debug, Clone)]
pub struct EfficiencyCurve {
    pub points: Vec<(f64, f64)>,
    /// NaN when any smoothed sample is NaN.
    pub peak: f64,
    /// At the highest-command sample.
    pub end: f64,
}

pub fn efficiency_curve(aggregate: &AlignedRun) -> AnalysisResult<EfficiencyCurve> {
    let raw: Vec<f64> = aggregate
        .thrust
        .iter()
        .zip(aggregate.current.iter().zip(aggregate.voltage.iter()))
        .map(|(&thrust, (&current, &voltage))| thrust / (current * voltage))
        .collect();
    let smoothed = savgol_smooth(&raw, SG_EFFICIENCY_WINDOW, SG_EFFICIENCY_ORDER)?;

    let peak = Array1::from(smoothed.clone())
        .max()
        .copied()
        .unwrap_or(f64::NAN);
    let end = smoothed.last().copied().unwrap_or(f64::NAN);
    Ok(EfficiencyCurve {
        points: zip_points(&aggregate.cmd, &smoothed),
        peak,
        end,
    })
}

/// Thrust against smoothed angular velocity, with a quadratic thrust(omega) model.
#[derive(Debug, Clone)]
pub struct ThrustOmegaCurve {
    pub points: Vec<(f64, f64)>,
    pub fit: Extrapolation,
    /// Model evaluated at omega = 400 rad/s.
    pub thrust_at_reference: f64,
}

pub fn thrust_omega_curve(aggregate: &AlignedRun) -> AnalysisResult<ThrustOmegaCurve> {
    let omega = savgol_smooth(&aggregate.omega, SG_THRUST_OMEGA_WINDOW, SG_THRUST_OMEGA_ORDER)?;
    let fit = extrapolate(&omega, &aggregate.thrust, THRUST_OMEGA_FIT_ORDER)?;
    let thrust_at_reference = polyval(&fit.coeffs, THRUST_OMEGA_REFERENCE);
    Ok(ThrustOmegaCurve {
        points: zip_points(&omega, &aggregate.thrust),
        fit,
        thrust_at_reference,
    })
}

/// Every derived curve for one propeller.
#[derive(Debug, Clone)]
pub struct PropellerCurves {
    pub identifier: String,
    pub thrust: ThrustCurve,
    pub omega: OmegaCurve,
    pub efficiency: EfficiencyCurve,
    pub thrust_omega: ThrustOmegaCurve,
}

impl PropellerCurves {
    pub fn derive(identifier: &str, aggregate: &AlignedRun, thrust_fit_order: usize) -> AnalysisResult<Self> {
        Ok(Self {
            identifier: identifier.to_string(),
            thrust: thrust_curve(aggregate, thrust_fit_order)?,
            omega: omega_curve(aggregate)?,
            efficiency: efficiency_curve(aggregate)?,
            thrust_omega: thrust_omega_curve(aggregate)?,
        })
    }

    pub fn thrust_report(&self) -> String {
        format!(
            "{} \tPeak thrust (predicted): {} \tTWR: {}",
            self.identifier,
            format_fixed(self.thrust.peak_thrust, 1),
            format_fixed(self.thrust.twr, 2)
        )
    }

    pub fn efficiency_report(&self) -> String {
        format!(
            "{} \tPeak efficiency: {} \tend efficiency (@ 0.8): {}",
            self.identifier,
            format_fixed(self.efficiency.peak, 2),
            format_fixed(self.efficiency.end, 2)
        )
    }

    /// Quadratic coefficients, then the model value at the reference omega.
    pub fn thrust_omega_report(&self) -> String {
        let c = &self.thrust_omega.fit.coeffs;
        let coeff = |i: usize| format_sci(c.get(i).copied().unwrap_or(f64::NAN), 2, false);
        format!(
            "{} \t coeffs: [{} u^2 + {} u + {}]\n{}",
            self.identifier,
            coeff(0),
            coeff(1),
            coeff(2),
            self.thrust_omega.thrust_at_reference
        )
    }
}


// src/data_analysis/curves.rs

// src/plot_functions/mod.rs

pub mod plot_calibration;
pub mod plot_efficiency;
pub mod plot_omega;
pub mod plot_thrust;
pub mod plot_thrust_vs_omega;

// src/plot_functions/mod.rs

//! Clinical metrics derived from a concentration series
//!
//! | Metric | Description |
//! |--------|-------------|
//! | Cmax | Peak concentration of the series |
//! | Tmax | Time of the peak |
//! | AUC | Area under the curve over the grid (linear trapezoidal) |
//! | t½ | Elimination half-life, first-order models only |
//! | Trough | Concentration just before the final dose |
//! | Time in window | Hours spent within [MEC, MSC] |
//!
//! The headline result is the [`WindowClass`] of the peak, obtained with
//! [`classify`].

pub mod calc;
mod window;

use serde::Serialize;

use crate::data::{generate_schedule, SimulationParameters};
use crate::error::PkError;
use crate::simulator::ConcentrationSeries;

pub use calc::{
    auc, bateman_tmax, half_life, model_half_life, peak, time_in_window, time_to_peak, trough,
    zero_order_clearance_time,
};
pub use window::{TherapeuticWindow, WindowClass};

/// Classify the peak of `series` against `window`
pub fn classify(series: &ConcentrationSeries, window: &TherapeuticWindow) -> WindowClass {
    window.classify_peak(peak(series))
}

/// Summary of one simulated profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Peak concentration (mg/L)
    pub cmax: f64,
    /// Time of the peak (h)
    pub tmax: f64,
    /// Area under the curve over the grid (mg·h/L)
    pub auc: f64,
    /// Concentration produced by a single dose, `dose / Vd` (mg/L)
    pub c0: f64,
    /// `None` for zero-order elimination
    pub half_life: Option<f64>,
    /// `None` for single-dose regimens
    pub trough: Option<f64>,
    pub time_in_window: f64,
    pub classification: WindowClass,
}

impl Metrics {
    pub fn from_series(
        series: &ConcentrationSeries,
        params: &SimulationParameters,
        window: &TherapeuticWindow,
    ) -> Result<Self, PkError> {
        let schedule = generate_schedule(params.interval(), params.dose_count())?;
        let t_half = if params.kind().is_first_order() {
            Some(half_life(params.kel())?)
        } else {
            None
        };

        Ok(Self {
            cmax: peak(series),
            tmax: time_to_peak(series),
            auc: auc(series),
            c0: params.initial_concentration(),
            half_life: t_half,
            trough: trough(series, &schedule),
            time_in_window: time_in_window(series, window),
            classification: classify(series, window),
        })
    }
}

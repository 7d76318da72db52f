//! Side-by-side evaluation of two patient profiles on one regimen

use rayon::prelude::*;
use serde::Serialize;

use crate::data::{PatientProfile, SimulationParameters, TimeGrid};
use crate::error::PkError;
use crate::metrics::{Metrics, TherapeuticWindow, WindowClass};

use super::{compute_concentration, ConcentrationSeries};

/// Simulated profile and metrics of one patient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientOutcome {
    pub label: String,
    pub kel: f64,
    pub series: ConcentrationSeries,
    pub metrics: Metrics,
}

impl PatientOutcome {
    pub fn classification(&self) -> WindowClass {
        self.metrics.classification
    }
}

/// Outcomes of all patients over the same time grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub window: TherapeuticWindow,
    pub outcomes: Vec<PatientOutcome>,
}

impl Comparison {
    /// Outcome of the patient with the given label
    pub fn patient(&self, label: &str) -> Option<&PatientOutcome> {
        self.outcomes.iter().find(|o| o.label == label)
    }

    /// Shared evaluation times
    pub fn times(&self) -> &[f64] {
        self.outcomes
            .first()
            .map(|o| o.series.times())
            .unwrap_or(&[])
    }
}

/// Evaluate both patients against `window` on a shared grid.
///
/// All profiles are validated before any simulation starts; the simulations
/// then run in parallel. Labels must be distinct.
pub fn compare(
    grid: &TimeGrid,
    base: &SimulationParameters,
    profiles: &[PatientProfile; 2],
    window: &TherapeuticWindow,
) -> Result<Comparison, PkError> {
    if profiles[0].label() == profiles[1].label() {
        return Err(PkError::invalid(
            "patients",
            format!("labels must be distinct, '{}' appears twice", profiles[0].label()),
        ));
    }

    let specialized = profiles
        .iter()
        .map(|profile| -> Result<_, PkError> { Ok((profile, profile.apply(base)?)) })
        .collect::<Result<Vec<_>, _>>()?;

    let outcomes = specialized
        .par_iter()
        .map(|(profile, params)| -> Result<PatientOutcome, PkError> {
            let series = compute_concentration(grid, params)?;
            let metrics = Metrics::from_series(&series, params, window)?;
            tracing::debug!(
                patient = profile.label(),
                cmax = metrics.cmax,
                class = %metrics.classification,
                "Patient evaluated"
            );
            Ok(PatientOutcome {
                label: profile.label().to_string(),
                kel: profile.kel(),
                series,
                metrics,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Comparison {
        window: *window,
        outcomes,
    })
}

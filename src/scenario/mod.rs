//! Declarative simulation scenarios.
//!
//! A [`Scenario`] gathers everything one comparison run needs: the regimen,
//! the model, the shared kinetic parameters, two patient profiles, the
//! therapeutic window and the grid resolution. Scenarios are read from JSON;
//! any field left out takes its default.
//!
//! ```ignore
//! use pksim::scenario::Scenario;
//!
//! let scenario: Scenario = r#"{
//!     "model": "oral_first_order",
//!     "dose": 500.0,
//!     "vd": 25.0,
//!     "ka": 0.5,
//!     "interval": 12.0,
//!     "dose_count": 4,
//!     "patients": [
//!         { "label": "normal", "kel": 0.2 },
//!         { "label": "renal impairment", "kel": 0.05 }
//!     ],
//!     "window": { "mec": 5.0, "msc": 30.0 }
//! }"#.parse()?;
//!
//! let comparison = scenario.run()?;
//! ```

mod error;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{
    generate_schedule, ModelKind, PatientProfile, SimulationParameters, TimeGrid, DEFAULT_POINTS,
};
use crate::error::PkError;
use crate::metrics::{bateman_tmax, TherapeuticWindow};
use crate::simulator::{compare, Comparison};

pub use error::ScenarioError;

/// Full description of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub model: ModelKind,
    /// Dose amount (mg)
    pub dose: f64,
    /// Volume of distribution (L)
    pub vd: f64,
    /// Elimination rate constant of the reference regimen (1/h)
    pub kel: f64,
    /// Absorption rate constant (1/h), oral model only
    pub ka: f64,
    /// Maximum elimination rate (mg/L per hour), zero-order model only
    pub vmax: f64,
    /// Dosing interval (h)
    pub interval: f64,
    pub dose_count: usize,
    pub patients: Vec<PatientProfile>,
    pub window: WindowConfig,
    pub grid: GridConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            model: ModelKind::IvBolus,
            dose: 1000.0,
            vd: 20.0,
            kel: 0.2,
            ka: 1.0,
            vmax: 0.15,
            interval: 8.0,
            dose_count: 1,
            patients: vec![
                PatientProfile::new("Patient A", 0.2),
                PatientProfile::new("Patient B", 0.1),
            ],
            window: WindowConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

/// Therapeutic window bounds (mg/L)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub mec: f64,
    pub msc: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            mec: 10.0,
            msc: 40.0,
        }
    }
}

/// Time grid resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Hours simulated after the last dosing interval
    pub margin: f64,
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            margin: 24.0,
            points: DEFAULT_POINTS,
        }
    }
}

impl Scenario {
    /// Read and validate a scenario file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value without running the simulation
    pub fn validate(&self) -> Result<(), PkError> {
        let base = self.parameters()?;
        for profile in self.profiles()? {
            profile.apply(&base)?;
        }
        self.window()?;
        self.grid()?;
        Ok(())
    }

    /// Shared parameter set; model-specific fields only when the model uses them
    pub fn parameters(&self) -> Result<SimulationParameters, PkError> {
        let mut builder = SimulationParameters::builder(self.model)
            .dose(self.dose)
            .vd(self.vd)
            .kel(self.kel)
            .regimen(self.interval, self.dose_count);
        match self.model {
            ModelKind::OralFirstOrder => builder = builder.ka(self.ka),
            ModelKind::ZeroOrder => builder = builder.vmax(self.vmax),
            ModelKind::IvBolus => {}
        }
        builder.build()
    }

    /// The two compared patients
    pub fn profiles(&self) -> Result<[PatientProfile; 2], PkError> {
        match self.patients.as_slice() {
            [a, b] if a.label() == b.label() => Err(PkError::invalid(
                "patients",
                format!("labels must be distinct, '{}' appears twice", a.label()),
            )),
            [a, b] => Ok([a.clone(), b.clone()]),
            _ => Err(PkError::invalid(
                "patients",
                format!("must hold exactly 2 profiles, found {}", self.patients.len()),
            )),
        }
    }

    pub fn window(&self) -> Result<TherapeuticWindow, PkError> {
        TherapeuticWindow::new(self.window.mec, self.window.msc)
    }

    /// Regimen grid shared by both patients.
    ///
    /// For oral dosing the single-dose peak time of each patient is added
    /// after every administration.
    pub fn grid(&self) -> Result<TimeGrid, PkError> {
        let schedule = generate_schedule(self.interval, self.dose_count)?;
        let grid = TimeGrid::for_schedule(&schedule, self.grid.margin, self.grid.points)?;
        if self.model != ModelKind::OralFirstOrder {
            return Ok(grid);
        }

        let mut peaks = Vec::with_capacity(schedule.len() * self.patients.len());
        for profile in &self.patients {
            let tmax = bateman_tmax(self.ka, profile.kel())?;
            peaks.extend(schedule.iter().map(|&dose_time| dose_time + tmax));
        }
        Ok(grid.with_times(&peaks))
    }

    /// Simulate both patients and classify them
    pub fn run(&self) -> Result<Comparison, ScenarioError> {
        let base = self.parameters()?;
        let profiles = self.profiles()?;
        let window = self.window()?;
        let grid = self.grid()?;
        Ok(compare(&grid, &base, &profiles, &window)?)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    /// Parse and validate a JSON scenario
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scenario: Scenario = serde_json::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }
}

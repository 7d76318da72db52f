use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, PkError};

/// One-compartment model used for the single-dose response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Instantaneous intravenous injection with first-order elimination
    IvBolus,
    /// First-order absorption followed by first-order elimination (Bateman function)
    OralFirstOrder,
    /// Saturated metabolism, elimination at a constant absolute rate
    ZeroOrder,
}

impl ModelKind {
    /// Whether the model eliminates with first-order kinetics and thus has a constant half-life
    pub fn is_first_order(&self) -> bool {
        !matches!(self, ModelKind::ZeroOrder)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::IvBolus => "IV bolus",
            ModelKind::OralFirstOrder => "oral first-order",
            ModelKind::ZeroOrder => "zero-order",
        };
        write!(f, "{}", name)
    }
}

/// Validated, immutable parameter set for one simulation request.
///
/// Instances are only obtained through [`SimulationParameters::builder`] or
/// [`SimulationParameters::with_kel`], both of which validate every field, so
/// holding a value means the engine can evaluate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationParameters {
    kind: ModelKind,
    dose: f64,
    vd: f64,
    kel: f64,
    ka: Option<f64>,
    vmax: Option<f64>,
    interval: f64,
    dose_count: usize,
}

impl SimulationParameters {
    /// Start building a parameter set for the given model
    pub fn builder(kind: ModelKind) -> SimulationParametersBuilder {
        SimulationParametersBuilder::new(kind)
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Dose amount in mg
    pub fn dose(&self) -> f64 {
        self.dose
    }

    /// Volume of distribution in L
    pub fn vd(&self) -> f64 {
        self.vd
    }

    /// Elimination rate constant in 1/h
    pub fn kel(&self) -> f64 {
        self.kel
    }

    /// Absorption rate constant in 1/h, if one was supplied
    pub fn ka(&self) -> Option<f64> {
        self.ka
    }

    /// Maximum elimination rate in mg/L per hour, if one was supplied
    pub fn vmax(&self) -> Option<f64> {
        self.vmax
    }

    /// Dosing interval τ in hours
    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn dose_count(&self) -> usize {
        self.dose_count
    }

    /// Concentration produced by one dose before any elimination, `dose / Vd`
    pub fn initial_concentration(&self) -> f64 {
        self.dose / self.vd
    }

    /// Returns a copy of these parameters with a different elimination rate.
    ///
    /// This is how a [`PatientProfile`] specializes a shared regimen.
    pub fn with_kel(&self, kel: f64) -> Result<Self, PkError> {
        let params = Self { kel, ..self.clone() };
        params.validate()?;
        Ok(params)
    }

    pub(crate) fn validate(&self) -> Result<(), PkError> {
        ensure_positive("dose", self.dose)?;
        ensure_positive("vd", self.vd)?;
        ensure_positive("kel", self.kel)?;
        match self.kind {
            ModelKind::OralFirstOrder => match self.ka {
                Some(ka) => ensure_positive("ka", ka)?,
                None => return Err(PkError::invalid("ka", "is required for oral absorption")),
            },
            ModelKind::ZeroOrder => match self.vmax {
                Some(vmax) => ensure_positive("vmax", vmax)?,
                None => {
                    return Err(PkError::invalid(
                        "vmax",
                        "is required for zero-order elimination",
                    ))
                }
            },
            ModelKind::IvBolus => {}
        }
        ensure_positive("interval", self.interval)?;
        if self.dose_count < 1 {
            return Err(PkError::invalid("dose_count", "must be >= 1"));
        }
        Ok(())
    }
}

/// Builder for [`SimulationParameters`].
///
/// `dose`, `vd` and `kel` are required. The regimen defaults to a single dose
/// with a 24 h interval.
#[derive(Debug, Clone)]
pub struct SimulationParametersBuilder {
    kind: ModelKind,
    dose: Option<f64>,
    vd: Option<f64>,
    kel: Option<f64>,
    ka: Option<f64>,
    vmax: Option<f64>,
    interval: f64,
    dose_count: usize,
}

impl SimulationParametersBuilder {
    fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            dose: None,
            vd: None,
            kel: None,
            ka: None,
            vmax: None,
            interval: 24.0,
            dose_count: 1,
        }
    }

    pub fn dose(mut self, dose: f64) -> Self {
        self.dose = Some(dose);
        self
    }

    pub fn vd(mut self, vd: f64) -> Self {
        self.vd = Some(vd);
        self
    }

    pub fn kel(mut self, kel: f64) -> Self {
        self.kel = Some(kel);
        self
    }

    /// Absorption rate constant, only used by [`ModelKind::OralFirstOrder`]
    pub fn ka(mut self, ka: f64) -> Self {
        self.ka = Some(ka);
        self
    }

    /// Maximum elimination rate, only used by [`ModelKind::ZeroOrder`]
    pub fn vmax(mut self, vmax: f64) -> Self {
        self.vmax = Some(vmax);
        self
    }

    /// Set the dosing interval (hours) and the number of doses
    pub fn regimen(mut self, interval: f64, dose_count: usize) -> Self {
        self.interval = interval;
        self.dose_count = dose_count;
        self
    }

    /// Validate and freeze the parameter set
    pub fn build(self) -> Result<SimulationParameters, PkError> {
        let params = SimulationParameters {
            kind: self.kind,
            dose: self.dose.ok_or_else(|| PkError::invalid("dose", "is required"))?,
            vd: self.vd.ok_or_else(|| PkError::invalid("vd", "is required"))?,
            kel: self.kel.ok_or_else(|| PkError::invalid("kel", "is required"))?,
            ka: self.ka,
            vmax: self.vmax,
            interval: self.interval,
            dose_count: self.dose_count,
        };
        params.validate()?;
        Ok(params)
    }
}

/// An individual's elimination capacity applied to a shared regimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    label: String,
    kel: f64,
}

impl PatientProfile {
    pub fn new(label: impl Into<String>, kel: f64) -> Self {
        Self {
            label: label.into(),
            kel,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kel(&self) -> f64 {
        self.kel
    }

    /// Specialize `base` with this patient's elimination rate
    pub fn apply(&self, base: &SimulationParameters) -> Result<SimulationParameters, PkError> {
        base.with_kel(self.kel)
    }
}

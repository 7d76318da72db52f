use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, PkError};

/// Bounds of the therapeutic window, in mg/L
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TherapeuticWindow {
    mec: f64,
    msc: f64,
}

impl TherapeuticWindow {
    /// # Errors
    /// Fails unless `0 < mec < msc`.
    pub fn new(mec: f64, msc: f64) -> Result<Self, PkError> {
        ensure_positive("mec", mec)?;
        ensure_positive("msc", msc)?;
        if mec >= msc {
            return Err(PkError::invalid("mec", "must be < msc"));
        }
        Ok(Self { mec, msc })
    }

    /// Minimum effective concentration
    pub fn mec(&self) -> f64 {
        self.mec
    }

    /// Maximum safe concentration
    pub fn msc(&self) -> f64 {
        self.msc
    }

    /// Whether `concentration` lies within `[mec, msc]`
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.mec && concentration <= self.msc
    }

    /// Classify a peak concentration.
    ///
    /// Peaks exactly on a bound count as therapeutic: only strict excursions
    /// are reported as toxic or subtherapeutic. This is a modelling
    /// assumption, not an established clinical convention.
    pub fn classify_peak(&self, peak: f64) -> WindowClass {
        if peak > self.msc {
            WindowClass::Toxic
        } else if peak < self.mec {
            WindowClass::Subtherapeutic
        } else {
            WindowClass::Therapeutic
        }
    }
}

/// Position of a peak concentration relative to the therapeutic window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowClass {
    Toxic,
    Subtherapeutic,
    Therapeutic,
}

impl fmt::Display for WindowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WindowClass::Toxic => "toxic",
            WindowClass::Subtherapeutic => "subtherapeutic",
            WindowClass::Therapeutic => "therapeutic",
        };
        write!(f, "{}", label)
    }
}

//! Closed-form single-dose responses of the one-compartment model.
//!
//! Every function takes the time elapsed since administration and returns a
//! plasma concentration in mg/L. Negative elapsed times yield zero: a dose
//! never contributes before it is given.

use crate::data::{ModelKind, SimulationParameters};
use crate::error::PkError;

/// Relative distance between `ka` and `kel` below which the Bateman function
/// is replaced by its limiting form
pub const DEGENERACY_TOLERANCE: f64 = 1e-6;

/// IV bolus: `C(t) = C0·exp(−kel·t)`
#[inline]
pub fn iv_bolus(c0: f64, kel: f64, t: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    c0 * (-kel * t).exp()
}

/// Whether `ka` and `kel` are close enough to make the Bateman function singular
#[inline]
pub fn is_degenerate(ka: f64, kel: f64) -> bool {
    (ka - kel).abs() <= DEGENERACY_TOLERANCE * ka.abs().max(kel.abs())
}

/// Bateman function for first-order absorption and elimination.
///
/// Falls back to [`bateman_limit`] when `ka ≈ kel`.
#[inline]
pub fn bateman(c0: f64, ka: f64, kel: f64, t: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    if is_degenerate(ka, kel) {
        return bateman_limit(c0, kel, t);
    }
    c0 * (ka / (ka - kel)) * ((-kel * t).exp() - (-ka * t).exp())
}

/// Limit of the Bateman function as `ka → kel`: `C(t) = C0·kel·t·exp(−kel·t)`
#[inline]
pub fn bateman_limit(c0: f64, kel: f64, t: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    c0 * kel * t * (-kel * t).exp()
}

/// Zero-order elimination: `C(t) = max(0, C0 − Vmax·t)`
#[inline]
pub fn zero_order(c0: f64, vmax: f64, t: f64) -> f64 {
    if t < 0.0 {
        return 0.0;
    }
    (c0 - vmax * t).max(0.0)
}

/// Single-dose response resolved from a parameter set.
///
/// Resolution validates the parameters and picks the degenerate Bateman form
/// once, so evaluation inside the superposition loop is branch-light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoseResponse {
    IvBolus { c0: f64, kel: f64 },
    Oral { c0: f64, ka: f64, kel: f64 },
    OralLimit { c0: f64, kel: f64 },
    ZeroOrder { c0: f64, vmax: f64 },
}

impl DoseResponse {
    pub fn from_params(params: &SimulationParameters) -> Result<Self, PkError> {
        params.validate()?;
        let c0 = params.initial_concentration();
        let kel = params.kel();

        let response = match params.kind() {
            ModelKind::IvBolus => DoseResponse::IvBolus { c0, kel },
            ModelKind::OralFirstOrder => {
                let ka = params
                    .ka()
                    .ok_or_else(|| PkError::invalid("ka", "is required for oral absorption"))?;
                if is_degenerate(ka, kel) {
                    tracing::warn!(
                        ka,
                        kel,
                        "ka and kel coincide, using the limiting form of the Bateman function"
                    );
                    DoseResponse::OralLimit { c0, kel }
                } else {
                    DoseResponse::Oral { c0, ka, kel }
                }
            }
            ModelKind::ZeroOrder => {
                let vmax = params.vmax().ok_or_else(|| {
                    PkError::invalid("vmax", "is required for zero-order elimination")
                })?;
                DoseResponse::ZeroOrder { c0, vmax }
            }
        };
        Ok(response)
    }

    /// Concentration `t` hours after administration
    #[inline]
    pub fn at(&self, t: f64) -> f64 {
        match *self {
            DoseResponse::IvBolus { c0, kel } => iv_bolus(c0, kel, t),
            DoseResponse::Oral { c0, ka, kel } => bateman(c0, ka, kel, t),
            DoseResponse::OralLimit { c0, kel } => bateman_limit(c0, kel, t),
            DoseResponse::ZeroOrder { c0, vmax } => zero_order(c0, vmax, t),
        }
    }
}

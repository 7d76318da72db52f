//! One-compartment pharmacokinetic simulation.
//!
//! `pksim` computes plasma concentration-time profiles for IV bolus, oral
//! (Bateman) and zero-order elimination models under single or repeated
//! dosing, and classifies each profile against a therapeutic window.
//!
//! The core is stateless: every function maps immutable inputs to a new
//! value and can be called from any number of threads.
//!
//! ```rust,ignore
//! use pksim::prelude::*;
//!
//! let params = SimulationParameters::builder(ModelKind::OralFirstOrder)
//!     .dose(500.0)
//!     .vd(25.0)
//!     .ka(0.5)
//!     .kel(0.2)
//!     .build()?;
//! let grid = TimeGrid::for_regimen(params.interval(), params.dose_count(), 24.0, 500)?;
//! let series = compute_concentration(&grid, &params)?;
//! let window = TherapeuticWindow::new(5.0, 15.0)?;
//! println!("{}", classify(&series, &window));
//! ```

pub mod data;
pub mod error;
pub mod export;
pub mod metrics;
pub mod scenario;
pub mod simulator;

pub use crate::data::{
    generate_schedule, DosingSchedule, ModelKind, PatientProfile, SimulationParameters, TimeGrid,
};
pub use crate::metrics::{classify, half_life, TherapeuticWindow, WindowClass};
pub use crate::simulator::{compute_concentration, ConcentrationSeries};
pub use error::PkError;

pub mod prelude {
    pub use crate::data::{
        generate_schedule, DosingSchedule, ModelKind, PatientProfile, SimulationParameters,
        TimeGrid,
    };
    pub use crate::error::PkError;
    pub use crate::export::{ConcentrationTable, ExportError};
    pub use crate::metrics::{
        classify, half_life, model_half_life, peak, Metrics, TherapeuticWindow, WindowClass,
    };
    pub use crate::scenario::{Scenario, ScenarioError};
    pub use crate::simulator::{
        compare, compute_concentration, compute_concentration_par, Comparison,
        ConcentrationSeries, PatientOutcome,
    };
}

//! Inputs of a simulation request: the parameter set, the dosing schedule
//! derived from it and the time grid the concentrations are evaluated on.

pub mod grid;
pub mod parameters;
pub mod schedule;

pub use grid::{TimeGrid, DEFAULT_POINTS, MIN_MARGIN, MIN_POINTS};
pub use parameters::{ModelKind, PatientProfile, SimulationParameters, SimulationParametersBuilder};
pub use schedule::{generate_schedule, DosingSchedule};

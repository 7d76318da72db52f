//! Concentration engine.
//!
//! The total concentration on a grid is the superposition of the single-dose
//! response evaluated once per administration time, each shifted to its dose.
//! Grid points before an administration receive nothing from that dose.
//!
//! ```rust,ignore
//! use pksim::prelude::*;
//!
//! let params = SimulationParameters::builder(ModelKind::IvBolus)
//!     .dose(1000.0)
//!     .vd(20.0)
//!     .kel(0.2)
//!     .regimen(8.0, 3)
//!     .build()?;
//! let grid = TimeGrid::for_regimen(8.0, 3, 24.0, 500)?;
//! let series = compute_concentration(&grid, &params)?;
//! ```

pub mod comparison;
pub mod one_compartment;
mod series;

use rayon::prelude::*;

use crate::data::{generate_schedule, DosingSchedule, SimulationParameters, TimeGrid, MIN_MARGIN};
use crate::error::PkError;

pub use comparison::{compare, Comparison, PatientOutcome};
pub use one_compartment::{DoseResponse, DEGENERACY_TOLERANCE};
pub use series::ConcentrationSeries;

/// Compute the concentration time series of `params` on `grid`
///
/// # Errors
/// [`PkError::InvalidParameter`] when any parameter violates its constraint.
/// Nothing is computed in that case.
pub fn compute_concentration(
    grid: &TimeGrid,
    params: &SimulationParameters,
) -> Result<ConcentrationSeries, PkError> {
    let (response, schedule) = prepare(grid, params)?;

    let mut total = vec![0.0; grid.len()];
    for &dose_time in schedule.times() {
        accumulate(&mut total, grid, &response, dose_time);
    }

    Ok(ConcentrationSeries::new(grid.times().to_vec(), total))
}

/// Same as [`compute_concentration`], with the per-dose contributions spread
/// over the rayon thread pool.
///
/// Each task sums into its own buffer and the buffers are reduced at the end,
/// so no two tasks ever write the same total.
pub fn compute_concentration_par(
    grid: &TimeGrid,
    params: &SimulationParameters,
) -> Result<ConcentrationSeries, PkError> {
    let (response, schedule) = prepare(grid, params)?;
    let n = grid.len();

    let total = schedule
        .times()
        .par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, &dose_time| {
                accumulate(&mut acc, grid, &response, dose_time);
                acc
            },
        )
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        );

    Ok(ConcentrationSeries::new(grid.times().to_vec(), total))
}

fn prepare(
    grid: &TimeGrid,
    params: &SimulationParameters,
) -> Result<(DoseResponse, DosingSchedule), PkError> {
    let response = DoseResponse::from_params(params)?;
    let schedule = generate_schedule(params.interval(), params.dose_count())?;

    if grid.end() < schedule.end_of_dosing() + MIN_MARGIN {
        tracing::warn!(
            grid_end = grid.end(),
            dosing_end = schedule.end_of_dosing(),
            "Time grid does not cover the last dosing interval plus {} h",
            MIN_MARGIN
        );
    }
    tracing::debug!(
        model = %params.kind(),
        doses = schedule.len(),
        points = grid.len(),
        "Computing concentration series"
    );

    Ok((response, schedule))
}

/// Add the contribution of one dose given at `dose_time` into `total`
#[inline]
fn accumulate(total: &mut [f64], grid: &TimeGrid, response: &DoseResponse, dose_time: f64) {
    let start = grid.first_at_or_after(dose_time);
    for (c, &t) in total[start..].iter_mut().zip(&grid.times()[start..]) {
        *c += response.at(t - dose_time);
    }
}

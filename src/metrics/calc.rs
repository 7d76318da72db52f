//! Pure metric functions over parameters and concentration series

use std::f64::consts::LN_2;

use crate::data::{DosingSchedule, ModelKind, SimulationParameters};
use crate::error::{ensure_positive, PkError};
use crate::simulator::one_compartment::is_degenerate;
use crate::simulator::ConcentrationSeries;

use super::window::TherapeuticWindow;

/// Elimination half-life, `ln(2) / kel`
pub fn half_life(kel: f64) -> Result<f64, PkError> {
    ensure_positive("kel", kel)?;
    Ok(LN_2 / kel)
}

/// Half-life of a parameter set; zero-order elimination has none
pub fn model_half_life(params: &SimulationParameters) -> Result<f64, PkError> {
    if !params.kind().is_first_order() {
        return Err(PkError::invalid(
            "model",
            "zero-order elimination has no constant half-life",
        ));
    }
    half_life(params.kel())
}

/// Analytic time of the Bateman maximum, `ln(ka/kel) / (ka − kel)`.
///
/// When `ka ≈ kel` the limit `1 / kel` is returned.
pub fn bateman_tmax(ka: f64, kel: f64) -> Result<f64, PkError> {
    ensure_positive("ka", ka)?;
    ensure_positive("kel", kel)?;
    if is_degenerate(ka, kel) {
        return Ok(1.0 / kel);
    }
    Ok((ka / kel).ln() / (ka - kel))
}

/// Largest concentration of the series
pub fn peak(series: &ConcentrationSeries) -> f64 {
    series.concentrations().iter().copied().fold(0.0, f64::max)
}

/// Time of the first occurrence of the peak
pub fn time_to_peak(series: &ConcentrationSeries) -> f64 {
    let mut best = (0.0, f64::NEG_INFINITY);
    for (t, c) in series.iter() {
        if c > best.1 {
            best = (t, c);
        }
    }
    best.0
}

/// Area under the curve over the whole series (linear trapezoidal rule)
pub fn auc(series: &ConcentrationSeries) -> f64 {
    series
        .times()
        .windows(2)
        .zip(series.concentrations().windows(2))
        .map(|(t, c)| (c[0] + c[1]) / 2.0 * (t[1] - t[0]))
        .sum()
}

/// Total time the curve spends within the window bounds.
///
/// Crossings between two grid points are located by linear interpolation.
pub fn time_in_window(series: &ConcentrationSeries, window: &TherapeuticWindow) -> f64 {
    let (lo, hi) = (window.mec(), window.msc());
    series
        .times()
        .windows(2)
        .zip(series.concentrations().windows(2))
        .map(|(t, c)| {
            let dt = t[1] - t[0];
            let (c0, c1) = (c[0], c[1]);
            if c0 == c1 {
                return if window.contains(c0) { dt } else { 0.0 };
            }
            // fraction of the segment where the interpolated curve is in [lo, hi]
            let at = |level: f64| (level - c0) / (c1 - c0);
            let (a, b) = if c1 > c0 {
                (at(lo), at(hi))
            } else {
                (at(hi), at(lo))
            };
            let inside = b.min(1.0) - a.max(0.0);
            inside.max(0.0) * dt
        })
        .sum()
}

/// Concentration at the last grid point before the final administration.
///
/// `None` for single-dose regimens or when the grid has no point before the
/// final dose.
pub fn trough(series: &ConcentrationSeries, schedule: &DosingSchedule) -> Option<f64> {
    if schedule.len() < 2 {
        return None;
    }
    let last_dose = schedule.last_dose();
    series
        .iter()
        .take_while(|&(t, _)| t < last_dose)
        .last()
        .map(|(_, c)| c)
}

/// Hours needed to clear one zero-order dose, `(dose / Vd) / Vmax`.
///
/// `None` for first-order models.
pub fn zero_order_clearance_time(params: &SimulationParameters) -> Option<f64> {
    match (params.kind(), params.vmax()) {
        (ModelKind::ZeroOrder, Some(vmax)) => Some(params.initial_concentration() / vmax),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeGrid;
    use approx::assert_relative_eq;

    fn series(times: Vec<f64>, concentrations: Vec<f64>) -> ConcentrationSeries {
        ConcentrationSeries::new(times, concentrations)
    }

    #[test]
    fn half_life_of_ln2_rate_is_one_hour() {
        assert_relative_eq!(half_life(0.693).unwrap(), 1.0, epsilon = 1e-3);
        assert!(half_life(0.0).is_err());
    }

    #[test]
    fn bateman_tmax_matches_known_value() {
        // ln(2.5) / 0.3
        assert_relative_eq!(bateman_tmax(0.5, 0.2).unwrap(), 3.054302, epsilon = 1e-6);
        assert_relative_eq!(bateman_tmax(0.2, 0.2).unwrap(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn auc_of_triangle() {
        let s = series(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 0.0]);
        assert_relative_eq!(auc(&s), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn time_in_window_interpolates_crossings() {
        let window = TherapeuticWindow::new(10.0, 40.0).unwrap();
        // rises 0 -> 50 over 5 h, then stays at 20 for 2 h
        let s = series(vec![0.0, 5.0, 6.0, 8.0], vec![0.0, 50.0, 20.0, 20.0]);
        // rise: inside between 10 and 40 -> 3 h
        // fall 50 -> 20 over 1 h: inside from 40 down to 20 -> 2/3 h
        // flat: 2 h
        assert_relative_eq!(
            time_in_window(&s, &window),
            3.0 + 2.0 / 3.0 + 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn peak_and_time_to_peak() {
        let s = series(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 7.0, 7.0, 1.0]);
        assert_eq!(peak(&s), 7.0);
        assert_eq!(time_to_peak(&s), 1.0);
    }

    #[test]
    fn trough_is_before_last_dose() {
        let schedule = crate::data::generate_schedule(4.0, 3).unwrap();
        let grid = TimeGrid::from_times(vec![0.0, 3.0, 7.5, 8.0, 9.0]).unwrap();
        let s = series(grid.times().to_vec(), vec![5.0, 3.0, 2.5, 7.0, 6.0]);
        assert_eq!(trough(&s, &schedule), Some(2.5));

        let single = crate::data::generate_schedule(4.0, 1).unwrap();
        assert_eq!(trough(&s, &single), None);
    }
}

use serde::Serialize;

use crate::data::schedule::{generate_schedule, DosingSchedule};
use crate::error::{ensure_positive, PkError};

/// Minimum tail, in hours, simulated after the final dosing interval
pub const MIN_MARGIN: f64 = 24.0;

/// Number of grid points used when none is requested explicitly
pub const DEFAULT_POINTS: usize = 500;

/// Fewest evenly spaced points a regimen grid may use
pub const MIN_POINTS: usize = 200;

/// Evenly spaced points closer than this (hours) to an inserted time are replaced by it
const MERGE_TOLERANCE: f64 = 1e-9;

/// Strictly increasing sequence of evaluation times (hours)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// `n_points` evenly spaced times from `start` to `end`, both included
    pub fn linspace(start: f64, end: f64, n_points: usize) -> Result<Self, PkError> {
        if !start.is_finite() {
            return Err(PkError::invalid("start", "must be finite"));
        }
        if !end.is_finite() || end <= start {
            return Err(PkError::invalid("end", "must be finite and greater than start"));
        }
        if n_points < 2 {
            return Err(PkError::invalid("n_points", "must be >= 2"));
        }

        let step = (end - start) / (n_points - 1) as f64;
        let mut times: Vec<f64> = (0..n_points).map(|i| start + i as f64 * step).collect();
        times[n_points - 1] = end;

        Ok(Self { times })
    }

    /// Grid from zero to `n·τ + margin` for the given regimen
    pub fn for_regimen(
        interval: f64,
        dose_count: usize,
        margin: f64,
        n_points: usize,
    ) -> Result<Self, PkError> {
        let schedule = generate_schedule(interval, dose_count)?;
        Self::for_schedule(&schedule, margin, n_points)
    }

    /// Grid from zero to the end of `schedule` plus `margin`.
    ///
    /// Every administration time is a grid point, so concentration jumps at
    /// a dose (the peak of a bolus regimen) are sampled exactly.
    ///
    /// # Errors
    /// Fails when `margin` is below [`MIN_MARGIN`] or `n_points` below
    /// [`MIN_POINTS`].
    pub fn for_schedule(
        schedule: &DosingSchedule,
        margin: f64,
        n_points: usize,
    ) -> Result<Self, PkError> {
        ensure_positive("margin", margin)?;
        if margin < MIN_MARGIN {
            return Err(PkError::invalid(
                "margin",
                format!("must be >= {} h", MIN_MARGIN),
            ));
        }
        if n_points < MIN_POINTS {
            return Err(PkError::invalid(
                "n_points",
                format!("must be >= {} for a regimen grid", MIN_POINTS),
            ));
        }
        let grid = Self::linspace(0.0, schedule.end_of_dosing() + margin, n_points)?;
        Ok(grid.with_times(schedule.times()))
    }

    /// Insert additional evaluation times.
    ///
    /// Times outside the grid span or non-finite are ignored. Existing points
    /// within 1e-9 h of an inserted time are replaced by it.
    pub fn with_times(self, extra: &[f64]) -> Self {
        let (start, end) = (self.start(), self.end());
        let mut extra: Vec<f64> = extra
            .iter()
            .copied()
            .filter(|t| t.is_finite() && *t >= start && *t <= end)
            .collect();
        if extra.is_empty() {
            return self;
        }
        extra.sort_by(f64::total_cmp);
        extra.dedup();

        let near_extra = |t: f64| {
            let i = extra.partition_point(|&e| e < t);
            let below = i.checked_sub(1).map(|j| t - extra[j]);
            let above = extra.get(i).map(|&e| e - t);
            below.into_iter().chain(above).any(|d| d <= MERGE_TOLERANCE)
        };
        let mut times: Vec<f64> = self.times.into_iter().filter(|&t| !near_extra(t)).collect();
        times.extend(extra);
        times.sort_by(f64::total_cmp);
        times.dedup();

        Self { times }
    }

    /// Whether `t` is one of the grid points
    pub fn contains(&self, t: f64) -> bool {
        self.times.binary_search_by(|x| x.total_cmp(&t)).is_ok()
    }

    /// Wrap caller-provided times
    ///
    /// # Errors
    /// Fails when `times` is empty, holds a non-finite value or is not
    /// strictly increasing.
    pub fn from_times(times: Vec<f64>) -> Result<Self, PkError> {
        if times.is_empty() {
            return Err(PkError::invalid("times", "must not be empty"));
        }
        if times.iter().any(|t| !t.is_finite()) {
            return Err(PkError::invalid("times", "must be finite"));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PkError::invalid("times", "must be strictly increasing"));
        }
        Ok(Self { times })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.times[0]
    }

    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Index of the first grid point at or after `t`
    pub(crate) fn first_at_or_after(&self, t: f64) -> usize {
        self.times.partition_point(|&x| x < t)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.times.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_ends() {
        let grid = TimeGrid::linspace(0.0, 24.0, 150).unwrap();
        assert_eq!(grid.len(), 150);
        assert_eq!(grid.start(), 0.0);
        assert_eq!(grid.end(), 24.0);
        assert_relative_eq!(grid.times()[1], 24.0 / 149.0, epsilon = 1e-12);
    }

    #[test]
    fn regimen_grid_covers_dosing_and_margin() {
        let grid = TimeGrid::for_regimen(8.0, 3, 24.0, DEFAULT_POINTS).unwrap();
        assert_eq!(grid.start(), 0.0);
        assert_eq!(grid.end(), 48.0);
        assert!(grid.len() >= DEFAULT_POINTS);
    }

    #[test]
    fn regimen_grid_contains_every_dose_time() {
        let grid = TimeGrid::for_regimen(8.0, 3, 24.0, DEFAULT_POINTS).unwrap();
        for t in [0.0, 8.0, 16.0] {
            assert!(grid.contains(t), "missing dose time {}", t);
        }
        assert!(grid.times().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn regimen_grid_requires_enough_points() {
        let err = TimeGrid::for_regimen(8.0, 3, 24.0, 2).unwrap_err();
        assert_eq!(err.field(), "n_points");
        assert!(TimeGrid::for_regimen(8.0, 3, 24.0, MIN_POINTS).is_ok());
        // explicit grids stay unrestricted
        assert!(TimeGrid::linspace(0.0, 48.0, 2).is_ok());
    }

    #[test]
    fn inserted_times_replace_near_duplicates() {
        // 8.0 may already be present up to rounding; it must not be doubled
        let grid = TimeGrid::linspace(0.0, 10.0, 101)
            .unwrap()
            .with_times(&[8.0, 3.05, 42.0, f64::NAN]);
        assert!(grid.contains(8.0));
        assert!(grid.contains(3.05));
        assert_eq!(grid.len(), 102);
        assert_eq!(grid.end(), 10.0);
        assert!(grid.times().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn short_margin_is_rejected() {
        let err = TimeGrid::for_regimen(8.0, 3, 12.0, 300).unwrap_err();
        assert_eq!(err.field(), "margin");
    }

    #[test]
    fn from_times_requires_strict_increase() {
        assert!(TimeGrid::from_times(vec![0.0, 1.0, 1.0]).is_err());
        assert!(TimeGrid::from_times(vec![]).is_err());
        assert!(TimeGrid::from_times(vec![0.0, f64::NAN]).is_err());
        assert!(TimeGrid::from_times(vec![0.0, 0.5, 2.0]).is_ok());
    }

    #[test]
    fn locates_first_point_at_or_after() {
        let grid = TimeGrid::from_times(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.first_at_or_after(0.0), 0);
        assert_eq!(grid.first_at_or_after(2.0), 2);
        assert_eq!(grid.first_at_or_after(2.5), 3);
        assert_eq!(grid.first_at_or_after(9.0), 4);
    }
}

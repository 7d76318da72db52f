use serde::Serialize;

use crate::error::{ensure_positive, PkError};

/// Ordered administration times of a repeated-dose regimen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DosingSchedule {
    interval: f64,
    times: Vec<f64>,
}

impl DosingSchedule {
    /// Administration times in hours, starting at zero
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false, a schedule holds at least one dose
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the final administration
    pub fn last_dose(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// End of the final dosing interval, `n·τ`
    pub fn end_of_dosing(&self) -> f64 {
        self.times.len() as f64 * self.interval
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.times.iter()
    }
}

impl<'a> IntoIterator for &'a DosingSchedule {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Generate the administration times `{0, τ, 2τ, …, (n-1)·τ}`
///
/// # Errors
/// [`PkError::InvalidParameter`] when `interval` is not a positive finite
/// number or `dose_count` is zero.
pub fn generate_schedule(interval: f64, dose_count: usize) -> Result<DosingSchedule, PkError> {
    ensure_positive("interval", interval)?;
    if dose_count < 1 {
        return Err(PkError::invalid("dose_count", "must be >= 1"));
    }

    // Multiply rather than accumulate so late doses carry no drift
    let times = (0..dose_count).map(|i| i as f64 * interval).collect();

    Ok(DosingSchedule { interval, times })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_dose_is_at_zero() {
        let schedule = generate_schedule(8.0, 1).unwrap();
        assert_eq!(schedule.times(), &[0.0]);
        assert_eq!(schedule.last_dose(), 0.0);
        assert_eq!(schedule.end_of_dosing(), 8.0);
    }

    #[test]
    fn repeated_doses_are_evenly_spaced() {
        let schedule = generate_schedule(12.0, 4).unwrap();
        assert_eq!(schedule.times(), &[0.0, 12.0, 24.0, 36.0]);
        assert_eq!(schedule.len(), 4);
        assert!(!schedule.is_empty());
        assert_eq!(schedule.last_dose(), 36.0);
    }

    #[test]
    fn fractional_interval_has_no_drift() {
        let schedule = generate_schedule(0.1, 1000).unwrap();
        assert_eq!(schedule.times()[999], 999.0 * 0.1);
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(generate_schedule(0.0, 3).unwrap_err().field(), "interval");
        assert_eq!(generate_schedule(-6.0, 3).unwrap_err().field(), "interval");
        assert_eq!(generate_schedule(6.0, 0).unwrap_err().field(), "dose_count");
    }
}

use serde::Serialize;

/// Concentrations (mg/L) aligned one to one with a time grid (hours)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationSeries {
    times: Vec<f64>,
    concentrations: Vec<f64>,
}

impl ConcentrationSeries {
    pub(crate) fn new(times: Vec<f64>, concentrations: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), concentrations.len());
        Self {
            times,
            concentrations,
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn concentrations(&self) -> &[f64] {
        &self.concentrations
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The `(time, concentration)` pair at `index`
    pub fn get(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.times.get(index)?, *self.concentrations.get(index)?))
    }

    /// Iterate over `(time, concentration)` pairs; may be called any number of times
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.concentrations.iter().copied())
    }
}

//!
//! Posterior (smoothed) state probabilities
//! from the result of Forward/Backward.
//!
//! - **State probs** (for each emission and each state)
//!     `g[[i, k]]` = P(state at `i` is `k` | x) = `f[[i, k]] b[[i, k]] / P(x)`
//!
//! - **State freqs** (for each state)
//!     The expected number of emissions from the state, that is the sum of
//!     state probs over the emissions.
//!
use super::common::HmmModel;
use crate::error::Result;
use log::warn;
use ndarray::{Array1, Array2, Axis};

/// Forward and Backward tables of the same emissions.
#[derive(Debug, Clone, PartialEq)]
pub struct HmmOutput {
    /// Forward table (n_emissions x n_states)
    pub forward: Array2<f64>,
    /// Backward table (n_emissions x n_states)
    pub backward: Array2<f64>,
}

impl HmmModel {
    ///
    /// Run forward and backward for the emissions and returns HmmOutput.
    ///
    pub fn run(&self, emissions: &[usize]) -> Result<HmmOutput> {
        let forward = self.forward(emissions)?;
        let backward = self.backward(emissions)?;
        Ok(HmmOutput { forward, backward })
    }
}

impl HmmOutput {
    /// The number of emissions that this output stores.
    pub fn n_emissions(&self) -> usize {
        self.forward.nrows()
    }
    ///
    /// Full probability `P(x)` from the last forward row
    ///
    pub fn to_full_prob_forward(&self) -> f64 {
        self.forward.row(self.n_emissions() - 1).sum()
    }
    ///
    /// Full probability `P(x) = \sum_k f[[i, k]] b[[i, k]]` at emission `i`
    ///
    /// The value is the same for every `i` up to rounding errors.
    ///
    /// # Panics
    ///
    /// if `i >= self.n_emissions()`.
    ///
    pub fn to_full_prob_at(&self, i: usize) -> f64 {
        self.forward.row(i).dot(&self.backward.row(i))
    }
    ///
    /// Posterior probability of each state at each emission
    ///
    /// If `P(x)` is zero (including underflow), every entry is zero.
    ///
    pub fn to_state_probs(&self) -> Array2<f64> {
        let p = self.to_full_prob_forward();
        if p == 0.0 {
            warn!("full prob is zero, state probs cannot be normalized");
            return Array2::zeros(self.forward.raw_dim());
        }
        &self.forward * &self.backward / p
    }
    ///
    /// Expected usage count of each state
    ///
    pub fn to_state_freqs(&self) -> Array1<f64> {
        self.to_state_probs().sum_axis(Axis(0))
    }
}

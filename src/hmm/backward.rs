//!
//! Backward algorithm definitions
//!
use super::common::HmmModel;
use crate::error::Result;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1};

impl HmmModel {
    ///
    /// Run Backward algorithm to the emissions
    ///
    /// `b[[i, k]]` = P(emits `x[i+1],...,x[n-1]` | in state `k` at `i`)
    ///
    /// The last row is 1 for every state (nothing is left to emit).
    ///
    pub fn backward(&self, emissions: &[usize]) -> Result<Array2<f64>> {
        self.check_emissions(emissions)?;
        let n = emissions.len();
        let mut table = Array2::ones((n, self.n_states()));
        for i in (0..n - 1).rev() {
            let row = self.b_step(table.row(i + 1), emissions[i + 1]);
            table.row_mut(i).assign(&row);
        }
        debug!("backward n_emissions={} n_states={}", n, self.n_states());
        Ok(table)
    }
    ///
    /// Full probability `P(x)` calculated from the backward table
    ///
    /// ```text
    /// P(x) = \sum_k b[[0, k]] pi_k e_k(x[0])
    /// ```
    ///
    /// This equals to `full_prob` up to rounding errors.
    ///
    pub fn full_prob_backward(&self, emissions: &[usize]) -> Result<f64> {
        let table = self.backward(emissions)?;
        Ok((0..self.n_states())
            .map(|k| table[[0, k]] * self.p_init(k) * self.p_emit(k, emissions[0]))
            .sum())
    }
    ///
    /// ```text
    /// b[[i, k]] = \sum_l b[[i+1, l]] a_kl e_l(x[i+1])
    /// ```
    ///
    /// calculate the row `i` from the row `i+1`
    fn b_step(&self, next: ArrayView1<f64>, next_emission: usize) -> Array1<f64> {
        let n = self.n_states();
        Array1::from_shape_fn(n, |k| {
            (0..n)
                .map(|l| next[l] * self.p_trans(k, l) * self.p_emit(l, next_emission))
                .sum()
        })
    }
}

//!
//! Forward algorithm definitions
//!
use super::common::HmmModel;
use crate::error::Result;
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1};

impl HmmModel {
    ///
    /// Run Forward algorithm to the emissions
    ///
    /// `f[[i, k]]` = P(emits `x[0],...,x[i]` and now in state `k`)
    ///
    /// The returned table has one row per emission and one column per
    /// state. Probabilities are raw products without rescaling, so the
    /// values underflow to 0 on long emissions
    /// (use `forward_log` in that case).
    ///
    pub fn forward(&self, emissions: &[usize]) -> Result<Array2<f64>> {
        self.check_emissions(emissions)?;
        let mut table = Array2::zeros((emissions.len(), self.n_states()));
        table.row_mut(0).assign(&self.f_init(emissions[0]));
        for (i, &emission) in emissions.iter().enumerate().skip(1) {
            let row = self.f_step(table.row(i - 1), emission);
            table.row_mut(i).assign(&row);
        }
        debug!("forward n_emissions={} n_states={}", emissions.len(), self.n_states());
        Ok(table)
    }
    ///
    /// Full probability `P(x)` of the emissions, that is the sum of the
    /// last row of the forward table.
    ///
    pub fn full_prob(&self, emissions: &[usize]) -> Result<f64> {
        let table = self.forward(emissions)?;
        let p = table.row(emissions.len() - 1).sum();
        if p == 0.0 {
            warn!(
                "full prob is zero (n_emissions={}), possibly underflowed",
                emissions.len()
            );
        }
        Ok(p)
    }
    ///
    /// `f[[0, k]] = pi[k] e_k(x[0])`
    ///
    fn f_init(&self, emission: usize) -> Array1<f64> {
        Array1::from_shape_fn(self.n_states(), |k| {
            self.p_init(k) * self.p_emit(k, emission)
        })
    }
    ///
    /// ```text
    /// f[[i, k]] = (\sum_l f[[i-1, l]] a_lk) e_k(x[i])
    /// ```
    ///
    /// calculate the row `i` from the row `i-1`
    fn f_step(&self, prev: ArrayView1<f64>, emission: usize) -> Array1<f64> {
        let n = self.n_states();
        Array1::from_shape_fn(n, |k| {
            let from_prev: f64 = (0..n).map(|l| prev[l] * self.p_trans(l, k)).sum();
            from_prev * self.p_emit(k, emission)
        })
    }
}

//!
//! Log-space variants of Forward/Backward/Viterbi
//!
//! Same recurrences as `forward`, `backward` and `viterbi`, but every
//! value is a `Prob` (log probability), so products never underflow.
//! Results agree with the raw-probability algorithms while those do not
//! underflow. Ties in Viterbi are decided on log values with the same
//! first-index rule, so a tie that is exact in raw space may be broken
//! by rounding here (and vice versa).
//!
use super::common::HmmModel;
use super::viterbi::{backtrace, first_argmax};
use crate::error::Result;
use crate::prob::Prob;
use log::debug;
use ndarray::{Array1, Array2};

/// Log probabilities of the model parameters, converted once per call.
struct LogParams {
    a: Array2<Prob>,
    b: Array2<Prob>,
    pi: Array1<Prob>,
}

impl HmmModel {
    fn log_params(&self) -> LogParams {
        LogParams {
            a: self.trans_probs().mapv(Prob::from_prob),
            b: self.emit_probs().mapv(Prob::from_prob),
            pi: self.init_probs().mapv(Prob::from_prob),
        }
    }
    ///
    /// Forward algorithm in log space
    ///
    pub fn forward_log(&self, emissions: &[usize]) -> Result<Array2<Prob>> {
        self.check_emissions(emissions)?;
        let lp = self.log_params();
        let n = self.n_states();
        let mut table = Array2::from_elem((emissions.len(), n), Prob::zero());
        for k in 0..n {
            table[[0, k]] = lp.pi[k] * lp.b[[k, emissions[0]]];
        }
        for (i, &emission) in emissions.iter().enumerate().skip(1) {
            for k in 0..n {
                let from_prev: Prob = (0..n).map(|l| table[[i - 1, l]] * lp.a[[l, k]]).sum();
                table[[i, k]] = from_prev * lp.b[[k, emission]];
            }
        }
        Ok(table)
    }
    ///
    /// Full probability `P(x)` in log space
    ///
    pub fn full_prob_log(&self, emissions: &[usize]) -> Result<Prob> {
        let table = self.forward_log(emissions)?;
        let p: Prob = table.row(emissions.len() - 1).iter().sum();
        debug!("full_prob_log n_emissions={} p={}", emissions.len(), p);
        Ok(p)
    }
    ///
    /// Backward algorithm in log space
    ///
    pub fn backward_log(&self, emissions: &[usize]) -> Result<Array2<Prob>> {
        self.check_emissions(emissions)?;
        let lp = self.log_params();
        let n = self.n_states();
        let n_emissions = emissions.len();
        let mut table = Array2::from_elem((n_emissions, n), Prob::one());
        for i in (0..n_emissions - 1).rev() {
            let next_emission = emissions[i + 1];
            for k in 0..n {
                let to_next: Prob = (0..n)
                    .map(|l| table[[i + 1, l]] * lp.a[[k, l]] * lp.b[[l, next_emission]])
                    .sum();
                table[[i, k]] = to_next;
            }
        }
        Ok(table)
    }
    ///
    /// Full probability `P(x)` in log space from the backward table
    ///
    /// ```text
    /// P(x) = \sum_k b[[0, k]] pi_k e_k(x[0])
    /// ```
    ///
    pub fn full_prob_backward_log(&self, emissions: &[usize]) -> Result<Prob> {
        let table = self.backward_log(emissions)?;
        let lp = self.log_params();
        let p: Prob = (0..self.n_states())
            .map(|k| table[[0, k]] * lp.pi[k] * lp.b[[k, emissions[0]]])
            .sum();
        debug!("full_prob_backward_log n_emissions={} p={}", emissions.len(), p);
        Ok(p)
    }
    ///
    /// Viterbi algorithm in log space
    ///
    /// Returns the most probable path and its joint probability.
    ///
    pub fn viterbi_log(&self, emissions: &[usize]) -> Result<(Vec<usize>, Prob)> {
        self.check_emissions(emissions)?;
        let lp = self.log_params();
        let n = self.n_states();
        let n_emissions = emissions.len();
        let lowest = Prob::zero();

        let mut delta = Array2::from_elem((n_emissions, n), Prob::zero());
        let mut psi: Array2<usize> = Array2::zeros((n_emissions, n));
        for k in 0..n {
            delta[[0, k]] = lp.pi[k] * lp.b[[k, emissions[0]]];
        }
        for (i, &emission) in emissions.iter().enumerate().skip(1) {
            for k in 0..n {
                let (l_max, p_max) =
                    first_argmax((0..n).map(|l| delta[[i - 1, l]] * lp.a[[l, k]]), lowest);
                delta[[i, k]] = p_max * lp.b[[k, emission]];
                psi[[i, k]] = l_max;
            }
        }
        let (last, prob) = first_argmax(delta.row(n_emissions - 1).iter().copied(), lowest);
        Ok((backtrace(&psi, last), prob))
    }
}

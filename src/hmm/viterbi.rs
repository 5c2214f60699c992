//!
//! Viterbi algorithm definitions
//!
//! Ties are broken toward the smallest state index: the running maximum
//! starts below every candidate and is replaced only by a strictly
//! greater value.
//!
use super::common::HmmModel;
use crate::error::{HmmError, Result};
use itertools::Itertools;
use log::debug;
use ndarray::{Array1, Array2};

/// Result of the Viterbi algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiResult {
    /// `delta[[i, k]]` = max of P(path, `x[0],...,x[i]`) over the paths
    /// ending at state `k`
    pub delta: Array2<f64>,
    /// The most probable state path, one state per emission
    pub path: Vec<usize>,
    /// Joint probability P(path, x) of `path`
    pub prob: f64,
}

impl HmmModel {
    ///
    /// The most probable state path for the emissions
    ///
    pub fn viterbi(&self, emissions: &[usize]) -> Result<Vec<usize>> {
        Ok(self.viterbi_with_table(emissions)?.path)
    }
    ///
    /// Run Viterbi algorithm and return the delta table together with the
    /// most probable path.
    ///
    pub fn viterbi_with_table(&self, emissions: &[usize]) -> Result<ViterbiResult> {
        self.check_emissions(emissions)?;
        let n_emissions = emissions.len();
        let n = self.n_states();

        let mut delta = Array2::zeros((n_emissions, n));
        // psi[[i, k]]: the previous state of the best path ending in k at i
        let mut psi: Array2<usize> = Array2::zeros((n_emissions, n));

        delta.row_mut(0).assign(&Array1::from_shape_fn(n, |k| {
            self.p_init(k) * self.p_emit(k, emissions[0])
        }));
        for (i, &emission) in emissions.iter().enumerate().skip(1) {
            for k in 0..n {
                let (l_max, p_max) = first_argmax(
                    (0..n).map(|l| delta[[i - 1, l]] * self.p_trans(l, k)),
                    f64::NEG_INFINITY,
                );
                delta[[i, k]] = p_max * self.p_emit(k, emission);
                psi[[i, k]] = l_max;
            }
        }

        let (last, prob) = first_argmax(
            delta.row(n_emissions - 1).iter().copied(),
            f64::NEG_INFINITY,
        );
        let path = backtrace(&psi, last);
        debug!("viterbi n_emissions={} prob={}", n_emissions, prob);
        Ok(ViterbiResult { delta, path, prob })
    }
    ///
    /// Joint probability P(path, x) of the state path and the emissions
    ///
    /// ```text
    /// pi_{s[0]} e_{s[0]}(x[0]) \prod_{i>0} a_{s[i-1] s[i]} e_{s[i]}(x[i])
    /// ```
    ///
    pub fn path_prob(&self, path: &[usize], emissions: &[usize]) -> Result<f64> {
        self.check_emissions(emissions)?;
        if path.len() != emissions.len() {
            return Err(HmmError::PathLength {
                path: path.len(),
                emissions: emissions.len(),
            });
        }
        if let Some((t, &state)) = path
            .iter()
            .enumerate()
            .find(|(_, &state)| state >= self.n_states())
        {
            return Err(HmmError::StateOutOfRange {
                t,
                state,
                n_states: self.n_states(),
            });
        }
        let p0 = self.p_init(path[0]) * self.p_emit(path[0], emissions[0]);
        Ok(path
            .iter()
            .tuple_windows()
            .zip(emissions.iter().skip(1))
            .fold(p0, |p, ((&k, &l), &x)| {
                p * self.p_trans(k, l) * self.p_emit(l, x)
            }))
    }
}

///
/// Index and value of the first maximum in `xs`.
///
/// Only a value strictly greater than the current maximum replaces it, so
/// the earliest index wins ties. If no value is greater than `lowest`,
/// index 0 is returned.
///
pub(crate) fn first_argmax<T, I>(xs: I, lowest: T) -> (usize, T)
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    xs.into_iter()
        .enumerate()
        .fold((0, lowest), |(i_max, x_max), (i, x)| {
            if x > x_max {
                (i, x)
            } else {
                (i_max, x_max)
            }
        })
}

///
/// Follow back pointers from `last` at the final row.
///
pub(crate) fn backtrace(psi: &Array2<usize>, last: usize) -> Vec<usize> {
    let n_emissions = psi.nrows();
    let mut path = vec![0; n_emissions];
    path[n_emissions - 1] = last;
    for i in (0..n_emissions - 1).rev() {
        path[i] = psi[[i + 1, path[i + 1]]];
    }
    path
}

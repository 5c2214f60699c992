//!
//! Sampling a state path and its emissions from HMM
//!
use super::common::HmmModel;
use crate::error::{HmmError, Result};
use log::trace;
use ndarray::ArrayView1;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Sampled hidden states and the emissions from them.
///
/// `emissions[i]` is emitted from `states[i]`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub states: Vec<usize>,
    pub emissions: Vec<usize>,
}

impl History {
    /// Number of sampled emissions
    pub fn len(&self) -> usize {
        self.emissions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let items: Vec<String> = self
            .states
            .iter()
            .zip(self.emissions.iter())
            .map(|(state, emission)| format!("{}:{}", state, emission))
            .collect();
        write!(f, "{}", items.join(","))
    }
}

impl HmmModel {
    ///
    /// Sample `length` emissions with the hidden states.
    ///
    /// The same `seed` always gives the same history.
    ///
    pub fn sample(&self, length: usize, seed: u64) -> Result<History> {
        if length == 0 {
            return Err(HmmError::EmptySequence);
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut states = Vec::with_capacity(length);
        let mut emissions = Vec::with_capacity(length);

        let mut state = pick_with_prob(&mut rng, self.init_probs())?;
        for i in 0..length {
            if i > 0 {
                state = pick_with_prob(&mut rng, self.trans_probs().row(state))?;
            }
            let emission = pick_with_prob(&mut rng, self.emit_probs().row(state))?;
            trace!("sample i={} state={} emission={}", i, state, emission);
            states.push(state);
            emissions.push(emission);
        }
        Ok(History { states, emissions })
    }
}

///
/// pick an index randomly with its own probability.
///
fn pick_with_prob<R: Rng>(rng: &mut R, probs: ArrayView1<f64>) -> Result<usize> {
    let indices: Vec<usize> = (0..probs.len()).collect();
    let index = indices.choose_weighted(rng, |&i| probs[i])?;
    Ok(*index)
}

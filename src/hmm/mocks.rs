//!
//! Mock HMMs for testing
//!
use super::common::HmmModel;
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// Observation of `mock_mood`: easy, difficult, difficult, easy
///
pub const MOOD_EMISSIONS: [usize; 4] = [0, 1, 1, 0];

///
/// Mood of a lecturer (hidden) and the kind of homework (observed)
///
/// * states: 0=good, 1=neutral, 2=bad
/// * symbols: 0=easy, 1=difficult
///
pub fn mock_mood() -> HmmModel {
    HmmModel::new(
        vec![
            vec![0.2, 0.3, 0.5],
            vec![0.2, 0.2, 0.6],
            vec![0.0, 0.2, 0.8],
        ],
        vec![vec![0.8, 0.2], vec![0.5, 0.5], vec![0.1, 0.9]],
        vec![0.8, 0.2, 0.0],
    )
    .unwrap()
}

///
/// Fair (state 0) and loaded (state 1) coin
///
/// * symbols: 0=head, 1=tail
///
pub fn mock_fair_loaded() -> HmmModel {
    HmmModel::new(
        vec![vec![0.9, 0.1], vec![0.2, 0.8]],
        vec![vec![0.5, 0.5], vec![0.8, 0.2]],
        vec![0.5, 0.5],
    )
    .unwrap()
}

///
/// All probabilities are uniform, so every state path is equally likely.
///
/// # Panics
///
/// if `n_states` or `n_symbols` is zero.
///
pub fn mock_uniform(n_states: usize, n_symbols: usize) -> HmmModel {
    assert!(n_states > 0, "mock_uniform needs at least one state");
    assert!(n_symbols > 0, "mock_uniform needs at least one symbol");
    let p_state = 1.0 / n_states as f64;
    let p_symbol = 1.0 / n_symbols as f64;
    HmmModel::from_arrays(
        Array2::from_elem((n_states, n_states), p_state),
        Array2::from_elem((n_states, n_symbols), p_symbol),
        Array1::from_elem(n_states, p_state),
    )
    .unwrap()
}

///
/// Create random HMM whose rows are normalized uniform random weights
///
/// # Panics
///
/// if `n_states` or `n_symbols` is zero.
///
pub fn mock_random(n_states: usize, n_symbols: usize, seed: u64) -> HmmModel {
    assert!(n_states > 0, "mock_random needs at least one state");
    assert!(n_symbols > 0, "mock_random needs at least one symbol");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut random_dist = |n: usize| -> Vec<f64> {
        let w: Vec<f64> = (0..n).map(|_| rng.gen_range(0.01..1.0)).collect();
        let total: f64 = w.iter().sum();
        w.into_iter().map(|x| x / total).collect()
    };
    let a = (0..n_states).map(|_| random_dist(n_states)).collect();
    let b = (0..n_states).map(|_| random_dist(n_symbols)).collect();
    let pi = random_dist(n_states);
    HmmModel::new(a, b, pi).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_random_is_valid_and_reproducible() {
        let hmm = mock_random(4, 3, 11);
        assert_eq!(hmm.n_states(), 4);
        assert_eq!(hmm.n_symbols(), 3);
        assert_eq!(hmm, mock_random(4, 3, 11));
        assert_ne!(hmm, mock_random(4, 3, 12));
    }
    #[test]
    #[should_panic(expected = "mock_random needs at least one state")]
    fn mock_random_without_states() {
        mock_random(0, 3, 0);
    }
    #[test]
    #[should_panic(expected = "mock_uniform needs at least one symbol")]
    fn mock_uniform_without_symbols() {
        mock_uniform(2, 0);
    }
}

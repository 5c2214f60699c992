//!
//! test of hmm
//!
#[macro_use]
extern crate approx;

use dhmm::hmm::mocks::{mock_fair_loaded, mock_mood, mock_random, mock_uniform, MOOD_EMISSIONS};
use dhmm::{HmmError, HmmModel};
use itertools::Itertools;
use test_case::test_case;

///
/// P(path, x) for every state path, by enumeration
///
fn all_path_probs(hmm: &HmmModel, emissions: &[usize]) -> Vec<(Vec<usize>, f64)> {
    (0..emissions.len())
        .map(|_| 0..hmm.n_states())
        .multi_cartesian_product()
        .map(|path| {
            let p = hmm.path_prob(&path, emissions).unwrap();
            (path, p)
        })
        .collect()
}

#[test]
fn mood_end_to_end() {
    let hmm = mock_mood();
    assert_abs_diff_eq!(
        hmm.full_prob(&MOOD_EMISSIONS).unwrap(),
        0.07473344,
        epsilon = 1e-12
    );
    assert_eq!(hmm.viterbi(&MOOD_EMISSIONS).unwrap(), vec![0, 2, 2, 1]);
}

#[test_case(2, 2, 2, 0 ; "two states two emissions")]
#[test_case(2, 3, 4, 1 ; "two states four emissions")]
#[test_case(3, 2, 3, 2 ; "three states three emissions")]
#[test_case(3, 4, 5, 3 ; "three states five emissions")]
fn full_prob_equals_sum_over_paths(n_states: usize, n_symbols: usize, length: usize, seed: u64) {
    let hmm = mock_random(n_states, n_symbols, seed);
    let h = hmm.sample(length, seed).unwrap();
    let paths = all_path_probs(&hmm, &h.emissions);
    assert_eq!(paths.len(), n_states.pow(length as u32));
    let total: f64 = paths.iter().map(|(_, p)| p).sum();
    assert_relative_eq!(
        hmm.full_prob(&h.emissions).unwrap(),
        total,
        max_relative = 1e-10
    );

    // viterbi path is the maximum of the enumeration
    let r = hmm.viterbi_with_table(&h.emissions).unwrap();
    let best = paths
        .iter()
        .map(|(_, p)| *p)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_relative_eq!(r.prob, best, max_relative = 1e-10);
    assert!(r.prob <= hmm.full_prob(&h.emissions).unwrap());
}

#[test]
fn mood_viterbi_is_best_path() {
    let hmm = mock_mood();
    let paths = all_path_probs(&hmm, &MOOD_EMISSIONS);
    let (best_path, best_prob) = paths
        .iter()
        .fold((vec![], f64::NEG_INFINITY), |(bp, bx), (path, p)| {
            if *p > bx {
                (path.clone(), *p)
            } else {
                (bp, bx)
            }
        });
    let r = hmm.viterbi_with_table(&MOOD_EMISSIONS).unwrap();
    assert_eq!(r.path, best_path);
    assert_abs_diff_eq!(r.prob, best_prob, epsilon = 1e-15);
    assert!(r.prob <= hmm.full_prob(&MOOD_EMISSIONS).unwrap());
}

#[test]
fn forward_backward_consistency() {
    for seed in 0..5 {
        let hmm = mock_random(4, 3, seed);
        let h = hmm.sample(40, seed).unwrap();
        let o = hmm.run(&h.emissions).unwrap();
        let p = o.to_full_prob_forward();
        assert!(p > 0.0);
        for i in 0..o.n_emissions() {
            assert_relative_eq!(o.to_full_prob_at(i), p, max_relative = 1e-9);
        }
        assert_relative_eq!(
            hmm.full_prob_backward(&h.emissions).unwrap(),
            p,
            max_relative = 1e-9
        );
        assert_relative_eq!(o.to_state_freqs().sum(), 40.0, max_relative = 1e-9);
    }
}

#[test]
fn viterbi_prob_never_exceeds_full_prob() {
    for seed in 0..10 {
        let hmm = mock_random(3, 2, seed);
        let h = hmm.sample(20, seed + 100).unwrap();
        let r = hmm.viterbi_with_table(&h.emissions).unwrap();
        let p = hmm.full_prob(&h.emissions).unwrap();
        assert!(r.prob <= p);
        assert!(r.prob > 0.0);
        assert_eq!(hmm.path_prob(&r.path, &h.emissions).unwrap(), r.prob);
    }
}

#[test]
fn algorithms_are_deterministic() {
    let hmm = mock_random(5, 4, 42);
    let h = hmm.sample(100, 42).unwrap();
    assert_eq!(
        hmm.forward(&h.emissions).unwrap(),
        hmm.forward(&h.emissions).unwrap()
    );
    assert_eq!(
        hmm.backward(&h.emissions).unwrap(),
        hmm.backward(&h.emissions).unwrap()
    );
    assert_eq!(
        hmm.viterbi(&h.emissions).unwrap(),
        hmm.viterbi(&h.emissions).unwrap()
    );
    let hmm2 = hmm.clone();
    assert_eq!(
        hmm.viterbi_with_table(&h.emissions).unwrap(),
        hmm2.viterbi_with_table(&h.emissions).unwrap()
    );
}

#[test]
fn single_emission_boundary() {
    let hmm = mock_random(4, 3, 9);
    for x in 0..3 {
        let f = hmm.forward(&[x]).unwrap();
        let b = hmm.backward(&[x]).unwrap();
        let path = hmm.viterbi(&[x]).unwrap();
        let p0: Vec<f64> = (0..4).map(|k| hmm.p_init(k) * hmm.p_emit(k, x)).collect();
        for k in 0..4 {
            assert_eq!(f[[0, k]], p0[k]);
            assert_eq!(b[[0, k]], 1.0);
        }
        let best = (0..4)
            .fold(0, |best, k| if p0[k] > p0[best] { k } else { best });
        assert_eq!(path, vec![best]);
    }
}

#[test]
fn ties_choose_lower_state() {
    let hmm = mock_uniform(4, 3);
    let h = hmm.sample(10, 3).unwrap();
    assert_eq!(hmm.viterbi(&h.emissions).unwrap(), vec![0; 10]);
    let (path, _) = hmm.viterbi_log(&h.emissions).unwrap();
    assert_eq!(path, vec![0; 10]);
}

#[test]
fn long_emissions_need_log_space() {
    let hmm = mock_fair_loaded();
    let h = hmm.sample(5000, 0).unwrap();
    assert_eq!(hmm.full_prob(&h.emissions).unwrap(), 0.0);
    let pl = hmm.full_prob_log(&h.emissions).unwrap();
    assert!(pl.to_log_value().is_finite());
    let bl = hmm.backward_log(&h.emissions).unwrap();
    assert!(bl.iter().all(|p| p.to_log_value().is_finite()));
}

#[test]
fn invalid_inputs_are_errors() {
    let hmm = mock_mood();
    assert_eq!(hmm.forward(&[]), Err(HmmError::EmptySequence));
    assert_eq!(hmm.backward(&[]), Err(HmmError::EmptySequence));
    assert_eq!(hmm.viterbi(&[]), Err(HmmError::EmptySequence));
    assert_eq!(hmm.forward_log(&[]), Err(HmmError::EmptySequence));
    assert_eq!(hmm.viterbi_log(&[]), Err(HmmError::EmptySequence));
    let e = Err(HmmError::SymbolOutOfRange {
        t: 0,
        symbol: 2,
        n_symbols: 2,
    });
    assert_eq!(hmm.viterbi(&[2]), e);
    assert!(matches!(
        hmm.backward(&[0, 0, 9]),
        Err(HmmError::SymbolOutOfRange { t: 2, symbol: 9, .. })
    ));

    let e = HmmModel::new(
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        vec![vec![1.0], vec![1.0], vec![1.0]],
        vec![0.5, 0.5],
    );
    assert!(matches!(e, Err(HmmError::Shape { .. })));
}

#[test]
fn model_is_shareable_between_threads() {
    let hmm = std::sync::Arc::new(mock_mood());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let hmm = hmm.clone();
            std::thread::spawn(move || hmm.viterbi(&MOOD_EMISSIONS).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec![0, 2, 2, 1]);
    }
}

//!
//! Discrete HMM inference
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[n-1] : Emissions (observed symbols) of length n
//! A, B, pi : transition, emission and initial probabilities
//!
//! Forward
//! F[i][k]
//!  = P(emits x[0],...,x[i] and the state at i is k)
//!
//! Backward
//! B[i][k]
//!  = P(emits x[i+1],...,x[n-1] | the state at i is k)
//!  (B[n-1][k] = 1)
//!
//! Viterbi
//! D[i][k]
//!  = max over state paths ending in k of P(path, x[0],...,x[i])
//!
//! Full probability
//! P(x) = sum_k F[n-1][k] = sum_k F[i][k] B[i][k] (for any i)
//!
//! `forward`, `backward` and `viterbi` multiply raw probabilities and
//! can underflow to zero on long emissions. `logspace` has the same
//! algorithms on `Prob`.
//!
pub mod backward;
pub mod common;
pub mod forward;
pub mod logspace;
pub mod mocks;
pub mod posterior;
pub mod sample;
pub mod viterbi;

pub use common::HmmModel;
pub use posterior::HmmOutput;
pub use sample::History;
pub use viterbi::ViterbiResult;

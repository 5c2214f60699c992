//!
//! Error types of the HMM inference engine
//!
//! Every error is a problem in the caller's input (model matrices,
//! observation sequence or state path), reported synchronously.
//!
use rand::distributions::WeightedError;

/// Error type for all fallible operations in `dhmm`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HmmError {
    /// The model has no hidden states (`N = 0`).
    #[error("model must have at least one hidden state")]
    NoStates,

    /// The emission matrix has no columns (`M = 0`).
    #[error("model must have at least one observation symbol")]
    NoSymbols,

    /// A matrix or vector has an inconsistent length.
    #[error("{what} has length {actual}, expected {expected}")]
    Shape {
        /// Which part of the model is malformed.
        what: String,
        /// Length required by the number of states/symbols.
        expected: usize,
        /// Length actually given.
        actual: usize,
    },

    /// An entry is not a probability in `[0, 1]`.
    #[error("{what} contains {value}, which is not a probability in [0, 1]")]
    InvalidProb {
        /// Which row holds the entry.
        what: String,
        /// The offending value.
        value: f64,
    },

    /// A row does not sum to 1.
    #[error("{what} sums to {sum}, expected 1")]
    InvalidDistribution {
        /// Which row is not a distribution.
        what: String,
        /// The actual row sum.
        sum: f64,
    },

    /// The observation sequence has length 0.
    #[error("observation sequence is empty")]
    EmptySequence,

    /// An observation is not a valid symbol index.
    #[error("observation {symbol} at t={t} is out of range (n_symbols={n_symbols})")]
    SymbolOutOfRange {
        /// Time index of the observation.
        t: usize,
        /// The observed symbol.
        symbol: usize,
        /// Number of symbols of the model.
        n_symbols: usize,
    },

    /// A state path does not have one state per observation.
    #[error("state path has length {path}, but there are {emissions} observations")]
    PathLength { path: usize, emissions: usize },

    /// A state path contains an invalid state index.
    #[error("state {state} at t={t} is out of range (n_states={n_states})")]
    StateOutOfRange {
        t: usize,
        state: usize,
        n_states: usize,
    },

    /// Sampling from a distribution failed.
    #[error("cannot sample: {0}")]
    Sampling(#[from] WeightedError),
}

/// Result alias used throughout `dhmm`.
pub type Result<T> = std::result::Result<T, HmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            HmmError::NoStates.to_string(),
            "model must have at least one hidden state"
        );
        assert_eq!(
            HmmError::EmptySequence.to_string(),
            "observation sequence is empty"
        );
        let e = HmmError::Shape {
            what: "initial distribution".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(e.to_string(), "initial distribution has length 2, expected 3");
        let e = HmmError::SymbolOutOfRange {
            t: 2,
            symbol: 5,
            n_symbols: 2,
        };
        assert_eq!(
            e.to_string(),
            "observation 5 at t=2 is out of range (n_symbols=2)"
        );
        let e = HmmError::InvalidDistribution {
            what: "transition row 1".to_string(),
            sum: 0.5,
        };
        assert_eq!(e.to_string(), "transition row 1 sums to 0.5, expected 1");
    }

    #[test]
    fn error_from_weighted_error() {
        let e: HmmError = WeightedError::AllWeightsZero.into();
        assert_eq!(e, HmmError::Sampling(WeightedError::AllWeightsZero));
    }

    #[test]
    fn error_is_std_error_and_thread_safe() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<HmmError>();
    }
}

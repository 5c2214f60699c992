//!
//! Definition of the discrete HMM
//!
use crate::error::{HmmError, Result};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Allowed deviation of a row sum from 1.
pub const PROB_SUM_TOLERANCE: f64 = 1e-6;

/// Discrete Hidden Markov Model
///
/// * `a[[i, j]]` = P(state j at t+1 | state i at t)  (N x N)
/// * `b[[i, k]]` = P(symbol k | state i)  (N x M)
/// * `pi[i]` = P(state i at t=0)  (N)
///
/// The parameters are validated on construction and cannot be modified
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct HmmModel {
    a: Array2<f64>,
    b: Array2<f64>,
    pi: Array1<f64>,
}

/// Constructors
impl HmmModel {
    ///
    /// Create a model from nested rows.
    ///
    /// `a` is N rows of length N, `b` is N rows of length M and `pi` has
    /// length N. Fails if the shapes disagree or if `pi` or any row of `a`
    /// and `b` is not a probability distribution.
    ///
    pub fn new(a: Vec<Vec<f64>>, b: Vec<Vec<f64>>, pi: Vec<f64>) -> Result<HmmModel> {
        let n = a.len();
        let a = rows_to_array("transition", a, n)?;
        let m = b.first().map_or(0, |row| row.len());
        let b = rows_to_array("emission", b, m)?;
        HmmModel::from_arrays(a, b, Array1::from(pi))
    }
    ///
    /// Create a model from ndarray matrices.
    ///
    pub fn from_arrays(a: Array2<f64>, b: Array2<f64>, pi: Array1<f64>) -> Result<HmmModel> {
        let (n, n_cols) = a.dim();
        if n == 0 {
            return Err(HmmError::NoStates);
        }
        if n_cols != n {
            return Err(HmmError::Shape {
                what: "transition row".to_string(),
                expected: n,
                actual: n_cols,
            });
        }
        if b.nrows() != n {
            return Err(HmmError::Shape {
                what: "emission matrix".to_string(),
                expected: n,
                actual: b.nrows(),
            });
        }
        if b.ncols() == 0 {
            return Err(HmmError::NoSymbols);
        }
        if pi.len() != n {
            return Err(HmmError::Shape {
                what: "initial distribution".to_string(),
                expected: n,
                actual: pi.len(),
            });
        }

        check_distribution("initial distribution".to_string(), pi.view())?;
        for (i, row) in a.outer_iter().enumerate() {
            check_distribution(format!("transition row {}", i), row)?;
        }
        for (i, row) in b.outer_iter().enumerate() {
            check_distribution(format!("emission row {}", i), row)?;
        }

        debug!("hmm created n_states={} n_symbols={}", n, b.ncols());
        Ok(HmmModel { a, b, pi })
    }
}

/// Accessors
impl HmmModel {
    /// Number of hidden states `N`
    pub fn n_states(&self) -> usize {
        self.pi.len()
    }
    /// Number of observation symbols `M`
    pub fn n_symbols(&self) -> usize {
        self.b.ncols()
    }
    /// Transition matrix `A` (N x N)
    pub fn trans_probs(&self) -> ArrayView2<f64> {
        self.a.view()
    }
    /// Emission matrix `B` (N x M)
    pub fn emit_probs(&self) -> ArrayView2<f64> {
        self.b.view()
    }
    /// Initial distribution `pi` (N)
    pub fn init_probs(&self) -> ArrayView1<f64> {
        self.pi.view()
    }
    /// P(state `j` at t+1 | state `i` at t)
    #[inline]
    pub fn p_trans(&self, i: usize, j: usize) -> f64 {
        self.a[[i, j]]
    }
    /// P(`symbol` | state `i`)
    #[inline]
    pub fn p_emit(&self, i: usize, symbol: usize) -> f64 {
        self.b[[i, symbol]]
    }
    /// P(state `i` at t=0)
    #[inline]
    pub fn p_init(&self, i: usize) -> f64 {
        self.pi[i]
    }
    ///
    /// Check that the emissions can be used as an input of the
    /// algorithms: not empty, and every symbol is in `0..n_symbols`.
    ///
    pub fn check_emissions(&self, emissions: &[usize]) -> Result<()> {
        if emissions.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        match emissions
            .iter()
            .enumerate()
            .find(|(_, &symbol)| symbol >= self.n_symbols())
        {
            Some((t, &symbol)) => Err(HmmError::SymbolOutOfRange {
                t,
                symbol,
                n_symbols: self.n_symbols(),
            }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for HmmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "n_states={} n_symbols={}", self.n_states(), self.n_symbols())?;
        writeln!(f, "pi={}", self.pi)?;
        writeln!(f, "A=\n{}", self.a)?;
        write!(f, "B=\n{}", self.b)
    }
}

fn rows_to_array(name: &str, rows: Vec<Vec<f64>>, n_cols: usize) -> Result<Array2<f64>> {
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
        return Err(HmmError::Shape {
            what: format!("{} row {}", name, i),
            expected: n_cols,
            actual: row.len(),
        });
    }
    Ok(Array2::from_shape_fn((rows.len(), n_cols), |(i, j)| rows[i][j]))
}

fn check_distribution(what: String, row: ArrayView1<f64>) -> Result<()> {
    if let Some(&value) = row
        .iter()
        .find(|&&x| !x.is_finite() || x < 0.0 || x > 1.0)
    {
        return Err(HmmError::InvalidProb { what, value });
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        return Err(HmmError::InvalidDistribution { what, sum });
    }
    Ok(())
}

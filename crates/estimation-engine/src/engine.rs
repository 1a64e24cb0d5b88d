//! Algorithm selection facade.
//!
//! The two estimators are stateless strategies behind one trait; a fresh
//! strategy is constructed per call (or injected by the caller), so there is
//! no module-level registry state to share or poison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use estimation_core::{
    DistributionResult, EstimationAlgorithm, EstimationError, Portfolio,
};

use crate::moments::MethodOfMoments;
use crate::monte_carlo::MonteCarlo;

/// Identifier for the built-in estimators. The string ids are stable and
/// used for persistence and UI selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    MonteCarlo,
    MethodOfMoments,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 2] = [AlgorithmKind::MonteCarlo, AlgorithmKind::MethodOfMoments];

    pub fn id(&self) -> &'static str {
        match self {
            AlgorithmKind::MonteCarlo => "monte-carlo",
            AlgorithmKind::MethodOfMoments => "method-of-moments",
        }
    }

    /// Construct the strategy for this identifier. A fresh value per call;
    /// strategies hold no state between calls.
    pub fn algorithm(&self) -> Box<dyn EstimationAlgorithm> {
        match self {
            AlgorithmKind::MonteCarlo => Box::new(MonteCarlo::new()),
            AlgorithmKind::MethodOfMoments => Box::new(MethodOfMoments),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgorithmKind {
    type Err = EstimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monte-carlo" => Ok(AlgorithmKind::MonteCarlo),
            "method-of-moments" => Ok(AlgorithmKind::MethodOfMoments),
            other => Err(EstimationError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Facade dispatching `calculate` to the configured strategy.
///
/// Swapping the algorithm never changes the shape of the output, only its
/// numerical method (stochastic vs. closed-form) and therefore its
/// smoothness and noise characteristics.
pub struct EstimationEngine {
    algorithm: Box<dyn EstimationAlgorithm>,
}

impl EstimationEngine {
    pub fn new(kind: AlgorithmKind) -> Self {
        Self {
            algorithm: kind.algorithm(),
        }
    }

    /// Inject a custom or pre-configured strategy, e.g. a seeded
    /// [`MonteCarlo`] for reproducible runs.
    pub fn with_algorithm(algorithm: Box<dyn EstimationAlgorithm>) -> Self {
        Self { algorithm }
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn calculate(
        &self,
        portfolio: &Portfolio,
        iterations: Option<usize>,
    ) -> DistributionResult {
        tracing::debug!(
            "Estimating with {} over {} buckets",
            self.algorithm.name(),
            portfolio.buckets.len()
        );
        self.algorithm.calculate(portfolio, iterations)
    }
}

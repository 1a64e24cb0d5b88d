use serde::{Deserialize, Serialize};

/// A single three-point (optimistic / most likely / pessimistic) estimate.
///
/// Values are durations in whatever unit the caller works in (days, points).
/// The ordering `optimistic <= most_likely <= pessimistic` is expected but
/// not enforced; algorithms degrade to fixed contributions instead of
/// failing when it is violated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateTriple {
    pub optimistic: f64,
    pub most_likely: f64,
    pub pessimistic: f64,
}

impl EstimateTriple {
    pub fn new(optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        Self {
            optimistic,
            most_likely,
            pessimistic,
        }
    }
}

/// All estimators' triples for one item or category.
///
/// Each estimator carries equal weight: the bucket reduces to a single
/// effective triple by averaging each field across the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bucket {
    pub estimates: Vec<EstimateTriple>,
}

impl Bucket {
    pub fn new(estimates: Vec<EstimateTriple>) -> Self {
        Self { estimates }
    }

    /// Bucket holding a single estimator's triple.
    pub fn single(estimate: EstimateTriple) -> Self {
        Self {
            estimates: vec![estimate],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Field-wise arithmetic mean across estimators, or `None` for an empty
    /// bucket. Empty buckets contribute nothing to a portfolio; they are
    /// filtered out, never zero-filled.
    pub fn effective(&self) -> Option<EstimateTriple> {
        if self.estimates.is_empty() {
            return None;
        }
        let n = self.estimates.len() as f64;
        let mut o = 0.0;
        let mut m = 0.0;
        let mut p = 0.0;
        for est in &self.estimates {
            o += est.optimistic;
            m += est.most_likely;
            p += est.pessimistic;
        }
        Some(EstimateTriple::new(o / n, m / n, p / n))
    }
}

/// An ordered sequence of buckets whose durations are summed to model the
/// total required capacity. Buckets are assumed statistically independent
/// of each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub buckets: Vec<Bucket>,
}

impl Portfolio {
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    /// Portfolio of single-estimator buckets, one per triple.
    pub fn from_triples(triples: impl IntoIterator<Item = EstimateTriple>) -> Self {
        Self {
            buckets: triples.into_iter().map(Bucket::single).collect(),
        }
    }

    /// Effective triples of the non-empty buckets, in order.
    pub fn effective_triples(&self) -> Vec<EstimateTriple> {
        self.buckets.iter().filter_map(Bucket::effective).collect()
    }

    /// `[sum of optimistic, sum of pessimistic]` across non-empty buckets —
    /// the algebraic support of the portfolio-sum distribution.
    pub fn support(&self) -> (f64, f64) {
        let mut min = 0.0;
        let mut max = 0.0;
        for triple in self.effective_triples() {
            min += triple.optimistic;
            max += triple.pessimistic;
        }
        (min, max)
    }
}

/// A point on the probability density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub value: f64,
    pub density: f64,
}

/// Percentiles of the portfolio-sum distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p50: f64,
    pub p70: f64,
    pub p80: f64,
    pub p95: f64,
}

impl Percentiles {
    /// All four percentiles collapsed onto one value (degenerate
    /// distributions).
    pub fn flat(value: f64) -> Self {
        Self {
            p50: value,
            p70: value,
            p80: value,
            p95: value,
        }
    }
}

/// Output of a distribution estimate: a density curve over the support,
/// headline percentiles, and the mean.
///
/// Computed fresh on every call; the engine holds no state and caches
/// nothing. Callers are responsible for memoizing by (portfolio content,
/// algorithm, iteration count).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub curve: Vec<CurvePoint>,
    pub percentiles: Percentiles,
    pub mean: f64,
}

impl DistributionResult {
    /// Result for a portfolio with no non-empty buckets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Degenerate single-point distribution: all the probability mass sits
    /// at one value.
    pub fn point(value: f64) -> Self {
        Self {
            curve: vec![CurvePoint {
                value,
                density: 1.0,
            }],
            percentiles: Percentiles::flat(value),
            mean: value,
        }
    }
}

/// Nominal confidence level used by capacity-cutoff displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Average,
    P70,
    P80,
    P95,
}

impl ConfidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::Average => "Avg",
            ConfidenceLevel::P70 => "70%",
            ConfidenceLevel::P80 => "80%",
            ConfidenceLevel::P95 => "95%",
        }
    }

    /// Required capacity at this confidence level. `Average` maps to the
    /// distribution mean, not the median: "Avg" is the expected total, and
    /// for skewed portfolios it differs from p50.
    pub fn required(&self, result: &DistributionResult) -> f64 {
        match self {
            ConfidenceLevel::Average => result.mean,
            ConfidenceLevel::P70 => result.percentiles.p70,
            ConfidenceLevel::P80 => result.percentiles.p80,
            ConfidenceLevel::P95 => result.percentiles.p95,
        }
    }
}

pub mod engine;
pub mod moments;
pub mod monte_carlo;
pub mod pert;
pub mod special;


pub use engine::{AlgorithmKind, EstimationEngine};
pub use moments::MethodOfMoments;
pub use monte_carlo::{MonteCarlo, DEFAULT_ITERATIONS, SINGLE_ITEM_ITERATIONS};

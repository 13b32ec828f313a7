pub mod optimization;

pub use optimization::ConstrainedProblem;

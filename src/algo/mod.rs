/// Table-based action-value learners
pub mod tabular;

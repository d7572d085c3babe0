pub mod candidates;
pub mod engine;

pub use candidates::generate_candidates;
pub use engine::{frequent_singletons, Apriori};

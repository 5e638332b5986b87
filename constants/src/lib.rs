pub mod pruning;
pub mod schema;

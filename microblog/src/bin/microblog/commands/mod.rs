pub mod query;
pub mod tour;

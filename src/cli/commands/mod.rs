pub mod questions;
pub mod reconcile;
pub mod schema;
pub mod section;

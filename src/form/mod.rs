pub mod types;
pub mod tree;
pub mod locator;
pub mod rewriter;
pub mod cloner;
pub mod splicer;
pub mod remover;
pub mod answers;
pub mod reconciler;
pub mod suffix;
pub mod validate;
pub mod error;

pub use error::FormError;
pub use reconciler::{copy_user_repeated_sections, ReconcileReport, SkippedGroup};
pub use types::*;
pub use validate::{validate_schema, Violation};

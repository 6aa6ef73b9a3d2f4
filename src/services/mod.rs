pub mod form_service;

pub use form_service::{DynamicFormService, SchemaChange, SchemaSummary};

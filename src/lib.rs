pub mod cli;
pub mod config;
pub mod form;
pub mod services;
pub mod types;

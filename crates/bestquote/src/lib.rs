//! BestQuote library — application logic for the best-of fetch CLI.

pub mod app;
pub mod config;
pub mod errors;

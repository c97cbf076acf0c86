pub mod analyzers;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod model;
pub mod output;

pub mod app;
pub mod chromosome;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod ncbi;
pub mod output;
pub mod report;

pub mod analyzer;
pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod results;
pub mod review;

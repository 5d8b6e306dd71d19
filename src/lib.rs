pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod generators;
pub mod models;
pub mod processors;
pub mod readers;
pub mod session;
pub mod store;
pub mod utils;
pub mod weather;
pub mod writers;

pub use error::{MonitorError, Result};

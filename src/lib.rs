pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod seed;
pub mod server;
pub mod storage;
pub mod web;

pub use error::{FyyurError, Result};

//! pymodule application library
//!
//! The binary is a thin shell over these modules:
//!
//! - `config` - `AppConfig`, layered from defaults, a TOML file, the
//!   environment and the command line
//! - `logger` - tracing setup and an in-memory log capture
//! - `app_runner` - the demo run that drives the `cmodulea` core

pub mod app_runner;
pub mod config;
pub mod logger;

pub use app_runner::{BENCHMARK_ITERATIONS, run_app, run_app_with};
pub use config::{AppConfig, CliOptions, Config, ConfigError, deep_update, get_app_configuration};
pub use logger::{LogCapture, init_logging};

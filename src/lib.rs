pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use config::{toml_config::SolenceConfigFile, ClientConfig, SOLENCE_API_URL};
pub use core::client::SolenceClient;
pub use domain::model::{
    BadgeStatus, MintResult, Nullable, NullableExt, RiskLevel, ScanHistory, ScanResult,
    ScanSummary, WalletDetails,
};
pub use domain::ports::SolenceApi;
pub use utils::error::{Result, SolenceError};

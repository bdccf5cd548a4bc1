use crate::app::walkthrough::DEMO_WALLET;
use crate::config::toml_config::SolenceConfigFile;
use crate::config::ClientConfig;
use crate::domain::model::{DEFAULT_HISTORY_LIMIT, DEFAULT_HISTORY_SKIP};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "solence")]
#[command(about = "Scan Solana wallets for risk with the Solence API")]
pub struct CliConfig {
    /// Base URL of the Solence API
    #[arg(long, env = "SOLENCE_API_URL")]
    pub api_url: Option<String>,

    /// API key sent as X-API-Key (required for minting)
    #[arg(long, env = "SOLENCE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// TOML config file with a [client] table
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, help = "Print raw JSON instead of a formatted report")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Scan a wallet and print its risk assessment
    Scan {
        wallet: String,
        /// Opt in to publishing the scan result
        #[arg(long)]
        public: bool,
    },
    /// List previous scans of a wallet
    History {
        wallet: String,
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = DEFAULT_HISTORY_SKIP)]
        skip: u32,
    },
    /// Check whether a wallet holds a Safety Badge
    Verify { wallet: String },
    /// Mint a Safety Badge for a qualifying scan
    Mint { wallet: String, scan_id: String },
    /// Scan, verify badge and list recent history in one go
    Walkthrough {
        #[arg(default_value = DEMO_WALLET)]
        wallet: String,
    },
}

impl CliConfig {
    /// 優先順序：命令列 / 環境變數 > 設定檔 > 預設值
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => SolenceConfigFile::from_file(path)?.into_client_config(),
            None => ClientConfig::default(),
        };

        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = Some(timeout);
        }

        Ok(config.normalized())
    }
}

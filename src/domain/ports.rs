use crate::domain::model::{BadgeStatus, MintResult, ScanHistory, ScanResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The four Solence API operations.
///
/// Every call is independent: implementations hold no per-call state, so the
/// operations may be issued in any order, repeatedly, or concurrently.
#[async_trait]
pub trait SolenceApi: Send + Sync {
    /// Request a fresh risk assessment for `wallet`.
    async fn scan(&self, wallet: &str, is_public: bool) -> Result<ScanResult>;

    /// Page through previous scans. `limit` is capped at 50 by the server.
    async fn history(&self, wallet: &str, limit: u32, skip: u32) -> Result<ScanHistory>;

    async fn verify_badge(&self, wallet: &str) -> Result<BadgeStatus>;

    /// Mint a Safety Badge. Requires an API key.
    async fn mint_badge(&self, wallet: &str, scan_id: &str) -> Result<MintResult>;
}

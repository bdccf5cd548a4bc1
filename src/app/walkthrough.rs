use crate::app::report;
use crate::domain::ports::SolenceApi;
use crate::utils::error::Result;
use std::fmt::Write;

/// Wallet used by the walkthrough when none is given.
pub const DEMO_WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

pub const WALKTHROUGH_HISTORY_LIMIT: u32 = 5;

/// 依序執行：掃描 → 驗證徽章 → 最近紀錄，回傳完整報告
pub async fn run_walkthrough<A: SolenceApi + ?Sized>(api: &A, wallet: &str) -> Result<String> {
    let mut out = String::new();

    tracing::info!("🔍 Scanning wallet {}", wallet);
    let result = api.scan(wallet, false).await?;
    out.push_str(&report::format_scan_result(&result));

    tracing::info!("🏅 Checking for Safety Badge");
    let badge = api.verify_badge(wallet).await?;
    let _ = writeln!(out, "\n🏅 Safety Badge");
    out.push_str(&report::format_badge_status(&badge, Some(&result)));

    tracing::info!("📚 Fetching scan history");
    let history = api
        .history(wallet, WALKTHROUGH_HISTORY_LIMIT, 0)
        .await?;
    let _ = writeln!(out, "\n📚 Scan History");
    out.push_str(&report::format_history(&history));

    Ok(out)
}

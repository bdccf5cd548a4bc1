//! Plain-text renderings of API responses for terminal output.

use crate::domain::model::{
    BadgeStatus, MintResult, Nullable, NullableExt, ScanHistory, ScanResult, WalletDetails,
};
use chrono::DateTime;
use std::fmt::Display;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// ISO 8601 時間轉為指定格式，解析失敗時原樣輸出
fn format_timestamp(raw: &str, pattern: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn or_na<T: Display>(value: &Nullable<T>) -> String {
    value
        .value()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn format_scan_result(result: &ScanResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "📊 SCAN RESULTS");
    let _ = writeln!(out, "{}", rule);

    let _ = writeln!(out, "\n🎯 Score: {}/100", result.score);
    let _ = writeln!(
        out,
        "{}  Risk Level: {}",
        result.risk_level.marker(),
        result.risk_level
    );

    if let Some(summary) = result.ai_summary.value() {
        let _ = writeln!(out, "\n🤖 AI Insights:");
        let _ = writeln!(out, "{}", summary);
    }

    let empty = WalletDetails::default();
    let details = result.wallet_details.value().unwrap_or(&empty);
    let _ = writeln!(out, "\n💼 Wallet Details:");
    let _ = writeln!(out, "   SOL Balance: {} SOL", or_na(&details.sol_balance));
    let _ = writeln!(out, "   Tokens: {}", or_na(&details.token_count));
    let _ = writeln!(out, "   NFTs: {}", or_na(&details.nft_count));
    let _ = writeln!(out, "   Transactions: {}", or_na(&details.tx_count));
    let _ = writeln!(out, "   Account Age: {} days", or_na(&details.account_age_days));
    if let Some(last) = details.last_activity.value() {
        let _ = writeln!(
            out,
            "   Last Active: {}",
            format_timestamp(last, "%Y-%m-%d %H:%M:%S")
        );
    }

    let _ = writeln!(out, "\n📋 Findings:");
    if result.findings().is_empty() {
        let _ = writeln!(out, "   (none)");
    }
    for (i, finding) in result.findings().iter().enumerate() {
        let _ = writeln!(out, "   {}. {}", i + 1, finding);
    }

    let _ = writeln!(out, "\n{}", rule);
    out
}

/// `scan` is the latest scan for the same wallet, used for the qualification hint.
pub fn format_badge_status(status: &BadgeStatus, scan: Option<&ScanResult>) -> String {
    let mut out = String::new();

    if status.has_badge {
        let _ = writeln!(out, "✅ This wallet has a verified Safety Badge!");
        if let Some(minted) = status.minted_at.value() {
            let _ = writeln!(out, "   Minted: {}", format_timestamp(minted, "%Y-%m-%d"));
        }
        if let Some(address) = status.mint_address.value() {
            let _ = writeln!(out, "   Mint Address: {}", address);
        }
    } else {
        let _ = writeln!(out, "❌ No Safety Badge found");
        if scan.is_some_and(ScanResult::qualifies_for_badge) {
            let _ = writeln!(out, "💡 This wallet qualifies for a Safety Badge!");
        }
    }

    out
}

pub fn format_history(history: &ScanHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total scans: {}", history.total);

    for (i, scan) in history.scans().iter().enumerate() {
        let date = scan
            .created_at
            .value()
            .map(|raw| format_timestamp(raw, "%Y-%m-%d"))
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            out,
            "   {}. {} - Score: {} ({})",
            i + 1,
            date,
            scan.score,
            scan.risk_level
        );
    }

    out
}

pub fn format_mint_result(result: &MintResult) -> String {
    let mut out = String::new();

    if result.succeeded() {
        let _ = writeln!(out, "🏅 Safety Badge minted!");
    } else {
        let _ = writeln!(out, "❌ Badge minting was not successful");
    }
    if let Some(address) = result.mint_address.value() {
        let _ = writeln!(out, "   Mint Address: {}", address);
    }
    if let Some(signature) = result.signature.value() {
        let _ = writeln!(out, "   Signature: {}", signature);
    }
    if let Some(url) = result.explorer_url.value() {
        let _ = writeln!(out, "   Explorer: {}", url);
    }

    out
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use std::collections::HashMap;
use std::fmt;

/// 達到此分數的錢包可鑄造 Safety Badge
pub const BADGE_SCORE_THRESHOLD: f64 = 75.0;

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
pub const DEFAULT_HISTORY_SKIP: u32 = 0;

/// A response field that may be absent (`None`), explicitly `null`
/// (`Some(None)`) or set (`Some(Some(v))`).
///
/// Keeping the three states apart lets a decoded response serialize back to
/// exactly the JSON the server sent.
pub type Nullable<T> = Option<Option<T>>;

pub trait NullableExt<T> {
    /// The value when present and not `null`.
    fn value(&self) -> Option<&T>;
}

impl<T> NullableExt<T> for Nullable<T> {
    fn value(&self) -> Option<&T> {
        self.as_ref().and_then(Option::as_ref)
    }
}

// 欄位存在即為 Some，內層 None 代表 null；欄位缺省由 `default` 給 None
fn present<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Any level this client does not know yet, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl RiskLevel {
    pub fn marker(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✅",
            RiskLevel::Medium => "⚠️",
            RiskLevel::High => "⛔",
            RiskLevel::Other(_) => "❔",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("LOW"),
            RiskLevel::Medium => f.write_str("MEDIUM"),
            RiskLevel::High => f.write_str("HIGH"),
            RiskLevel::Other(level) => f.write_str(level),
        }
    }
}

// 所有回應結構都以 `extra` 保留未知欄位，數值以 `Number` 原樣保存，解碼不會遺失資料

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDetails {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub sol_balance: Nullable<Number>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub token_count: Nullable<Number>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub nft_count: Nullable<Number>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tx_count: Nullable<Number>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub account_age_days: Nullable<Number>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub last_activity: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub first_activity: Nullable<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMeta {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub created_by_wallet: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub is_public: Nullable<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub wallet: Nullable<String>,
    pub score: Number,
    pub risk_level: RiskLevel,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub findings: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ai_summary: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub wallet_details: Nullable<WalletDetails>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub created_at: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub meta: Nullable<ScanMeta>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ScanResult {
    pub fn qualifies_for_badge(&self) -> bool {
        self.score
            .as_f64()
            .is_some_and(|score| score >= BADGE_SCORE_THRESHOLD)
    }

    pub fn findings(&self) -> &[String] {
        self.findings.value().map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Nullable<String>,
    pub score: Number,
    pub risk_level: RiskLevel,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub created_at: Nullable<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHistory {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub wallet: Nullable<String>,
    pub total: u64,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub scans: Nullable<Vec<ScanSummary>>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ScanHistory {
    pub fn scans(&self) -> &[ScanSummary] {
        self.scans.value().map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub wallet: Nullable<String>,
    pub has_badge: bool,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub mint_address: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub minted_at: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub score: Nullable<Number>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResult {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub success: Nullable<bool>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub signature: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub mint_address: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub explorer_url: Nullable<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl MintResult {
    pub fn succeeded(&self) -> bool {
        self.success.value().copied().unwrap_or(false)
    }
}

/// POST /scan 的請求本體
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest<'a> {
    pub wallet: &'a str,
    pub is_public: bool,
}

/// GET /scans 的查詢參數
#[derive(Debug, Clone, Serialize)]
pub struct HistoryQuery<'a> {
    pub wallet: &'a str,
    pub limit: u32,
    pub skip: u32,
}

/// GET /badge/verify 的查詢參數
#[derive(Debug, Clone, Serialize)]
pub struct BadgeQuery<'a> {
    pub wallet: &'a str,
}

/// POST /badge/mint 的請求本體
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest<'a> {
    pub wallet: &'a str,
    pub scan_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_result_keeps_unknown_fields() {
        let body = json!({
            "score": 64,
            "riskLevel": "MEDIUM",
            "findings": ["Interacted with a flagged program"],
            "walletDetails": {"solBalance": 1.5, "tokenCount": null, "cluster": "mainnet"},
            "engineVersion": "2.1"
        });

        let result: ScanResult = serde_json::from_value(body).unwrap();
        let details = result.wallet_details.value().unwrap();

        assert_eq!(result.score.as_u64(), Some(64));
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(details.sol_balance.value().and_then(Number::as_f64), Some(1.5));
        assert_eq!(details.token_count, Some(None));
        assert_eq!(details.nft_count, None);
        assert_eq!(details.extra["cluster"], json!("mainnet"));
        assert_eq!(result.extra["engineVersion"], json!("2.1"));
        assert!(result.ai_summary.is_none());
        assert!(!result.qualifies_for_badge());
    }

    #[test]
    fn test_sparse_body_serializes_back_unchanged() {
        let body = json!({
            "findings": [],
            "riskLevel": "CRITICAL",
            "score": 64,
            "walletDetails": {"solBalance": 1.0, "lastActivity": null}
        });

        let result: ScanResult = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(serde_json::to_value(&result).unwrap(), body);
        assert!(result.findings().is_empty());
    }

    #[test]
    fn test_badge_status_without_optional_fields() {
        let body = json!({"hasBadge": false});
        let status: BadgeStatus = serde_json::from_value(body.clone()).unwrap();

        assert!(status.mint_address.is_none());
        assert_eq!(serde_json::to_value(&status).unwrap(), body);
    }

    #[test]
    fn test_fractional_and_negative_scores_decode() {
        let result: ScanResult =
            serde_json::from_value(json!({"score": 64.5, "riskLevel": "LOW"})).unwrap();
        assert_eq!(result.score.as_f64(), Some(64.5));
        assert_eq!(result.score.to_string(), "64.5");

        let result: ScanResult =
            serde_json::from_value(json!({"score": -3, "riskLevel": "HIGH"})).unwrap();
        assert_eq!(result.score.as_i64(), Some(-3));
        assert!(!result.qualifies_for_badge());
    }

    #[test]
    fn test_history_entry_without_created_at() {
        let body = json!({"total": 1, "scans": [{"score": 70, "riskLevel": "LOW"}]});
        let history: ScanHistory = serde_json::from_value(body.clone()).unwrap();

        assert_eq!(history.scans().len(), 1);
        assert!(history.scans()[0].created_at.value().is_none());
        assert_eq!(serde_json::to_value(&history).unwrap(), body);
    }

    #[test]
    fn test_unrecognised_risk_level_is_kept() {
        let level: RiskLevel = serde_json::from_value(json!("CRITICAL")).unwrap();
        assert_eq!(level, RiskLevel::Other("CRITICAL".to_string()));
        assert_eq!(level.to_string(), "CRITICAL");
        assert_eq!(serde_json::to_value(&level).unwrap(), json!("CRITICAL"));
        assert_eq!(RiskLevel::High.to_string(), "HIGH");
    }

    #[test]
    fn test_request_payload_field_names() {
        let scan = serde_json::to_value(ScanRequest {
            wallet: "abc",
            is_public: true,
        })
        .unwrap();
        assert_eq!(scan, json!({"wallet": "abc", "isPublic": true}));

        let mint = serde_json::to_value(MintRequest {
            wallet: "abc",
            scan_id: "scan-1",
        })
        .unwrap();
        assert_eq!(mint, json!({"wallet": "abc", "scanId": "scan-1"}));
    }

    #[test]
    fn test_badge_threshold_boundary() {
        let body = json!({"score": 75, "riskLevel": "LOW"});
        let result: ScanResult = serde_json::from_value(body).unwrap();
        assert!(result.qualifies_for_badge());

        let body = json!({"score": 74.9, "riskLevel": "LOW"});
        let result: ScanResult = serde_json::from_value(body).unwrap();
        assert!(!result.qualifies_for_badge());
    }
}

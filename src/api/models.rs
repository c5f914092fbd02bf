use serde::{Deserialize, Serialize};

/// Lifecycle of a business as reported by the scanner backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum BusinessStatus {
    #[default]
    PendingScan,
    Scanned,
    Active,
    Other(String),
}

impl BusinessStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PendingScan => "pending_scan",
            Self::Scanned => "scanned",
            Self::Active => "active",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for BusinessStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending_scan" => Self::PendingScan,
            "scanned" => Self::Scanned,
            "active" => Self::Active,
            _ => Self::Other(raw),
        }
    }
}

impl From<BusinessStatus> for String {
    fn from(status: BusinessStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Sending,
    Paused,
    Completed,
    Cancelled,
    Other(String),
}

impl CampaignStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Sending => "sending",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for CampaignStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "draft" => Self::Draft,
            "scheduled" => Self::Scheduled,
            "sending" => Self::Sending,
            "paused" => Self::Paused,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Business {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: BusinessStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// One page of `GET /businesses`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct BusinessPage {
    #[serde(default)]
    pub businesses: Vec<Business>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// Query parameters for the business listing. Empty filters are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl Default for BusinessQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            search: None,
            status: None,
        }
    }
}

impl BusinessQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            out.push(("search", search.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            out.push(("status", status.to_string()));
        }
        out
    }
}

/// Aggregate message counters attached to every campaign.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessagesSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub opened: u64,
    #[serde(default)]
    pub replied: u64,
}

impl std::ops::Add for MessagesSummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total + rhs.total,
            sent: self.sent + rhs.sent,
            failed: self.failed + rhs.failed,
            opened: self.opened + rhs.opened,
            replied: self.replied + rhs.replied,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub message_template: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub messages_summary: MessagesSummary,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CampaignPage {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub total_items: u64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub name: String,
    pub message_template: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SendCampaignRequest {
    pub platforms: Vec<String>,
}

impl SendCampaignRequest {
    pub fn email() -> Self {
        Self {
            platforms: vec!["email".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub platforms: Vec<String>,
    pub limit: u32,
}

impl Default for PreviewRequest {
    fn default() -> Self {
        Self {
            platforms: vec!["email".to_string()],
            limit: 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessagePreview {
    pub business_name: String,
    pub platform: String,
    pub contact_value: String,
    pub personalized_message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CampaignPreview {
    #[serde(default)]
    pub campaign_name: String,
    #[serde(default)]
    pub previews: Vec<MessagePreview>,
}

/// Point-in-time scan counters from `GET /scan/status`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ScanStatus {
    #[serde(default)]
    pub total_businesses: u64,
    #[serde(default)]
    pub pending_scan: u64,
    #[serde(default)]
    pub scanned: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub scan_completion_rate: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ScanAllResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub scanned_count: u64,
    #[serde(default)]
    pub total_pending: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UploadSummary {
    #[serde(default, alias = "total")]
    pub total_rows: u64,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub error_details: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Option<UploadSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_decodes_with_missing_optionals() {
        let json = r#"{
            "id": 7,
            "name": "Acme Corp",
            "website": null,
            "status": "pending_scan",
            "contacts": [
                {"id": 1, "type": "email", "value": "info@acme.com", "source": "csv", "is_primary": true}
            ]
        }"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.status, BusinessStatus::PendingScan);
        assert_eq!(business.website, None);
        assert_eq!(business.contacts.len(), 1);
        assert_eq!(business.contacts[0].kind, "email");
        assert!(business.contacts[0].is_primary);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: CampaignStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, CampaignStatus::Other("archived".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""archived""#);
    }

    #[test]
    fn campaign_without_summary_defaults_to_zero() {
        let campaign: Campaign =
            serde_json::from_str(r#"{"id": 1, "name": "Spring Promo", "status": "draft"}"#)
                .unwrap();
        assert_eq!(campaign.messages_summary, MessagesSummary::default());
        assert_eq!(campaign.status, CampaignStatus::Draft);
    }

    #[test]
    fn business_query_omits_empty_filters() {
        let query = BusinessQuery {
            page: 2,
            per_page: 10,
            search: Some(String::new()),
            status: Some("scanned".into()),
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("page", "2".to_string()),
                ("per_page", "10".to_string()),
                ("status", "scanned".to_string()),
            ]
        );
    }

    #[test]
    fn upload_summary_accepts_backend_total_alias() {
        let summary: UploadSummary =
            serde_json::from_str(r#"{"total": 3, "processed": 2, "errors": 1}"#).unwrap();
        assert_eq!(summary.total_rows, 3);
        assert!(summary.error_details.is_empty());
    }
}

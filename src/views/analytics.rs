use std::path::{Path, PathBuf};

use crate::api::models::Campaign;
use crate::api::{ApiClient, ApiError};
use crate::metrics::{self, BarGroup, PieSegment};
use crate::views::StatCard;

pub const EXPORT_RANGE_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsRow {
    pub name: String,
    pub status: String,
    pub total: u64,
    pub sent: u64,
    pub opened: u64,
    pub replied: u64,
    pub success_rate: u32,
}

/// Everything the analytics page shows, derived from two list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsReport {
    pub total_businesses: u64,
    pub total_campaigns: u64,
    pub total_messages: u64,
    pub overall_success_rate: u32,
    pub bars: Vec<BarGroup>,
    pub pie: Vec<PieSegment>,
    pub rows: Vec<AnalyticsRow>,
}

impl AnalyticsReport {
    pub fn build(total_businesses: u64, campaigns: &[Campaign]) -> Self {
        let totals = metrics::aggregate(campaigns);
        let rows = campaigns
            .iter()
            .map(|c| {
                let summary = &c.messages_summary;
                AnalyticsRow {
                    name: c.name.clone(),
                    status: c.status.as_str().to_string(),
                    total: summary.total,
                    sent: summary.sent,
                    opened: summary.opened,
                    replied: summary.replied,
                    success_rate: metrics::success_rate(summary),
                }
            })
            .collect();
        Self {
            total_businesses,
            total_campaigns: campaigns.len() as u64,
            total_messages: metrics::total_messages(campaigns),
            overall_success_rate: metrics::success_rate(&totals),
            bars: metrics::bar_groups(campaigns),
            pie: metrics::pie_segments(&totals),
            rows,
        }
    }

    pub fn cards(&self) -> [StatCard; 4] {
        [
            StatCard::new("Total Businesses", self.total_businesses, "In your database"),
            StatCard::new("Active Campaigns", self.total_campaigns, "Running campaigns"),
            StatCard::new(
                "Messages Sent",
                self.total_messages,
                "Total outreach messages",
            ),
            StatCard::new(
                "Success Rate",
                format!("{}%", self.overall_success_rate),
                "Overall delivery rate",
            ),
        ]
    }
}

pub async fn load(client: &ApiClient) -> Result<AnalyticsReport, ApiError> {
    let (total_businesses, campaigns) = tokio::try_join!(client.business_count(), client.campaigns())?;
    Ok(AnalyticsReport::build(total_businesses, &campaigns.campaigns))
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Could not save export: {0}")]
    Io(#[from] std::io::Error),
}

pub fn export_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("analytics_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Downloads the CSV export and writes it into `dir`.
pub async fn export_to(client: &ApiClient, dir: &Path) -> Result<PathBuf, ExportError> {
    let csv = client.export_analytics(EXPORT_RANGE_DAYS).await?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(chrono::Local::now()));
    tokio::fs::write(&path, csv).await?;
    log::info!("analytics export written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{CampaignStatus, MessagesSummary};
    use chrono::TimeZone;

    fn campaign(name: &str, summary: MessagesSummary) -> Campaign {
        Campaign {
            id: 1,
            name: name.into(),
            message_template: String::new(),
            status: CampaignStatus::Completed,
            created_at: None,
            messages_summary: summary,
        }
    }

    #[test]
    fn report_reuses_the_same_rate_everywhere() {
        let campaigns = vec![
            campaign(
                "Spring Promo",
                MessagesSummary {
                    total: 3,
                    sent: 2,
                    failed: 1,
                    opened: 0,
                    replied: 0,
                },
            ),
            campaign("Empty", MessagesSummary::default()),
        ];
        let report = AnalyticsReport::build(42, &campaigns);
        assert_eq!(report.total_campaigns, 2);
        assert_eq!(report.total_messages, 3);
        assert_eq!(report.overall_success_rate, 67);
        assert_eq!(report.rows[0].success_rate, 67);
        assert_eq!(report.rows[1].success_rate, 0);
        assert_eq!(report.cards()[3].value, "67%");
        assert_eq!(
            report.pie.iter().map(|s| s.label).collect::<Vec<_>>(),
            vec!["Sent", "Failed"]
        );
        assert_eq!(report.bars.len(), 2);
    }

    #[test]
    fn empty_report_has_no_chart_data() {
        let report = AnalyticsReport::build(0, &[]);
        assert!(report.pie.is_empty());
        assert!(report.bars.is_empty());
        assert_eq!(report.overall_success_rate, 0);
    }

    #[test]
    fn export_names_are_timestamped() {
        let at = chrono::Local.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(export_file_name(at), "analytics_export_20240506_070809.csv");
    }
}

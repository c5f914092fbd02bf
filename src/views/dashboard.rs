use log::error;

use crate::api::ApiClient;
use crate::api::models::ScanStatus;
use crate::metrics;
use crate::routes::Route;
use crate::views::StatCard;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_businesses: u64,
    pub total_campaigns: u64,
    pub total_messages: u64,
    pub scan: ScanStatus,
}

impl DashboardStats {
    pub fn cards(&self) -> [StatCard; 4] {
        [
            StatCard::new(
                "Total Businesses",
                self.total_businesses,
                "Businesses in database",
            ),
            StatCard::new("Active Campaigns", self.total_campaigns, "Outreach campaigns"),
            StatCard::new("Messages Sent", self.total_messages, "Total messages sent"),
            StatCard::new(
                "Scan Progress",
                format!("{}%", self.scan.scan_completion_rate),
                format!(
                    "{} of {} scanned",
                    self.scan.scanned,
                    self.scan.scanned + self.scan.pending_scan
                ),
            ),
        ]
    }
}

pub struct Shortcut {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const SHORTCUTS: [Shortcut; 3] = [
    Shortcut {
        title: "Upload CSV",
        description: "Add new businesses from CSV file",
        route: Route::Upload,
    },
    Shortcut {
        title: "Create Campaign",
        description: "Start a new outreach campaign",
        route: Route::Campaigns,
    },
    Shortcut {
        title: "Run Scanner",
        description: "Scan for social media profiles",
        route: Route::Scanner,
    },
];

/// Issues the three dashboard requests concurrently.
///
/// All or nothing: if any of them fails the whole dashboard shows zeros.
pub async fn load_stats(client: &ApiClient) -> DashboardStats {
    let joined = tokio::try_join!(
        client.business_count(),
        client.campaigns(),
        client.scan_status()
    );
    match joined {
        Ok((total_businesses, campaigns, scan)) => DashboardStats {
            total_businesses,
            total_campaigns: campaigns.total_items,
            total_messages: metrics::total_messages(&campaigns.campaigns),
            scan,
        },
        Err(err) => {
            error!("Error fetching dashboard stats: {err}");
            DashboardStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_cards() {
        let cards = DashboardStats::default().cards();
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[3].value, "0%");
        assert_eq!(cards[3].description, "0 of 0 scanned");
    }

    #[test]
    fn scan_card_reports_fraction() {
        let stats = DashboardStats {
            scan: ScanStatus {
                total_businesses: 10,
                pending_scan: 4,
                scanned: 5,
                active: 1,
                scan_completion_rate: 60.0,
            },
            ..Default::default()
        };
        let cards = stats.cards();
        assert_eq!(cards[3].value, "60%");
        assert_eq!(cards[3].description, "5 of 9 scanned");
    }
}

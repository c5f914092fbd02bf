use log::{error, info};

use crate::api::models::{ScanAllResponse, ScanStatus};
use crate::api::{ApiClient, ApiError};
use crate::state::ActionState;
use crate::views::StatCard;

pub fn cards(status: &ScanStatus) -> [StatCard; 4] {
    [
        StatCard::new("Total Businesses", status.total_businesses, "In your database"),
        StatCard::new("Pending Scan", status.pending_scan, "Awaiting scan"),
        StatCard::new("Scanned", status.scanned, "Scan completed"),
        StatCard::new("Active", status.active, "Ready for outreach"),
    ]
}

/// Progress bar fill in `[0, 1]`.
pub fn progress_fraction(status: &ScanStatus) -> f64 {
    (status.scan_completion_rate / 100.0).clamp(0.0, 1.0)
}

pub fn progress_label(status: &ScanStatus) -> String {
    format!(
        "{} of {} businesses",
        status.scanned + status.active,
        status.total_businesses
    )
}

pub fn progress_caption(status: &ScanStatus) -> String {
    format!(
        "{}% of businesses have been scanned for online presence",
        status.scan_completion_rate
    )
}

pub fn can_scan(status: &ScanStatus, action: &ActionState<ScanAllResponse>) -> bool {
    status.pending_scan > 0 && !action.is_in_flight()
}

pub fn scan_button_label(status: &ScanStatus, action: &ActionState<ScanAllResponse>) -> String {
    if action.is_in_flight() {
        "Scanning...".to_string()
    } else {
        format!("Scan {} Pending Businesses", status.pending_scan)
    }
}

pub const NOTHING_PENDING: &str =
    "No businesses pending scan. All businesses have been processed.";

/// Note under the scan button, only when there is nothing left to scan.
pub fn pending_note(status: &ScanStatus) -> Option<&'static str> {
    (status.pending_scan == 0).then_some(NOTHING_PENDING)
}

pub fn success_lines(resp: &ScanAllResponse) -> Vec<String> {
    vec![
        resp.message.clone(),
        format!("• Businesses scanned: {}", resp.scanned_count),
        format!("• Total pending: {}", resp.total_pending),
    ]
}

/// Runs the bulk scan. Server errors are shown verbatim; anything else is a failed start.
pub async fn scan_all_pending(client: &ApiClient) -> Result<ScanAllResponse, String> {
    client.scan_all_pending().await.map_err(|err| match err.server_error() {
        Some(message) => message.to_string(),
        None => {
            error!("Error starting scan: {err}");
            format!("Failed to start scan: {err}")
        }
    })
}

/// Scans one business and logs what the server said. No control on the page calls this yet.
pub async fn scan_business(client: &ApiClient, business_id: i64) -> Result<(), ApiError> {
    match client.scan_business(business_id).await {
        Ok(result) => {
            info!("Single business scan result: {result}");
            Ok(())
        }
        Err(err) => {
            error!("Error scanning business {business_id}: {err}");
            Err(err)
        }
    }
}

use std::path::{Path, PathBuf};

use crate::api::models::UploadResponse;
use crate::api::{ApiClient, ApiError};
use crate::state::ActionState;

pub const CSV_MIME: &str = "text/csv";
pub const NOT_CSV: &str = "Please select a CSV file";
pub const NO_FILE: &str = "Please select a file first";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const SAMPLE_FILE_NAME: &str = "sample_businesses.csv";

const SAMPLE_ROWS: [[&str; 5]; 4] = [
    ["Business Name", "Website", "Email", "Phone Number", "Address"],
    ["Acme Corp", "https://acme.com", "info@acme.com", "555-0123", "123 Main St"],
    ["Tech Solutions", "", "contact@techsol.com", "555-0456", "456 Oak Ave"],
    ["Local Bakery", "https://localbakery.com", "", "555-0789", "789 Pine St"],
];

/// A file accepted by the CSV check, not yet read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: Option<String>,
    pub size: u64,
}

/// A file is a CSV if its MIME type says so or its name ends in `.csv` (any case).
pub fn is_csv(name: &str, mime: Option<&str>) -> bool {
    mime == Some(CSV_MIME) || name.to_ascii_lowercase().ends_with(".csv")
}

pub fn sample_csv() -> String {
    SAMPLE_ROWS
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn save_sample(dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(SAMPLE_FILE_NAME);
    std::fs::write(&path, sample_csv())?;
    Ok(path)
}

#[derive(Debug, Clone, Default)]
pub struct UploadModel {
    selected: Option<SelectedFile>,
    validation_error: Option<String>,
    action: ActionState<UploadResponse>,
}

impl UploadModel {
    /// Accepts a picked or dropped file. Returns false (and records an inline error) if it is not a CSV.
    pub fn select(&mut self, file: SelectedFile) -> bool {
        if !is_csv(&file.name, file.mime.as_deref()) {
            self.validation_error = Some(NOT_CSV.to_string());
            return false;
        }
        self.selected = Some(file);
        self.validation_error = None;
        if self.action.failure().is_some() {
            self.action.reset();
        }
        true
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn action(&self) -> &ActionState<UploadResponse> {
        &self.action
    }

    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.action.is_in_flight()
    }

    /// Moves to in-flight and hands out the file to send, or records why nothing can be sent.
    pub fn begin(&mut self) -> Option<SelectedFile> {
        let Some(file) = self.selected.clone() else {
            self.validation_error = Some(NO_FILE.to_string());
            return None;
        };
        if !self.action.start() {
            return None;
        }
        self.validation_error = None;
        Some(file)
    }

    pub fn finish(&mut self, result: Result<UploadResponse, String>) {
        if result.is_ok() {
            self.selected = None;
        }
        self.action.finish(result);
    }

    /// Inline error to show: a validation problem or the last upload failure.
    pub fn error(&self) -> Option<&str> {
        self.validation_error
            .as_deref()
            .or_else(|| self.action.failure())
    }
}

/// Bullet lines for the success panel.
pub fn result_lines(resp: &UploadResponse) -> Vec<String> {
    let mut lines = vec![resp.message.clone()];
    if let Some(summary) = &resp.result {
        lines.push(format!("• Total rows: {}", summary.total_rows));
        lines.push(format!("• Processed: {}", summary.processed));
        lines.push(format!("• Errors: {}", summary.errors));
        lines.extend(summary.error_details.iter().map(|d| format!("  {d}")));
    }
    lines
}

fn user_message(err: ApiError) -> String {
    match err {
        ApiError::Server { message, .. } => message.unwrap_or_else(|| UPLOAD_FAILED.to_string()),
        // An unreadable body fails the same way a dropped connection does.
        ApiError::Decode(e) => format!("Network error: {e}"),
        other => other.to_string(),
    }
}

/// Reads the selected file and posts it as multipart field `file`.
pub async fn upload(client: &ApiClient, file: &SelectedFile) -> Result<UploadResponse, String> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| format!("Could not read {}: {e}", file.name))?;
    let mime = file.mime.as_deref().unwrap_or(CSV_MIME);
    client
        .upload_businesses(&file.name, mime, bytes)
        .await
        .map_err(user_message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::UploadSummary;

    fn file(name: &str, mime: Option<&str>) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from(name),
            name: name.into(),
            mime: mime.map(str::to_string),
            size: 10,
        }
    }

    #[test]
    fn csv_acceptance_rule() {
        assert!(is_csv("data.CSV", None));
        assert!(is_csv("export", Some("text/csv")));
        assert!(is_csv("leads.csv", Some("application/vnd.ms-excel")));
        assert!(!is_csv("data.txt", Some("text/plain")));
    }

    #[test]
    fn rejected_file_leaves_nothing_to_send() {
        let mut model = UploadModel::default();
        assert!(!model.select(file("data.txt", Some("text/plain"))));
        assert_eq!(model.error(), Some(NOT_CSV));
        assert!(model.selected().is_none());
        assert!(!model.can_upload());
        assert!(model.begin().is_none());
        assert_eq!(model.error(), Some(NO_FILE));
        assert!(!model.action().is_in_flight());
    }

    #[test]
    fn upload_lifecycle() {
        let mut model = UploadModel::default();
        assert!(model.select(file("leads.csv", None)));
        assert!(model.can_upload());

        let picked = model.begin().unwrap();
        assert_eq!(picked.name, "leads.csv");
        assert!(!model.can_upload());
        assert!(model.begin().is_none());

        model.finish(Err("Upload failed".into()));
        assert_eq!(model.error(), Some("Upload failed"));
        assert!(model.selected().is_some());

        model.begin().unwrap();
        model.finish(Ok(UploadResponse {
            message: "CSV processing completed.".into(),
            result: Some(UploadSummary {
                total_rows: 3,
                processed: 3,
                errors: 0,
                error_details: Vec::new(),
            }),
        }));
        assert!(model.selected().is_none());
        assert_eq!(model.error(), None);
        let lines = result_lines(model.action().success().unwrap());
        assert_eq!(lines[1], "• Total rows: 3");
    }

    #[test]
    fn selecting_a_new_file_clears_a_failed_attempt() {
        let mut model = UploadModel::default();
        model.select(file("a.csv", None));
        model.begin();
        model.finish(Err("boom".into()));
        model.select(file("b.csv", None));
        assert_eq!(model.error(), None);
        assert_eq!(*model.action(), ActionState::Idle);
    }

    #[test]
    fn sample_has_header_and_three_rows() {
        let csv = sample_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Business Name,Website,Email,Phone Number,Address");
        assert_eq!(lines[2], "Tech Solutions,,contact@techsol.com,555-0456,456 Oak Ave");
    }

    #[test]
    fn sample_is_written_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_sample(dir.path()).unwrap();
        assert!(path.ends_with(SAMPLE_FILE_NAME));
        assert_eq!(std::fs::read_to_string(path).unwrap(), sample_csv());
    }
}

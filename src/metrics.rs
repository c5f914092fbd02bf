//! Figures derived client-side from campaign and business data.

use crate::api::models::{Campaign, MessagesSummary};

/// `round(sent / total * 100)`, or 0 when nothing was queued.
pub fn success_rate(summary: &MessagesSummary) -> u32 {
    if summary.total == 0 {
        return 0;
    }
    ((summary.sent as f64 / summary.total as f64) * 100.0).round() as u32
}

pub fn aggregate(campaigns: &[Campaign]) -> MessagesSummary {
    campaigns
        .iter()
        .fold(MessagesSummary::default(), |acc, c| acc + c.messages_summary)
}

pub fn total_messages(campaigns: &[Campaign]) -> u64 {
    campaigns.iter().map(|c| c.messages_summary.total).sum()
}

/// `pending_scan` -> `Pending Scan`.
pub fn format_status(status: &str) -> String {
    status
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cuts `text` to `max` characters and appends `...` when it was longer.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Renders a backend timestamp as `YYYY-MM-DD`; unparsable input is shown as-is.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarGroup {
    pub label: String,
    pub sent: u64,
    pub opened: u64,
    pub replied: u64,
}

pub const BAR_LABEL_LEN: usize = 15;

pub fn bar_groups(campaigns: &[Campaign]) -> Vec<BarGroup> {
    campaigns
        .iter()
        .map(|c| BarGroup {
            label: truncate(&c.name, BAR_LABEL_LEN),
            sent: c.messages_summary.sent,
            opened: c.messages_summary.opened,
            replied: c.messages_summary.replied,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f64, pub f64, pub f64);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self(
            ((hex >> 16) & 0xff) as f64 / 255.0,
            ((hex >> 8) & 0xff) as f64 / 255.0,
            (hex & 0xff) as f64 / 255.0,
        )
    }
}

pub const SENT_COLOR: Rgb = Rgb::from_hex(0x10B981);
pub const FAILED_COLOR: Rgb = Rgb::from_hex(0xEF4444);
pub const OPENED_COLOR: Rgb = Rgb::from_hex(0x3B82F6);
pub const REPLIED_COLOR: Rgb = Rgb::from_hex(0x8B5CF6);

#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub label: &'static str,
    pub value: u64,
    pub color: Rgb,
}

/// Message status distribution; zero-valued statuses produce no segment.
pub fn pie_segments(totals: &MessagesSummary) -> Vec<PieSegment> {
    [
        ("Sent", totals.sent, SENT_COLOR),
        ("Failed", totals.failed, FAILED_COLOR),
        ("Opened", totals.opened, OPENED_COLOR),
        ("Replied", totals.replied, REPLIED_COLOR),
    ]
    .into_iter()
    .filter(|(_, value, _)| *value > 0)
    .map(|(label, value, color)| PieSegment {
        label,
        value,
        color,
    })
    .collect()
}

/// 1-based page cursor clamped to `[1, total_pages]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn go_to(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.total_pages);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Applies a server-reported page count (0 is treated as 1). Returns
    /// whether the current page had to move back inside the range.
    pub fn set_total_pages(&mut self, total_pages: u32) -> bool {
        self.total_pages = total_pages.max(1);
        self.go_to(self.page)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

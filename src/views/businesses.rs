use crate::api::models::{Business, BusinessPage, BusinessQuery};
use crate::metrics::{self, Pagination};

pub const PAGE_SIZE: u32 = 10;
pub const WEBSITE_LABEL_LEN: usize = 30;

/// Status filter choices as `(value, label)`; the empty value means all statuses.
pub const STATUS_FILTERS: [(&str, &str); 4] = [
    ("", "All Statuses"),
    ("pending_scan", "Pending Scan"),
    ("scanned", "Scanned"),
    ("active", "Active"),
];

/// Filters, paging and the open details panel of the business table.
#[derive(Debug, Clone, Default)]
pub struct BusinessListModel {
    search: String,
    status: String,
    pagination: Pagination,
    selected: Option<Business>,
}

impl BusinessListModel {
    pub fn query(&self) -> BusinessQuery {
        BusinessQuery {
            page: self.pagination.page(),
            per_page: PAGE_SIZE,
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            status: Some(self.status.clone()).filter(|s| !s.is_empty()),
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Each setter returns whether the listing has to be fetched again.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.search == search {
            return false;
        }
        self.search = search.to_string();
        true
    }

    pub fn set_status_filter(&mut self, status: &str) -> bool {
        if self.status == status {
            return false;
        }
        self.status = status.to_string();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev()
    }

    /// Records the page count of a fetched page; true if the cursor was clamped.
    pub fn apply(&mut self, page: &BusinessPage) -> bool {
        self.pagination.set_total_pages(page.total_pages)
    }

    /// Opens the details of `business`, or closes them if it is already open.
    pub fn toggle_details(&mut self, business: &Business) {
        if self.selected.as_ref().map(|b| b.id) == Some(business.id) {
            self.selected = None;
        } else {
            self.selected = Some(business.clone());
        }
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Business> {
        self.selected.as_ref()
    }
}

pub fn website_label(website: &str) -> String {
    metrics::truncate(website, WEBSITE_LABEL_LEN)
}

pub fn status_label(business: &Business) -> String {
    metrics::format_status(business.status.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::BusinessStatus;

    fn business(id: i64) -> Business {
        Business {
            id,
            name: format!("Business {id}"),
            website: None,
            email: None,
            phone_number: None,
            address: None,
            status: BusinessStatus::PendingScan,
            created_at: None,
            contacts: Vec::new(),
        }
    }

    #[test]
    fn query_carries_filters_and_fixed_page_size() {
        let mut model = BusinessListModel::default();
        assert!(model.set_search("bakery"));
        assert!(!model.set_search("bakery"));
        assert!(model.set_status_filter("scanned"));
        let query = model.query();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, PAGE_SIZE);
        assert_eq!(query.search.as_deref(), Some("bakery"));
        assert_eq!(query.status.as_deref(), Some("scanned"));

        assert!(model.set_status_filter(""));
        assert_eq!(model.query().status, None);
    }

    #[test]
    fn paging_follows_server_page_count() {
        let mut model = BusinessListModel::default();
        assert!(!model.next_page());
        model.apply(&BusinessPage {
            total_pages: 2,
            ..Default::default()
        });
        assert!(model.next_page());
        assert_eq!(model.query().page, 2);
        assert!(!model.next_page());
        assert!(model.prev_page());
        assert!(!model.prev_page());
    }

    #[test]
    fn details_toggle_open_and_closed() {
        let mut model = BusinessListModel::default();
        model.toggle_details(&business(1));
        assert_eq!(model.selected().map(|b| b.id), Some(1));
        model.toggle_details(&business(2));
        assert_eq!(model.selected().map(|b| b.id), Some(2));
        model.toggle_details(&business(2));
        assert!(model.selected().is_none());
    }

    #[test]
    fn long_websites_are_shortened() {
        assert_eq!(
            website_label("https://www.averyveryverylongdomain.example.com"),
            "https://www.averyveryverylongd..."
        );
        assert_eq!(website_label("https://acme.com"), "https://acme.com");
    }
}

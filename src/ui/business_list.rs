use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use outreach_dashboard::api::models::{Business, BusinessPage};
use outreach_dashboard::state::FetchState;
use outreach_dashboard::views::businesses::{self, BusinessListModel, STATUS_FILTERS};

use crate::ui::query::Query;
use crate::ui::{self, ViewContext};

const COLUMNS: [&str; 6] = ["Business Name", "Website", "Email", "Status", "Contacts", ""];

struct BusinessListPage {
    model: RefCell<BusinessListModel>,
    listing: Rc<Query<BusinessPage>>,
    found: gtk::Label,
    table: gtk::Box,
    page_label: gtk::Label,
    prev: gtk::Button,
    next: gtk::Button,
    details: gtk::Box,
}

impl BusinessListPage {
    fn refetch(&self) {
        self.listing.refetch();
    }

    fn render(self: &Rc<Self>, state: &FetchState<BusinessPage>) {
        ui::clear(&self.table);
        if state.is_loading() {
            self.table.append(&ui::loading("Loading businesses..."));
            self.prev.set_sensitive(false);
            self.next.set_sensitive(false);
            return;
        }

        let listing = state.data_or_default();
        if self.model.borrow_mut().apply(&listing) {
            // The filters shrank the result below the current page.
            self.refetch();
            return;
        }

        self.found
            .set_label(&format!("{} businesses found", listing.total_items));
        self.table.append(&self.rows(&listing.businesses));

        let model = self.model.borrow();
        let pagination = model.pagination();
        self.page_label.set_label(&pagination.label());
        self.prev.set_sensitive(pagination.can_prev());
        self.next.set_sensitive(pagination.can_next());
    }

    fn rows(self: &Rc<Self>, items: &[Business]) -> gtk::Widget {
        if items.is_empty() {
            let empty = gtk::Label::new(Some("No businesses found"));
            empty.add_css_class("dim-label");
            empty.set_margin_top(24);
            empty.set_margin_bottom(24);
            return empty.upcast();
        }

        let grid = ui::table();
        ui::attach_header(&grid, &COLUMNS);
        for (idx, business) in items.iter().enumerate() {
            let row = idx as i32 + 1;
            let website = business
                .website
                .as_deref()
                .map(businesses::website_label)
                .unwrap_or_else(|| "-".into());
            let cells = [
                business.name.clone(),
                website,
                business.email.clone().unwrap_or_else(|| "-".into()),
                businesses::status_label(business),
                business.contacts.len().to_string(),
            ];
            for (col, text) in cells.iter().enumerate() {
                let label = ui::cell(text);
                if col == 0 {
                    label.add_css_class("heading");
                }
                grid.attach(&label, col as i32, row, 1, 1);
            }

            let view = gtk::Button::from_icon_name("view-reveal-symbolic");
            view.set_tooltip_text(Some("View details"));
            view.add_css_class("flat");
            let weak = Rc::downgrade(self);
            let business = business.clone();
            view.connect_clicked(move |_| {
                if let Some(page) = weak.upgrade() {
                    page.model.borrow_mut().toggle_details(&business);
                    page.render_details();
                }
            });
            grid.attach(&view, COLUMNS.len() as i32 - 1, row, 1, 1);
        }
        grid.upcast()
    }

    fn render_details(self: &Rc<Self>) {
        ui::clear(&self.details);
        let model = self.model.borrow();
        let Some(business) = model.selected() else {
            return;
        };

        let (card, body) = ui::card(&business.name, Some("Business details and contact information"));

        let close = gtk::Button::with_label("Close");
        close.set_halign(gtk::Align::End);
        let weak = Rc::downgrade(self);
        close.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.model.borrow_mut().close_details();
                page.render_details();
            }
        });
        body.append(&close);

        let info = ui::table();
        let fields = [
            ("Website", business.website.as_deref()),
            ("Email", business.email.as_deref()),
            ("Phone", business.phone_number.as_deref()),
            ("Address", business.address.as_deref()),
        ];
        for (row, (name, value)) in fields.iter().enumerate() {
            info.attach(&ui::header_cell(name), 0, row as i32, 1, 1);
            info.attach(&ui::cell(value.unwrap_or("-")), 1, row as i32, 1, 1);
        }
        body.append(&info);

        let contacts_title = gtk::Label::new(Some("Contacts"));
        contacts_title.add_css_class("heading");
        contacts_title.set_halign(gtk::Align::Start);
        body.append(&contacts_title);

        if business.contacts.is_empty() {
            let none = gtk::Label::new(Some("No contacts found"));
            none.add_css_class("dim-label");
            none.set_halign(gtk::Align::Start);
            body.append(&none);
        }
        for contact in &business.contacts {
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            let kind = gtk::Label::new(Some(&contact.kind));
            kind.add_css_class("heading");
            row.append(&kind);
            if contact.is_primary {
                let primary = gtk::Label::new(Some("Primary"));
                primary.add_css_class("accent");
                row.append(&primary);
            }
            let value = ui::cell(&contact.value);
            value.set_hexpand(true);
            value.set_selectable(true);
            row.append(&value);
            let source = gtk::Label::new(Some(&contact.source));
            source.add_css_class("dim-label");
            row.append(&source);
            body.append(&row);
        }

        self.details.append(&card);
    }
}

pub fn build(ctx: &ViewContext) -> gtk::Widget {
    let root = ui::page_root();
    root.append(&ui::page_header(
        "Businesses",
        "Manage your business database",
        &[],
    ));

    let filters = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let search = gtk::Entry::new();
    search.set_placeholder_text(Some("Search businesses..."));
    search.set_primary_icon_name(Some("system-search-symbolic"));
    search.set_hexpand(true);
    filters.append(&search);
    let labels: Vec<&str> = STATUS_FILTERS.iter().map(|(_, label)| *label).collect();
    let status = gtk::DropDown::from_strings(&labels);
    filters.append(&status);
    root.append(&filters);

    let (list_card, list_body) = ui::card("Business List", None);
    let found = gtk::Label::new(Some("0 businesses found"));
    found.add_css_class("dim-label");
    found.set_halign(gtk::Align::Start);
    list_body.append(&found);

    let table = gtk::Box::new(gtk::Orientation::Vertical, 0);
    list_body.append(&table);

    let pager = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    let page_label = gtk::Label::new(None);
    page_label.set_hexpand(true);
    page_label.set_halign(gtk::Align::Start);
    let prev = gtk::Button::with_label("Previous");
    let next = gtk::Button::with_label("Next");
    pager.append(&page_label);
    pager.append(&prev);
    pager.append(&next);
    list_body.append(&pager);
    root.append(&list_card);

    let details = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.append(&details);

    let model = RefCell::new(BusinessListModel::default());
    let page = Rc::new_cyclic(|weak: &std::rc::Weak<BusinessListPage>| {
        let client = ctx.client.clone();
        let weak = weak.clone();
        let listing = Query::new(move || {
            let query = weak
                .upgrade()
                .map(|page| page.model.borrow().query())
                .unwrap_or_default();
            let client = client.clone();
            async move { client.businesses(&query).await }
        });
        BusinessListPage {
            model,
            listing,
            found,
            table,
            page_label,
            prev,
            next,
            details,
        }
    });

    {
        let weak = Rc::downgrade(&page);
        page.listing.subscribe(move |state| {
            if let Some(page) = weak.upgrade() {
                page.render(state);
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        search.connect_changed(move |entry| {
            if let Some(page) = weak.upgrade() {
                let changed = page.model.borrow_mut().set_search(&entry.text());
                if changed {
                    page.refetch();
                }
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        status.connect_selected_notify(move |dropdown| {
            let Some(page) = weak.upgrade() else {
                return;
            };
            let value = STATUS_FILTERS
                .get(dropdown.selected() as usize)
                .map(|(value, _)| *value)
                .unwrap_or_default();
            let changed = page.model.borrow_mut().set_status_filter(value);
            if changed {
                page.refetch();
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        page.prev.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                let moved = page.model.borrow_mut().prev_page();
                if moved {
                    page.refetch();
                }
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        page.next.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                let moved = page.model.borrow_mut().next_page();
                if moved {
                    page.refetch();
                }
            }
        });
    }

    page.refetch();
    ui::tie_to(&root, page);
    root.upcast()
}

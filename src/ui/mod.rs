pub mod analytics;
pub mod business_list;
pub mod campaign_list;
pub mod charts;
pub mod csv_upload;
pub mod dashboard;
pub mod main_window;
pub mod query;
pub mod scanner;
pub mod settings;
pub mod sidebar;

use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use outreach_dashboard::api::ApiClient;
use outreach_dashboard::routes::Route;
use outreach_dashboard::views::StatCard;

/// What every page gets when it is mounted.
#[derive(Clone)]
pub struct ViewContext {
    pub client: ApiClient,
    pub window: adw::ApplicationWindow,
    pub toasts: adw::ToastOverlay,
    pub navigate: Rc<dyn Fn(Route)>,
}

impl ViewContext {
    pub fn toast(&self, text: &str) {
        self.toasts.add_toast(adw::Toast::new(text));
    }
}

/// Keeps `owned` alive exactly as long as `widget`.
///
/// Page state is held here; signal handlers only keep `Weak` handles to it,
/// so unmounting a page frees its state and any late responses are dropped.
pub fn tie_to<T: 'static>(widget: &impl IsA<gtk::Widget>, owned: Rc<T>) {
    widget.connect_destroy(move |_| {
        let _ = &owned;
    });
}

pub fn page_root() -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 18);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root
}

pub fn page_header(title: &str, subtitle: &str, actions: &[&gtk::Button]) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let text = gtk::Box::new(gtk::Orientation::Vertical, 4);
    text.set_hexpand(true);

    let heading = gtk::Label::new(Some(title));
    heading.add_css_class("title-1");
    heading.set_halign(gtk::Align::Start);
    text.append(&heading);

    let sub = gtk::Label::new(Some(subtitle));
    sub.add_css_class("dim-label");
    sub.set_halign(gtk::Align::Start);
    text.append(&sub);

    row.append(&text);
    for button in actions {
        button.set_valign(gtk::Align::Center);
        row.append(*button);
    }
    row
}

/// A titled card; returns the card and the box to fill.
pub fn card(title: &str, description: Option<&str>) -> (gtk::Box, gtk::Box) {
    let frame = gtk::Box::new(gtk::Orientation::Vertical, 12);
    frame.add_css_class("card");
    let inner = gtk::Box::new(gtk::Orientation::Vertical, 12);
    inner.set_margin_top(16);
    inner.set_margin_bottom(16);
    inner.set_margin_start(16);
    inner.set_margin_end(16);

    let heading = gtk::Label::new(Some(title));
    heading.add_css_class("heading");
    heading.set_halign(gtk::Align::Start);
    inner.append(&heading);
    if let Some(description) = description {
        let desc = gtk::Label::new(Some(description));
        desc.add_css_class("dim-label");
        desc.set_halign(gtk::Align::Start);
        desc.set_wrap(true);
        inner.append(&desc);
    }

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    inner.append(&content);
    frame.append(&inner);
    (frame, content)
}

pub fn stat_card(stat: &StatCard) -> gtk::Widget {
    let frame = gtk::Box::new(gtk::Orientation::Vertical, 4);
    frame.add_css_class("card");
    frame.set_hexpand(true);

    let title = gtk::Label::new(Some(stat.title));
    title.add_css_class("caption-heading");
    let value = gtk::Label::new(Some(&stat.value));
    value.add_css_class("title-1");
    let description = gtk::Label::new(Some(&stat.description));
    description.add_css_class("dim-label");
    description.add_css_class("caption");

    for label in [&title, &value, &description] {
        label.set_halign(gtk::Align::Start);
        label.set_margin_start(16);
        label.set_margin_end(16);
        frame.append(label);
    }
    title.set_margin_top(16);
    description.set_margin_bottom(16);
    frame.upcast()
}

pub fn fill_stat_cards(container: &gtk::Box, cards: &[StatCard]) {
    clear(container);
    for stat in cards {
        container.append(&stat_card(stat));
    }
}

pub fn stat_row() -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    row.set_homogeneous(true);
    row
}

pub fn loading(text: &str) -> gtk::Widget {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    row.set_halign(gtk::Align::Center);
    row.set_margin_top(24);
    row.set_margin_bottom(24);
    let spinner = gtk::Spinner::new();
    spinner.start();
    row.append(&spinner);
    let label = gtk::Label::new(Some(text));
    label.add_css_class("dim-label");
    row.append(&label);
    row.upcast()
}

pub fn clear(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

/// A result panel: first line emphasised, the rest as plain lines.
pub fn alert(lines: &[String], is_error: bool) -> gtk::Widget {
    let panel = gtk::Box::new(gtk::Orientation::Vertical, 4);
    panel.add_css_class("card");
    panel.add_css_class(if is_error { "error" } else { "success" });
    for (idx, line) in lines.iter().enumerate() {
        let label = gtk::Label::new(Some(line));
        label.set_halign(gtk::Align::Start);
        label.set_wrap(true);
        label.set_margin_start(12);
        label.set_margin_end(12);
        if idx == 0 {
            label.add_css_class("heading");
            label.set_margin_top(12);
        }
        if idx + 1 == lines.len() {
            label.set_margin_bottom(12);
        }
        panel.append(&label);
    }
    panel.upcast()
}

pub fn cell(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.set_halign(gtk::Align::Start);
    label.set_ellipsize(gtk::pango::EllipsizeMode::End);
    label
}

pub fn header_cell(text: &str) -> gtk::Label {
    let label = cell(text);
    label.add_css_class("heading");
    label
}

pub fn table() -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.set_column_spacing(18);
    grid.set_row_spacing(8);
    grid
}

pub fn attach_header(grid: &gtk::Grid, headers: &[&str]) {
    for (col, text) in headers.iter().enumerate() {
        grid.attach(&header_cell(text), col as i32, 0, 1, 1);
    }
}

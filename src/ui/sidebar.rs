use gtk4::prelude::*;
use gtk4 as gtk;

use outreach_dashboard::routes::Route;

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
}

impl Sidebar {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_width_request(220);

        let title = gtk::Label::new(Some("Outreach"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        title.set_margin_bottom(8);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        list.set_selection_mode(gtk::SelectionMode::Single);
        for route in Route::ALL {
            list.append(&Self::row(route));
        }
        root.append(&list);

        Self { root, list }
    }

    fn row(route: Route) -> gtk::ListBoxRow {
        let row = gtk::ListBoxRow::new();
        let content = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        content.set_margin_top(8);
        content.set_margin_bottom(8);
        content.set_margin_start(8);
        content.set_margin_end(8);
        content.append(&gtk::Image::from_icon_name(route.icon_name()));
        let label = gtk::Label::new(Some(route.title()));
        label.set_halign(gtk::Align::Start);
        content.append(&label);
        row.set_child(Some(&content));
        row.set_tooltip_text(Some(route.path()));
        row
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Calls `on_route` when the user picks an entry.
    pub fn connect_route_activated(&self, on_route: impl Fn(Route) + 'static) {
        self.list.connect_row_activated(move |_, row| {
            if let Some(route) = usize::try_from(row.index())
                .ok()
                .and_then(|idx| Route::ALL.get(idx).copied())
            {
                on_route(route);
            }
        });
    }

    /// Highlights the entry for the mounted page.
    pub fn set_active(&self, route: Route) {
        if let Some(row) = self.list.row_at_index(route.position() as i32) {
            self.list.select_row(Some(&row));
        }
    }
}

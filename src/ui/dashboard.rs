use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use outreach_dashboard::state::FetchState;
use outreach_dashboard::views::dashboard::{self, DashboardStats, SHORTCUTS};

use crate::ui::query::Query;
use crate::ui::{self, ViewContext};

struct DashboardPage {
    cards: gtk::Box,
    stats: Rc<Query<DashboardStats>>,
}

impl DashboardPage {
    fn render(&self, state: &FetchState<DashboardStats>) {
        if state.is_loading() {
            ui::clear(&self.cards);
            self.cards.append(&ui::loading("Loading statistics..."));
            return;
        }
        ui::fill_stat_cards(&self.cards, &state.data_or_default().cards());
    }
}

pub fn build(ctx: &ViewContext) -> gtk::Widget {
    let root = ui::page_root();
    let refresh = gtk::Button::with_label("Refresh");
    root.append(&ui::page_header(
        "Dashboard",
        "Welcome to your business outreach platform",
        &[&refresh],
    ));

    let cards = ui::stat_row();
    root.append(&cards);

    let lower = gtk::Box::new(gtk::Orientation::Horizontal, 18);
    lower.set_homogeneous(true);

    let (actions, actions_body) = ui::card("Quick Actions", Some("Get started with common tasks"));
    for shortcut in &SHORTCUTS {
        let button = gtk::Button::new();
        let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
        let title = gtk::Label::new(Some(shortcut.title));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        let description = gtk::Label::new(Some(shortcut.description));
        description.add_css_class("dim-label");
        description.set_halign(gtk::Align::Start);
        text.append(&title);
        text.append(&description);
        button.set_child(Some(&text));

        let navigate = ctx.navigate.clone();
        let route = shortcut.route;
        button.connect_clicked(move |_| navigate(route));
        actions_body.append(&button);
    }
    lower.append(&actions);

    let (activity, activity_body) = ui::card("Recent Activity", Some("Latest updates from your campaigns"));
    for line in [
        "System initialized and ready for outreach",
        "Upload a CSV to add your first businesses",
    ] {
        let label = gtk::Label::new(Some(line));
        label.set_halign(gtk::Align::Start);
        label.set_wrap(true);
        activity_body.append(&label);
    }
    lower.append(&activity);
    root.append(&lower);

    let client = ctx.client.clone();
    let stats = Query::new(move || {
        let client = client.clone();
        async move { Ok(dashboard::load_stats(&client).await) }
    });

    let page = Rc::new(DashboardPage { cards, stats });
    {
        let weak = Rc::downgrade(&page);
        page.stats.subscribe(move |state| {
            if let Some(page) = weak.upgrade() {
                page.render(state);
            }
        });
    }
    {
        let weak = Rc::downgrade(&page);
        refresh.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.stats.refetch();
            }
        });
    }
    page.stats.refetch();

    ui::tie_to(&root, page);
    root.upcast()
}

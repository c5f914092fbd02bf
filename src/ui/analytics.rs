use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use log::error;

use outreach_dashboard::metrics;
use outreach_dashboard::state::FetchState;
use outreach_dashboard::views::analytics::{self, AnalyticsReport};

use crate::ui::query::Query;
use crate::ui::{self, ViewContext, charts};

const COLUMNS: [&str; 7] = ["Campaign", "Status", "Total", "Sent", "Opened", "Replied", "Success Rate"];

struct AnalyticsPage {
    ctx: ViewContext,
    report: Rc<Query<AnalyticsReport>>,
    cards: gtk::Box,
    charts: gtk::Box,
    table: gtk::Box,
    export: gtk::Button,
}

impl AnalyticsPage {
    fn render(&self, state: &FetchState<AnalyticsReport>) {
        for container in [&self.cards, &self.charts, &self.table] {
            ui::clear(container);
        }
        if state.is_loading() {
            self.cards.append(&ui::loading("Loading analytics..."));
            return;
        }

        let report = state.data_or_default();
        ui::fill_stat_cards(&self.cards, &report.cards());

        let (bars, bars_body) = ui::card("Campaign Performance", Some("Messages sent, opened, and replied by campaign"));
        bars_body.append(&charts::bar_chart(report.bars.clone()));
        bars_body.append(&charts::bar_legend());
        self.charts.append(&bars);

        let (pie, pie_body) = ui::card("Message Status Distribution", Some("Overall message delivery status"));
        let legend: Vec<(&str, metrics::Rgb)> = report.pie.iter().map(|s| (s.label, s.color)).collect();
        pie_body.append(&charts::pie_chart(report.pie.clone()));
        pie_body.append(&charts::legend(&legend));
        self.charts.append(&pie);

        if report.rows.is_empty() {
            let none = gtk::Label::new(Some("No campaign data available"));
            none.add_css_class("dim-label");
            self.table.append(&none);
            return;
        }
        let grid = ui::table();
        ui::attach_header(&grid, &COLUMNS);
        for (idx, row) in report.rows.iter().enumerate() {
            let line = idx as i32 + 1;
            let cells = [
                row.name.clone(),
                metrics::format_status(&row.status),
                row.total.to_string(),
                row.sent.to_string(),
                row.opened.to_string(),
                row.replied.to_string(),
                format!("{}%", row.success_rate),
            ];
            for (col, text) in cells.iter().enumerate() {
                grid.attach(&ui::cell(text), col as i32, line, 1, 1);
            }
        }
        self.table.append(&grid);
    }

    fn export(self: &Rc<Self>) {
        self.export.set_sensitive(false);
        let client = self.ctx.client.clone();
        let dir = crate::utils::download_dir();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { analytics::export_to(&client, &dir).await },
            move |result| {
                let Some(page) = weak.upgrade() else {
                    return;
                };
                page.export.set_sensitive(true);
                match result {
                    Ok(path) => page.ctx.toast(&format!("Exported to {}", path.display())),
                    Err(err) => {
                        error!("Error exporting analytics: {err}");
                        page.ctx.toast(&format!("Export failed: {err}"));
                    }
                }
            },
        );
    }
}

pub fn build(ctx: &ViewContext) -> gtk::Widget {
    let root = ui::page_root();
    let range = gtk::Button::with_label("Last 30 Days");
    range.set_sensitive(false);
    let export = gtk::Button::with_label("Export");
    export.set_tooltip_text(Some("Save the last 30 days as CSV"));
    root.append(&ui::page_header(
        "Analytics",
        "Track your outreach campaign performance",
        &[&range, &export],
    ));

    let cards = ui::stat_row();
    root.append(&cards);
    let chart_row = gtk::Box::new(gtk::Orientation::Horizontal, 18);
    chart_row.set_homogeneous(true);
    root.append(&chart_row);

    let (details, table) = ui::card("Campaign Details", Some("Detailed breakdown of all campaigns"));
    root.append(&details);

    let client = ctx.client.clone();
    let report = Query::new(move || {
        let client = client.clone();
        async move { analytics::load(&client).await }
    });

    let page = Rc::new(AnalyticsPage {
        ctx: ctx.clone(),
        report,
        cards,
        charts: chart_row,
        table,
        export,
    });

    {
        let weak = Rc::downgrade(&page);
        page.report.subscribe(move |state| {
            if let Some(page) = weak.upgrade() {
                page.render(state);
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        page.export.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.export();
            }
        });
    }

    page.report.refetch();
    ui::tie_to(&root, page);
    root.upcast()
}

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use outreach_dashboard::api::models::{ScanAllResponse, ScanStatus};
use outreach_dashboard::state::{ActionState, FetchState};
use outreach_dashboard::views::scanner;

use crate::ui::query::Query;
use crate::ui::{self, ViewContext};

const STEPS: [&str; 4] = [
    "Searches for the business website and social profiles",
    "Extracts contact details from the pages it finds",
    "Stores new contacts and marks the business as scanned",
    "Businesses with usable contacts become active",
];

struct ScannerPage {
    ctx: ViewContext,
    status: Rc<Query<ScanStatus>>,
    action: RefCell<ActionState<ScanAllResponse>>,
    cards: gtk::Box,
    progress: gtk::ProgressBar,
    progress_label: gtk::Label,
    caption: gtk::Label,
    scan: gtk::Button,
    note: gtk::Label,
    result: gtk::Box,
}

impl ScannerPage {
    fn render(&self, state: &FetchState<ScanStatus>) {
        if state.is_loading() {
            ui::clear(&self.cards);
            self.cards.append(&ui::loading("Loading scan status..."));
        } else {
            ui::fill_stat_cards(&self.cards, &scanner::cards(&state.data_or_default()));
        }
        self.sync();
    }

    fn sync(&self) {
        let status = self.status.snapshot().data_or_default();
        let action = self.action.borrow();

        self.progress.set_fraction(scanner::progress_fraction(&status));
        self.progress_label.set_label(&scanner::progress_label(&status));
        self.caption.set_label(&scanner::progress_caption(&status));
        self.scan.set_sensitive(scanner::can_scan(&status, &action));
        self.scan.set_label(&scanner::scan_button_label(&status, &action));
        match scanner::pending_note(&status) {
            Some(note) => {
                self.note.set_label(note);
                self.note.set_visible(true);
            }
            None => self.note.set_visible(false),
        }

        ui::clear(&self.result);
        if let Some(resp) = action.success() {
            self.result.append(&ui::alert(&scanner::success_lines(resp), false));
        } else if let Some(err) = action.failure() {
            self.result.append(&ui::alert(&[err.to_string()], true));
        }
    }

    fn scan_all(self: &Rc<Self>) {
        if !self.action.borrow_mut().start() {
            return;
        }
        self.sync();

        let client = self.ctx.client.clone();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { scanner::scan_all_pending(&client).await },
            move |result| {
                let Some(page) = weak.upgrade() else {
                    return;
                };
                page.action.borrow_mut().finish(result);
                page.status.refetch();
            },
        );
    }
}

pub fn build(ctx: &ViewContext) -> gtk::Widget {
    let root = ui::page_root();
    let refresh = gtk::Button::with_label("Refresh");
    root.append(&ui::page_header(
        "Business Scanner",
        "Discover online presence and contact information",
        &[&refresh],
    ));

    let cards = ui::stat_row();
    root.append(&cards);

    let (progress_card, progress_body) = ui::card("Scan Progress", None);
    let progress_label = gtk::Label::new(None);
    progress_label.set_halign(gtk::Align::End);
    progress_body.append(&progress_label);
    let progress = gtk::ProgressBar::new();
    progress_body.append(&progress);
    let caption = gtk::Label::new(None);
    caption.add_css_class("dim-label");
    caption.set_halign(gtk::Align::Start);
    progress_body.append(&caption);
    root.append(&progress_card);

    let (scan_card, scan_body) = ui::card(
        "Bulk Scan",
        Some("Scan every business that is still pending"),
    );
    let scan = gtk::Button::with_label("Scan Pending Businesses");
    scan.add_css_class("suggested-action");
    scan.set_halign(gtk::Align::Start);
    scan_body.append(&scan);
    let note = gtk::Label::new(None);
    note.add_css_class("dim-label");
    note.set_halign(gtk::Align::Start);
    note.set_visible(false);
    scan_body.append(&note);
    let result = gtk::Box::new(gtk::Orientation::Vertical, 0);
    scan_body.append(&result);
    root.append(&scan_card);

    let (steps_card, steps_body) = ui::card("How Scanning Works", None);
    for (idx, step) in STEPS.iter().enumerate() {
        let label = gtk::Label::new(Some(&format!("{}. {step}", idx + 1)));
        label.set_halign(gtk::Align::Start);
        label.set_wrap(true);
        steps_body.append(&label);
    }
    root.append(&steps_card);

    let client = ctx.client.clone();
    let status = Query::new(move || {
        let client = client.clone();
        async move { client.scan_status().await }
    });

    let page = Rc::new(ScannerPage {
        ctx: ctx.clone(),
        status,
        action: RefCell::new(ActionState::Idle),
        cards,
        progress,
        progress_label,
        caption,
        scan,
        note,
        result,
    });

    {
        let weak = Rc::downgrade(&page);
        page.status.subscribe(move |state| {
            if let Some(page) = weak.upgrade() {
                page.render(state);
            }
        });
    }
    {
        let weak = Rc::downgrade(&page);
        page.scan.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.scan_all();
            }
        });
    }
    {
        let weak = Rc::downgrade(&page);
        refresh.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.status.refetch();
            }
        });
    }

    page.status.refetch();
    ui::tie_to(&root, page);
    root.upcast()
}

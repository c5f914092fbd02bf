use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use log::error;

use outreach_dashboard::api::models::{CampaignPage, CampaignPreview};
use outreach_dashboard::metrics;
use outreach_dashboard::state::FetchState;
use outreach_dashboard::views::campaigns::{self, CampaignListModel, CampaignRow, PLACEHOLDERS};

use crate::ui::query::Query;
use crate::ui::{self, ViewContext};

const COLUMNS: [&str; 6] = ["Campaign", "Status", "Messages", "Success Rate", "Created", "Actions"];

struct CampaignListPage {
    ctx: ViewContext,
    model: RefCell<CampaignListModel>,
    campaigns: Rc<Query<CampaignPage>>,
    form_card: gtk::Box,
    name: gtk::Entry,
    template: gtk::TextView,
    form_error: gtk::Label,
    create: gtk::Button,
    count: gtk::Label,
    list: gtk::Box,
}

impl CampaignListPage {
    fn template_text(&self) -> String {
        let buffer = self.template.buffer();
        buffer
            .text(&buffer.start_iter(), &buffer.end_iter(), false)
            .to_string()
    }

    fn sync_form(&self) {
        let model = self.model.borrow();
        self.form_card.set_visible(model.form_visible());
        self.create.set_sensitive(model.can_create());
        self.create.set_label(if model.is_creating() {
            "Creating..."
        } else {
            "Create Campaign"
        });
        match model.form_error() {
            Some(err) => {
                self.form_error.set_label(err);
                self.form_error.set_visible(true);
            }
            None => self.form_error.set_visible(false),
        }
    }

    fn clear_inputs(&self) {
        self.name.set_text("");
        self.template.buffer().set_text("");
    }

    fn submit(self: &Rc<Self>) {
        let Some(request) = self.model.borrow_mut().begin_create() else {
            return;
        };
        self.sync_form();

        let client = self.ctx.client.clone();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { campaigns::create(&client, &request).await },
            move |result| {
                let Some(page) = weak.upgrade() else {
                    return;
                };
                if let Err(err) = &result {
                    error!("Error creating campaign: {err}");
                }
                page.model.borrow_mut().finish_create(&result);
                if result.is_ok() {
                    page.clear_inputs();
                    page.campaigns.refetch();
                }
                page.sync_form();
            },
        );
    }

    fn send(self: &Rc<Self>, campaign_id: i64, button: &gtk::Button) {
        button.set_sensitive(false);
        let client = self.ctx.client.clone();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { campaigns::send(&client, campaign_id).await },
            move |result| {
                let Some(page) = weak.upgrade() else {
                    return;
                };
                match result {
                    Ok(()) => page.ctx.toast("Campaign is sending"),
                    Err(err) => {
                        error!("Error sending campaign {campaign_id}: {err}");
                        page.ctx.toast(&format!("Failed to send campaign: {err}"));
                    }
                }
                page.campaigns.refetch();
            },
        );
    }

    fn preview(self: &Rc<Self>, campaign_id: i64) {
        let client = self.ctx.client.clone();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { campaigns::preview(&client, campaign_id).await },
            move |result| {
                let Some(page) = weak.upgrade() else {
                    return;
                };
                match result {
                    Ok(preview) => show_preview(&page.ctx.window, &preview),
                    Err(err) => {
                        error!("Error previewing campaign {campaign_id}: {err}");
                        page.ctx.toast(&format!("Failed to preview campaign: {err}"));
                    }
                }
            },
        );
    }

    fn render(self: &Rc<Self>, state: &FetchState<CampaignPage>) {
        ui::clear(&self.list);
        if state.is_loading() {
            self.list.append(&ui::loading("Loading campaigns..."));
            return;
        }

        let listing = state.data_or_default();
        self.count
            .set_label(&format!("{} campaigns created", listing.campaigns.len()));
        if listing.campaigns.is_empty() {
            self.list.append(&self.empty_state());
            return;
        }

        let grid = ui::table();
        ui::attach_header(&grid, &COLUMNS);
        for (idx, row) in campaigns::rows(&listing.campaigns).into_iter().enumerate() {
            self.attach_row(&grid, idx as i32 + 1, row);
        }
        self.list.append(&grid);
    }

    fn attach_row(self: &Rc<Self>, grid: &gtk::Grid, line: i32, row: CampaignRow) {
        let name = ui::cell(&row.name);
        name.add_css_class("heading");
        grid.attach(&name, 0, line, 1, 1);
        grid.attach(&ui::cell(&metrics::format_status(&row.status)), 1, line, 1, 1);
        grid.attach(&ui::cell(&row.messages), 2, line, 1, 1);

        let rate = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        let bar = gtk::LevelBar::for_interval(0.0, 100.0);
        bar.set_value(f64::from(row.success_rate));
        bar.set_width_request(80);
        bar.set_valign(gtk::Align::Center);
        rate.append(&bar);
        rate.append(&gtk::Label::new(Some(&format!("{}%", row.success_rate))));
        grid.attach(&rate, 3, line, 1, 1);

        grid.attach(&ui::cell(&row.created), 4, line, 1, 1);

        let actions = gtk::Box::new(gtk::Orientation::Horizontal, 4);
        let id = row.id;
        if row.can_send {
            let send = gtk::Button::from_icon_name("media-playback-start-symbolic");
            send.set_tooltip_text(Some("Send campaign"));
            let weak = Rc::downgrade(self);
            send.connect_clicked(move |button| {
                if let Some(page) = weak.upgrade() {
                    page.send(id, button);
                }
            });
            actions.append(&send);
        }
        let preview = gtk::Button::from_icon_name("view-reveal-symbolic");
        preview.set_tooltip_text(Some("Preview messages"));
        let weak = Rc::downgrade(self);
        preview.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.preview(id);
            }
        });
        actions.append(&preview);
        grid.attach(&actions, 5, line, 1, 1);
    }

    fn empty_state(self: &Rc<Self>) -> gtk::Widget {
        let empty = gtk::Box::new(gtk::Orientation::Vertical, 8);
        empty.set_halign(gtk::Align::Center);
        empty.set_margin_top(24);
        empty.set_margin_bottom(24);
        let title = gtk::Label::new(Some("No campaigns yet"));
        title.add_css_class("heading");
        let hint = gtk::Label::new(Some("Create your first outreach campaign to get started"));
        hint.add_css_class("dim-label");
        let create = gtk::Button::with_label("Create Campaign");
        create.add_css_class("suggested-action");
        let weak = Rc::downgrade(self);
        create.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.model.borrow_mut().open_form();
                page.sync_form();
            }
        });
        empty.append(&title);
        empty.append(&hint);
        empty.append(&create);
        empty.upcast()
    }
}

fn show_preview(parent: &adw::ApplicationWindow, preview: &CampaignPreview) {
    let dialog = gtk::Dialog::builder()
        .title(format!("Preview: {}", preview.campaign_name))
        .transient_for(parent)
        .modal(true)
        .default_width(560)
        .default_height(480)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    if preview.previews.is_empty() {
        let none = gtk::Label::new(Some("No businesses with matching contacts"));
        none.add_css_class("dim-label");
        content.append(&none);
    }
    for message in &preview.previews {
        let (card, body) = ui::card(
            &message.business_name,
            Some(&format!("{} • {}", message.platform, message.contact_value)),
        );
        let text = gtk::Label::new(Some(&message.personalized_message));
        text.set_wrap(true);
        text.set_selectable(true);
        text.set_halign(gtk::Align::Start);
        body.append(&text);
        content.append(&card);
    }

    let scroller = gtk::ScrolledWindow::builder()
        .vexpand(true)
        .child(&content)
        .build();
    dialog.set_child(Some(&scroller));
    let _ = dialog.add_button("Close", gtk::ResponseType::Close);
    dialog.connect_response(|dlg, _| dlg.close());
    dialog.present();
}

pub fn build(ctx: &ViewContext) -> gtk::Widget {
    let root = ui::page_root();
    let new_campaign = gtk::Button::with_label("New Campaign");
    new_campaign.add_css_class("suggested-action");
    root.append(&ui::page_header(
        "Campaigns",
        "Create and manage outreach campaigns",
        &[&new_campaign],
    ));

    let (form_card, form_body) = ui::card(
        "Create New Campaign",
        Some("Set up a new outreach campaign with personalized messaging"),
    );
    let name = gtk::Entry::new();
    name.set_placeholder_text(Some("Campaign name"));
    form_body.append(&name);

    let template = gtk::TextView::new();
    template.set_wrap_mode(gtk::WrapMode::WordChar);
    template.set_height_request(120);
    template.add_css_class("card");
    form_body.append(&template);

    let placeholders = gtk::Label::new(Some(&format!(
        "Available placeholders: {}",
        PLACEHOLDERS.join(", ")
    )));
    placeholders.add_css_class("dim-label");
    placeholders.set_halign(gtk::Align::Start);
    placeholders.set_wrap(true);
    form_body.append(&placeholders);

    let form_error = gtk::Label::new(None);
    form_error.add_css_class("error");
    form_error.set_halign(gtk::Align::Start);
    form_error.set_wrap(true);
    form_body.append(&form_error);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    buttons.set_halign(gtk::Align::End);
    let cancel = gtk::Button::with_label("Cancel");
    let create = gtk::Button::with_label("Create Campaign");
    create.add_css_class("suggested-action");
    buttons.append(&cancel);
    buttons.append(&create);
    form_body.append(&buttons);
    root.append(&form_card);

    let (list_card, list_body) = ui::card("Your Campaigns", None);
    let count = gtk::Label::new(None);
    count.add_css_class("dim-label");
    count.set_halign(gtk::Align::Start);
    list_body.append(&count);
    let list = gtk::Box::new(gtk::Orientation::Vertical, 0);
    list_body.append(&list);
    root.append(&list_card);

    let client = ctx.client.clone();
    let campaigns = Query::new(move || {
        let client = client.clone();
        async move { client.campaigns().await }
    });

    let page = Rc::new(CampaignListPage {
        ctx: ctx.clone(),
        model: RefCell::new(CampaignListModel::default()),
        campaigns,
        form_card,
        name,
        template,
        form_error,
        create,
        count,
        list,
    });
    page.sync_form();

    {
        let weak = Rc::downgrade(&page);
        page.campaigns.subscribe(move |state| {
            if let Some(page) = weak.upgrade() {
                page.render(state);
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        new_campaign.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.model.borrow_mut().open_form();
                page.sync_form();
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        cancel.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.model.borrow_mut().cancel_form();
                page.sync_form();
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        page.name.connect_changed(move |entry| {
            if let Some(page) = weak.upgrade() {
                page.model.borrow_mut().form.name = entry.text().to_string();
                page.sync_form();
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        page.template.buffer().connect_changed(move |_| {
            if let Some(page) = weak.upgrade() {
                let text = page.template_text();
                page.model.borrow_mut().form.message_template = text;
                page.sync_form();
            }
        });
    }

    {
        let weak = Rc::downgrade(&page);
        page.create.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.submit();
            }
        });
    }

    page.campaigns.refetch();
    ui::tie_to(&root, page);
    root.upcast()
}

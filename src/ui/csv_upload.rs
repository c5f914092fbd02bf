use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use gtk4::{gdk, gio};
use log::{error, info, warn};

use outreach_dashboard::metrics;
use outreach_dashboard::views::upload::{self, CSV_MIME, SelectedFile, UploadModel};

use crate::ui::{self, ViewContext};

const INSTRUCTIONS: [&str; 5] = [
    "Business Name (required)",
    "Website (optional)",
    "Email (optional)",
    "Phone Number (optional)",
    "Address (optional)",
];

struct UploadPage {
    ctx: ViewContext,
    model: RefCell<UploadModel>,
    chooser: RefCell<Option<gtk::FileChooserNative>>,
    zone: gtk::Box,
    selected: gtk::Label,
    upload: gtk::Button,
    error: gtk::Label,
    result: gtk::Box,
}

/// Reads name, size and content type of a picked or dropped file.
fn describe(file: &gio::File) -> Option<SelectedFile> {
    let path = file.path()?;
    let name = path.file_name()?.to_string_lossy().into_owned();
    let (mime, size) = match file.query_info(
        "standard::content-type,standard::size",
        gio::FileQueryInfoFlags::NONE,
        gio::Cancellable::NONE,
    ) {
        Ok(info) => (
            info.content_type().map(|t| t.to_string()),
            u64::try_from(info.size()).unwrap_or(0),
        ),
        Err(err) => {
            warn!("could not query {}: {err}", path.display());
            (None, 0)
        }
    };
    Some(SelectedFile {
        path,
        name,
        mime,
        size,
    })
}

impl UploadPage {
    fn sync(&self) {
        let model = self.model.borrow();
        match model.selected() {
            Some(file) => {
                self.selected.set_label(&format!(
                    "{} ({})",
                    file.name,
                    metrics::format_kb(file.size)
                ));
                self.selected.set_visible(true);
            }
            None => self.selected.set_visible(false),
        }

        self.upload.set_sensitive(model.can_upload());
        self.upload.set_label(if model.action().is_in_flight() {
            "Uploading..."
        } else {
            "Upload CSV"
        });

        match model.error() {
            Some(err) => {
                self.error.set_label(err);
                self.error.set_visible(true);
            }
            None => self.error.set_visible(false),
        }

        ui::clear(&self.result);
        if let Some(resp) = model.action().success() {
            self.result.append(&ui::alert(&upload::result_lines(resp), false));
        }
    }

    fn accept(&self, file: &gio::File) {
        match describe(file) {
            Some(selected) => {
                info!("selected {}", selected.path.display());
                self.model.borrow_mut().select(selected);
            }
            None => warn!("dropped item has no local path"),
        }
        self.sync();
    }

    fn choose(self: &Rc<Self>) {
        let chooser = gtk::FileChooserNative::new(
            Some("Choose CSV File"),
            Some(&self.ctx.window),
            gtk::FileChooserAction::Open,
            Some("Open"),
            Some("Cancel"),
        );
        let filter = gtk::FileFilter::new();
        filter.set_name(Some("CSV files"));
        filter.add_mime_type(CSV_MIME);
        filter.add_suffix("csv");
        chooser.add_filter(&filter);

        let weak = Rc::downgrade(self);
        chooser.connect_response(move |chooser, resp| {
            if resp == gtk::ResponseType::Accept {
                if let (Some(page), Some(file)) = (weak.upgrade(), chooser.file()) {
                    page.accept(&file);
                }
            }
            chooser.destroy();
        });
        chooser.show();
        self.chooser.replace(Some(chooser));
    }

    fn start_upload(self: &Rc<Self>) {
        let picked = self.model.borrow_mut().begin();
        self.sync();
        let Some(file) = picked else {
            return;
        };

        let client = self.ctx.client.clone();
        let weak = Rc::downgrade(self);
        crate::utils::run_async_to_main(
            async move { upload::upload(&client, &file).await },
            move |result| {
                let Some(page) = weak.upgrade() else {
                    return;
                };
                if let Err(err) = &result {
                    error!("Upload error: {err}");
                }
                page.model.borrow_mut().finish(result);
                page.sync();
            },
        );
    }

    fn download_sample(&self) {
        match upload::save_sample(&crate::utils::download_dir()) {
            Ok(path) => self.ctx.toast(&format!("Saved {}", path.display())),
            Err(err) => {
                error!("Could not save sample CSV: {err}");
                self.ctx.toast(&format!("Could not save sample: {err}"));
            }
        }
    }
}

pub fn build(ctx: &ViewContext) -> gtk::Widget {
    let root = ui::page_root();
    root.append(&ui::page_header(
        "CSV Upload",
        "Import businesses from a CSV file",
        &[],
    ));

    let (upload_card, upload_body) = ui::card(
        "Upload Business Data",
        Some("Upload a CSV file containing business information"),
    );

    let zone = gtk::Box::new(gtk::Orientation::Vertical, 8);
    zone.add_css_class("card");
    zone.set_height_request(160);
    zone.set_valign(gtk::Align::Fill);
    let icon = gtk::Image::from_icon_name("document-send-symbolic");
    icon.set_pixel_size(48);
    icon.set_margin_top(24);
    zone.append(&icon);
    zone.append(&gtk::Label::new(Some("Drop your CSV file here")));
    let or = gtk::Label::new(Some("or"));
    or.add_css_class("dim-label");
    zone.append(&or);
    let choose = gtk::Button::with_label("Choose File");
    choose.set_halign(gtk::Align::Center);
    choose.set_margin_bottom(24);
    zone.append(&choose);
    upload_body.append(&zone);

    let selected = gtk::Label::new(None);
    selected.set_halign(gtk::Align::Start);
    upload_body.append(&selected);

    let error = gtk::Label::new(None);
    error.add_css_class("error");
    error.set_halign(gtk::Align::Start);
    error.set_wrap(true);
    upload_body.append(&error);

    let upload = gtk::Button::with_label("Upload CSV");
    upload.add_css_class("suggested-action");
    upload.set_halign(gtk::Align::End);
    upload_body.append(&upload);

    let result = gtk::Box::new(gtk::Orientation::Vertical, 0);
    upload_body.append(&result);
    root.append(&upload_card);

    let (help_card, help_body) = ui::card(
        "CSV Format",
        Some("Your CSV file should include these columns"),
    );
    for line in INSTRUCTIONS {
        let label = gtk::Label::new(Some(&format!("• {line}")));
        label.set_halign(gtk::Align::Start);
        help_body.append(&label);
    }
    let sample = gtk::Button::with_label("Download Sample CSV");
    sample.set_halign(gtk::Align::Start);
    help_body.append(&sample);
    root.append(&help_card);

    let page = Rc::new(UploadPage {
        ctx: ctx.clone(),
        model: RefCell::new(UploadModel::default()),
        chooser: RefCell::new(None),
        zone,
        selected,
        upload,
        error,
        result,
    });

    let target = gtk::DropTarget::new(gio::File::static_type(), gdk::DragAction::COPY);
    {
        let weak = Rc::downgrade(&page);
        target.connect_enter(move |_, _, _| {
            if let Some(page) = weak.upgrade() {
                page.zone.add_css_class("accent");
            }
            gdk::DragAction::COPY
        });
    }
    {
        let weak = Rc::downgrade(&page);
        target.connect_leave(move |_| {
            if let Some(page) = weak.upgrade() {
                page.zone.remove_css_class("accent");
            }
        });
    }
    {
        let weak = Rc::downgrade(&page);
        target.connect_drop(move |_, value, _, _| {
            let Some(page) = weak.upgrade() else {
                return false;
            };
            page.zone.remove_css_class("accent");
            match value.get::<gio::File>() {
                Ok(file) => {
                    page.accept(&file);
                    true
                }
                Err(_) => false,
            }
        });
    }
    page.zone.add_controller(target);

    {
        let weak = Rc::downgrade(&page);
        choose.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.choose();
            }
        });
    }
    {
        let weak = Rc::downgrade(&page);
        page.upload.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.start_upload();
            }
        });
    }
    {
        let weak = Rc::downgrade(&page);
        sample.connect_clicked(move |_| {
            if let Some(page) = weak.upgrade() {
                page.download_sample();
            }
        });
    }

    page.sync();
    ui::tie_to(&root, page);
    root.upcast()
}

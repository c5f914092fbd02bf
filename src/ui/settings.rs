use std::rc::Rc;

use adw::prelude::*;
use gtk4 as gtk;
use log::{info, warn};

use outreach_dashboard::api::ApiClient;
use outreach_dashboard::config::{AppConfig, normalize_url};

/// Edits the API base address. The address is always saved; the connection check is only reported.
pub fn show_settings_dialog(
    parent: &adw::ApplicationWindow,
    toasts: &adw::ToastOverlay,
    on_saved: impl Fn(ApiClient) + 'static,
) {
    let dialog = gtk::Dialog::builder()
        .title("API Settings")
        .transient_for(parent)
        .modal(true)
        .default_width(420)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let info = gtk::Label::new(Some("Base address of the outreach API:"));
    info.set_halign(gtk::Align::Start);
    content.append(&info);

    let entry = gtk::Entry::new();
    entry.set_placeholder_text(Some("http://localhost:5000/api"));
    entry.set_text(&AppConfig::load().api_base_url);
    entry.set_hexpand(true);
    content.append(&entry);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    content.append(&status);

    dialog.set_child(Some(&content));
    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let save_btn = dialog.add_button("Save", gtk::ResponseType::Ok);
    save_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    let on_saved: Rc<dyn Fn(ApiClient)> = Rc::new(on_saved);
    let overlay = toasts.clone();
    dialog.connect_response(move |dlg, resp| {
        if resp != gtk::ResponseType::Ok {
            dlg.close();
            return;
        }

        let url = normalize_url(&entry.text());
        let client = match ApiClient::new(&url) {
            Ok(client) => client,
            Err(err) => {
                status.set_label(&format!("Invalid address: {err}"));
                return;
            }
        };

        status.set_label("Connecting…");
        save_btn.set_sensitive(false);

        let check = client.clone();
        let dlg = dlg.clone();
        let overlay = overlay.clone();
        let on_saved = on_saved.clone();
        crate::utils::run_async_to_main(async move { check.scan_status().await }, move |res| {
            let message = match res {
                Ok(_) => "Connected".to_string(),
                Err(err) if err.is_transport() => {
                    warn!("API check failed for {url}: {err}");
                    "Saved (server unreachable)".to_string()
                }
                Err(err) => {
                    warn!("API check for {url} answered with {err}");
                    format!("Saved (server replied {err})")
                }
            };
            info!("API address set to {url}: {message}");

            let config = AppConfig { api_base_url: url };
            if let Err(err) = config.save() {
                overlay.add_toast(adw::Toast::new(&format!("Failed to save settings: {err}")));
            } else {
                overlay.add_toast(adw::Toast::new(&message));
            }
            on_saved(client);
            dlg.close();
        });
    });

    dialog.present();
}

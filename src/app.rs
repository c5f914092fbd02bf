use adw::Application;
use glib::{GlibLogger, GlibLoggerDomain, GlibLoggerFormat};
use log::{info, warn};

use outreach_dashboard::api::ApiClient;
use outreach_dashboard::config::{AppConfig, DEFAULT_API_BASE_URL};

static LOGGER: GlibLogger = GlibLogger::new(GlibLoggerFormat::Plain, GlibLoggerDomain::CrateTarget);

/// Routes `log` records into GLib logging, so `G_MESSAGES_DEBUG=all` shows debug output.
pub fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}

/// Builds a client for `config`, falling back to the default address if it does not parse.
pub fn client_for(config: &AppConfig) -> ApiClient {
    match ApiClient::new(&config.api_base_url) {
        Ok(client) => client,
        Err(err) => {
            warn!("{err}; using {DEFAULT_API_BASE_URL}");
            ApiClient::new(DEFAULT_API_BASE_URL).expect("default API address parses")
        }
    }
}

pub fn build_ui(app: &Application) {
    let client = client_for(&AppConfig::load());
    info!("using API at {}", client.base_url());
    crate::ui::main_window::show_main_window(app, client);
}

mod app;
mod ui;
mod utils;

use adw::Application;
use adw::prelude::*;

fn main() -> glib::ExitCode {
    app::init_logging();
    let app = Application::builder()
        .application_id("com.example.OutreachDashboard")
        .build();
    app.connect_activate(|app| {
        crate::app::build_ui(app);
    });
    app.run()
}

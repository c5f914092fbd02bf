use std::cell::{Cell, RefCell};
use std::rc::Rc;

use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use log::{debug, info};

use outreach_dashboard::api::ApiClient;
use outreach_dashboard::routes::Route;

use crate::ui::sidebar::Sidebar;
use crate::ui::{ViewContext, analytics, business_list, campaign_list, csv_upload, dashboard, scanner};

/// Layout shell: header, sidebar and a content slot holding exactly one page.
struct Shell {
    window: adw::ApplicationWindow,
    toasts: adw::ToastOverlay,
    title: gtk::Label,
    sidebar: Sidebar,
    content: gtk::Box,
    mounted: RefCell<Option<gtk::Widget>>,
    current: Cell<Route>,
    client: RefCell<ApiClient>,
}

impl Shell {
    fn context(self: &Rc<Self>) -> ViewContext {
        let weak = Rc::downgrade(self);
        ViewContext {
            client: self.client.borrow().clone(),
            window: self.window.clone(),
            toasts: self.toasts.clone(),
            navigate: Rc::new(move |route| {
                if let Some(shell) = weak.upgrade() {
                    shell.navigate(route);
                }
            }),
        }
    }

    /// Unmounts the current page and mounts a fresh one for `route`.
    fn navigate(self: &Rc<Self>, route: Route) {
        debug!("navigate to {}", route.path());
        self.current.set(route);
        self.sidebar.set_active(route);
        self.title.set_label(route.title());

        if let Some(old) = self.mounted.take() {
            self.content.remove(&old);
        }

        let ctx = self.context();
        let page = match route {
            Route::Dashboard => dashboard::build(&ctx),
            Route::Businesses => business_list::build(&ctx),
            Route::Campaigns => campaign_list::build(&ctx),
            Route::Analytics => analytics::build(&ctx),
            Route::Upload => csv_upload::build(&ctx),
            Route::Scanner => scanner::build(&ctx),
        };

        let scroller = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .vexpand(true)
            .hexpand(true)
            .child(&page)
            .build();
        self.content.append(&scroller);
        self.mounted.replace(Some(scroller.upcast()));
    }

    fn set_client(self: &Rc<Self>, client: ApiClient) {
        info!("remounting against {}", client.base_url());
        self.client.replace(client);
        self.navigate(self.current.get());
    }
}

pub fn show_main_window(app: &Application, client: ApiClient) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Business Outreach")
        .default_width(1200)
        .default_height(800)
        .build();

    let overlay = adw::ToastOverlay::new();

    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Sidebar::new();
    split.set_flap(Some(&sidebar.widget()));

    let content = gtk::Box::new(gtk::Orientation::Vertical, 0);
    split.set_content(Some(&content));

    overlay.set_child(Some(&split));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(None);
    title.add_css_class("title");
    header.set_title_widget(Some(&title));

    let settings_btn = gtk::Button::from_icon_name("emblem-system-symbolic");
    settings_btn.set_tooltip_text(Some("API settings"));
    header.pack_end(&settings_btn);

    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let shell = Rc::new(Shell {
        window: window.clone(),
        toasts: overlay.clone(),
        title,
        sidebar,
        content,
        mounted: RefCell::new(None),
        current: Cell::new(Route::Dashboard),
        client: RefCell::new(client),
    });

    {
        let weak = Rc::downgrade(&shell);
        shell.sidebar.connect_route_activated(move |route| {
            if let Some(shell) = weak.upgrade() {
                shell.navigate(route);
            }
        });
    }

    {
        let weak = Rc::downgrade(&shell);
        settings_btn.connect_clicked(move |_| {
            let Some(shell) = weak.upgrade() else {
                return;
            };
            let on_saved = {
                let weak = Rc::downgrade(&shell);
                move |client: ApiClient| {
                    if let Some(shell) = weak.upgrade() {
                        shell.set_client(client);
                    }
                }
            };
            crate::ui::settings::show_settings_dialog(&shell.window, &shell.toasts, on_saved);
        });
    }

    crate::ui::tie_to(&window, shell.clone());
    shell.navigate(Route::from_path("/").unwrap_or(Route::Dashboard));
    window.present();
}

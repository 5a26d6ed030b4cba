//! # benchhub-dashboard
//!
//! Browser adapter for the dashboard pages, compiled to WASM.
//!
//! ## Responsibilities
//! - Implement the app ports on top of `web-sys` and `gloo`
//!   ([`platform`], [`transport`])
//! - Bridge server-rendered forms to the domain model ([`dom`])
//! - Wire DOM events to the app services ([`bindings`])
//! - Load configuration and install console logging at start-up
//! - Render the theme toggle ([`components`])

use std::rc::Rc;

use benchhub_app::config::DashboardConfig;
use benchhub_app::services::button_action::ButtonActionController;
use benchhub_app::services::interceptor::{AuthInterceptor, AuthorizedTransport};
use benchhub_app::services::name_check::NameValidator;
use benchhub_app::services::page_guard::PageGuard;
use benchhub_app::services::submission::SubmissionController;
use benchhub_app::services::theme_service::ThemeService;
use benchhub_app::services::token_accessor::TokenAccessor;
use wasm_bindgen::prelude::*;

pub mod bindings;
mod components;
pub mod config;
pub mod dom;
pub mod logging;
pub mod platform;
pub mod transport;

use platform::{BrowserCredentials, BrowserWindow, GlooTimer, LocalPreferences};
use transport::GlooTransport;

/// The page's single transport: every request passes the credential interceptor.
pub type PageTransport = AuthorizedTransport<GlooTransport, BrowserCredentials>;

pub type Submissions =
    SubmissionController<BrowserCredentials, Rc<PageTransport>, BrowserWindow, GlooTimer>;

pub type NameChecks = NameValidator<Rc<PageTransport>>;

/// Services shared by every event handler on the page.
pub struct Dashboard {
    pub config: DashboardConfig,
    pub tokens: TokenAccessor<BrowserCredentials>,
    pub browser: BrowserWindow,
    pub timer: GlooTimer,
    pub names: NameChecks,
    pub submissions: Submissions,
    pub buttons: ButtonActionController<BrowserCredentials, Rc<PageTransport>, BrowserWindow>,
    pub theme: ThemeService<LocalPreferences>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let tokens = TokenAccessor::new(BrowserCredentials, config.credential.clone());
        let transport = Rc::new(AuthorizedTransport::new(
            GlooTransport,
            AuthInterceptor::new(tokens.clone()),
        ));
        Self {
            names: NameValidator::new(Rc::clone(&transport)),
            submissions: SubmissionController::new(
                tokens.clone(),
                Rc::clone(&transport),
                BrowserWindow,
                GlooTimer,
                config.clone(),
            ),
            buttons: ButtonActionController::new(
                tokens.clone(),
                transport,
                BrowserWindow,
                config.clone(),
            ),
            theme: ThemeService::new(LocalPreferences, config.theme.clone()),
            tokens,
            browser: BrowserWindow,
            timer: GlooTimer,
            config,
        }
    }
}

/// Entry point, run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = config::load();
    logging::init(&config.logging);

    let dashboard = Rc::new(Dashboard::new(config));

    let guard = PageGuard::new(
        dashboard.tokens.clone(),
        BrowserWindow,
        dashboard.config.routes.clone(),
    );
    if !guard.check() {
        return;
    }

    components::theme_toggle::init(&dashboard.theme);
    bindings::bind_all(&dashboard);
    tracing::debug!("dashboard bindings installed");
}

//! # PayAuth Headless Driver
//!
//! Runs the full session/payment correlation flow against a live payment
//! API, emulating the two page loads a browser would perform. Useful for
//! smoke-testing an API deployment without a browser.
//!
//! ## Usage
//!
//! ```bash
//! export PAYAUTH_BASE_URL=http://localhost:5000
//! export PAYAUTH_USER_ID=u1
//! export PAYAUTH_PASSWORD=p1
//!
//! payauth http://localhost:5000/payments/PID123/authorize/request
//! ```

use anyhow::{bail, Context};
use payauth_core::{
    AuthorizeController, AuthorizeOutcome, Credentials, InitOutcome, LoginController,
    LoginOutcome, MemoryStore, Navigator, PaymentGateway, SessionStore, BoxedGateway,
    BoxedNavigator, BoxedStore, SUCCESS_MESSAGES, TOKEN_COOKIE,
};
use payauth_http::{load_config, HttpGateway};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Navigator that records where the browser would have gone
struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn assign(&self, url: &str) {
        info!("→ navigate: {}", url);
    }

    fn replace(&self, url: &str) {
        info!("→ navigate (replace): {}", url);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let href = std::env::args()
        .nth(1)
        .context("usage: payauth <authorize-page-url>")?;

    let config = load_config()?;
    info!("Payment API: {}", config.api_base_url);

    let gateway: BoxedGateway = Arc::new(HttpGateway::new(&config));
    let store: BoxedStore = MemoryStore::shared();
    let navigator: BoxedNavigator = Arc::new(LoggingNavigator);

    // Diagnostic reachability probe; not fatal.
    match gateway.check_connection().await {
        Ok(status) => info!("API connection status: {}", status),
        Err(err) => warn!("API connection check failed: {}", err),
    }

    // First authorize-page load.
    let mut authorize_page = AuthorizeController::new(
        config.clone(),
        Arc::clone(&store),
        Arc::clone(&gateway),
        Arc::clone(&navigator),
    );

    if let InitOutcome::RedirectedToLogin(login_page_url) = authorize_page.initialize(&href) {
        info!("no session, logging in via {}", login_page_url);

        let credentials = credentials_from_env();
        let mut login_page = LoginController::new(
            config.clone(),
            Arc::clone(&store),
            Arc::clone(&gateway),
            Arc::clone(&navigator),
        );

        let return_url = match login_page.submit(&credentials).await {
            LoginOutcome::Redirected(url) => url,
            LoginOutcome::Skipped => {
                bail!("PAYAUTH_USER_ID and PAYAUTH_PASSWORD must both be set and non-empty")
            }
            outcome => bail!("login failed: {:?}", outcome),
        };

        // Diagnostic token probe, mirroring the legacy page's checker.
        let token = store.read(TOKEN_COOKIE);
        if let Ok(text) = gateway.check_token(&token).await {
            info!("token check: {}", text);
        }

        // Second authorize-page load, now carrying the session.
        authorize_page = AuthorizeController::new(
            config.clone(),
            Arc::clone(&store),
            Arc::clone(&gateway),
            Arc::clone(&navigator),
        );
        if authorize_page.initialize(&return_url) != InitOutcome::Ready {
            bail!("login did not produce a usable session");
        }
    }

    match authorize_page.authorize().await {
        AuthorizeOutcome::Authorized => {
            for message in SUCCESS_MESSAGES {
                println!("{}", message);
            }
            Ok(())
        }
        AuthorizeOutcome::Rejected(status) => {
            bail!("authorization rejected with status {}", status)
        }
        outcome => bail!("authorization failed: {:?}", outcome),
    }
}

fn credentials_from_env() -> Credentials {
    // Empty values are allowed here; the controller suppresses the
    // request for incomplete credentials.
    Credentials::new(
        std::env::var("PAYAUTH_USER_ID").unwrap_or_default(),
        std::env::var("PAYAUTH_PASSWORD").unwrap_or_default(),
    )
}

fn print_banner() {
    println!(
        r#"
  💳 PayAuth RS
  ━━━━━━━━━━━━━
  Session/payment correlation driver
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

//! Bistro CLI - order food, book tables and run the restaurant.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is kept in BISTRO_TOKEN_PATH)
//! bistro login -e kim@example.com -p hunter2
//!
//! # Browse and order
//! bistro menu --category Burgers
//! bistro order --item 4x2 --custom-combo 1 --side onion_rings --coupon save20 --type pickup
//! bistro orders
//!
//! # Admin console
//! bistro admin orders
//! bistro admin order-status 17 preparing
//! bistro admin sales --period week
//! ```
//!
//! # Environment Variables
//!
//! - `BISTRO_API_URL` - Base URL of the REST API
//! - `BISTRO_TOKEN_PATH` - File holding the session token
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)
//! - `RUST_LOG` - Log filter (default: `bistro_client=info,bistro_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

mod commands;
mod error;
mod output;

use bistro_client::ClientConfig;
use bistro_core::MenuItemId;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::App;
use error::CliError;

#[derive(Parser)]
#[command(name = "bistro")]
#[command(author, version, about = "Bistro ordering client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login(commands::account::LoginArgs),
    /// Create an account
    Register(commands::account::RegisterArgs),
    /// Log out and forget the session
    Logout,
    /// Show who is logged in
    Whoami,
    /// List the menu
    Menu(commands::browse::MenuArgs),
    /// Show one menu item with its reviews
    Item {
        id: MenuItemId,
    },
    /// List active categories
    Categories,
    /// List combo deals
    Combos(commands::browse::CombosArgs),
    /// Price a customized combo
    ComboPrice(commands::browse::ComboPriceArgs),
    /// Build a cart and place an order
    Order(commands::order::OrderArgs),
    /// Show your order history
    Orders,
    /// Book a table
    Reserve(commands::reservations::ReserveArgs),
    /// Review a menu item or combo
    Review(commands::reviews::ReviewArgs),
    /// List all reviews
    Reviews,
    /// Admin console
    Admin {
        #[command(subcommand)]
        command: commands::admin::AdminCommand,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::notice(format_args!("Configuration error: {e}"));
            std::process::exit(1);
        }
    };

    // Sentry goes first so the tracing layer has a client to report to
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bistro_client=info,bistro_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!(error = %e, "Command failed");
        output::notice(e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), CliError> {
    let app = App::connect(config).await?;

    match cli.command {
        Commands::Login(args) => commands::account::login(&app, args).await,
        Commands::Register(args) => commands::account::register(&app, args).await,
        Commands::Logout => {
            commands::account::logout(&app).await;
            Ok(())
        }
        Commands::Whoami => {
            commands::account::whoami(&app);
            Ok(())
        }
        Commands::Menu(args) => commands::browse::menu(&app, &args).await,
        Commands::Item { id } => commands::browse::item(&app, id).await,
        Commands::Categories => commands::browse::categories(&app).await,
        Commands::Combos(args) => commands::browse::combos(&app, &args).await,
        Commands::ComboPrice(args) => commands::browse::combo_price(&app, &args).await,
        Commands::Order(args) => commands::order::place(&app, args).await,
        Commands::Orders => commands::order::history(&app).await,
        Commands::Reserve(args) => commands::reservations::reserve(&app, args).await,
        Commands::Review(args) => commands::reviews::review(&app, args).await,
        Commands::Reviews => commands::reviews::list(&app).await,
        Commands::Admin { command } => commands::admin::run(&app, command).await,
    }
}

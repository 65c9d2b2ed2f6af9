//! `dashboard` command-line driver.
//!
//! ```text
//! dashboard whoami
//! dashboard services
//! dashboard orders [page]
//! dashboard transactions [page]
//! dashboard pay <amount>
//! ```
//!
//! Signs in with `DASHBOARD_USER`/`DASHBOARD_PASSWORD` when no session cookie
//! is active. Toasts raised along the way are printed after each command.

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dashboard::app::App;
use dashboard::config::Config;
use dashboard::core::Result;
use dashboard::debug;
use shared::{format_rupees, truncate_id, ServiceCatalogEntry};

/// OrderHub dashboard client
#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "OrderHub reseller dashboard client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Show the signed-in user and wallet balance
    Whoami,
    /// List the service catalog (admin) or orderable services (user)
    Services,
    /// List orders up to the given page
    Orders {
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// List wallet transactions up to the given page
    Transactions {
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Start a mock payment and wait for it to settle
    Pay {
        /// Amount in rupees
        amount: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();

    let _log_guard = match debug::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {}", e.user_message());
            None
        }
    };
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;

    let mut app = App::with_client(config)?;
    let session = app.init_session().await;

    if !session.is_authenticated {
        if let (Ok(user), Ok(password)) = (env::var("DASHBOARD_USER"), env::var("DASHBOARD_PASSWORD")) {
            let result = app.login(&user, &password).await;
            print_notifications(&mut app);
            result?;
        }
    }

    let result = execute(&mut app, command).await;
    app.process_events().await;
    print_notifications(&mut app);
    result
}

async fn execute(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Whoami => {
            let session = app.session.require(None)?;
            println!(
                "{} ({}) wallet {}",
                session.user.id,
                session.user.role.map(|role| role.as_str()).unwrap_or("unknown"),
                format_rupees(session.user.wallet)
            );
        }
        Command::Services => {
            let session = app.session.require(None)?;
            if session.is_admin() {
                app.catalog.load().await?;
                print_services(app.catalog.entries());
            } else {
                app.order_form.load_services().await?;
                print_services(app.order_form.services());
            }
        }
        Command::Orders { page } => {
            app.load_orders().await?;
            while app.orders().page() < page && app.orders().has_more() {
                app.load_more_orders().await?;
            }
            for card in app.order_cards() {
                let order = card.order();
                println!(
                    "#{:<10} {:<24} qty {:<8} {:<12} start {:<8} refill: {}",
                    order.order_id,
                    order.service,
                    order.quantity,
                    card.displayed_status(),
                    card.displayed_start_count(),
                    card.refill_label()
                );
            }
            if app.orders().has_more() {
                println!("(more available: dashboard orders {})", app.orders().page() + 1);
            }
        }
        Command::Transactions { page } => {
            app.load_transactions().await?;
            while app.transactions().page() < page && app.transactions().has_more() {
                app.load_more_transactions().await?;
            }
            for tx in app.transactions().items() {
                println!(
                    "{:<17} {:<8} {:>12} {:<10} {}",
                    tx.date
                        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                    tx.kind.as_deref().unwrap_or("-"),
                    format_rupees(tx.amount),
                    tx.status.as_deref().unwrap_or("-"),
                    tx.order_id.as_deref().map(truncate_id).unwrap_or_default()
                );
            }
        }
        Command::Pay { amount } => {
            app.session.require(None)?;
            let transaction_id = app.payment.initiate(&amount).await?;
            print_notifications_after(app).await;
            println!("Waiting for payment {} to settle...", transaction_id);
            let status = app.payment.wait_for_settlement().await;
            println!("Payment {}: {}", transaction_id, status);
        }
    }
    Ok(())
}

fn print_services(services: &[ServiceCatalogEntry]) {
    for service in services {
        println!(
            "{:<48} {:>10} per 1k  [{} - {}]{}",
            service.label(),
            format_rupees(service.rate),
            service.min,
            service.max,
            if service.refill { "  refill" } else { "" }
        );
    }
}

async fn print_notifications_after(app: &mut App) {
    app.process_events().await;
    print_notifications(app);
}

fn print_notifications(app: &mut App) {
    for notification in app.notifications.drain() {
        println!("[{}] {}", notification.level.as_str(), notification.message);
    }
}

mod cli;
mod commands;
mod config;
mod observability;
mod output;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use hms_client::{ClientConfig, FileSessionStore, Gateway, GatewayError, Session};

use cli::{Cli, Commands};
use output::print_error;
use terminal::{TerminalNotifier, reporting_router};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Gateway failures were already shown as notifications.
        let notified = e
            .downcast_ref::<GatewayError>()
            .is_some_and(GatewayError::is_notified);
        if !notified {
            print_error(&format!("{e:#}"));
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let client_cfg = hms_client::load_config(cli.config.as_deref())
        .context("Failed to load client configuration")?;
    observability::init_tracing(&client_cfg.logging.level);

    let profile = &cli.profile;
    let profile_cfg = config::load_profile(profile)?;
    let format = match cli.format {
        Some(f) => f,
        None => profile_cfg.output_format()?.unwrap_or_default(),
    };
    let server = config::resolve_server(cli.server.as_deref(), &profile_cfg, &client_cfg);
    let store = FileSessionStore::for_profile(profile)?;
    tracing::debug!(%profile, %server, session_file = %store.path().display(), "resolved profile");
    let session = Arc::new(Session::new(store));

    match &cli.command {
        Commands::Login(args) => commands::session::login(&session, &server, &args.token)?,
        Commands::Logout => commands::session::logout(&session, profile)?,
        Commands::Whoami => commands::session::whoami(&session, profile, &server)?,
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Server".cyan(),
                    profile_cfg.server.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "{}: {}",
                    "Format".cyan(),
                    profile_cfg.format.as_deref().unwrap_or("json")
                );
                println!("{}: {}", "Effective server".cyan(), server);
                println!("{}: {}ms", "Timeout".cyan(), client_cfg.timeout_ms);
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = profile_cfg.clone();
                cfg.set(&set_args.key, &set_args.value)?;
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
        Commands::Route(args) => commands::route::resolve(&args.path, format)?,
        Commands::Patient(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::records::run(gateway.patients(), "patient", &args.command, format).await?;
        }
        Commands::Doctor(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::records::run(gateway.doctors(), "doctor", &args.command, format).await?;
        }
        Commands::Department(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::records::run(gateway.departments(), "department", &args.command, format)
                .await?;
        }
        Commands::Ward(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::records::run(gateway.wards(), "ward", &args.command, format).await?;
        }
        Commands::Visit(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::clinical::visit(&gateway, &args.command, format).await?;
        }
        Commands::Admission(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::clinical::admission(&gateway, &args.command, format).await?;
        }
        Commands::Report(args) => {
            let gateway = make_gateway(client_cfg, &server, session)?;
            commands::report::run(&gateway, &args.command, format).await?;
        }
    }

    Ok(())
}

fn make_gateway(config: ClientConfig, server: &str, session: Arc<Session>) -> Result<Gateway> {
    Gateway::builder(config.with_base_url(server))
        .session(session)
        .notifier(Arc::new(TerminalNotifier))
        .navigator(reporting_router())
        .build()
        .with_context(|| format!("Invalid server URL: {server}"))
}

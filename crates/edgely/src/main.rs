mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use edgely_api::EdgeClient;

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;
    match command {
        // Local commands that never touch the router
        Command::Profile(cmd) => commands::profile(cmd, &global),

        Command::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "edgely", &mut std::io::stdout());
            Ok(())
        }

        command => {
            let client = connect(&global).await?;
            let result = dispatch(command, &client, global.output).await;
            client.close().await;
            result
        }
    }
}

async fn dispatch(
    command: Command,
    client: &EdgeClient,
    output: OutputFormat,
) -> Result<(), CliError> {
    match command {
        Command::Config(cmd) => commands::config_cmd::handle(cmd, client, output).await,
        Command::Op(cmd) => commands::system::handle(cmd, client).await,
        Command::Heartbeat => commands::system::heartbeat(client).await,
        Command::Profile(_) | Command::Completions { .. } => unreachable!("handled in run"),
    }
}

/// Resolve the target router, obtain a password, and log in.
async fn connect(global: &cli::GlobalOpts) -> Result<EdgeClient, CliError> {
    let config = config::load_config_or_default()?;
    let resolved = config::resolve(global, &config)?;

    let password = match resolved.password {
        Some(ref password) => password.clone(),
        None => SecretString::from(rpassword::prompt_password(format!(
            "password for {}@{}: ",
            resolved.username, resolved.url
        ))?),
    };

    let client = EdgeClient::new(resolved.url.clone(), &resolved.transport)
        .map_err(|e| CliError::from_api(e, &resolved.url))?;

    client
        .login(&resolved.username, &password)
        .await
        .map_err(|e| CliError::from_api(e, &resolved.url))?;

    Ok(client)
}

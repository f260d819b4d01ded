// `edgely config ...` -- configuration tree commands.
//
// Reads print the returned subtree as JSON in the selected output
// format; writes report the router's verdict and surface per-node
// validation messages.

use serde_json::Value;
use tracing::debug;

use edgely_api::{BatchEntry, ConfigResponse, EdgeClient};

use crate::cli::{ConfigCmd, OutputFormat};
use crate::error::CliError;

pub async fn handle(
    cmd: ConfigCmd,
    client: &EdgeClient,
    output: OutputFormat,
) -> Result<(), CliError> {
    debug!("running config command: {cmd:?}");
    match cmd {
        ConfigCmd::Show => print_subtree(client.config_get().await?, output),

        ConfigCmd::Tree { path } => print_subtree(client.config_get_tree(&path).await?, output),

        ConfigCmd::Partial { skeleton } => {
            let skeleton: Value = serde_json::from_str(&skeleton)?;
            print_subtree(client.config_partial(&skeleton).await?, output)
        }

        ConfigCmd::Set { document } => {
            let document: Value = serde_json::from_str(&document)?;
            report(client.config_set(&document).await?)
        }

        ConfigCmd::Delete { document } => {
            let document: Value = serde_json::from_str(&document)?;
            report(client.config_delete(&document).await?)
        }

        ConfigCmd::Batch { file } => {
            let text = std::fs::read_to_string(file)?;
            let entries: Vec<BatchEntry> = serde_json::from_str(&text)?;
            report(client.config_batch(&entries).await?)
        }
    }
}

fn print_subtree(resp: Option<ConfigResponse>, output: OutputFormat) -> Result<(), CliError> {
    match resp.and_then(|r| r.data) {
        Some(data) => match output {
            OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&data)?),
            OutputFormat::Json => println!("{}", serde_json::to_string(&data)?),
        },
        None => println!("(no data returned)"),
    }
    Ok(())
}

fn report(resp: Option<ConfigResponse>) -> Result<(), CliError> {
    match resp {
        Some(resp) if resp.is_success() => {
            println!("ok");
            Ok(())
        }
        Some(resp) => {
            if let Some(errors) = &resp.errors {
                for (path, message) in errors {
                    eprintln!("{path}: {message}");
                }
            }
            Err(CliError::Rejected)
        }
        // The router answered with no body at all; the commit went through.
        None => {
            println!("ok (no response body)");
            Ok(())
        }
    }
}

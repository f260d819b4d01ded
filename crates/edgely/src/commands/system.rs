// `edgely op ...` and `edgely heartbeat` -- system operations.

use tracing::debug;

use edgely_api::{ConfigResponse, EdgeClient};

use crate::cli::OpCmd;
use crate::error::CliError;

pub async fn handle(cmd: OpCmd, client: &EdgeClient) -> Result<(), CliError> {
    debug!("running system operation: {cmd:?}");
    match cmd {
        OpCmd::Reboot => done(client.reboot().await?),
        OpCmd::Shutdown => done(client.shutdown().await?),
        OpCmd::FactoryReset { yes } => {
            if !yes {
                return Err(CliError::ConfirmationRequired(
                    "factory reset wipes the router's configuration",
                ));
            }
            done(client.factory_reset().await?)
        }
        OpCmd::DhcpRelease { interface } => done(client.dhcp_release(&interface).await?),
        OpCmd::DhcpRenew { interface } => done(client.dhcp_renew(&interface).await?),
        OpCmd::ClearTraffic => done(client.clear_traffic_analysis().await?),
        OpCmd::CheckFirmware => done(client.check_firmware().await?),
    }
}

pub async fn heartbeat(client: &EdgeClient) -> Result<(), CliError> {
    client.heartbeat().await?;
    println!("heartbeat ok");
    Ok(())
}

fn done(resp: Option<ConfigResponse>) -> Result<(), CliError> {
    match resp {
        Some(resp) if resp.failure => Err(CliError::Rejected),
        _ => {
            println!("ok");
            Ok(())
        }
    }
}

// System operation endpoints
//
// Fixed-path POSTs under `/api/edge/operation/`, each a zero-payload
// specialization of the mutating-call contract: CSRF header attached,
// optional form body, `ConfigResponse` (or nothing) back. Not a
// separate protocol from set/delete/batch.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::EdgeClient;
use crate::error::Error;
use crate::models::ConfigResponse;

impl EdgeClient {
    /// Reboot the router. `POST /api/edge/operation/reboot.json`
    pub async fn reboot(&self) -> Result<Option<ConfigResponse>, Error> {
        self.operation("reboot.json", &[]).await
    }

    /// Power the router down. `POST /api/edge/operation/shutdown.json`
    pub async fn shutdown(&self) -> Result<Option<ConfigResponse>, Error> {
        self.operation("shutdown.json", &[]).await
    }

    /// Wipe the configuration back to factory defaults.
    ///
    /// `POST /api/edge/operation/factory-reset.json`
    pub async fn factory_reset(&self) -> Result<Option<ConfigResponse>, Error> {
        self.operation("factory-reset.json", &[]).await
    }

    /// Release the DHCP lease on `interface`.
    ///
    /// `POST /api/edge/operation/release-dhcp.json`
    pub async fn dhcp_release(&self, interface: &str) -> Result<Option<ConfigResponse>, Error> {
        self.operation("release-dhcp.json", &[("interface", interface)])
            .await
    }

    /// Renew the DHCP lease on `interface`.
    ///
    /// `POST /api/edge/operation/renew-dhcp.json`
    pub async fn dhcp_renew(&self, interface: &str) -> Result<Option<ConfigResponse>, Error> {
        self.operation("renew-dhcp.json", &[("interface", interface)])
            .await
    }

    /// Drop accumulated deep-packet-inspection counters.
    ///
    /// `POST /api/edge/operation/clear-traffic-analysis.json`
    pub async fn clear_traffic_analysis(&self) -> Result<Option<ConfigResponse>, Error> {
        self.operation("clear-traffic-analysis.json", &[]).await
    }

    /// Ask the router to refresh its view of the latest firmware.
    ///
    /// `POST /api/edge/operation/refresh-fw-latest-status.json`
    pub async fn check_firmware(&self) -> Result<Option<ConfigResponse>, Error> {
        self.operation("refresh-fw-latest-status.json", &[]).await
    }

    /// Change a local user's password.
    ///
    /// `POST /api/edge/auth.json` with a form body; same CSRF contract
    /// as the operation endpoints.
    pub async fn set_password(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<ConfigResponse>, Error> {
        debug!("changing password for {username}");
        self.post_form(
            self.api_url("auth.json"),
            &[("username", username), ("password", password.expose_secret())],
        )
        .await
    }

    async fn operation(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<Option<ConfigResponse>, Error> {
        debug!("running operation {endpoint}");
        self.post_form(self.api_url(&format!("operation/{endpoint}")), form)
            .await
    }
}

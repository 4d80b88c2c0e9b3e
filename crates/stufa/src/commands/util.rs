//! Shared helpers for command handlers.

use stufa_api::CloudClient;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Build a client from the resolved settings and connect it: login plus
/// roster load.
pub async fn connect(global: &GlobalOpts) -> Result<CloudClient, CliError> {
    let settings = config::resolve(global)?;
    let mut client = match settings.base_url {
        Some(base_url) => CloudClient::with_base_url(
            settings.credentials,
            base_url,
            &settings.transport,
        )?,
        None => CloudClient::new(settings.credentials, &settings.transport)?,
    };
    client.connect().await?;
    Ok(client)
}

/// Resolve an optional device selector (serial or MAC) to a MAC address.
///
/// With no selector, a single-stove account picks its only stove; anything
/// else needs an explicit choice.
pub fn resolve_mac(client: &CloudClient, identifier: Option<&str>) -> Result<String, CliError> {
    match identifier {
        Some(identifier) => client
            .device(identifier)
            .map(|d| d.mac.clone())
            .ok_or_else(|| CliError::DeviceNotFound {
                identifier: identifier.to_owned(),
            }),
        None => match client.devices() {
            [] => Err(CliError::NoDevices),
            [only] => Ok(only.mac.clone()),
            devices => Err(CliError::AmbiguousDevice {
                count: devices.len(),
            }),
        },
    }
}

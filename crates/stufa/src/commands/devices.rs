//! Device roster command handler.

use tabled::Tabled;

use stufa_api::{Device, RegisterKey};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            serial: d.id.clone(),
            name: d.name.clone().unwrap_or_default(),
            model: d.model_code.clone().unwrap_or_default(),
            mac: d.mac.clone(),
            state: d
                .value_description(RegisterKey::MachineState)
                .unwrap_or_else(|| "-".into()),
        }
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let client = util::connect(global).await?;

    let rendered = output::render_list(
        &global.output,
        client.devices(),
        |d| DeviceRow::from(d),
        |d| d.id.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

//! State read command handlers: `status` (all registers) and `get` (one).

use serde::Serialize;
use tabled::Tabled;

use stufa_api::{CloudClient, Device, RegisterKey};

use crate::cli::{GetArgs, GlobalOpts, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Rows ────────────────────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct RegisterReading {
    #[tabled(rename = "Register")]
    register: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Serialize)]
struct SingleReading {
    register: String,
    value: String,
    description: String,
    min: Option<i64>,
    max: Option<i64>,
}

fn readings(device: &Device) -> Vec<RegisterReading> {
    RegisterKey::ALL
        .iter()
        .map(|&key| RegisterReading {
            register: key.to_string(),
            value: device
                .value(key)
                .map_or_else(|| "-".into(), ToString::to_string),
            description: device.value_description(key).unwrap_or_else(|| "-".into()),
        })
        .collect()
}

async fn fetch_device(
    client: &mut CloudClient,
    identifier: Option<&str>,
) -> Result<String, CliError> {
    let mac = util::resolve_mac(client, identifier)?;
    client.update_device(&mac).await?;
    Ok(mac)
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_status(args: StatusArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut client = util::connect(global).await?;
    let mac = fetch_device(&mut client, args.device.as_deref()).await?;
    let device = client
        .device(&mac)
        .ok_or_else(|| CliError::DeviceNotFound { identifier: mac })?;

    let rows = readings(device);
    let rendered = output::render_list(
        &global.output,
        &rows,
        Clone::clone,
        |r| format!("{}\t{}", r.register, r.value),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn handle_get(args: GetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let key = RegisterKey::parse(&args.register)?;

    let mut client = util::connect(global).await?;
    let mac = fetch_device(&mut client, args.device.as_deref()).await?;
    let device = client
        .device(&mac)
        .ok_or_else(|| CliError::DeviceNotFound { identifier: mac })?;

    let reading = SingleReading {
        register: key.to_string(),
        value: device
            .value(key)
            .map_or_else(|| "-".into(), ToString::to_string),
        description: device.value_description(key).unwrap_or_else(|| "-".into()),
        min: device.value_min(key),
        max: device.value_max(key),
    };

    let rendered = output::render_single(
        &global.output,
        &reading,
        |r| {
            let mut lines = vec![
                format!("Register:    {}", r.register),
                format!("Value:       {}", r.value),
                format!("Description: {}", r.description),
            ];
            if let (Some(min), Some(max)) = (r.min, r.max) {
                lines.push(format!("Range:       {min}..={max}"));
            }
            lines.join("\n")
        },
        |r| r.value.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

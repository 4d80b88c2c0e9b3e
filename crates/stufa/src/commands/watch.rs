//! Polling command handler: the orchestrator loop.
//!
//! Re-fetches device state on a fixed cadence and prints register changes.
//! A failed cycle leaves the last snapshot on screen and logs a warning;
//! the client re-authenticates lazily on the next cycle.

use std::collections::BTreeMap;

use tracing::{info, warn};

use stufa_api::{CloudClient, RegisterKey, RegisterValue};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;

type Snapshot = BTreeMap<RegisterKey, RegisterValue>;

pub async fn handle(args: WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut client = super::util::connect(global).await?;
    let target_mac = match args.device.as_deref() {
        Some(identifier) => Some(super::util::resolve_mac(&client, Some(identifier))?),
        None => None,
    };

    let mut previous = snapshots(&client, target_mac.as_deref());
    for (mac, snapshot) in &previous {
        print_full(&client, mac, snapshot, global.quiet);
    }

    info!(interval = %args.interval, "watching for register changes");
    let mut ticker = tokio::time::interval(*args.interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker.tick().await; // first tick fires immediately; skip it

    loop {
        ticker.tick().await;

        let result = match target_mac.as_deref() {
            Some(mac) => client.update_device(mac).await,
            None => client.update().await,
        };
        if let Err(err) = result {
            warn!(error = %err, "poll failed; will re-authenticate on the next cycle");
            continue;
        }

        let current = snapshots(&client, target_mac.as_deref());
        for (mac, snapshot) in &current {
            let before = previous.get(mac);
            print_changes(&client, mac, before, snapshot, global.quiet);
        }
        previous = current;
    }
}

/// Current snapshots for the watched devices, keyed by MAC.
fn snapshots(client: &CloudClient, target_mac: Option<&str>) -> BTreeMap<String, Snapshot> {
    client
        .devices()
        .iter()
        .filter(|d| target_mac.is_none_or(|mac| d.mac == mac))
        .map(|d| (d.mac.clone(), d.values().clone()))
        .collect()
}

fn device_label(client: &CloudClient, mac: &str) -> String {
    client
        .device(mac)
        .and_then(|d| d.name.clone())
        .unwrap_or_else(|| mac.to_owned())
}

fn print_full(client: &CloudClient, mac: &str, snapshot: &Snapshot, quiet: bool) {
    if quiet {
        return;
    }
    let label = device_label(client, mac);
    for (key, value) in snapshot {
        println!("{label}: {key} = {value}");
    }
}

fn print_changes(
    client: &CloudClient,
    mac: &str,
    before: Option<&Snapshot>,
    current: &Snapshot,
    quiet: bool,
) {
    if quiet {
        return;
    }
    let label = device_label(client, mac);
    for (key, value) in current {
        match before.and_then(|s| s.get(key)) {
            Some(old) if old == value => {}
            Some(old) => println!("{label}: {key} {old} -> {value}"),
            None => println!("{label}: {key} = {value}"),
        }
    }
}

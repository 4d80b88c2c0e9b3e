// Stove device model
//
// One `Device` per physical unit from the roster. Holds identity fields and
// the last-fetched register snapshot. All network traffic goes through
// `CloudClient`, which replaces the snapshot wholesale after every
// successful state fetch -- a device never merges partial data.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;
use crate::models::RosterEntry;
use crate::registers::{self, RegisterKey, RegisterValue};

pub const MANUFACTURER: &str = "Extraflame";

/// One heating device, as discovered through the account's roster.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    /// Serial number; the portal's stable identifier.
    pub id: String,
    /// Article code of the stove model.
    pub model_code: Option<String>,
    /// Owner-chosen display name.
    pub name: Option<String>,
    pub manufacturer: &'static str,
    /// Radio-module MAC address; the key for state and write calls.
    pub mac: String,
    values: BTreeMap<RegisterKey, RegisterValue>,
}

impl Device {
    /// Build a device from a roster entry, seeding the snapshot from the
    /// embedded `stoveState` object.
    pub(crate) fn from_roster(entry: RosterEntry) -> Result<Self, Error> {
        let values = registers::snapshot_from_state(&entry.stove_state)?;
        Ok(Self {
            id: entry.serial,
            model_code: entry.cod_art,
            name: entry.friendly_name,
            manufacturer: MANUFACTURER,
            mac: entry.mac,
            values,
        })
    }

    /// Replace the whole register snapshot with a freshly fetched one.
    pub(crate) fn apply_state(&mut self, values: BTreeMap<RegisterKey, RegisterValue>) {
        self.values = values;
    }

    /// The last-known raw value for a register, or `None` if the register
    /// has never been fetched for this device.
    pub fn value(&self, key: RegisterKey) -> Option<&RegisterValue> {
        self.values.get(&key)
    }

    /// Lower write bound, or `None` for read-only registers.
    pub fn value_min(&self, key: RegisterKey) -> Option<i64> {
        key.spec().min
    }

    /// Upper write bound, or `None` for read-only registers.
    pub fn value_max(&self, key: RegisterKey) -> Option<i64> {
        key.spec().max
    }

    /// Human-readable form of the current value.
    ///
    /// For enumerated registers this is the label of the current raw value;
    /// a raw value with no label, or any value of an unlabelled register,
    /// comes back in its plain display form.
    pub fn value_description(&self, key: RegisterKey) -> Option<String> {
        let value = self.value(key)?;
        let label = value.as_i64().and_then(|raw| key.spec().label_for(raw));
        Some(match label {
            Some(label) => label.to_owned(),
            None => value.to_string(),
        })
    }

    /// The full snapshot, ordered by register key.
    pub fn values(&self) -> &BTreeMap<RegisterKey, RegisterValue> {
        &self.values
    }
}

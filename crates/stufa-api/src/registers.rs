// Register catalog
//
// The ten logical data points the portal exposes per stove. The catalog is
// pure static data built at compile time: each key maps to the field name
// used in portal payloads, optional write metadata (parameter id + bounds),
// and an optional raw-value → label table for enumerated registers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Logical register keys, in the order the portal documents them.
///
/// A register is either a sensor (read-only) or a settable parameter; the
/// distinction lives in [`RegisterSpec::parameter_id`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RegisterKey {
    Alarm,
    CreationDate,
    MachineState,
    Power,
    RoomTemperature,
    WaterTemperature,
    SmokeTemperature,
    TargetRoomTemperature,
    TargetPower,
    TargetWaterTemperature,
}

/// Static metadata for one register.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegisterSpec {
    pub key: RegisterKey,
    /// Field name in portal payloads (`stoveState` / `stove-get-state`).
    pub field: &'static str,
    /// Wire identifier used when writing; `None` means read-only.
    pub parameter_id: Option<u16>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Raw value → human label, for enumerated registers. Label-unique.
    pub labels: &'static [(i64, &'static str)],
}

const MACHINE_STATE_LABELS: &[(i64, &str)] = &[
    (0, "Off"),
    (1, "On"),
    (2, "Ignition"),
    (3, "Start"),
    (4, "Working"),
    (5, "Cleaning"),
    (6, "Final cleaning"),
    (7, "Waiting restart"),
    (8, "Alarm"),
    (9, "Alarm Memory"),
];

const ALARM_LABELS: &[(i64, &str)] = &[
    (0, "None"),
    (1, "Unknown 1"),
    (2, "Unknown 2"),
    (3, "Unknown 3"),
    (4, "Unknown 4"),
    (5, "Unknown 5"),
    (6, "Unknown 6"),
];

/// The catalog, parallel to the `RegisterKey` variant order.
const SPECS: [RegisterSpec; 10] = [
    RegisterSpec {
        key: RegisterKey::Alarm,
        field: "alarmMemoryCode",
        parameter_id: None,
        min: None,
        max: None,
        labels: ALARM_LABELS,
    },
    RegisterSpec {
        key: RegisterKey::CreationDate,
        field: "creationDate",
        parameter_id: None,
        min: None,
        max: None,
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::MachineState,
        field: "machineState",
        parameter_id: Some(0),
        min: Some(0),
        max: Some(1),
        labels: MACHINE_STATE_LABELS,
    },
    RegisterSpec {
        key: RegisterKey::Power,
        field: "power",
        parameter_id: None,
        min: None,
        max: None,
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::RoomTemperature,
        field: "roomTemp",
        parameter_id: None,
        min: None,
        max: None,
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::WaterTemperature,
        field: "waterTemp",
        parameter_id: None,
        min: None,
        max: None,
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::SmokeTemperature,
        field: "smokeTemp",
        parameter_id: None,
        min: None,
        max: None,
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::TargetRoomTemperature,
        field: "targetRoomTemp",
        parameter_id: Some(4),
        min: Some(65),
        max: Some(80),
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::TargetPower,
        field: "targetPower",
        parameter_id: Some(5),
        min: Some(1),
        max: Some(5),
        labels: &[],
    },
    RegisterSpec {
        key: RegisterKey::TargetWaterTemperature,
        field: "targetWaterTemp",
        parameter_id: Some(6),
        min: Some(65),
        max: Some(80),
        labels: &[],
    },
];

impl RegisterKey {
    /// Every catalog key, in display order.
    pub const ALL: [RegisterKey; 10] = [
        RegisterKey::Alarm,
        RegisterKey::CreationDate,
        RegisterKey::MachineState,
        RegisterKey::Power,
        RegisterKey::RoomTemperature,
        RegisterKey::WaterTemperature,
        RegisterKey::SmokeTemperature,
        RegisterKey::TargetRoomTemperature,
        RegisterKey::TargetPower,
        RegisterKey::TargetWaterTemperature,
    ];

    /// Static metadata for this key. Infallible -- unknown registers are
    /// unrepresentable once a key has been parsed.
    pub fn spec(self) -> &'static RegisterSpec {
        &SPECS[self as usize]
    }

    /// Look up a key by its portal field name (e.g. `"targetPower"`).
    pub fn from_field(field: &str) -> Option<RegisterKey> {
        SPECS.iter().find(|s| s.field == field).map(|s| s.key)
    }

    /// Parse a key from its CLI spelling, e.g. `"target-power"`.
    pub fn parse(key: &str) -> Result<RegisterKey, Error> {
        key.parse().map_err(|_| Error::UnknownRegister {
            key: key.to_owned(),
        })
    }
}

impl RegisterSpec {
    pub fn is_writable(&self) -> bool {
        self.parameter_id.is_some() && self.min.is_some() && self.max.is_some()
    }

    /// Validate a prospective write and convert it to its wire form.
    ///
    /// Returns the parameter id and the integer the portal expects. Fails
    /// without any side effect when the register is read-only or the value
    /// falls outside `[min, max]`.
    pub fn validate_write(&self, value: f64) -> Result<(u16, i64), Error> {
        let (Some(parameter_id), Some(min), Some(max)) = (self.parameter_id, self.min, self.max)
        else {
            return Err(Error::Validation {
                register: self.field,
                reason: "register is read-only".into(),
            });
        };
        #[allow(clippy::cast_precision_loss)]
        if value < min as f64 || value > max as f64 {
            return Err(Error::Validation {
                register: self.field,
                reason: format!("value must be between {min} and {max}: {value}"),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        let wire = value as i64;
        Ok((parameter_id, wire))
    }

    /// The label for a raw value, if this register has a label table.
    pub fn label_for(&self, raw: i64) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|(value, _)| *value == raw)
            .map(|(_, label)| *label)
    }

    /// Reverse-map a label to its raw value. First match wins.
    pub fn value_for_label(&self, label: &str) -> Option<i64> {
        self.labels
            .iter()
            .find(|(_, candidate)| *candidate == label)
            .map(|(value, _)| *value)
    }
}

/// Raw register value as the portal reports it.
///
/// Most registers are integers; `creationDate` is a plain string, and the
/// portal is loose enough about number shapes that floats show up too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegisterValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RegisterValue {
    /// The integer form of this value, when it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Decode a state payload into a register snapshot.
///
/// Every catalog key must be present: an absent field means the portal
/// changed its schema, and the whole payload is rejected rather than
/// merged partially.
pub(crate) fn snapshot_from_state(
    data: &serde_json::Map<String, serde_json::Value>,
) -> Result<BTreeMap<RegisterKey, RegisterValue>, Error> {
    let mut values = BTreeMap::new();
    for key in RegisterKey::ALL {
        let field = key.spec().field;
        let raw = data
            .get(field)
            .ok_or_else(|| Error::protocol(format!("state payload is missing {field:?}")))?;
        let value: RegisterValue = serde_json::from_value(raw.clone())
            .map_err(|e| Error::protocol(format!("state field {field:?} is not a scalar: {e}")))?;
        values.insert(key, value);
    }
    Ok(values)
}

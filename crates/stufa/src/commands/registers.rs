//! Register catalog command handler. Entirely offline.

use tabled::Tabled;

use stufa_api::{RegisterKey, RegisterSpec};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "Register")]
    register: String,
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Writable")]
    writable: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Labels")]
    labels: String,
}

impl From<&&'static RegisterSpec> for RegisterRow {
    fn from(spec: &&'static RegisterSpec) -> Self {
        Self {
            register: spec.key.to_string(),
            field: spec.field,
            writable: spec
                .parameter_id
                .map_or_else(|| "-".into(), |id| format!("id {id}")),
            min: spec.min.map_or_else(|| "-".into(), |v| v.to_string()),
            max: spec.max.map_or_else(|| "-".into(), |v| v.to_string()),
            labels: spec
                .labels
                .iter()
                .map(|(raw, label)| format!("{raw}={label}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let specs: Vec<&'static RegisterSpec> = RegisterKey::ALL.iter().map(|k| k.spec()).collect();

    let rendered = output::render_list(
        &global.output,
        &specs,
        |spec| RegisterRow::from(spec),
        |spec| spec.key.to_string(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

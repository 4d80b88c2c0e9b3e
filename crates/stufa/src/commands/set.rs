//! Write command handler.

use stufa_api::RegisterKey;

use crate::cli::{GlobalOpts, SetArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: SetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let key = RegisterKey::parse(&args.register)?;

    // Parse before connecting so argument mistakes never cost a login.
    let value: Option<f64> = if args.label {
        None
    } else {
        Some(args.value.parse().map_err(|_| CliError::InvalidValue {
            field: "value",
            reason: format!("not a number: {} (did you mean --label?)", args.value),
        })?)
    };

    let mut client = util::connect(global).await?;
    let mac = util::resolve_mac(&client, args.device.as_deref())?;

    match value {
        Some(value) => client.set_value(&mac, key, value).await?,
        None => client.set_value_label(&mac, key, &args.value).await?,
    }

    // Writes travel portal → stove over the radio link; the new value only
    // shows up on a later poll.
    output::print_output(
        &format!("accepted; {key} becomes visible on the next poll"),
        global.quiet,
    );
    Ok(())
}

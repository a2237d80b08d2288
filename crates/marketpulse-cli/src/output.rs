use serde_json::Value;

use crate::error::CliError;

pub fn render(report: &Value, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{payload}");
    Ok(())
}

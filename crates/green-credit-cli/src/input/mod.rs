pub mod config;
pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Deserialize command input from `--input <file.json>` or, failing that,
/// from piped stdin. `what` names the expected payload in the error.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err(format!("--input <file.json> or stdin required: expected {what}").into()),
    }
}

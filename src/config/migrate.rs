use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Keys a current config file is expected to carry, with the YAML value
/// written when the key is missing.
fn expected_keys() -> Vec<(&'static str, Value)> {
    let defaults = super::Config::default();
    vec![
        ("database", Value::String(defaults.database)),
        (
            "stats_window_weeks",
            Value::Number(defaults.stats_window_weeks.into()),
        ),
        ("chart_weeks", Value::Number(defaults.chart_weeks.into())),
        ("separator_char", Value::String(defaults.separator_char)),
    ]
}

fn read_mapping(path: &Path) -> io::Result<Value> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| io::Error::other(format!("Failed to parse {:?}: {}", path, e)))?;

    if yaml.as_mapping().is_none() {
        return Err(io::Error::other(format!(
            "Config file {:?} is not a YAML mapping",
            path
        )));
    }
    Ok(yaml)
}

/// Return the expected keys that are absent from the config file.
pub fn missing_fields(path: &Path) -> io::Result<Vec<&'static str>> {
    let yaml = read_mapping(path)?;
    let map = yaml.as_mapping().cloned().unwrap_or_default();

    Ok(expected_keys()
        .into_iter()
        .filter(|(k, _)| !map.contains_key(Value::String((*k).to_string())))
        .map(|(k, _)| k)
        .collect())
}

/// Add every missing key with its default value and rewrite the file.
/// Existing values are never touched. Returns the keys that were added.
pub fn migrate_config_file(path: &Path) -> io::Result<Vec<&'static str>> {
    let mut yaml = read_mapping(path)?;
    let mut added = Vec::new();

    if let Some(map) = yaml.as_mapping_mut() {
        for (key, default) in expected_keys() {
            let k = Value::String(key.to_string());
            if !map.contains_key(&k) {
                map.insert(k, default);
                added.push(key);
            }
        }
    }

    if added.is_empty() {
        info("Configuration file already up to date.");
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&yaml)
        .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
    fs::write(path, serialized)?;

    success(format!("Config migration added: {}", added.join(", ")));
    Ok(added)
}

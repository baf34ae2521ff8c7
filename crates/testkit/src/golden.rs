//! Golden-file assertions for overlay snapshots.
//!
//! Values are written as pretty JSON with object keys sorted. Set
//! `OVERGROW_UPDATE_GOLDENS=1` to rewrite the goldens instead of comparing.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that switches [`assert_golden`] into record mode.
pub const UPDATE_GOLDENS_ENV: &str = "OVERGROW_UPDATE_GOLDENS";

/// Assert that `value` matches the golden JSON stored at `path`.
///
/// With the update variable set, the file is overwritten instead.
pub fn assert_golden<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = render(value)?;

    if recording() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating golden directory {}", parent.display()))?;
        }
        return fs::write(path, actual)
            .with_context(|| format!("writing golden {}", path.display()));
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "no golden at {} (set {UPDATE_GOLDENS_ENV}=1 to record it)",
            path.display()
        )
    })?;
    if expected != actual {
        anyhow::bail!(
            "{} differs from the recorded golden (set {UPDATE_GOLDENS_ENV}=1 to re-record)\n{actual}",
            path.display()
        );
    }
    Ok(())
}

fn recording() -> bool {
    std::env::var(UPDATE_GOLDENS_ENV)
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(value).context("serializing golden value")?);
    let mut text = serde_json::to_string_pretty(&value).context("formatting golden JSON")?;
    text.push('\n');
    Ok(text)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_sorts_nested_keys() {
        let value = serde_json::json!({"b": {"z": 1, "a": 2}, "a": [{"y": 0, "x": 0}]});
        let text = render(&value).unwrap();
        let a = text.find("\"a\"").unwrap();
        let b = text.find("\"b\"").unwrap();
        let x = text.find("\"x\"").unwrap();
        let y = text.find("\"y\"").unwrap();
        assert!(a < b);
        assert!(x < y);
        assert!(text.ends_with('\n'));
    }
}

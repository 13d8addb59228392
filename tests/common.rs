//! Shared test utilities for integration tests.
//!
//! Provides fixture builders for Jira exports and helpers for checking the
//! shape of rendered HTML.

#![allow(dead_code)]

use anyhow::Result;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Writes file into directory, creating parent directories as needed.
///
/// # Returns
///
/// Full path of the written file
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    Ok(path)
}

/// Builds a Jira project export entry.
pub fn project(key: &str, name: &str, description: &str) -> Value {
    json!({
        "key": key,
        "name": name,
        "description": description,
        "avatarUrls": { "48x48": format!("https://jira.example.org/avatar/{}.png", key) }
    })
}

/// Builds metadata entries for a published project.
///
/// # Arguments
///
/// * `properties`: `Group:Field` lines to publish
/// * `fields`: Extra `(group, key, value)` entries
pub fn published_metadata(properties: &[&str], fields: &[(&str, &str, Value)]) -> Value {
    let mut entries = vec![
        json!({ "key": "Open", "group": "Project Visibility", "value": "Yes" }),
        json!({ "key": "Active", "group": "Project Visibility", "value": "Yes" }),
        json!({ "key": "Published", "group": "Project Visibility", "value": "Yes" }),
        json!({ "key": "property_visibility", "group": "system", "value": properties.join("\n") }),
    ];
    entries.extend(
        fields
            .iter()
            .map(|(group, key, value)| json!({ "key": key, "group": group, "value": value })),
    );
    Value::Array(entries)
}

/// Asserts every opened `<ul>` and `<li>` is closed.
pub fn assert_tags_balanced(html: &str) {
    for (open, close) in [("<ul>", "</ul>"), ("<li>", "</li>")] {
        assert_eq!(
            html.matches(open).count(),
            html.matches(close).count(),
            "Unbalanced {} in {}",
            open,
            html
        );
    }
}

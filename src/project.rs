//! Project data document construction.
//!
//! Turns exported Jira projects and their metadata entries into the
//! `projects.json` document read by the website. Free-text values are run
//! through the markup renderer; user picker values become email links.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashMap};

use crate::directory::DisplayNameResolver;
use crate::error::InvalidMarkupError;
use crate::markup::{MarkupRenderer, format_email};

/// Group holding the fields every project page shows.
pub const PROJECT_INFORMATION: &str = "Project Information";

/// Default metadata group for publishing switches.
pub const VISIBILITY_GROUP: &str = "Project Visibility";

/// Metadata key listing which `Group:Field` pairs are published.
const PROPERTY_VISIBILITY: &str = "property_visibility";

/// Field rendered as a list of themes instead of markup.
const THEME_PROPERTY: &str = "Project Information:Theme";

/// Avatar size used for the project icon.
const ICON_SIZE: &str = "48x48";

/// Project as returned by the Jira project API.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraProject {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "avatarUrls", default)]
    pub avatar_urls: HashMap<String, String>,
}

/// Single project metadata entry.
///
/// `value` is usually a string but user picker fields carry an object with
/// `displayName` and `emailAddress`, and multi-select fields a list of
/// `{"value": ...}` options.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaEntry {
    pub key: String,
    pub group: String,
    #[serde(default)]
    pub value: Value,
}

/// Metadata entries per project key.
pub type ProjectMetadata = BTreeMap<String, Vec<MetaEntry>>;

/// Returns the value stored under `key` in `group`.
///
/// Missing entries and non-string values yield an empty string.
pub fn meta_value<'a>(meta: &'a [MetaEntry], key: &str, group: &str) -> &'a str {
    meta_entry(meta, key, group)
        .and_then(Value::as_str)
        .unwrap_or("")
}

fn meta_entry<'a>(meta: &'a [MetaEntry], key: &str, group: &str) -> Option<&'a Value> {
    meta.iter()
        .find(|entry| entry.key == key && entry.group == group)
        .map(|entry| &entry.value)
}

/// Splits a multi-line value into its non-empty lines.
pub fn string_to_list(value: &str) -> Vec<String> {
    value
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Why a project is left out of the published document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishState {
    Published,
    NoMetadata,
    Hidden {
        open: String,
        active: String,
        published: String,
        visibility: String,
    },
}

/// Decides whether a project's metadata allows publishing.
///
/// A project is published when it is open, active and published, and lists
/// at least one visible property.
pub fn publish_state(meta: &[MetaEntry]) -> PublishState {
    if meta.is_empty() {
        return PublishState::NoMetadata;
    }

    let open = meta_value(meta, "Open", VISIBILITY_GROUP);
    let active = meta_value(meta, "Active", VISIBILITY_GROUP);
    let published = meta_value(meta, "Published", VISIBILITY_GROUP);
    let visibility = meta_value(meta, PROPERTY_VISIBILITY, "system");

    if open == "Yes" && active == "Yes" && published == "Yes" && !visibility.is_empty() {
        return PublishState::Published;
    }

    PublishState::Hidden {
        open: open.to_string(),
        active: active.to_string(),
        published: published.to_string(),
        visibility: visibility.to_string(),
    }
}

/// Keeps only the projects whose metadata allows publishing.
pub fn select_published(metadata: ProjectMetadata) -> ProjectMetadata {
    metadata
        .into_iter()
        .filter(|(key, meta)| match publish_state(meta) {
            PublishState::Published => true,
            PublishState::NoMetadata => {
                tracing::info!(project = %key, "ignoring project without metadata");
                false
            }
            PublishState::Hidden {
                open,
                active,
                published,
                visibility,
            } => {
                tracing::info!(
                    project = %key,
                    %open,
                    %active,
                    %published,
                    %visibility,
                    "ignoring unpublished project"
                );
                false
            }
        })
        .collect()
}

/// Unwraps a multi-select option (`{"value": ...}`) to its value.
fn option_value(item: &Value) -> Value {
    match item {
        Value::Object(option) => option.get("value").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

/// Builds per-project JSON blobs from Jira data.
pub struct ProjectBuilder<'r, R: ?Sized = dyn DisplayNameResolver> {
    renderer: MarkupRenderer<'r, R>,
}

impl<'r, R: DisplayNameResolver + ?Sized> ProjectBuilder<'r, R> {
    pub fn new(renderer: MarkupRenderer<'r, R>) -> Self {
        Self { renderer }
    }

    /// Converts a metadata value into its published form.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarkupError`] if a text value contains a malformed
    /// bracket-pipe link.
    pub fn render_field(&self, value: &Value) -> Result<Value, InvalidMarkupError> {
        match value {
            Value::String(text) => Ok(Value::String(self.renderer.render(text)?)),
            Value::Object(user) => match user.get("emailAddress").and_then(Value::as_str) {
                Some(address) => {
                    let name = user.get("displayName").and_then(Value::as_str);
                    Ok(Value::String(format_email(name, address)))
                }
                None => Ok(user
                    .get("value")
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new()))),
            },
            Value::Array(items) => Ok(Value::Array(items.iter().map(option_value).collect())),
            Value::Null => Ok(Value::String(String::new())),
            other => Ok(other.clone()),
        }
    }

    /// Builds the blob for one project.
    ///
    /// Each line of the project's `property_visibility` names a
    /// `Group:Field` pair to publish under `blob[Group][Field]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarkupError`] if any rendered field contains a
    /// malformed bracket-pipe link.
    pub fn build_blob(
        &self,
        project: &JiraProject,
        meta: &[MetaEntry],
    ) -> Result<Map<String, Value>, InvalidMarkupError> {
        let mut blob = Map::new();
        blob.insert("key".to_string(), Value::String(project.key.clone()));
        blob.insert(
            "icon".to_string(),
            project
                .avatar_urls
                .get(ICON_SIZE)
                .map_or(Value::Null, |url| Value::String(url.clone())),
        );

        for property in meta_value(meta, PROPERTY_VISIBILITY, "system").split('\n') {
            let property = property.trim_end_matches('\r');
            let mut parts = property.split(':');
            let (Some(group), Some(field)) = (parts.next(), parts.next()) else {
                continue;
            };

            let value = if property == THEME_PROPERTY {
                json!(string_to_list(meta_value(meta, field, group)))
            } else {
                let raw = meta_entry(meta, field, group).unwrap_or(&Value::Null);
                self.render_field(raw)?
            };

            match group_mut(&mut blob, group) {
                Some(fields) => {
                    fields.insert(field.to_string(), value);
                }
                None => tracing::warn!(project = %project.key, group, "group clashes with a top-level key"),
            }
        }

        let title = self.renderer.render(&project.name)?;
        let description = self
            .renderer
            .render(project.description.as_deref().unwrap_or(""))?;
        if let Some(info) = group_mut(&mut blob, PROJECT_INFORMATION) {
            info.insert("title".to_string(), Value::String(title));
            info.insert("description".to_string(), Value::String(description));
        }

        Ok(blob)
    }

    /// Builds the complete projects document.
    ///
    /// Only projects with an entry in `metadata` are included, sorted by
    /// rendered title. Projects whose markup cannot be rendered are skipped
    /// with a warning so one bad record does not sink the batch.
    pub fn build_data(&self, projects: &[JiraProject], metadata: &ProjectMetadata) -> Value {
        let mut blobs: Vec<Map<String, Value>> = projects
            .iter()
            .filter_map(|project| {
                let meta = metadata.get(&project.key)?;
                match self.build_blob(project, meta) {
                    Ok(blob) => Some(blob),
                    Err(err) => {
                        tracing::warn!(project = %project.key, "skipping project: {err}");
                        None
                    }
                }
            })
            .collect();

        blobs.sort_by(|a, b| title_of(a).cmp(title_of(b)));
        json!({ "projects": blobs })
    }
}

fn group_mut<'a>(
    blob: &'a mut Map<String, Value>,
    group: &str,
) -> Option<&'a mut Map<String, Value>> {
    blob.entry(group.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
}

fn title_of(blob: &Map<String, Value>) -> &str {
    blob.get(PROJECT_INFORMATION)
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

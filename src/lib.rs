//! Issue tracker field markup to HTML for static site data files.

mod config;
pub mod directory;
mod error;
pub mod markup;
pub mod project;
mod util;

pub use config::{Command, Config};
pub use directory::{CachedDirectory, DisplayNameResolver, NoDirectory, StaticDirectory};
pub use error::InvalidMarkupError;
pub use markup::{MarkupRenderer, format_email, format_url, render_value};
pub use project::{JiraProject, MetaEntry, ProjectBuilder, ProjectMetadata, select_published};
pub use util::{read_input, read_json, to_json_string, write_json};

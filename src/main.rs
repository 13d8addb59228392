use anyhow::{Context, Result};
use fieldhtml::{
    Command, Config, DisplayNameResolver, JiraProject, MarkupRenderer, ProjectBuilder,
    ProjectMetadata, StaticDirectory, read_input, read_json, select_published, write_json,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.verbose);
    config.validate()?;

    let directory = match &config.directory {
        Some(path) => StaticDirectory::from_path(path)?,
        None => StaticDirectory::new(),
    };
    let renderer = MarkupRenderer::new(&directory);

    match &config.command {
        Command::Render { input } => {
            let html = render_file(&renderer, input)?;
            println!("{}", html);
        }
        Command::Projects {
            projects,
            metadata,
            output,
        } => {
            let count = generate_projects(&renderer, projects, metadata, output)?;
            println!("Generated: {} ({} projects)", output.display(), count);
        }
    }

    Ok(())
}

/// Installs the log subscriber.
///
/// `--verbose` forces info level; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders the field value stored in `input`.
///
/// A single trailing newline, as left by editors and shell pipes, is not
/// part of the value.
///
/// # Errors
///
/// Returns error if the input cannot be read or holds malformed markup.
fn render_file<R>(renderer: &MarkupRenderer<'_, R>, input: &Path) -> Result<String>
where
    R: DisplayNameResolver + ?Sized,
{
    let raw = read_input(input)?;
    let value = raw
        .strip_suffix('\n')
        .map(|value| value.strip_suffix('\r').unwrap_or(value))
        .unwrap_or(raw.as_str());

    renderer
        .render(value)
        .with_context(|| format!("Failed to render {}", input.display()))
}

/// Builds the projects document and writes it to `output`.
///
/// # Returns
///
/// Number of projects written
///
/// # Errors
///
/// Returns error if an input cannot be read or parsed, or the output
/// cannot be written.
fn generate_projects<R>(
    renderer: &MarkupRenderer<'_, R>,
    projects: &Path,
    metadata: &Path,
    output: &Path,
) -> Result<usize>
where
    R: DisplayNameResolver + ?Sized,
{
    let projects: Vec<JiraProject> = read_json(projects)?;
    let metadata: ProjectMetadata = read_json(metadata)?;
    tracing::info!(
        projects = projects.len(),
        with_metadata = metadata.len(),
        "loaded exports"
    );

    let published = select_published(metadata);
    let data = ProjectBuilder::new(*renderer).build_data(&projects, &published);
    let count = data["projects"].as_array().map_or(0, Vec::len);

    write_json(output, &data)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_file_drops_final_newline() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let input = dir.path().join("value.txt");
        fs::write(&input, "* one\r\n* two\r\n")?;
        let renderer = MarkupRenderer::default();

        // Act
        let html = render_file(&renderer, &input)?;

        // Assert
        assert_eq!(html, "<ul><li> one</li><li> two</li></ul>");
        Ok(())
    }

    #[test]
    fn test_render_file_reports_malformed_markup() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let input = dir.path().join("value.txt");
        fs::write(&input, "[oops http://x.io]")?;
        let renderer = MarkupRenderer::default();

        // Act
        let result = render_file(&renderer, &input);

        // Assert
        let err = result.expect_err("Malformed link should fail");
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to render"), "{}", message);
        assert!(message.contains("[oops http://x.io]"), "{}", message);
        Ok(())
    }

    #[test]
    fn test_generate_projects_writes_sorted_document() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let projects = dir.path().join("projects-export.json");
        let metadata = dir.path().join("metadata-export.json");
        let output = dir.path().join("website").join("_data").join("projects.json");
        fs::write(
            &projects,
            r#"[
                {"key": "B", "name": "Beta", "description": "Second", "avatarUrls": {"48x48": "b.png"}},
                {"key": "A", "name": "Alpha", "description": "First", "avatarUrls": {"48x48": "a.png"}}
            ]"#,
        )?;
        let visible = r#"[
            {"key": "Open", "group": "Project Visibility", "value": "Yes"},
            {"key": "Active", "group": "Project Visibility", "value": "Yes"},
            {"key": "Published", "group": "Project Visibility", "value": "Yes"},
            {"key": "property_visibility", "group": "system", "value": "Project Information:Project tag line"},
            {"key": "Project tag line", "group": "Project Information", "value": "Fast."}
        ]"#;
        fs::write(
            &metadata,
            format!(r#"{{"A": {visible}, "B": {visible}}}"#),
        )?;
        let renderer = MarkupRenderer::default();

        // Act
        let count = generate_projects(&renderer, &projects, &metadata, &output)?;

        // Assert
        assert_eq!(count, 2);
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
        assert_eq!(written["projects"][0]["key"], "A");
        assert_eq!(written["projects"][1]["key"], "B");
        assert_eq!(
            written["projects"][0]["Project Information"]["Project tag line"],
            "Fast."
        );
        Ok(())
    }
}

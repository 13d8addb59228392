//! Line and value orchestration.

use super::anchor::{format_email, format_url};
use super::list::{ListNesting, split_item};
use super::scanner::{Segment, Segments};
use crate::directory::{DisplayNameResolver, NoDirectory};
use crate::error::InvalidMarkupError;

/// Separator inserted between lines that are not inside a list.
const LINE_BREAK: &str = "<br>";

/// Renders field values to HTML fragments.
///
/// The renderer itself is stateless; list nesting lives in a
/// [`ListNesting`] owned by each [`render`](MarkupRenderer::render) call,
/// so one renderer can serve any number of values. It is `Sync` exactly
/// when its resolver is.
pub struct MarkupRenderer<'r, R: ?Sized = dyn DisplayNameResolver> {
    resolver: &'r R,
}

impl<R: ?Sized> Clone for MarkupRenderer<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for MarkupRenderer<'_, R> {}

impl Default for MarkupRenderer<'_, NoDirectory> {
    fn default() -> Self {
        Self::new(&NoDirectory)
    }
}

impl<'r, R: DisplayNameResolver + ?Sized> MarkupRenderer<'r, R> {
    /// Creates renderer that asks `resolver` for email display names.
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    /// Renders a whole field value.
    ///
    /// Lines are separated by `<br>` unless a list is open, in which case
    /// the list markup separates them. Lists still open at the end of the
    /// value are closed, so the fragment never leaks open tags.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarkupError`] if the value contains a malformed
    /// bracket-pipe link.
    pub fn render(&self, value: &str) -> Result<String, InvalidMarkupError> {
        let mut nesting = ListNesting::new();
        let mut out = String::with_capacity(value.len());

        for line in value.split('\n') {
            if !out.is_empty() && !nesting.is_open() {
                out.push_str(LINE_BREAK);
            }
            self.render_line(line.trim_end_matches('\r'), &mut nesting, &mut out)?;
        }

        nesting.close_all(&mut out);
        Ok(out)
    }

    fn render_line(
        &self,
        line: &str,
        nesting: &mut ListNesting,
        out: &mut String,
    ) -> Result<(), InvalidMarkupError> {
        if line.is_empty() {
            return Ok(());
        }

        if let Some((depth, text)) = split_item(line) {
            nesting.enter_item(depth, out);
            out.push(' ');
            return self.render_text(text, out);
        }

        nesting.leave_for_text(out);
        self.render_text(line, out)
    }

    fn render_text(&self, text: &str, out: &mut String) -> Result<(), InvalidMarkupError> {
        for segment in Segments::new(text) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Email(address) => {
                    let bare = address.strip_suffix('.').unwrap_or(address);
                    let name = self.resolver.display_name(bare);
                    out.push_str(&format_email(name.as_deref(), address));
                }
                Segment::Url(token) => out.push_str(&format_url(token)?),
            }
        }
        Ok(())
    }
}

/// Renders one field value, resolving display names through `resolver`.
///
/// # Errors
///
/// Returns [`InvalidMarkupError`] if the value contains a malformed
/// bracket-pipe link.
pub fn render_value(
    raw: &str,
    resolver: &dyn DisplayNameResolver,
) -> Result<String, InvalidMarkupError> {
    MarkupRenderer::new(resolver).render(raw)
}

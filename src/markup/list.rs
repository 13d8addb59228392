//! Unordered list nesting.

/// Marker that starts a list item; repeating it nests the item deeper.
pub(crate) const ITEM_MARKER: char = '*';

/// Depth of currently open `<ul>` elements during one render.
///
/// Each open level also has one open `<li>`. Dedenting, either to a
/// shallower item or to a non-list line, closes a single level per line;
/// whatever is still open when the value ends is closed by [`close_all`].
///
/// [`close_all`]: ListNesting::close_all
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListNesting {
    level: usize,
}

impl ListNesting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth, `0` outside any list.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_open(&self) -> bool {
        self.level != 0
    }

    /// Emits the tags that start a list item at `depth`.
    ///
    /// Closes the previous item, opens a new `<ul>` when going deeper or
    /// closes one `<ul>` (and its wrapping item) when going shallower, then
    /// opens the new `<li>`.
    pub fn enter_item(&mut self, depth: usize, out: &mut String) {
        if depth < self.level {
            // The list must end before the item that wraps it.
            out.push_str("</ul></li>");
        } else {
            if self.is_open() {
                out.push_str("</li>");
            }
            if depth > self.level {
                out.push_str("<ul>");
            }
        }
        out.push_str("<li>");

        tracing::trace!(from = self.level, to = depth, "list item");
        self.level = depth;
    }

    /// Closes one open level ahead of a line that is not a list item.
    pub fn leave_for_text(&mut self, out: &mut String) {
        if self.is_open() {
            self.level -= 1;
            out.push_str("</li></ul>");
        }
    }

    /// Closes every level still open.
    pub fn close_all(&mut self, out: &mut String) {
        while self.is_open() {
            self.level -= 1;
            out.push_str("</li></ul>");
        }
    }
}

/// Splits a list line into its depth and item text.
///
/// Depth is the number of leading `*`. The text is everything after the
/// first space, or empty when the line has none. Returns `None` for lines
/// that are not list items.
pub(crate) fn split_item(line: &str) -> Option<(usize, &str)> {
    if !line.starts_with(ITEM_MARKER) {
        return None;
    }

    let depth = line.chars().take_while(|&c| c == ITEM_MARKER).count();
    let text = line.split_once(' ').map_or("", |(_, text)| text);

    Some((depth, text))
}

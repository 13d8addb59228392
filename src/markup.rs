//! Field markup rendering.
//!
//! Converts free-text issue tracker field values into HTML fragments. A value
//! may carry `*` bullet lists, email addresses, plain URLs and bracket-pipe
//! links (`[label|url]`); everything else passes through verbatim.
//!
//! Text around links is trusted markup and is not escaped. Only the names,
//! labels and URLs placed inside generated anchors are HTML-escaped.

mod anchor;
mod list;
mod renderer;
mod scanner;

pub use anchor::{format_email, format_url};
pub use list::ListNesting;
pub use renderer::{MarkupRenderer, render_value};
pub use scanner::{Segment, Segments, Span, find_bounds};

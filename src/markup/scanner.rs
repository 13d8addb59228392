//! Marker scanning and segment extraction.

/// Marker that introduces an email address.
const EMAIL_MARKER: char = '@';

/// Marker that introduces a URL.
const URL_MARKER: &str = "://";

/// Byte range of a token inside a line.
///
/// `end` is exclusive for space-delimited tokens. For bracket-delimited
/// tokens it is the index of the closing `]`, which belongs to the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Locates the delimiters surrounding a marker found at `known_point`.
///
/// Searches backwards from `known_point` for `start_char` and forwards from
/// `known_point` for `end_char`.
///
/// In strict mode bounds always exist: a missing opening delimiter yields
/// the start of the line, a missing closing delimiter yields its length, and
/// a found opening delimiter is excluded from the span. In non-strict mode
/// the span starts on the opening delimiter itself and `None` is returned
/// when either delimiter is missing.
///
/// # Arguments
///
/// * `line`: Line being scanned
/// * `known_point`: Byte index of the marker, must lie on a char boundary
/// * `start_char`: Opening delimiter
/// * `end_char`: Closing delimiter
/// * `strict`: Whether to fall back to line bounds
pub fn find_bounds(
    line: &str,
    known_point: usize,
    start_char: char,
    end_char: char,
    strict: bool,
) -> Option<Span> {
    let start = line[..known_point].rfind(start_char);
    let end = line[known_point..]
        .find(end_char)
        .map(|offset| known_point + offset);

    if strict {
        return Some(Span {
            start: start.map_or(0, |index| index + start_char.len_utf8()),
            end: end.unwrap_or(line.len()),
        });
    }

    Some(Span {
        start: start?,
        end: end?,
    })
}

/// A piece of a line, classified by what it renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text, emitted verbatim.
    Text(&'a str),
    /// Email address, possibly carrying a trailing full stop.
    Email(&'a str),
    /// Plain URL or bracket-pipe link token.
    Url(&'a str),
}

/// Left-to-right segment iterator over a single line.
///
/// At each step the earlier of the next `@` and the next `://` decides
/// whether an email or a URL is extracted; text before the token is yielded
/// first. Once no marker remains the rest of the line is yielded as text.
/// The iterator is single-pass.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    pending: Option<Segment<'a>>,
}

impl<'a> Segments<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            pending: None,
        }
    }

    /// Splits an email address off the front of the remaining line.
    ///
    /// Returns text preceding the address and the address itself, leaving
    /// the remainder (starting at the delimiting space) for further scanning.
    fn extract_email(&mut self, at_index: usize) -> (&'a str, &'a str) {
        let line = self.rest;
        let Span { start, end } = spaced_bounds(line, at_index);
        self.rest = &line[end..];
        (&line[..start], &line[start..end])
    }

    /// Splits a URL token off the front of the remaining line.
    ///
    /// Bracket-pipe links (`[label|url]`) may contain spaces, so brackets are
    /// tried first; the token then runs through the closing `]`. Without a
    /// complete bracket pair the token is bounded by spaces.
    fn extract_url(&mut self, marker_index: usize) -> (&'a str, &'a str) {
        let line = self.rest;
        let (start, token_end) = match find_bounds(line, marker_index, '[', ']', false) {
            Some(Span { start, end }) => (start, end + ']'.len_utf8()),
            None => {
                let span = spaced_bounds(line, marker_index);
                (span.start, span.end)
            }
        };
        self.rest = &line[token_end..];
        (&line[..start], &line[start..token_end])
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        if self.rest.is_empty() {
            return None;
        }

        let email_at = self.rest.find(EMAIL_MARKER);
        let url_at = self.rest.find(URL_MARKER);

        let (prefix, token) = match (email_at, url_at) {
            (None, None) => {
                let text = self.rest;
                self.rest = "";
                return Some(Segment::Text(text));
            }
            (Some(at), Some(url)) if at < url => {
                let (prefix, address) = self.extract_email(at);
                (prefix, Segment::Email(address))
            }
            (Some(at), None) => {
                let (prefix, address) = self.extract_email(at);
                (prefix, Segment::Email(address))
            }
            (_, Some(url)) => {
                let (prefix, token) = self.extract_url(url);
                (prefix, Segment::Url(token))
            }
        };

        if prefix.is_empty() {
            Some(token)
        } else {
            self.pending = Some(token);
            Some(Segment::Text(prefix))
        }
    }
}

fn spaced_bounds(line: &str, known_point: usize) -> Span {
    // Strict mode never reports a missing bound.
    find_bounds(line, known_point, ' ', ' ', true).unwrap_or(Span {
        start: 0,
        end: line.len(),
    })
}

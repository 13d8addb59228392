//! Anchor generation for email addresses and URLs.

use maud::html;

use crate::error::InvalidMarkupError;

/// Formats an email address as a `mailto` anchor.
///
/// A trailing full stop is treated as sentence punctuation: it is moved
/// outside the anchor. When a display name is known the name is shown next
/// to a mail icon link, otherwise the address is its own label.
///
/// # Arguments
///
/// * `display_name`: Name resolved for the address, if any
/// * `address`: Email address as found in the text
pub fn format_email(display_name: Option<&str>, address: &str) -> String {
    let (address, full_stop) = split_full_stop(address);
    let href = format!("mailto:{address}");

    let anchor = match display_name {
        Some(name) => html! {
            (name) " " a class="email-icon" href=(href) { span class="icon-mail" {} }
        },
        None => html! { a href=(href) { (address) } },
    };

    anchor.into_string() + full_stop
}

/// Formats a URL token as an anchor.
///
/// Tokens starting with `[` use the bracket-pipe form `[label|url]`. Any
/// other token is a bare URL used as both target and label, with a
/// trailing full stop moved outside the anchor.
///
/// # Errors
///
/// Returns [`InvalidMarkupError`] if a bracketed token does not split into
/// exactly two parts on `|`.
pub fn format_url(token: &str) -> Result<String, InvalidMarkupError> {
    if token.starts_with('[') {
        return format_bracket_link(token);
    }

    let (url, full_stop) = split_full_stop(token);
    let anchor = html! { a href=(url) { (url) } };

    Ok(anchor.into_string() + full_stop)
}

fn format_bracket_link(token: &str) -> Result<String, InvalidMarkupError> {
    let parts: Vec<&str> = token.split('|').collect();
    let &[label, url] = parts.as_slice() else {
        return Err(InvalidMarkupError::new(token));
    };

    let label = label.strip_prefix('[').unwrap_or(label);
    let url = url.strip_suffix(']').unwrap_or(url);

    Ok(html! { a href=(url) { (label) } }.into_string())
}

fn split_full_stop(token: &str) -> (&str, &'static str) {
    match token.strip_suffix('.') {
        Some(stripped) => (stripped, "."),
        None => (token, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_email_without_display_name() {
        // Act
        let html = format_email(None, "a@b.com");

        // Assert
        assert_eq!(html, r#"<a href="mailto:a@b.com">a@b.com</a>"#);
    }

    #[test]
    fn test_email_with_display_name() {
        // Act
        let html = format_email(Some("Jane Doe"), "jane@example.org");

        // Assert
        assert_eq!(
            html,
            r#"Jane Doe <a class="email-icon" href="mailto:jane@example.org"><span class="icon-mail"></span></a>"#
        );
    }

    #[test]
    fn test_email_trailing_full_stop_moved_outside() {
        // Act
        let html = format_email(None, "a@b.com.");

        // Assert
        assert_eq!(html, r#"<a href="mailto:a@b.com">a@b.com</a>."#);
    }

    #[test]
    fn test_email_with_display_name_and_full_stop() {
        // Act
        let html = format_email(Some("Bob"), "bob@example.org.");

        // Assert
        assert!(html.starts_with("Bob <a"));
        assert!(html.contains(r#"href="mailto:bob@example.org""#));
        assert!(html.ends_with("</a>."));
    }

    #[test]
    fn test_url_plain() {
        // Act
        let html = format_url("http://example.com").expect("Should format URL");

        // Assert
        assert_eq!(
            html,
            r#"<a href="http://example.com">http://example.com</a>"#
        );
    }

    #[test]
    fn test_url_trailing_full_stop_moved_outside() {
        // Act
        let html = format_url("http://example.com.").expect("Should format URL");

        // Assert
        assert_eq!(
            html,
            r#"<a href="http://example.com">http://example.com</a>."#
        );
    }

    #[test]
    fn test_url_bracket_pipe_link() {
        // Act
        let html = format_url("[Docs|http://x.io]").expect("Should format link");

        // Assert
        assert_eq!(html, r#"<a href="http://x.io">Docs</a>"#);
    }

    #[test]
    fn test_url_bracket_pipe_keeps_full_stop_in_url() {
        // Act
        let html = format_url("[Docs|http://x.io/v1.]").expect("Should format link");

        // Assert
        assert_eq!(html, r#"<a href="http://x.io/v1.">Docs</a>"#);
    }

    #[test]
    fn test_url_bracket_without_pipe_is_error() {
        // Act
        let result = format_url("[no-pipe-here http://x]");

        // Assert
        let err = result.expect_err("Should reject bracket token without pipe");
        assert_eq!(err.token(), "[no-pipe-here http://x]");
    }

    #[test]
    fn test_url_bracket_with_two_pipes_is_error() {
        // Act
        let result = format_url("[a|b|http://x]");

        // Assert
        assert!(result.is_err(), "Should reject more than one pipe");
    }

    #[test]
    fn test_url_label_is_escaped() {
        // Act
        let html = format_url("[Q&A|http://x.io/faq]").expect("Should format link");

        // Assert
        assert_eq!(html, r#"<a href="http://x.io/faq">Q&amp;A</a>"#);
    }
}

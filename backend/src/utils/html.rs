// src/utils/html.rs

use std::collections::HashSet;

/// Strips markup from free text submitted by the public.
///
/// Feedback is plain text, so no tags are whitelisted: everything except the
/// text content is dropped and `<script>`/`<style>` bodies disappear entirely.
/// The result is plain text again, never longer than the input, so it still
/// fits the length the request was validated against.
pub fn strip_markup(input: &str) -> String {
    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string();

    unescape_text(&cleaned)
}

/// Optional variant of [`strip_markup`]. Blank results become `None`.
pub fn strip_markup_opt(input: Option<&str>) -> Option<String> {
    input
        .map(strip_markup)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reverses the escapes the HTML serializer applies to text nodes.
/// `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
fn unescape_text(serialized: &str) -> String {
    serialized
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_scripts() {
        let cleaned = strip_markup("<b>Great</b> school<script>alert(1)</script>");
        assert_eq!(cleaned, "Great school");
    }

    #[test]
    fn test_plain_text_is_kept_as_typed() {
        assert_eq!(strip_markup("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(strip_markup("Tom & Jerry <3"), "Tom & Jerry <3");
        assert_eq!(strip_markup("marks > 90 & rank < 3"), "marks > 90 & rank < 3");
    }

    #[test]
    fn test_typed_entities_survive_literally() {
        assert_eq!(strip_markup("write &amp;lt; for <"), "write &lt; for <");
    }

    #[test]
    fn test_cleaning_never_grows_the_text() {
        let name = format!("{}&", "a".repeat(99));
        let cleaned = strip_markup(&name);
        assert_eq!(cleaned, name);
        assert_eq!(cleaned.chars().count(), 100);

        let noisy = "<i>R&amp;D</i> &amp; <b>Q&A</b>";
        assert!(strip_markup(noisy).chars().count() <= noisy.chars().count());
    }

    #[test]
    fn test_blank_optional_becomes_none() {
        assert_eq!(strip_markup_opt(Some("<i></i>  ")), None);
        assert_eq!(strip_markup_opt(None), None);
        assert_eq!(strip_markup_opt(Some("More buses")), Some("More buses".to_string()));
    }
}

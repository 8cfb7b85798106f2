//! Entity escaping for the three markup-sensitive characters.

/// Escape `&`, `<` and `>` as `&amp;`, `&lt;` and `&gt;`.
///
/// Quotes are left alone: the target widget only needs the characters that
/// could open or terminate a tag.
///
/// # Examples
///
/// ```
/// use md2rich::markup::escape_entities;
///
/// assert_eq!(escape_entities("a < b && c"), "a &lt; b &amp;&amp; c");
/// ```
pub fn escape_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }

    result
}

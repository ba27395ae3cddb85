/// Escape text for insertion into HTML markup (text and attribute values).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='boom'> & co"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;boom&#39;&gt; &amp; co"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_html("hello world"), "hello world");
    }
}

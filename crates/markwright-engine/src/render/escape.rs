use std::borrow::Cow;
use std::fmt::Write;

/// Bytes left as they are in link destinations, besides ASCII alphanumerics.
const URL_SAFE: &[u8] = b";/?:@&=+$,-_.!~*'()#";

/// `text` with `&`, `<`, `>` and `"` escaped.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Percent-encodes a link destination. Existing `%XX` escapes are kept;
/// a `%` not followed by two hex digits is encoded.
pub fn encode_url(url: &str) -> String {
    let bytes = url.as_bytes();
    let mut out = String::with_capacity(url.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
        {
            out.push_str(&url[i..i + 3]);
            i += 3;
            continue;
        }
        if b.is_ascii_alphanumeric() || URL_SAFE.contains(&b) {
            out.push(b as char);
        } else {
            // Infallible for a String sink.
            let _ = write!(out, "%{b:02X}");
        }
        i += 1;
    }
    out
}

/// A link destination ready to be placed in a double-quoted attribute.
pub fn escape_href(url: &str) -> String {
    escape_html(&encode_url(url)).into_owned()
}

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::parsing::chars::is_escapable;

/// Character references: `&name;`, `&#123;` and `&#x1F;`.
pub struct Entity;

impl Entity {
    pub const OPEN: u8 = b'&';
    const MAX_NAME: usize = 32;

    /// Recognizes a character reference at the start of `s`. Returns its
    /// byte length and decoded text. Unknown names are not references.
    pub fn scan(s: &str) -> Option<(usize, String)> {
        let bytes = s.as_bytes();
        if bytes.first() != Some(&Self::OPEN) {
            return None;
        }
        if bytes.get(1) == Some(&b'#') {
            return Self::scan_numeric(bytes);
        }
        let name_len = bytes[1..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count();
        if name_len < 2 || name_len > Self::MAX_NAME || !bytes[1].is_ascii_alphabetic() {
            return None;
        }
        let len = name_len + 2;
        if bytes.get(len - 1) != Some(&b';') {
            return None;
        }
        named(&s[..len]).map(|decoded| (len, decoded.to_owned()))
    }

    fn scan_numeric(bytes: &[u8]) -> Option<(usize, String)> {
        let (radix, digits_start, max_digits) = match bytes.get(2) {
            Some(b'x' | b'X') => (16, 3, 6),
            _ => (10, 2, 7),
        };
        let digits = bytes[digits_start..]
            .iter()
            .take_while(|b| {
                if radix == 16 {
                    b.is_ascii_hexdigit()
                } else {
                    b.is_ascii_digit()
                }
            })
            .count();
        if digits == 0 || digits > max_digits {
            return None;
        }
        let end = digits_start + digits;
        if bytes.get(end) != Some(&b';') {
            return None;
        }
        let text = std::str::from_utf8(&bytes[digits_start..end]).ok()?;
        let code = u32::from_str_radix(text, radix).ok()?;
        let c = match code {
            0 => char::REPLACEMENT_CHARACTER,
            _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        Some((end + 1, c.to_string()))
    }
}

/// Looks up `&name;` in the HTML5 named character reference table.
fn named(source: &str) -> Option<&'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            entities::ENTITIES
                .iter()
                .filter(|e| e.entity.ends_with(';'))
                .map(|e| (e.entity, e.characters))
                .collect()
        })
        .get(source)
        .copied()
}

/// Resolves backslash escapes and character references, as done for link
/// destinations, titles and fence info strings.
pub fn unescape_string(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '&']) {
        return Cow::Borrowed(s);
    }
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut literal_start = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1).is_some_and(|&b| is_escapable(b)) => {
                out.push_str(&s[literal_start..i]);
                out.push(bytes[i + 1] as char);
                i += 2;
                literal_start = i;
            }
            Entity::OPEN => {
                if let Some((len, decoded)) = Entity::scan(&s[i..]) {
                    out.push_str(&s[literal_start..i]);
                    out.push_str(&decoded);
                    i += len;
                    literal_start = i;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    out.push_str(&s[literal_start..]);
    Cow::Owned(out)
}

use std::sync::OnceLock;

use regex::Regex;

static URI_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// `<scheme:rest>` and `<address@domain>` autolinks.
pub struct Autolink;

/// A recognized autolink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutolinkMatch {
    /// Byte length including the angle brackets.
    pub len: usize,
    /// Text between the angle brackets.
    pub destination: String,
    pub email: bool,
}

impl Autolink {
    pub fn scan(s: &str) -> Option<AutolinkMatch> {
        let uri = URI_REGEX.get_or_init(|| {
            Regex::new(r"^<[A-Za-z][A-Za-z0-9.+-]{1,31}:[^<>\x00-\x20]*>")
                .expect("Invalid autolink URI regex")
        });
        let email = EMAIL_REGEX.get_or_init(|| {
            Regex::new(
                r"^<[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*>",
            )
            .expect("Invalid autolink email regex")
        });

        let (m, is_email) = if let Some(m) = uri.find(s) {
            (m, false)
        } else {
            (email.find(s)?, true)
        };
        let len = m.end();
        Some(AutolinkMatch {
            len,
            destination: s[1..len - 1].to_owned(),
            email: is_email,
        })
    }
}

use crate::parsing::chars::is_space_or_tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn char(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// Metadata of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceData {
    pub kind: FenceKind,
    /// Length of the opening fence run.
    pub length: usize,
    /// Indentation of the opening fence, stripped from content lines.
    pub offset: usize,
    /// Unescaped, trimmed info string. Filled in on finalization.
    pub info: String,
}

/// An opening fence found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpen {
    pub kind: FenceKind,
    pub length: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const MIN_LENGTH: usize = 3;

    /// Recognizes an opening fence at the start of `s`.
    ///
    /// A backtick fence's info string may not itself contain backticks.
    pub fn open(s: &str) -> Option<FenceOpen> {
        let kind = match s.as_bytes().first()? {
            b'`' => FenceKind::Backticks,
            b'~' => FenceKind::Tildes,
            _ => return None,
        };
        let length = run_length(s, kind.char());
        if length < Self::MIN_LENGTH {
            return None;
        }
        if kind == FenceKind::Backticks && s[length..].contains('`') {
            return None;
        }
        Some(FenceOpen { kind, length })
    }

    /// Length of a closing fence for `kind` at the start of `s`: a run of the
    /// fence character followed only by spaces or tabs.
    pub fn close_length(s: &str, kind: FenceKind) -> Option<usize> {
        let length = run_length(s, kind.char());
        if length < Self::MIN_LENGTH {
            return None;
        }
        s.as_bytes()[length..]
            .iter()
            .all(|&b| is_space_or_tab(b))
            .then_some(length)
    }

    /// Whether `s` closes a fence opened as described by `data`.
    pub fn closes(s: &str, data: &FenceData) -> bool {
        Self::close_length(s, data.kind).is_some_and(|len| len >= data.length)
    }
}

fn run_length(s: &str, c: u8) -> usize {
    s.bytes().take_while(|&b| b == c).count()
}

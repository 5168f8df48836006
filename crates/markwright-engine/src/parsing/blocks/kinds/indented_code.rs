use crate::parsing::chars::is_space_or_tab;

pub struct IndentedCode;

impl IndentedCode {
    /// Removes blank lines from the end of the block, keeping the final
    /// line break of the last non-blank line.
    pub fn strip_trailing_blank_lines(content: &mut String) {
        let mut keep = content.len();
        for line in content.split_inclusive('\n').rev() {
            let body = line.strip_suffix('\n').unwrap_or(line);
            if !body.bytes().all(is_space_or_tab) {
                break;
            }
            keep -= line.len();
        }
        content.truncate(keep);
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
    }
}

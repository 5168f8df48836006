use std::io::{BufRead, Write};

use log::debug;

use crate::error::Result;
use crate::parsing::{parse_blocks, parse_inlines};
use crate::render::render;
use crate::settings::Settings;

/// Converts everything readable from `reader` and writes the result to
/// `writer`.
///
/// Output is produced only after the whole input has been parsed; nothing
/// is written if a stage fails.
pub fn convert<R: BufRead, W: Write>(reader: R, mut writer: W, settings: &Settings) -> Result<()> {
    let mut doc = parse_blocks(reader)?;
    parse_inlines(&mut doc)?;
    let mut out = String::new();
    render(&doc, settings, &mut out)?;
    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    debug!("wrote {} bytes", out.len());
    Ok(())
}

/// Converts `source` and returns the result.
pub fn convert_str(source: &str, settings: &Settings) -> Result<String> {
    let mut doc = parse_blocks(source.as_bytes())?;
    parse_inlines(&mut doc)?;
    let mut out = String::new();
    render(&doc, settings, &mut out)?;
    Ok(out)
}

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::parsing::blocks::Block;
use crate::parsing::inline::Inline;

/// What the renderer produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    /// Indented debug dump of the parsed tree.
    #[serde(rename = "tree")]
    SyntaxTree,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "tree" | "syntax-tree" => Ok(OutputFormat::SyntaxTree),
            other => Err(format!("unknown output format '{other}' (expected html or tree)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Html => "html",
            OutputFormat::SyntaxTree => "tree",
        })
    }
}

/// Per-node overrides for HTML output.
///
/// Returning `Some` replaces the node's whole rendering, children included.
pub trait RenderHooks: Send + Sync {
    fn block(&self, _block: &Block) -> Option<String> {
        None
    }

    fn inline(&self, _inline: &Inline) -> Option<String> {
        None
    }
}

/// Options for one conversion. Cheap to clone and safe to share.
#[derive(Clone)]
pub struct Settings {
    pub output_format: OutputFormat,
    /// Emitted for soft line breaks in HTML output.
    pub soft_break: String,
    /// Adds `data-sourcepos` attributes to HTML and positions to tree dumps.
    pub source_positions: bool,
    pub hooks: Option<Arc<dyn RenderHooks>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Html,
            soft_break: "\n".to_owned(),
            source_positions: false,
            hooks: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("output_format", &self.output_format)
            .field("soft_break", &self.soft_break)
            .field("source_positions", &self.source_positions)
            .field("hooks", &self.hooks.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Settings {
    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn with_soft_break(mut self, soft_break: impl Into<String>) -> Self {
        self.soft_break = soft_break.into();
        self
    }

    pub fn with_source_positions(mut self, enabled: bool) -> Self {
        self.source_positions = enabled;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn RenderHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }
}

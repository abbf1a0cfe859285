use serde::{Deserialize, Serialize};

/// What the parser does with an `if`/`define` block still open at the end
/// of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockPolicy {
    /// Fail with [`Error::UnterminatedBlock`](crate::Error::UnterminatedBlock).
    #[default]
    Reject,
    /// Drop the partial block and log a warning.
    Discard,
    /// Emit the partial block as a code block.
    Keep,
}

/// Separator tokens and parse policy used by the converter.
///
/// The defaults describe ordinary Makefile syntax with `##` help comments.
///
/// # Examples
///
/// ```
/// use makefile_generator::{BlockPolicy, Syntax};
///
/// let syntax: Syntax = serde_json::from_str(r#"{"unterminated_block":"keep"}"#).unwrap();
/// assert_eq!(syntax.target_separator, ":");
/// assert_eq!(syntax.unterminated_block, BlockPolicy::Keep);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Syntax {
    /// Splits a target name from its dependencies.
    pub target_separator: String,
    /// Splits a variable name from its value.
    pub variable_separator: String,
    /// Starts the trailing comment of a declaration line.
    pub comment_separator: String,
    /// What to do with an `if`/`define` block left open at end of input.
    pub unterminated_block: BlockPolicy,
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax {
            target_separator: ":".to_string(),
            variable_separator: "=".to_string(),
            comment_separator: "##".to_string(),
            unterminated_block: BlockPolicy::default(),
        }
    }
}

impl Syntax {
    /// Whether `line` contains a target or variable separator anywhere.
    pub(crate) fn has_separator(&self, line: &str) -> bool {
        line.contains(self.target_separator.as_str())
            || line.contains(self.variable_separator.as_str())
    }
}

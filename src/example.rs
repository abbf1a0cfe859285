use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::makefile::Makefile;

/// Marks a title line at the top of an example file.
const TITLE_PREFIX: &str = "###";

/// A canned makefile shipped with the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// `"<number>"` or `"<number> - <title>"`.
    pub name: String,
    /// Makefile text, title line removed.
    pub contents: String,
}

impl Example {
    /// Build an example from its file number and raw text.
    ///
    /// A first line starting with `###` is taken as the title and dropped
    /// from the contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use makefile_generator::Example;
    ///
    /// let example = Example::from_text(2, "### Docker helpers\nup:\n\tdocker compose up -d");
    /// assert_eq!(example.name, "2 - Docker helpers");
    /// assert_eq!(example.contents, "up:\n\tdocker compose up -d");
    /// ```
    pub fn from_text(number: usize, text: &str) -> Example {
        let (first, remainder) = text.split_once('\n').unwrap_or((text, ""));
        match first.strip_prefix(TITLE_PREFIX) {
            Some(title) => Example {
                name: format!("{number} - {}", title.trim()),
                contents: remainder.to_string(),
            },
            None => Example {
                name: number.to_string(),
                contents: text.to_string(),
            },
        }
    }

    pub fn makefile(&self) -> Result<Makefile> {
        Makefile::parse(&self.contents)
    }
}

/// Load `1.txt`, `2.txt`, ... from `dir`, stopping at the first missing file.
pub fn load_examples(dir: impl AsRef<Path>) -> Result<Vec<Example>> {
    let dir = dir.as_ref();
    let mut examples = Vec::new();

    for number in 1.. {
        let path = dir.join(format!("{number}.txt"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => break,
            Err(e) => return Err(e.into()),
        };
        examples.push(Example::from_text(number, &text));
    }

    debug!(dir = %dir.display(), count = examples.len(), "loaded examples");
    Ok(examples)
}

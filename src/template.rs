use std::fmt;
use std::str::FromStr;

use crate::entry::Entry;
use crate::error::{Error, Result};

/// Prints every `target: ## description` line of the makefile.
const HELP_RECIPE: &str =
    "@fgrep -h \"##\" $(MAKEFILE_LIST) | fgrep -v fgrep | sed -e 's/\\\\$$//' -e 's/:.*#/ #/'";

/// Ready-made entries an editor can insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// `default: help` followed by a self-documenting `help` target.
    Help,
    /// An `env` target for generating a `.env` file.
    Env,
}

impl Template {
    /// The entries this template inserts, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use makefile_generator::{Makefile, Template};
    ///
    /// let makefile = Makefile::new(Template::Help.entries());
    /// assert!(makefile.render().starts_with("default: help\nhelp: ## Show this help\n\t@fgrep"));
    /// ```
    pub fn entries(&self) -> Vec<Entry> {
        match self {
            Template::Help => {
                let mut help = Entry::target("help", "").with_comment("Show this help");
                help.append_recipe_line(HELP_RECIPE);
                vec![Entry::target("default", "help"), help]
            }
            Template::Env => vec![Entry::target("env", "").with_comment("Creates .env file")],
        }
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "help" => Ok(Template::Help),
            "env" => Ok(Template::Env),
            _ => Err(Error::UnknownTemplate(s.to_string())),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Template::Help => f.write_str("help"),
            Template::Env => f.write_str("env"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::makefile::Makefile;

    #[test]
    fn help_entries() {
        let entries = Template::Help.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], Entry::target("default", "help"));
        assert_eq!(entries[1].name(), "help");
        assert_eq!(entries[1].comment(), "Show this help");
        assert_eq!(entries[1].recipe_lines(), [HELP_RECIPE]);
    }

    #[test]
    fn help_recipe_survives_round_trip() {
        let makefile = Makefile::new(Template::Help.entries());
        let reparsed = Makefile::parse(&makefile.render()).unwrap();
        assert_eq!(makefile, reparsed);
        assert!(reparsed.entries[1].recipe_lines()[0].contains("sed -e 's/\\\\$$//'"));
    }

    #[test]
    fn env_entry() {
        let entries = Template::Env.entries();
        assert_eq!(entries, vec![Entry::target("env", "").with_comment("Creates .env file")]);
    }

    #[test]
    fn parse_names() {
        for s in ["help", "env"] {
            let template: Template = s.parse().unwrap();
            assert_eq!(template.to_string(), s);
        }
        assert_eq!(
            "docker".parse::<Template>().unwrap_err(),
            Error::UnknownTemplate("docker".to_string())
        );
    }
}

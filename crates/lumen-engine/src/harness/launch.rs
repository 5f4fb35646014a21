use std::ffi::OsString;

use super::{HarnessError, Registry};

/// Parsed command line.
///
/// The only flag is `-name <ExampleName>`; when repeated the last one wins.
/// The single-dash long form is kept as-is, which is why this is parsed by
/// hand rather than with an argument-parser crate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Example to start with; the first registered one when `None`.
    pub example: Option<String>,
}

impl LaunchOptions {
    /// Parses arguments, excluding the program name.
    ///
    /// Arguments need not be valid Unicode unless they are the value of `-name`.
    pub fn parse<I, S>(args: I) -> Result<Self, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "-name" {
                let name = args.next().ok_or(HarnessError::MissingName)?;
                let name = name.into_string().map_err(|raw| {
                    HarnessError::NonUnicodeName(raw.to_string_lossy().into_owned())
                })?;
                options.example = Some(name);
            } else {
                log::warn!("ignoring unrecognized argument '{}'", arg.to_string_lossy());
            }
        }

        Ok(options)
    }

    /// Index of the example to start with.
    pub fn start_index<G>(&self, registry: &Registry<G>) -> Result<usize, HarnessError> {
        if registry.is_empty() {
            return Err(HarnessError::EmptyRegistry);
        }
        match &self.example {
            Some(name) => registry.lookup(name),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_starts_first_example() {
        assert_eq!(LaunchOptions::parse(Vec::<String>::new()), Ok(LaunchOptions::default()));
    }

    #[test]
    fn name_flag_selects_example() {
        let options = LaunchOptions::parse(["-name", "TexturedQuad"]).unwrap();
        assert_eq!(options.example.as_deref(), Some("TexturedQuad"));
    }

    #[test]
    fn last_name_flag_wins() {
        let options = LaunchOptions::parse(["-name", "A", "-name", "B"]).unwrap();
        assert_eq!(options.example.as_deref(), Some("B"));
    }

    #[test]
    fn name_without_value_is_an_error() {
        assert_eq!(LaunchOptions::parse(["-name"]), Err(HarnessError::MissingName));
    }

    #[test]
    fn other_arguments_are_ignored() {
        let options = LaunchOptions::parse(["--verbose", "-name", "X", "extra"]).unwrap();
        assert_eq!(options.example.as_deref(), Some("X"));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_arguments() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"\xff");

        // Ignored like any other unrecognized argument.
        let options = LaunchOptions::parse([raw, OsStr::new("-name"), OsStr::new("X")]).unwrap();
        assert_eq!(options.example.as_deref(), Some("X"));

        assert_eq!(
            LaunchOptions::parse([OsStr::new("-name"), raw]),
            Err(HarnessError::NonUnicodeName("\u{fffd}".to_string()))
        );
    }

    #[test]
    fn empty_registry_cannot_start() {
        let registry: Registry<()> = Registry::new();
        assert_eq!(
            LaunchOptions::default().start_index(&registry),
            Err(HarnessError::EmptyRegistry)
        );
    }
}

use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::error::{Error, Result};

/// The flag set of a regular expression.
///
/// `ignore_case` and `multiline` change how the pattern compiles; `global`
/// and `sticky` only affect matching state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegExpFlags {
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub sticky: bool,
}

impl RegExpFlags {
    /// Parses a flag string such as `"gi"`. Order does not matter; unknown
    /// and repeated flags are rejected.
    pub fn parse(flags: &str) -> Result<Self> {
        let mut parsed = Self::default();
        for flag in flags.chars() {
            let slot = match flag {
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multiline,
                'y' => &mut parsed.sticky,
                other => return Err(Error::InvalidFlag(other)),
            };
            if *slot {
                return Err(Error::DuplicateFlag(flag));
            }
            *slot = true;
        }
        Ok(parsed)
    }
}

/// Renders the flags in canonical `gimy` order.
impl fmt::Display for RegExpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.sticky, 'y'),
        ];
        for (set, flag) in flags {
            if set {
                write!(f, "{flag}")?;
            }
        }
        Ok(())
    }
}

/// A compiled regular expression with its source text and flags.
#[derive(Debug, Clone)]
pub struct JsRegExp {
    source: String,
    flags: RegExpFlags,
    matcher: Regex,
    /// Position the next global or sticky match starts from.
    pub last_index: usize,
}

impl JsRegExp {
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let flags = RegExpFlags::parse(flags)?;
        let matcher = RegexBuilder::new(source)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multiline)
            .build()?;
        Ok(Self {
            source: source.to_string(),
            flags,
            matcher,
            last_index: 0,
        })
    }

    /// Pattern text as given.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All flags.
    pub fn flags(&self) -> RegExpFlags {
        self.flags
    }

    /// The `g` flag.
    pub fn global(&self) -> bool {
        self.flags.global
    }

    /// The `i` flag.
    pub fn ignore_case(&self) -> bool {
        self.flags.ignore_case
    }

    /// The `m` flag.
    pub fn multiline(&self) -> bool {
        self.flags.multiline
    }

    /// The `y` flag.
    pub fn sticky(&self) -> bool {
        self.flags.sticky
    }

    /// Tests `text` against the pattern. Global and sticky expressions
    /// resume at `last_index` and advance it, resetting to 0 on a miss.
    pub fn test(&mut self, text: &str) -> bool {
        if !self.flags.global && !self.flags.sticky {
            return self.matcher.is_match(text);
        }
        let found = text
            .get(self.last_index..)
            .and_then(|rest| self.matcher.find(rest))
            .filter(|m| !self.flags.sticky || m.start() == 0);
        match found {
            Some(m) => {
                self.last_index += m.end();
                true
            }
            None => {
                self.last_index = 0;
                false
            }
        }
    }
}

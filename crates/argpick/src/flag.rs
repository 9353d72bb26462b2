use crate::error::ArgError;

/// A short and/or long name addressing one flagged argument.
///
/// Names may be given with or without their leading hyphens: `"i"`, `"-i"`,
/// `"index"` and `"--index"` all work. Empty names count as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag<'a> {
    short: Option<&'a str>,
    long: Option<&'a str>,
}

impl<'a> Flag<'a> {
    pub fn new(short: Option<&'a str>, long: Option<&'a str>) -> Self {
        let present = |s: &&str| !s.trim().is_empty();
        Self {
            short: short.filter(present),
            long: long.filter(present),
        }
    }

    pub fn short(name: &'a str) -> Self {
        Self::new(Some(name), None)
    }

    pub fn long(name: &'a str) -> Self {
        Self::new(None, Some(name))
    }

    pub fn both(short: &'a str, long: &'a str) -> Self {
        Self::new(Some(short), Some(long))
    }

    pub fn short_name(&self) -> Option<&'a str> {
        self.short
    }

    pub fn long_name(&self) -> Option<&'a str> {
        self.long
    }

    /// Resolve the hyphen-prefixed spellings matched against argv.
    pub(crate) fn canonical(&self) -> Result<FlagNames, ArgError> {
        if self.short.is_none() && self.long.is_none() {
            return Err(ArgError::MissingFlagNames);
        }
        let long = match self.long {
            Some(raw) => Some(canonical_long(raw)?),
            None => None,
        };
        Ok(FlagNames {
            short: self.short.map(normalize_short),
            long,
        })
    }

    /// `-s/--long` as shown in help and diagnostics.
    ///
    /// Never fails: a malformed long name is displayed as written.
    pub fn display(&self) -> String {
        let mut out = String::new();
        if let Some(short) = self.short {
            out.push_str(&normalize_short(short));
        }
        if self.short.is_some() && self.long.is_some() {
            out.push('/');
        }
        if let Some(long) = self.long {
            out.push_str(&normalize_long(long));
        }
        out
    }
}

impl<'a> From<(&'a str, &'a str)> for Flag<'a> {
    fn from((short, long): (&'a str, &'a str)) -> Self {
        Self::both(short, long)
    }
}

impl<'a> From<(Option<&'a str>, Option<&'a str>)> for Flag<'a> {
    fn from((short, long): (Option<&'a str>, Option<&'a str>)) -> Self {
        Self::new(short, long)
    }
}

/// Canonical spellings of a validated [`Flag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagNames {
    pub(crate) short: Option<String>,
    pub(crate) long: Option<String>,
}

impl FlagNames {
    pub(crate) fn matches(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long.as_deref() == Some(token)
    }
}

fn normalize_short(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        trimmed.to_string()
    } else {
        format!("-{trimmed}")
    }
}

fn normalize_long(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        trimmed.to_string()
    } else {
        format!("--{trimmed}")
    }
}

fn canonical_long(raw: &str) -> Result<String, ArgError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') && !trimmed.starts_with("--") {
        return Err(ArgError::MalformedLongFlag(trimmed.to_string()));
    }
    Ok(normalize_long(trimmed))
}

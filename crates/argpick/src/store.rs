use tracing::{debug, error, trace, warn};

use crate::error::{ArgError, ErrorClass};
use crate::flag::Flag;
use crate::help::HelpComposer;
use crate::value::{ArgValue, Expected};

/// Reserved token that prints [`VERSION`] and is removed from argv.
pub const VERSION_FLAG: &str = "--argpick-version";

/// Library version line printed for [`VERSION_FLAG`].
pub const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

const HELP_DESCRIPTION: &str = "Show this help message";

/// Per-store behavior switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Terminate the process with status 1 on usage errors and unparseable
    /// numbers instead of falling back to the default.
    pub quit_on_error: bool,
    /// Reserved version token, or `None` to disable it.
    pub version_flag: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quit_on_error: false,
            version_flag: Some(VERSION_FLAG.to_string()),
        }
    }
}

/// Outcome of locating an argument in the token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Not given on the command line.
    Absent,
    /// Flag given without a value.
    Present,
    /// Flag value or positional token.
    Value(String),
}

/// How a flagged boolean is written on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoolMode {
    /// `-s`: presence alone means `true`.
    #[default]
    FlagOnly,
    /// `-s yes`: the flag takes a boolean word.
    WithValue,
}

/// The working argument list of one process invocation.
///
/// Flagged extraction removes the matched flag (and its value) from the list,
/// so flagged accessors must all run before positional ones.
#[derive(Debug)]
pub struct ArgStore {
    args: Vec<String>,
    arg_count: usize,
    settings: Settings,
    help: HelpComposer,
    diagnostics: Vec<ArgError>,
    max_positional: usize,
    positional_started: bool,
    warned: bool,
    help_flag: Option<bool>,
    help_shown: bool,
}

impl ArgStore {
    /// Build a lenient store from `args`, where the first item is the program name.
    pub fn new<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_settings(args, Settings::default())
    }

    /// Build a lenient store from the process arguments.
    pub fn from_env() -> Self {
        Self::new(env_args())
    }

    pub fn builder() -> ArgStoreBuilder {
        ArgStoreBuilder::default()
    }

    pub fn with_settings<I, T>(args: I, settings: Settings) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let raw: Vec<String> = args.into_iter().map(Into::into).collect();
        let arg_count = raw.len();
        let mut args = expand_clusters(raw);
        if args.is_empty() {
            args.push(String::new());
        }

        let mut store = Self {
            args,
            arg_count,
            settings,
            help: HelpComposer::new(),
            diagnostics: Vec::new(),
            max_positional: 0,
            positional_started: false,
            warned: false,
            help_flag: None,
            help_shown: false,
        };
        store.strip_version_flag();
        store
    }

    pub fn program_name(&self) -> &str {
        &self.args[0]
    }

    /// Tokens not consumed yet, without the program name.
    pub fn remaining(&self) -> &[String] {
        &self.args[1..]
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_quit_on_error(&mut self, quit_on_error: bool) {
        self.settings.quit_on_error = quit_on_error;
    }

    /// Every error reported so far, in order.
    pub fn diagnostics(&self) -> &[ArgError] {
        self.diagnostics.as_slice()
    }

    pub fn help(&self) -> &HelpComposer {
        &self.help
    }

    /// Find `flag`, remove it and, unless `flag_only`, the token after it.
    ///
    /// The following token is taken as the value whatever it looks like, as
    /// long as it is not empty.
    pub fn lookup_flag<'a>(
        &mut self,
        flag: impl Into<Flag<'a>>,
        flag_only: bool,
    ) -> Result<Lookup, ArgError> {
        let flag = flag.into();
        let names = flag.canonical()?;
        if self.positional_started && !flag_only {
            self.warn_once(ArgError::FlagAfterPositional(flag.display()));
        }

        let Some(pos) = self.args.iter().skip(1).position(|token| names.matches(token)) else {
            return Ok(Lookup::Absent);
        };
        let pos = pos + 1;
        let matched = self.args.remove(pos);

        if flag_only {
            debug!(flag = %matched, "consumed flag");
            return Ok(Lookup::Present);
        }
        match self.args.get(pos) {
            Some(value) if !value.is_empty() => {
                let value = self.args.remove(pos);
                debug!(flag = %matched, %value, "consumed flag with value");
                Ok(Lookup::Value(value))
            }
            _ => {
                debug!(flag = %matched, "consumed flag without value");
                Ok(Lookup::Present)
            }
        }
    }

    /// Return the `index`-th (1-based) remaining token that does not start with `-`.
    ///
    /// Positional reads do not consume tokens.
    pub fn lookup_positional(&mut self, index: usize) -> Lookup {
        self.positional_started = true;
        self.max_positional = self.max_positional.max(index);
        if index == 0 {
            return Lookup::Absent;
        }

        let mut count = 0;
        let mut stray: Option<String> = None;
        let mut found: Option<String> = None;
        for token in self.args.iter().skip(1) {
            if token.starts_with('-') {
                if stray.is_none() && token != "-h" && token != "--help" {
                    stray = Some(token.clone());
                }
                continue;
            }
            count += 1;
            if count == index {
                found = Some(token.clone());
                break;
            }
        }

        if let Some(token) = stray {
            self.warn_once(ArgError::StrayFlag(token));
        }
        found.map_or(Lookup::Absent, Lookup::Value)
    }

    /// Extract a flagged value of any [`ArgValue`] type.
    pub fn get<'a, T: ArgValue>(
        &mut self,
        flag: impl Into<Flag<'a>>,
        default: T,
        help: &str,
    ) -> T {
        let flag = flag.into();
        self.help.record_flagged(&flag, &default.default_text(), help, false);
        match self.lookup_flag(flag, false) {
            Ok(lookup) => self.convert(lookup, default, || format!("flag {}", flag.display())),
            Err(err) => {
                self.report(err);
                default
            }
        }
    }

    /// Extract the `index`-th (1-based) positional value of any [`ArgValue`] type.
    pub fn get_at<T: ArgValue>(&mut self, index: usize, default: T, help: &str) -> T {
        self.help.record_positional(index, &default.default_text(), help);
        let lookup = self.lookup_positional(index);
        self.convert(lookup, default, || format!("argument{index}"))
    }

    pub fn get_integer<'a>(&mut self, flag: impl Into<Flag<'a>>, default: i32, help: &str) -> i32 {
        self.get(flag, default, help)
    }

    pub fn get_integer_at(&mut self, index: usize, default: i32, help: &str) -> i32 {
        self.get_at(index, default, help)
    }

    pub fn get_float<'a>(&mut self, flag: impl Into<Flag<'a>>, default: f32, help: &str) -> f32 {
        self.get(flag, default, help)
    }

    pub fn get_float_at(&mut self, index: usize, default: f32, help: &str) -> f32 {
        self.get_at(index, default, help)
    }

    pub fn get_double<'a>(&mut self, flag: impl Into<Flag<'a>>, default: f64, help: &str) -> f64 {
        self.get(flag, default, help)
    }

    pub fn get_double_at(&mut self, index: usize, default: f64, help: &str) -> f64 {
        self.get_at(index, default, help)
    }

    pub fn get_string<'a>(
        &mut self,
        flag: impl Into<Flag<'a>>,
        default: impl Into<String>,
        help: &str,
    ) -> String {
        self.get(flag, default.into(), help)
    }

    pub fn get_string_at(
        &mut self,
        index: usize,
        default: impl Into<String>,
        help: &str,
    ) -> String {
        self.get_at(index, default.into(), help)
    }

    /// Extract a flagged boolean.
    ///
    /// A [`BoolMode::FlagOnly`] boolean cannot default to `true`; doing so is a
    /// usage error and the default becomes `false`.
    pub fn get_boolean<'a>(
        &mut self,
        flag: impl Into<Flag<'a>>,
        mode: BoolMode,
        default: bool,
        help: &str,
    ) -> bool {
        let flag = flag.into();
        let flag_only = mode == BoolMode::FlagOnly;
        let mut default = default;
        if flag_only && default {
            self.report(ArgError::TrueDefaultForFlagOnly(flag.display()));
            default = false;
        }

        self.help.record_flagged(&flag, &default.default_text(), help, flag_only);
        match self.lookup_flag(flag, flag_only) {
            Ok(lookup) => self.convert(lookup, default, || format!("flag {}", flag.display())),
            Err(err) => {
                self.report(err);
                default
            }
        }
    }

    pub fn get_boolean_at(&mut self, index: usize, default: bool, help: &str) -> bool {
        self.get_at(index, default, help)
    }

    /// Whether `-h`/`--help` was given, or the original argument count,
    /// program name included, is below `min_args`.
    pub fn help_requested(&mut self, min_args: Option<usize>) -> bool {
        let flagged = match self.help_flag {
            Some(flagged) => flagged,
            None => {
                let flagged = self.get_boolean(
                    ("h", "help"),
                    BoolMode::FlagOnly,
                    false,
                    HELP_DESCRIPTION,
                );
                self.help_flag = Some(flagged);
                flagged
            }
        };
        flagged || min_args.is_some_and(|min| self.arg_count < min)
    }

    pub fn render_help(&self) -> Vec<String> {
        self.help.render(self.program_name(), self.max_positional)
    }

    pub fn print_help(&mut self) {
        for line in self.render_help() {
            println!("{line}");
        }
        self.help_shown = true;
    }

    /// Print help if `-h`/`--help` was given and it has not been shown yet.
    ///
    /// Returns whether help was printed.
    pub fn show_help_on_request(&mut self) -> bool {
        if self.help_requested(None) && !self.help_shown {
            self.print_help();
            return true;
        }
        false
    }

    pub fn print_version(&self) {
        println!("{VERSION}");
    }

    /// Report the first remaining flag-like token as unknown.
    ///
    /// Meaningful once every flagged accessor has run.
    pub fn check_validity(&self) -> Result<(), ArgError> {
        match self.remaining().iter().find(|token| token.starts_with('-')) {
            Some(token) => Err(ArgError::UnknownFlag(token.clone())),
            None => Ok(()),
        }
    }

    fn convert<T: ArgValue>(
        &mut self,
        lookup: Lookup,
        default: T,
        arg: impl FnOnce() -> String,
    ) -> T {
        let raw = match lookup {
            Lookup::Absent => return default,
            Lookup::Present => return T::from_bare_flag().unwrap_or(default),
            Lookup::Value(raw) if raw.is_empty() => return default,
            Lookup::Value(raw) => raw,
        };
        match T::parse_arg(&raw) {
            Ok(value) => value,
            Err(expected) => {
                let arg = arg();
                self.report(match expected {
                    Expected::Number => ArgError::InvalidNumber { arg, value: raw },
                    Expected::Boolean => ArgError::InvalidBoolean { arg, value: raw },
                });
                default
            }
        }
    }

    fn report(&mut self, err: ArgError) {
        match err.class() {
            ErrorClass::Structural => warn!("{err}"),
            ErrorClass::Usage | ErrorClass::Format => error!("{err}"),
        }
        if self.settings.quit_on_error && err.is_fatal_in_strict() {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
        if err.class() == ErrorClass::Format {
            debug!("using default value");
        }
        self.diagnostics.push(err);
    }

    /// Structural warnings are shown at most once per store.
    fn warn_once(&mut self, err: ArgError) {
        if !self.warned {
            self.warned = true;
            self.report(err);
        }
    }

    fn strip_version_flag(&mut self) {
        let Some(flag) = self.settings.version_flag.clone() else {
            return;
        };
        let before = self.args.len();
        let mut index = 0usize;
        self.args.retain(|token| {
            index += 1;
            index == 1 || *token != flag
        });
        if self.args.len() != before {
            self.print_version();
        }
    }
}

/// Builder for [`ArgStore`] with non-default [`Settings`].
#[derive(Debug, Default)]
pub struct ArgStoreBuilder {
    args: Option<Vec<String>>,
    settings: Settings,
}

impl ArgStoreBuilder {
    /// Arguments to parse, program name first. Defaults to the process arguments.
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn quit_on_error(mut self, quit_on_error: bool) -> Self {
        self.settings.quit_on_error = quit_on_error;
        self
    }

    pub fn version_flag(mut self, flag: Option<&str>) -> Self {
        self.settings.version_flag = flag.map(str::to_string);
        self
    }

    pub fn build(self) -> ArgStore {
        let args = self.args.unwrap_or_else(|| env_args().collect());
        ArgStore::with_settings(args, self.settings)
    }
}

fn env_args() -> impl Iterator<Item = String> {
    std::env::args_os().map(|arg| arg.to_string_lossy().into_owned())
}

/// `-abc` qualifies: one hyphen, an ASCII letter, and more than two characters.
fn is_cluster(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-')
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next().is_some()
}

/// Split `-abc` into `-a -b -c`.
///
/// The letter run stops at the first non-letter; the rest of the token, starting
/// at that character, is kept as a single token (`-n42` becomes `-n 42`).
fn expand_clusters(raw: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, token) in raw.into_iter().enumerate() {
        if i == 0 || !is_cluster(&token) {
            out.push(token);
            continue;
        }
        let body = &token[1..];
        let split = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        out.extend(body[..split].chars().map(|c| format!("-{c}")));
        if split < body.len() {
            out.push(body[split..].to_string());
        }
        trace!(cluster = %token, "expanded combined short flags");
    }
    out
}

//! Minimal single-pass argv extraction with typed accessors and help rendering.
//!
//! An [`ArgStore`] owns the argument list of one process invocation. Each
//! accessor declares one argument (recording its help line), consumes it from
//! the list and converts it, falling back to the given default when the
//! argument is absent or malformed.
//!
//! ```
//! use argpick::{ArgStore, BoolMode, Flag};
//!
//! let mut args = ArgStore::new(["prog", "-vi", "5", "--mode", "fast", "input.txt"]);
//!
//! // Flagged arguments first: they are removed from the list as they match.
//! let verbose = args.get_boolean(Flag::short("v"), BoolMode::FlagOnly, false, "verbose output");
//! let index = args.get_integer(("i", "index"), 0, "item index");
//! let mode = args.get_string(("m", "mode"), "slow", "processing mode");
//!
//! // Then positionals, counted among whatever is left.
//! let input = args.get_string_at(1, "", "input file");
//!
//! assert!(verbose);
//! assert_eq!((index, mode.as_str(), input.as_str()), (5, "fast", "input.txt"));
//! ```
//!
//! Diagnostics are emitted as `tracing` events; install a subscriber to see them.

mod error;
mod flag;
mod help;
mod store;
mod value;

pub use crate::error::{ArgError, ErrorClass};
pub use crate::flag::Flag;
pub use crate::help::HelpComposer;
pub use crate::store::{
    ArgStore, ArgStoreBuilder, BoolMode, Lookup, Settings, VERSION, VERSION_FLAG,
};
pub use crate::value::{ArgValue, Expected, FALSE_WORDS, TRUE_WORDS, parse_bool};

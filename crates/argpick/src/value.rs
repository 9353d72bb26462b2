//! Conversion of raw tokens into typed values.

/// What a raw token failed to convert into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Number,
    Boolean,
}

/// A type that can be extracted from argv.
///
/// Implemented for the primitive integers, `f32`, `f64`, `bool` and `String`.
pub trait ArgValue: Sized {
    /// Text shown after `default value:` in help.
    fn default_text(&self) -> String;

    /// The value of a flag given without a following value, if the type has one.
    fn from_bare_flag() -> Option<Self> {
        None
    }

    fn parse_arg(raw: &str) -> Result<Self, Expected>;
}

/// Words accepted as `false`.
pub const FALSE_WORDS: [&str; 6] = ["no", "n", "false", "f", "off", "0"];
/// Words accepted as `true`.
pub const TRUE_WORDS: [&str; 6] = ["yes", "y", "true", "t", "on", "1"];

/// Match `raw` case-insensitively against the boolean synonym sets.
pub fn parse_bool(raw: &str) -> Option<bool> {
    let lower = raw.to_lowercase();
    if FALSE_WORDS.contains(&lower.as_str()) {
        Some(false)
    } else if TRUE_WORDS.contains(&lower.as_str()) {
        Some(true)
    } else {
        None
    }
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// The leading `[+-]digits` run of `raw`, ignoring whatever follows it.
fn integer_prefix(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let start = sign_len(bytes);
    let digits = digits_from(bytes, start);
    (digits > 0).then(|| &raw[..start + digits])
}

/// The leading `[+-]digits[.digits][e[+-]digits]` run of `raw`.
fn float_prefix(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    let mut end = sign_len(bytes);
    let int_digits = digits_from(bytes, end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(bytes, end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + sign_len(&bytes[end + 1..]);
        let exp_digits = digits_from(bytes, exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }
    Some(&raw[..end])
}

macro_rules! integer_arg_value {
    ($($ty:ty),* $(,)?) => {$(
        impl ArgValue for $ty {
            fn default_text(&self) -> String {
                self.to_string()
            }

            fn parse_arg(raw: &str) -> Result<Self, Expected> {
                integer_prefix(raw)
                    .and_then(|digits| digits.parse().ok())
                    .ok_or(Expected::Number)
            }
        }
    )*};
}

integer_arg_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_arg_value {
    ($($ty:ty),* $(,)?) => {$(
        impl ArgValue for $ty {
            fn default_text(&self) -> String {
                self.to_string()
            }

            fn parse_arg(raw: &str) -> Result<Self, Expected> {
                float_prefix(raw)
                    .and_then(|number| number.parse().ok())
                    .ok_or(Expected::Number)
            }
        }
    )*};
}

float_arg_value!(f32, f64);

impl ArgValue for bool {
    fn default_text(&self) -> String {
        self.to_string()
    }

    fn from_bare_flag() -> Option<Self> {
        Some(true)
    }

    fn parse_arg(raw: &str) -> Result<Self, Expected> {
        parse_bool(raw).ok_or(Expected::Boolean)
    }
}

impl ArgValue for String {
    fn default_text(&self) -> String {
        self.clone()
    }

    fn parse_arg(raw: &str) -> Result<Self, Expected> {
        Ok(raw.to_string())
    }
}

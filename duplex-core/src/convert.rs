//! Conversion between scalar values and their text form.

use core::fmt;

/// A value that lives in node text or in an attribute.
///
/// `render` and `parse` are inverses: `parse(&v.render()) == Ok(v)` for every
/// value except NaN. Rendering never depends on the locale.
pub trait Scalar: Sized + Clone + PartialEq + Default {
    /// Name of the scalar kind, used in error messages.
    const KIND: &'static str;

    /// Render the value as text.
    fn render(&self) -> String;

    /// Parse a value from text.
    fn parse(text: &str) -> Result<Self, ParseError>;
}

/// Text that does not parse as the requested scalar kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The scalar kind that was requested.
    pub kind: &'static str,
    /// The offending text.
    pub text: String,
    /// Why parsing failed.
    pub reason: String,
}

impl ParseError {
    fn new(kind: &'static str, text: &str, reason: impl fmt::Display) -> Self {
        Self {
            kind,
            text: text.to_owned(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} `{}`: {}", self.kind, self.text, self.reason)
    }
}

impl std::error::Error for ParseError {}

impl Scalar for String {
    const KIND: &'static str = "string";

    fn render(&self) -> String {
        self.clone()
    }

    fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(text.to_owned())
    }
}

impl Scalar for bool {
    const KIND: &'static str = "bool";

    fn render(&self) -> String {
        if *self { "true" } else { "false" }.to_owned()
    }

    fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed == "1" || trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed == "0" || trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseError::new(
                Self::KIND,
                text,
                "expected `true`, `false`, `1` or `0`",
            ))
        }
    }
}

/// Split an optional sign and a `0x`/`0X` prefix off `text`.
///
/// Returns the sign (empty or `-`) and the hex digits, or `None` when `text`
/// is not in hex form.
fn split_hex(text: &str) -> Option<(&str, &str)> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))?;
    Some((sign, digits))
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: &'static str = stringify!($ty);

            fn render(&self) -> String {
                itoa::Buffer::new().format(*self).to_owned()
            }

            fn parse(text: &str) -> Result<Self, ParseError> {
                let trimmed = text.trim();
                let parsed = match split_hex(trimmed) {
                    Some((_, digits)) if digits.starts_with(['+', '-']) => {
                        return Err(ParseError::new(Self::KIND, text, "misplaced sign"));
                    }
                    Some((sign, digits)) => <$ty>::from_str_radix(&format!("{sign}{digits}"), 16),
                    None => trimmed.parse::<$ty>(),
                };
                parsed.map_err(|e| ParseError::new(Self::KIND, text, e))
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: &'static str = stringify!($ty);

            fn render(&self) -> String {
                let mut buf = ryu::Buffer::new();
                let text = buf.format(*self);
                text.strip_suffix(".0").unwrap_or(text).to_owned()
            }

            fn parse(text: &str) -> Result<Self, ParseError> {
                text.trim()
                    .parse::<$ty>()
                    .map_err(|e| ParseError::new(Self::KIND, text, e))
            }
        }
    )*};
}

impl_float!(f32, f64);

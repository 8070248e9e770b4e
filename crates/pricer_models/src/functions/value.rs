//! Loosely typed argument values passed in by calling hosts.

use std::fmt;

/// A single argument as a spreadsheet-style host delivers it.
///
/// `Empty` stands for a blank cell or an explicit "use the default"
/// marker; it serialises as JSON `null`.
///
/// # Examples
/// ```
/// use pricer_models::functions::HostValue;
///
/// assert_eq!(HostValue::from_token("100"), HostValue::Number(100.0));
/// assert_eq!(HostValue::from_token("Put"), HostValue::Text("Put".to_string()));
/// assert_eq!(HostValue::from_token("_"), HostValue::Empty);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HostValue {
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
    /// Blank cell
    #[default]
    Empty,
}

impl HostValue {
    /// Parses a command-line style token: blank or `_` is empty, anything
    /// that parses as `f64` is a number, everything else is text.
    pub fn from_token(token: &str) -> Self {
        let trimmed = token.trim();
        if trimmed.is_empty() || trimmed == "_" {
            return HostValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(number) => HostValue::Number(number),
            Err(_) => HostValue::Text(trimmed.to_string()),
        }
    }

    /// True for blank cells.
    pub fn is_empty(&self) -> bool {
        matches!(self, HostValue::Empty)
    }

    /// Short kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Number(_) => "number",
            HostValue::Text(_) => "text",
            HostValue::Empty => "empty",
        }
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Number(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Text(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Text(value)
    }
}

impl<V: Into<HostValue>> From<Option<V>> for HostValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(HostValue::Empty, Into::into)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Number(n) => write!(f, "{}", n),
            HostValue::Text(s) => write!(f, "'{}'", s),
            HostValue::Empty => f.write_str("<empty>"),
        }
    }
}

//! Page variable substitution.
//!
//! Pages carry `%TAG%` markers. Each known tag maps to one [`PageVar`]
//! variant and is replaced by its value; the mapping is total, so adding a
//! variable forces every resolver to handle it.

use crate::error::ControlError;
use core::fmt::{self, Write};

pub use cellarstat_macros::Placeholder;

/// Longest tag looked for between two `%` markers.
pub const MAX_TAG_LEN: usize = 32;

/// Closed set of template variables.
///
/// Implemented with `#[derive(Placeholder)]`.
pub trait Placeholder: Copy + 'static {
    /// Every variable, in declaration order.
    const ALL: &'static [Self];

    /// Variable for a tag (`"LOWER_TEMP"`), if known.
    fn from_tag(tag: &str) -> Option<Self>;

    /// Tag of this variable.
    fn tag(&self) -> &'static str;
}

/// Variables of the thermostat page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Placeholder)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageVar {
    /// Current temperature (performs an acquisition)
    Temp,

    /// Factory lower bound
    MinTemp,

    /// Factory upper bound
    MaxTemp,

    /// Operator lower bound
    LowerTemp,

    /// Operator upper bound
    UpperTemp,
}

impl PageVar {
    /// True for variables whose resolution has a side effect.
    ///
    /// Only `Temp` does: it triggers a sensor acquisition.
    pub const fn has_side_effect(self) -> bool {
        matches!(self, PageVar::Temp)
    }
}

/// Resolved value of a variable.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageValue {
    /// Temperature, rendered with one decimal
    Celsius(f32),

    /// Failed acquisition, rendered as `Error`
    Error,
}

impl fmt::Display for PageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageValue::Celsius(value) => write!(f, "{:.1}", value),
            PageValue::Error => write!(f, "Error"),
        }
    }
}

/// Substitute every `%TAG%` marker of `page` into `out`.
///
/// - Known tags are replaced by `resolve(var)`
/// - Unknown tags are replaced by nothing
/// - `%%` produces a single `%`
/// - A `%` with no closing marker within [`MAX_TAG_LEN`] bytes is copied as-is
///
/// Returns `BufferFull` when `out` cannot hold the result.
pub fn render<P, F, const N: usize>(
    page: &str,
    out: &mut heapless::String<N>,
    mut resolve: F,
) -> Result<(), ControlError>
where
    P: Placeholder,
    F: FnMut(P) -> PageValue,
{
    let mut rest = page;

    while let Some(open) = rest.find('%') {
        push(out, &rest[..open])?;
        let after = &rest[open + 1..];

        match after.find('%') {
            Some(0) => {
                push(out, "%")?;
                rest = &after[1..];
            }
            Some(close) if close <= MAX_TAG_LEN => {
                if let Some(var) = P::from_tag(&after[..close]) {
                    write!(out, "{}", resolve(var)).map_err(|_| ControlError::BufferFull)?;
                }
                rest = &after[close + 1..];
            }
            _ => {
                push(out, "%")?;
                rest = after;
            }
        }
    }

    push(out, rest)
}

fn push<const N: usize>(out: &mut heapless::String<N>, s: &str) -> Result<(), ControlError> {
    out.push_str(s).map_err(|_| ControlError::BufferFull)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(var: PageVar) -> PageValue {
        match var {
            PageVar::Temp => PageValue::Celsius(12.34),
            PageVar::MinTemp => PageValue::Celsius(10.0),
            PageVar::MaxTemp => PageValue::Celsius(14.0),
            PageVar::LowerTemp => PageValue::Celsius(9.0),
            PageVar::UpperTemp => PageValue::Celsius(15.0),
        }
    }

    #[test]
    fn test_tags() {
        assert_eq!(PageVar::Temp.tag(), "TEMP");
        assert_eq!(PageVar::MinTemp.tag(), "MIN_TEMP");
        assert_eq!(PageVar::MaxTemp.tag(), "MAX_TEMP");
        assert_eq!(PageVar::LowerTemp.tag(), "LOWER_TEMP");
        assert_eq!(PageVar::UpperTemp.tag(), "UPPER_TEMP");
        assert_eq!(PageVar::ALL.len(), 5);

        for var in PageVar::ALL {
            assert_eq!(PageVar::from_tag(var.tag()), Some(*var));
        }
        assert_eq!(PageVar::from_tag("temp"), None);
    }

    #[test]
    fn test_only_temp_has_side_effect() {
        for var in PageVar::ALL {
            assert_eq!(var.has_side_effect(), *var == PageVar::Temp);
        }
    }

    #[test]
    fn test_render_all_vars() {
        let mut out = heapless::String::<128>::new();
        render(
            "t=%TEMP% [%MIN_TEMP%,%MAX_TEMP%] [%LOWER_TEMP%,%UPPER_TEMP%]",
            &mut out,
            fixed,
        )
        .unwrap();
        assert_eq!(out.as_str(), "t=12.3 [10.0,14.0] [9.0,15.0]");
    }

    #[test]
    fn test_render_error_value() {
        let mut out = heapless::String::<32>::new();
        render::<PageVar, _, 32>("%TEMP%°C", &mut out, |_| PageValue::Error).unwrap();
        assert_eq!(out.as_str(), "Error°C");
    }

    #[test]
    fn test_render_markers() {
        // Table-driven: (page, expected)
        let cases = [
            ("plain text", "plain text"),
            ("%UNKNOWN%!", "!"),
            ("100%%", "100%"),
            ("width: 50%", "width: 50%"),
            ("%TEMP%%", "12.3%"),
            ("", ""),
        ];

        for (page, expected) in cases {
            let mut out = heapless::String::<64>::new();
            render(page, &mut out, fixed).unwrap();
            assert_eq!(out.as_str(), expected, "page {:?}", page);
        }
    }

    #[test]
    fn test_render_long_span_copied() {
        let page = "50% of a very long sentence that goes well past the tag limit %";
        let mut out = heapless::String::<128>::new();
        render(page, &mut out, fixed).unwrap();
        assert_eq!(out.as_str(), page);
    }

    #[test]
    fn test_render_buffer_full() {
        let mut out = heapless::String::<4>::new();
        assert_eq!(
            render("%TEMP% degrees", &mut out, fixed),
            Err(ControlError::BufferFull)
        );
    }
}

//! Widget input state and text parsing.
//!
//! The UI shell owns the form fields; it snapshots them into a
//! [`HistogramInput`] and hands that to the renderer on every pass.

use crate::config::BinWidthPolicy;
use crate::error::{Error, Result};

/// Snapshot of every text field the widget reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistogramInput {
    /// Chart title, also used for the export filename.
    pub title: String,
    /// Label under the x axis.
    pub x_label: String,
    /// Label beside the y axis.
    pub y_label: String,
    /// Comma-separated integer values.
    pub values: String,
    /// Bin width as typed.
    pub bin_width: String,
}

impl HistogramInput {
    /// Create an input with values and bin width and empty labels.
    #[must_use]
    pub fn new(values: impl Into<String>, bin_width: impl Into<String>) -> Self {
        Self { values: values.into(), bin_width: bin_width.into(), ..Self::default() }
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the x-axis label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Set the y-axis label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Parsed values; see [`parse_values`].
    #[must_use]
    pub fn parsed_values(&self) -> Vec<i64> {
        parse_values(&self.values)
    }

    /// Parsed bin width; see [`parse_bin_width`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBinWidth`] under [`BinWidthPolicy::Reject`]
    /// when the field is not a positive integer.
    pub fn parsed_bin_width(&self, policy: BinWidthPolicy) -> Result<u64> {
        parse_bin_width(&self.bin_width, policy)
    }
}

/// Split on commas and keep every token that parses as an integer.
///
/// Tokens are trimmed first. Anything else, including empty tokens and
/// partially numeric ones like `"30abc"`, is dropped without error.
#[must_use]
pub fn parse_values(text: &str) -> Vec<i64> {
    text.split(',').filter_map(|token| token.trim().parse::<i64>().ok()).collect()
}

/// Parse a bin width field.
///
/// # Errors
///
/// Returns [`Error::InvalidBinWidth`] when the trimmed text is not a
/// positive integer and the policy is [`BinWidthPolicy::Reject`].
pub fn parse_bin_width(text: &str, policy: BinWidthPolicy) -> Result<u64> {
    match text.trim().parse::<u64>() {
        Ok(width) if width > 0 => Ok(width),
        _ => match policy {
            BinWidthPolicy::Reject => {
                tracing::warn!(bin_width = text, "rejecting invalid bin width");
                Err(Error::InvalidBinWidth(text.to_string()))
            }
            BinWidthPolicy::ClampToOne => {
                tracing::warn!(bin_width = text, "clamping invalid bin width to 1");
                Ok(1)
            }
        },
    }
}

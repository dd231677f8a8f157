//! Closed sets of values parsed from user-facing descriptions
//!
//! [`Choice`] is usually implemented through [`impl_choice!`](crate::impl_choice)
//! rather than by hand.

use crate::error::{GenericError, KitResult};

/// A fieldless enum whose variants can be listed and parsed by description
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in declaration order
    const ALL: &'static [Self];

    /// User-facing description of this variant
    fn description(&self) -> &'static str;

    /// Comma-separated list of every description
    #[must_use]
    fn list_description() -> String {
        Self::ALL.iter().map(Self::description).collect::<Vec<_>>().join(", ")
    }

    /// Parse a variant from its description
    ///
    /// An exact match wins; otherwise the first case-insensitive match is
    /// returned.
    ///
    /// # Errors
    /// Returns a parse error listing the valid values when nothing matches.
    fn from_description(description: &str) -> KitResult<Self> {
        Self::ALL
            .iter()
            .find(|choice| choice.description() == description)
            .or_else(|| {
                Self::ALL.iter().find(|choice| choice.description().eq_ignore_ascii_case(description))
            })
            .copied()
            .ok_or_else(|| {
                GenericError::parse(format!(
                    "Invalid input value “{}”. Valid values are {}.",
                    description,
                    Self::list_description()
                ))
            })
    }

    /// Position of this variant in [`Choice::ALL`]
    #[must_use]
    fn index(&self) -> usize
    where
        Self: PartialEq,
    {
        Self::ALL.iter().position(|choice| choice == self).unwrap_or_default()
    }
}

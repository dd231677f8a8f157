//! Macros for reducing boilerplate code
//!
//! This module contains declarative macros that eliminate repetitive
//! implementations across the codebase, particularly for closed sets of
//! choices that are parsed from and rendered to user-facing strings.

/// Implements [`Choice`](crate::choice::Choice), `Display` and `FromStr` for a
/// fieldless enum
///
/// This macro generates:
/// - `Choice`: the list of every variant in declaration order plus the
///   description of each one
/// - `Display`: writes the description
/// - `FromStr`: parses a description (exact match first, then
///   case-insensitive), failing with an error that lists the valid values
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their descriptions
///
/// # Example
///
/// ```rust
/// use foundationkit_common::choice::Choice;
/// use foundationkit_common::impl_choice;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// pub enum PathStyle {
///     Posix,
///     Windows,
/// }
///
/// impl_choice!(PathStyle {
///     Posix => "POSIX",
///     Windows => "Windows",
/// });
///
/// assert_eq!(PathStyle::ALL.len(), 2);
/// assert_eq!("windows".parse::<PathStyle>().unwrap(), PathStyle::Windows);
/// assert_eq!(PathStyle::Posix.to_string(), "POSIX");
/// ```
#[macro_export]
macro_rules! impl_choice {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $crate::choice::Choice for $enum_name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::choice::Choice::description(self))
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::GenericError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::choice::Choice>::from_description(s)
            }
        }
    };
}

//! Assertion macros for [`KitResult`](crate::error::KitResult) values
//!
//! The macros are exported at the crate root.

/// Assert that a result is an error whose description contains a substring
///
/// # Examples
///
/// ```
/// use foundationkit_common::error::GenericError;
///
/// let result: Result<(), GenericError> = Err(GenericError::process("Executable “git” not found."));
/// foundationkit_common::assert_error_contains!(result, "not found");
/// ```
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $substring:expr) => {
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let error_msg = format!("{}", e);
                assert!(
                    error_msg.contains($substring),
                    "Error message '{}' does not contain '{}'",
                    error_msg,
                    $substring
                );
            }
        }
    };
}

/// Assert that a result is a [`GenericError`](crate::error::GenericError) in
/// the given domain
///
/// # Examples
///
/// ```
/// use foundationkit_common::error::{ErrorDomain, GenericError};
///
/// let result: Result<(), GenericError> = Err(GenericError::url("Request failed"));
/// foundationkit_common::assert_error_domain!(result, ErrorDomain::Url);
/// ```
#[macro_export]
macro_rules! assert_error_domain {
    ($result:expr, $domain:expr $(,)?) => {{
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let expected = $domain;
                assert_eq!(
                    e.domain(),
                    expected,
                    "Error domain mismatch: expected {:?}, got {:?} ({})",
                    expected,
                    e.domain(),
                    e
                );
            }
        }
    }};
}

/// Assert that an error carries the given numeric code
#[macro_export]
macro_rules! assert_error_code {
    ($result:expr, $code:expr $(,)?) => {{
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => assert_eq!(e.code(), Some($code), "Error code mismatch for '{}'", e),
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorDomain, GenericError, KitResult};

    fn failing() -> KitResult<()> {
        Err(GenericError::process("Process terminated with failure (termination status code: 2)").with_code(2))
    }

    #[test]
    fn test_assertion_macros_accept_matching_errors() {
        crate::assert_error_contains!(failing(), "termination status");
        crate::assert_error_domain!(failing(), ErrorDomain::Process);
        crate::assert_error_code!(failing(), 2);
    }

    #[test]
    #[should_panic(expected = "Expected error but got Ok")]
    fn test_assert_error_contains_rejects_ok() {
        let ok: KitResult<()> = Ok(());
        crate::assert_error_contains!(ok, "anything");
    }

    #[test]
    #[should_panic(expected = "Error domain mismatch")]
    fn test_assert_error_domain_rejects_other_domain() {
        crate::assert_error_domain!(failing(), ErrorDomain::Url);
    }
}

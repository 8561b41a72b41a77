use crate::ErrorLocation;

/// **VALUE**: Verifies that ErrorLocation Display formatting produces the expected format.
///
/// **WHY THIS MATTERS**: Error messages are shown to users and developers. If the format breaks,
/// error messages become unreadable or lose critical location information.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Display implementation changes format (e.g., removes brackets)
/// - File path, line, or column are missing from output
/// - Format is inconsistent (wrong number of colons)
///
/// This ensures error messages consistently show "[file:line:column]" format.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation with known coordinates
    let location = ErrorLocation {
        file: "client.rs",
        line: 42,
        column: 9,
    };

    // WHEN: Formatting as string
    let formatted = format!("{}", location);

    // THEN: Should produce "[file:line:column]" format
    assert_eq!(formatted, "[client.rs:42:9]");
}

/// **VALUE**: Verifies that `#[track_caller]` propagation works correctly.
///
/// **WHY THIS MATTERS**: The entire error location system depends on `#[track_caller]`
/// propagating through function calls. If this breaks, all errors will report the wrong
/// location (e.g., always pointing to the error constructor instead of the actual error site).
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Someone removes `#[track_caller]` from `ErrorLocation::here()`
/// - Location propagation breaks in refactoring
///
/// This test proves that different call sites get different line numbers, which is essential
/// for accurate error tracking across the codebase.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    // GIVEN: here() captures the caller of the surrounding function
    // WHEN: Capturing location from two consecutive call sites
    let first = ErrorLocation::here();
    let second = ErrorLocation::here();

    // THEN: Should have same file but sequential line numbers
    assert_eq!(first.file, second.file, "Should have same file");
    assert!(
        first.file.contains("error_location.rs"),
        "Should point into this test file"
    );
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
    assert!(first.column > 0, "Should capture column number");
}

//! Unit tests for error.rs
//!
//! Tests all Error variants, the fatal-to-mount classification and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("depth must be > 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("depth must be > 0"));
}

#[test]
fn test_render_surface_unavailable_display() {
    let err = Error::RenderSurfaceUnavailable("no context".to_string());
    assert_eq!(format!("{}", err), "Render surface unavailable: no context");
}

#[test]
fn test_teardown_partial_failure_display() {
    let err = Error::TeardownPartialFailure("surface already detached".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Teardown step failed"));
    assert!(display.contains("surface already detached"));
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("time_step must be > 0".to_string());
    assert!(format!("{}", err).starts_with("Invalid configuration"));
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[test]
fn test_fatal_to_mount() {
    assert!(Error::InitializationFailed(String::new()).is_fatal_to_mount());
    assert!(Error::RenderSurfaceUnavailable(String::new()).is_fatal_to_mount());
    assert!(Error::InvalidConfig(String::new()).is_fatal_to_mount());

    assert!(!Error::TeardownPartialFailure(String::new()).is_fatal_to_mount());
    assert!(!Error::InvalidResource(String::new()).is_fatal_to_mount());
    assert!(!Error::BackendError(String::new()).is_fatal_to_mount());
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("lost".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::InvalidResource("geometry".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::InvalidResource("material".to_string()));
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_when_zero(count: usize) -> Result<usize> {
    if count == 0 {
        crate::scene_bail!(InvalidConfig, "heartcare::error_test", "count must be > 0, got {}", count);
    }
    Ok(count)
}

#[test]
fn test_scene_err_builds_requested_variant() {
    let err = crate::scene_err!(InitializationFailed, "heartcare::error_test", "bad {}", 42);
    assert_eq!(err, Error::InitializationFailed("bad 42".to_string()));
}

#[test]
fn test_scene_bail_returns_early() {
    assert_eq!(bail_when_zero(3), Ok(3));
    assert_eq!(
        bail_when_zero(0),
        Err(Error::InvalidConfig("count must be > 0, got 0".to_string()))
    );
}

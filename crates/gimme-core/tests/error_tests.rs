//! Unit tests for core error types

use gimme_core::{Error, TypeKey};

#[test]
fn test_not_found_error() {
    let error = Error::not_found(TypeKey::of::<String>());
    match error {
        Error::NotFound { key } => assert!(key.contains("String"), "{key}"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_invalid_registration_error() {
    let error = Error::invalid_registration("placeholder in argument list");
    match error {
        Error::InvalidRegistration { message } => {
            assert_eq!(message, "placeholder in argument list");
        }
        _ => panic!("Expected InvalidRegistration error"),
    }
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::type_mismatch(TypeKey::of::<u8>(), "u16");
    match error {
        Error::TypeMismatch { key, expected } => {
            assert!(key.contains("u8"), "{key}");
            assert_eq!(expected, "u16");
        }
        _ => panic!("Expected TypeMismatch error"),
    }
}

#[test]
fn test_error_display_includes_the_key() {
    let display_str = format!("{}", Error::not_found(TypeKey::of::<u32>()));
    assert!(display_str.contains("no provider registered"), "{display_str}");
    assert!(display_str.contains("u32"), "{display_str}");
}

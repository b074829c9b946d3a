mod numbering_tests;
mod resolution_tests;

use anchor_lang::prelude::*;
use crate::errors::RifasError;

pub(crate) fn assert_rifas_err<T: std::fmt::Debug>(result: Result<T>, expected: RifasError) {
    assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
}

#[test]
fn test_id() {
    assert_eq!(
        crate::ID.to_string(),
        "EaT1g3dugi5831W952KBKLa56KuL4xFjM8xqjwrCSJbc"
    );
}

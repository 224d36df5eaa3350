//! Assertions used by step actions

use std::fmt::Debug;

use crate::error::{StepError, StepOutcome};

pub fn assert_true(condition: bool, message: impl Into<String>) -> StepOutcome {
    if condition {
        Ok(())
    } else {
        Err(StepError::Assertion(message.into()))
    }
}

/// `needle` must occur in `haystack`
pub fn assert_contains(haystack: &str, needle: &str, message: Option<String>) -> StepOutcome {
    assert_true(
        haystack.contains(needle),
        message.unwrap_or_else(|| format!("{:?} not found in {:?}", needle, haystack)),
    )
}

/// `item` must be one of `items`
pub fn assert_any_eq<T>(items: &[T], item: &T, message: Option<String>) -> StepOutcome
where
    T: PartialEq + Debug,
{
    assert_true(
        items.contains(item),
        message.unwrap_or_else(|| format!("{:?} not found in {:?}", item, items)),
    )
}

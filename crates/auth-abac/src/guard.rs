//! Panic containment for predicate evaluation.

use std::panic::{self, AssertUnwindSafe};

/// Run `f`, turning a panic into `Err` with the panic message.
///
/// Predicates only receive shared references, so nothing observable is left
/// half-modified when one unwinds.
pub(crate) fn catch_panic<F, T>(f: F) -> Result<T, String>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_value_through() {
        assert_eq!(catch_panic(|| 7), Ok(7));
    }

    #[test]
    fn test_static_str_payload() {
        let result: Result<(), String> = catch_panic(|| panic!("boom"));
        assert_eq!(result, Err("boom".to_string()));
    }

    #[test]
    fn test_formatted_payload() {
        let id = 3;
        let result: Result<(), String> = catch_panic(|| panic!("record {id} missing"));
        assert_eq!(result, Err("record 3 missing".to_string()));
    }
}

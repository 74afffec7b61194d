//! Reference resolution for rows that store foreign keys.

use olympics_domain::error::{OlympicsError, ResolutionError};

/// Unwrap a looked-up reference, turning a miss into [`ResolutionError`].
pub(crate) fn required<T>(
    found: Option<T>,
    entity: &'static str,
    id: impl ToString,
    reference: &'static str,
    reference_id: impl ToString,
) -> Result<T, OlympicsError> {
    found.ok_or_else(|| {
        let err = ResolutionError {
            entity,
            id: id.to_string(),
            reference,
            reference_id: reference_id.to_string(),
        };
        tracing::warn!(error = %err, "dangling reference in store");
        err.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pass_through_resolved_reference() {
        let value = required(Some(3), "Event", 1, "Sport", 3).unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn should_fail_with_resolution_error_when_missing() {
        let result = required::<()>(None, "Event", 1, "Sport", 9);
        assert!(matches!(
            result,
            Err(OlympicsError::Resolution(ResolutionError {
                entity: "Event",
                reference: "Sport",
                ..
            }))
        ));
    }
}

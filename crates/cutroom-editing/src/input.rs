//! Boundary checks run before any authority touches a shot list.

use cutroom_models::Shot;
use validator::Validate;

use crate::error::{EditError, EditResult};

/// Reject shot lists the authorities are not designed to handle.
pub fn validate_shots(shots: &[Shot]) -> EditResult<()> {
    if shots.is_empty() {
        return Err(EditError::invalid_input("shot list is empty"));
    }

    for shot in shots {
        let duration = shot.duration_seconds;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EditError::invalid_input(format!(
                "shot {} has invalid duration {}",
                shot.id, duration
            )));
        }
    }

    Ok(())
}

/// Run the derived range checks on an engine config.
pub fn validate_config<C: Validate>(config: &C) -> EditResult<()> {
    config.validate().map_err(EditError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutroom_models::{EditorialConfig, RhythmConfig};

    #[test]
    fn test_empty_list_rejected() {
        let err = validate_shots(&[]).unwrap_err();
        assert!(matches!(err, EditError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_durations_rejected() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let shots = vec![Shot::new("a", 0, 2.0), Shot::new("b", 1, duration)];
            let err = validate_shots(&shots).unwrap_err();
            assert!(err.to_string().contains("shot b"), "{}", err);
        }
    }

    #[test]
    fn test_valid_list_accepted() {
        let shots = vec![Shot::new("a", 0, 2.0), Shot::new("b", 1, 0.5)];
        assert!(validate_shots(&shots).is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(validate_config(&EditorialConfig::default()).is_ok());

        let bad = RhythmConfig::default().with_emotion_trims(1.5, 0.2);
        let err = validate_config(&bad).unwrap_err();
        assert!(matches!(err, EditError::InvalidConfig(_)));
        assert!(err.is_input_error());
    }
}

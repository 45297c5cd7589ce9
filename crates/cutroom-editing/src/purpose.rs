//! Purpose classification.
//!
//! Signal order is fixed: explicit purpose, planner role, description
//! keywords, camera framing, then a conservative `Information` default.
//! Reordering any of these changes which shots the trimmer cuts first.

use cutroom_models::{Shot, ShotPurpose, ShotRole};

/// Keyword sets checked against the lowercased description, in order.
const PURPOSE_KEYWORDS: &[(ShotPurpose, &[&str])] = &[
    (
        ShotPurpose::Emotion,
        &[
            "tears", "smile", "anger", "fear", "joy", "sorrow", "triumph",
            "devastation", "hope", "despair", "embrace", "weep", "scream",
        ],
    ),
    (
        ShotPurpose::Information,
        &[
            "map", "document", "text", "inscription", "chart", "diagram",
            "explaining", "showing", "reveals", "indicates",
        ],
    ),
    (
        ShotPurpose::Atmosphere,
        &[
            "landscape", "sky", "establishing", "environment", "panorama",
            "wide shot", "aerial", "sunset", "sunrise", "weather",
        ],
    ),
];

/// Purpose implied by a planner role.
pub fn purpose_for_role(role: ShotRole) -> ShotPurpose {
    match role {
        ShotRole::Establishing => ShotPurpose::Atmosphere,
        ShotRole::Action => ShotPurpose::Emotion,
        ShotRole::Reaction => ShotPurpose::Emotion,
        ShotRole::Detail => ShotPurpose::Information,
        ShotRole::Transition => ShotPurpose::Transition,
        ShotRole::Montage => ShotPurpose::Atmosphere,
        ShotRole::Climax => ShotPurpose::Emotion,
        ShotRole::Resolution => ShotPurpose::Emotion,
    }
}

/// Infer a shot's editorial purpose. An assigned purpose is returned as is.
pub fn infer_purpose(shot: &Shot) -> ShotPurpose {
    if let Some(purpose) = shot.purpose {
        return purpose;
    }

    if let Some(role) = shot.role {
        return purpose_for_role(role);
    }

    let description = shot.visual_description.to_lowercase();
    for (purpose, keywords) in PURPOSE_KEYWORDS {
        if keywords.iter().any(|k| description.contains(k)) {
            return *purpose;
        }
    }

    if shot.shot_type.is_wide() {
        ShotPurpose::Atmosphere
    } else if shot.shot_type.is_close() {
        ShotPurpose::Emotion
    } else {
        ShotPurpose::Information
    }
}

/// Copy of `shots` with a purpose on every shot.
pub fn assign_purposes(shots: &[Shot]) -> Vec<Shot> {
    shots
        .iter()
        .map(|shot| match shot.purpose {
            Some(_) => shot.clone(),
            None => shot.clone().with_purpose(infer_purpose(shot)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutroom_models::ShotType;

    fn shot() -> Shot {
        Shot::new("s", 0, 3.0)
    }

    #[test]
    fn test_assigned_purpose_wins() {
        let s = shot()
            .with_purpose(ShotPurpose::Transition)
            .with_role(ShotRole::Climax);
        assert_eq!(infer_purpose(&s), ShotPurpose::Transition);
    }

    #[test]
    fn test_role_table() {
        assert_eq!(infer_purpose(&shot().with_role(ShotRole::Establishing)), ShotPurpose::Atmosphere);
        assert_eq!(infer_purpose(&shot().with_role(ShotRole::Reaction)), ShotPurpose::Emotion);
        assert_eq!(infer_purpose(&shot().with_role(ShotRole::Detail)), ShotPurpose::Information);
        assert_eq!(infer_purpose(&shot().with_role(ShotRole::Transition)), ShotPurpose::Transition);
    }

    #[test]
    fn test_role_beats_keywords() {
        let s = shot()
            .with_role(ShotRole::Detail)
            .with_description("tears on her face");
        assert_eq!(infer_purpose(&s), ShotPurpose::Information);
    }

    #[test]
    fn test_keyword_order() {
        // Emotion keywords are checked before information keywords
        let s = shot().with_description("She smiles at the MAP");
        assert_eq!(infer_purpose(&s), ShotPurpose::Emotion);

        let s = shot().with_description("An aerial view over the valley");
        assert_eq!(infer_purpose(&s), ShotPurpose::Atmosphere);

        let s = shot().with_description("Close on the inscription");
        assert_eq!(infer_purpose(&s), ShotPurpose::Information);
    }

    #[test]
    fn test_framing_fallback() {
        let wide = shot().with_shot_type(ShotType::ExtremeWide);
        let close = shot().with_shot_type(ShotType::CloseUp);
        let medium = shot().with_shot_type(ShotType::MediumClose);

        assert_eq!(infer_purpose(&wide), ShotPurpose::Atmosphere);
        assert_eq!(infer_purpose(&close), ShotPurpose::Emotion);
        assert_eq!(infer_purpose(&medium), ShotPurpose::Information);
    }

    #[test]
    fn test_assign_purposes_fills_gaps_only() {
        let shots = vec![
            shot().with_purpose(ShotPurpose::Atmosphere),
            shot().with_role(ShotRole::Action),
            shot(),
        ];
        let assigned = assign_purposes(&shots);

        assert_eq!(assigned[0].purpose, Some(ShotPurpose::Atmosphere));
        assert_eq!(assigned[1].purpose, Some(ShotPurpose::Emotion));
        assert_eq!(assigned[2].purpose, Some(ShotPurpose::Information));
        assert!(shots[2].purpose.is_none());
    }
}

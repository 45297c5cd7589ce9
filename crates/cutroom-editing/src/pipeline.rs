//! Editorial then rhythmic pass, as one call.

use cutroom_models::{
    BrandBias, EditorialConfig, EditorialReport, MarketingIntent, RhythmConfig, RhythmReport, Shot,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::editorial::EditorialAuthority;
use crate::error::EditResult;
use crate::rhythm::RhythmicAuthority;

/// Result of a full edit: the final shots plus both decision reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub shots: Vec<Shot>,
    pub editorial: EditorialReport,
    pub rhythm: RhythmReport,
}

/// Runs the editorial authority, then the rhythmic authority on its survivors.
#[derive(Debug, Clone, Default)]
pub struct EditPipeline {
    editorial: EditorialAuthority,
    rhythm: RhythmicAuthority,
}

impl EditPipeline {
    pub fn new(editorial: EditorialConfig, rhythm: RhythmConfig) -> Self {
        Self {
            editorial: EditorialAuthority::new(editorial),
            rhythm: RhythmicAuthority::new(rhythm),
        }
    }

    /// Pipeline configured from a marketing preset, optionally brand-biased.
    pub fn for_intent(intent: MarketingIntent, bias: Option<BrandBias>) -> Self {
        let preset = intent.preset();
        let editorial = preset.editorial_config();
        let rhythm = preset.rhythm_config();

        match bias {
            Some(bias) => {
                let biased = bias.apply(&preset, editorial, rhythm);
                for applied in &biased.biases_applied {
                    debug!(intent = %intent, bias = %applied, "Brand bias applied");
                }
                Self::new(biased.editorial, biased.rhythm)
            }
            None => Self::new(editorial, rhythm),
        }
    }

    pub fn editorial_config(&self) -> &EditorialConfig {
        self.editorial.config()
    }

    pub fn rhythm_config(&self) -> &RhythmConfig {
        self.rhythm.config()
    }

    pub fn run(&self, shots: &[Shot]) -> EditResult<EditOutcome> {
        let (trimmed, editorial) = self.editorial.apply(shots)?;
        let (shots, rhythm) = self.rhythm.apply(&trimmed)?;

        info!(
            shots = shots.len(),
            reduction = format!("{:.1}%", editorial.reduction_percent * 100.0),
            ending = ?rhythm.ending_intent,
            "Edit pipeline complete"
        );

        Ok(EditOutcome {
            shots,
            editorial,
            rhythm,
        })
    }
}

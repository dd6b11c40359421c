//! Effect sources and the definitions built from them

use serde::{Deserialize, Serialize};

use crate::classify::ClassificationResult;
use crate::naming::{binding_name, title_case};
use crate::sanitize::sanitize_code;
use crate::taxonomy::{
    default_parameters, Category, Compatibility, Intensity, ParameterSpec, Performance, PreviewSpec,
    Subcategory,
};

/// One discovered effect directory, as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EffectSource {
    pub identifier: String,
    pub description: String,
    pub raw_code: String,
}

impl EffectSource {
    pub fn new(identifier: impl Into<String>, description: impl Into<String>, raw_code: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            raw_code: raw_code.into(),
        }
    }

    /// Lower-cased identifier used for ids, file names and manifest keys.
    pub fn id(&self) -> String {
        self.identifier.to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EffectDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub intensity: Intensity,
    pub performance: Performance,
    pub compatibility: Compatibility,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterSpec>,
    pub preview: PreviewSpec,
    pub engine: String,
}

impl EffectDefinition {
    pub fn binding(&self) -> String {
        binding_name(&self.id)
    }
}

pub fn build_definition(source: &EffectSource, classification: &ClassificationResult) -> EffectDefinition {
    let id = source.id();

    EffectDefinition {
        name: title_case(&id),
        description: source.description.clone(),
        category: classification.category,
        subcategory: classification.subcategory,
        intensity: classification.intensity,
        performance: classification.performance,
        compatibility: classification.compatibility(),
        tags: classification.tags.clone(),
        parameters: default_parameters(),
        preview: PreviewSpec::for_id(&id),
        engine: sanitize_code(&source.raw_code),
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn test_definition_carries_classification() {
        let source = EffectSource::new("Pulse-Glow", "A soft glow", "function f() {}");
        let classification = classify(&source.identifier, &source.description);
        let def = build_definition(&source, &classification);

        assert_eq!(def.id, "pulse-glow");
        assert_eq!(def.name, "Pulse Glow");
        assert_eq!(def.binding(), "pulseGlowEffect");
        assert_eq!(def.category, classification.category);
        assert_eq!(def.tags, classification.tags);
        assert_eq!(def.compatibility, Compatibility::for_category(def.category));
        assert_eq!(def.preview.gif, "pulse-glow.gif");
        assert_eq!(def.parameters.len(), 2);
    }
}

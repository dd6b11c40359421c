//! Effect Taxonomy - Closed Label Sets and Default Shapes
//!
//! Every axis is a closed enum. Anything that is not one of these labels
//! cannot reach a generated module.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Image,
    #[default]
    Universal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Image => "image",
            Category::Universal => "universal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Subcategory {
    Animation,
    #[default]
    Style,
    Transform,
    Filter,
}

impl Subcategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Animation => "animation",
            Subcategory::Style => "style",
            Subcategory::Transform => "transform",
            Subcategory::Filter => "filter",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl Performance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Performance::Light => "light",
            Performance::Medium => "medium",
            Performance::Heavy => "heavy",
        }
    }
}

/// Which surfaces an effect can be applied to.
///
/// Never set independently: always derived from [`Category`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Compatibility {
    pub text: bool,
    pub image: bool,
    pub logo: bool,
    pub background: bool,
}

impl Compatibility {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Text => Self { text: true, image: false, logo: true, background: false },
            Category::Image => Self { text: false, image: true, logo: false, background: true },
            Category::Universal => Self { text: true, image: true, logo: true, background: true },
        }
    }

    /// Look up by raw label; unknown labels get the conservative default.
    pub fn for_label(label: &str) -> Self {
        match label {
            "text" => Self::for_category(Category::Text),
            "image" => Self::for_category(Category::Image),
            "universal" => Self::for_category(Category::Universal),
            _ => Self::default(),
        }
    }
}

impl Default for Compatibility {
    fn default() -> Self {
        Self { text: true, image: false, logo: false, background: false }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Range,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub description: String,
}

/// The parameter schema every generated effect starts with.
pub fn default_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec {
            key: "speed".to_string(),
            kind: ParameterKind::Range,
            min: 0.1,
            max: 3.0,
            default: 1.0,
            description: "Animation speed".to_string(),
        },
        ParameterSpec {
            key: "intensity".to_string(),
            kind: ParameterKind::Range,
            min: 0.0,
            max: 1.0,
            default: 0.8,
            description: "Effect intensity".to_string(),
        },
    ]
}

pub const PREVIEW_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSpec {
    pub gif: String,
    pub duration_ms: u32,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl PreviewSpec {
    pub fn for_id(id: &str) -> Self {
        Self {
            gif: format!("{}.gif", id),
            duration_ms: PREVIEW_DURATION_MS,
            looping: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_per_category() {
        let text = Compatibility::for_category(Category::Text);
        assert_eq!(text, Compatibility { text: true, image: false, logo: true, background: false });

        let image = Compatibility::for_category(Category::Image);
        assert_eq!(image, Compatibility { text: false, image: true, logo: false, background: true });

        let universal = Compatibility::for_category(Category::Universal);
        assert!(universal.text && universal.image && universal.logo && universal.background);
    }

    #[test]
    fn test_unknown_label_is_conservative() {
        let c = Compatibility::for_label("video");
        assert_eq!(c, Compatibility { text: true, image: false, logo: false, background: false });
    }

    #[test]
    fn test_axis_defaults() {
        assert_eq!(Category::default(), Category::Universal);
        assert_eq!(Subcategory::default(), Subcategory::Style);
        assert_eq!(Intensity::default(), Intensity::Medium);
        assert_eq!(Performance::default(), Performance::Medium);
    }

    #[test]
    fn test_serde_labels_lowercase() {
        assert_eq!(serde_json::to_string(&Subcategory::Transform).unwrap(), r#""transform""#);
        let p: Performance = serde_json::from_str(r#""heavy""#).unwrap();
        assert_eq!(p, Performance::Heavy);
    }
}

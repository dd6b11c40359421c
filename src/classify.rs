//! Classifier - Keyword Tables, First Match Wins
//!
//! Each axis is an ordered table of label -> keywords. The first label
//! (in declaration order) with any keyword contained in the lower-cased
//! `name + " " + description` wins. No match falls back to the axis default.
//! Table order is part of the contract.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Category, Compatibility, Intensity, Performance, Subcategory};

pub const MAX_TAGS: usize = 6;

/// Minimum length (exclusive) of a name segment to become a tag.
const MIN_NAME_TAG_LEN: usize = 2;

pub type KeywordTable<L> = &'static [(L, &'static [&'static str])];

pub const CATEGORY_KEYWORDS: KeywordTable<Category> = &[
    (Category::Text, &["text", "texte", "font", "writing", "typewriter", "letter"]),
    (Category::Image, &["image", "pixel", "particle", "dissolve", "distortion", "glitch"]),
    (Category::Universal, &["universal", "aura", "glow", "energy", "quantum", "plasma"]),
];

pub const SUBCATEGORY_KEYWORDS: KeywordTable<Subcategory> = &[
    (Subcategory::Animation, &["dance", "float", "swing", "orbit", "pulse", "heartbeat"]),
    (Subcategory::Style, &["glow", "neon", "sparkle", "aura", "breathing"]),
    (Subcategory::Transform, &["morph", "shift", "phase", "dimension", "3d", "rotation"]),
    (Subcategory::Filter, &["dissolve", "glitch", "distortion", "wave", "prism", "mirror"]),
];

pub const INTENSITY_KEYWORDS: KeywordTable<Intensity> = &[
    (Intensity::Low, &["breathing", "fade", "echo"]),
    (Intensity::Medium, &["glow", "sparkle", "wave", "float"]),
    (Intensity::High, &["explosion", "plasma", "quantum", "reality", "gravity"]),
];

pub const PERFORMANCE_KEYWORDS: KeywordTable<Performance> = &[
    (Performance::Light, &["fade", "breathing", "glow", "echo"]),
    (Performance::Medium, &["neon", "sparkle", "wave", "particle"]),
    (Performance::Heavy, &["plasma", "quantum", "reality", "gravity", "3d"]),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: Category,
    pub subcategory: Subcategory,
    pub intensity: Intensity,
    pub performance: Performance,
    pub tags: Vec<String>,
}

impl ClassificationResult {
    pub fn compatibility(&self) -> Compatibility {
        Compatibility::for_category(self.category)
    }
}

/// Classify an item from its name and free-text description. Total: never fails.
pub fn classify(name: &str, description: &str) -> ClassificationResult {
    let text = combined_text(name, description);

    let result = ClassificationResult {
        category: first_match(CATEGORY_KEYWORDS, &text).unwrap_or_default(),
        subcategory: first_match(SUBCATEGORY_KEYWORDS, &text).unwrap_or_default(),
        intensity: first_match(INTENSITY_KEYWORDS, &text).unwrap_or_default(),
        performance: first_match(PERFORMANCE_KEYWORDS, &text).unwrap_or_default(),
        tags: extract_tags(name, &text),
    };

    tracing::debug!(
        effect = name,
        category = result.category.as_str(),
        subcategory = result.subcategory.as_str(),
        intensity = result.intensity.as_str(),
        performance = result.performance.as_str(),
        tags = ?result.tags,
        "classified"
    );

    result
}

fn combined_text(name: &str, description: &str) -> String {
    format!("{} {}", name, description).to_lowercase()
}

fn first_match<L: Copy>(table: KeywordTable<L>, text: &str) -> Option<L> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(label, _)| *label)
}

fn matched_keywords<L: 'static>(table: KeywordTable<L>, text: &str) -> impl Iterator<Item = &'static str> + '_ {
    table
        .iter()
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .filter(move |k| text.contains(k))
}

fn extract_tags(name: &str, text: &str) -> Vec<String> {
    let keyword_tags = matched_keywords(CATEGORY_KEYWORDS, text)
        .chain(matched_keywords(SUBCATEGORY_KEYWORDS, text))
        .chain(matched_keywords(INTENSITY_KEYWORDS, text))
        .chain(matched_keywords(PERFORMANCE_KEYWORDS, text))
        .map(str::to_string);

    let lowered = name.to_lowercase();
    let name_tags = lowered
        .split('-')
        .filter(|segment| segment.chars().count() > MIN_NAME_TAG_LEN)
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut tags: Vec<String> = Vec::with_capacity(MAX_TAGS);
    for tag in keyword_tags.chain(name_tags) {
        if tags.len() == MAX_TAGS {
            break;
        }
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_falls_back_to_defaults() {
        let r = classify("zz-qq", "nothing recognisable");
        assert_eq!(r.category, Category::Universal);
        assert_eq!(r.subcategory, Subcategory::Style);
        assert_eq!(r.intensity, Intensity::Medium);
        assert_eq!(r.performance, Performance::Medium);
        assert!(r.tags.is_empty());
    }

    #[test]
    fn test_first_declared_label_wins() {
        // "glow" is under universal, "glitch" under image; image is declared first.
        let r = classify("glow-glitch", "");
        assert_eq!(r.category, Category::Image);

        // "dissolve" sits under both category image and subcategory filter.
        let r = classify("melt", "A slow dissolve");
        assert_eq!(r.category, Category::Image);
        assert_eq!(r.subcategory, Subcategory::Filter);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let r = classify("Neon-Sign", "BRIGHT PLASMA");
        assert_eq!(r.subcategory, Subcategory::Style);
        assert_eq!(r.intensity, Intensity::High);
        assert_eq!(r.performance, Performance::Medium);
    }

    #[test]
    fn test_substring_matching() {
        // "letters" contains "letter"; "texture" contains "text".
        assert_eq!(classify("bubble", "floating letters").category, Category::Text);
        assert_eq!(classify("grain", "rough texture").category, Category::Text);
    }

    #[test]
    fn test_tags_follow_axis_order_then_name() {
        let r = classify("pulse-glow", "soft breathing");
        assert_eq!(r.tags, vec!["glow", "pulse", "breathing"]);
    }

    #[test]
    fn test_name_segments_become_tags() {
        let r = classify("zz-ripple-xy-ocean", "");
        assert_eq!(r.tags, vec!["ripple", "ocean"]);
    }

    #[test]
    fn test_tags_capped_and_unique() {
        let r = classify(
            "glow-glow-quantum",
            "text image glow pulse neon morph glitch fade plasma gravity",
        );
        assert_eq!(r.tags.len(), MAX_TAGS);
        let mut seen = std::collections::HashSet::new();
        assert!(r.tags.iter().all(|t| seen.insert(t.clone())));
        assert_eq!(&r.tags[..3], &["text", "image", "glitch"]);
    }

    #[test]
    fn test_deterministic() {
        let a = classify("echo-wave", "mirror prism");
        let b = classify("echo-wave", "mirror prism");
        assert_eq!(a, b);
    }
}

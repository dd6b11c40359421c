//! Manifest - Ordered Catalog of Definitions
//!
//! Keys are unique, order is discovery order. `filter` mirrors the
//! `filterEffects` function emitted into the index module.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::EffectDefinition;
use crate::taxonomy::{Category, Intensity, Performance, Subcategory};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Duplicate effect id: {0}")]
    DuplicateIdentifier(String),
}

/// Only `true` entries constrain; `false` or absent keys match anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompatibilityCriteria {
    #[serde(default)]
    pub text: Option<bool>,
    #[serde(default)]
    pub image: Option<bool>,
    #[serde(default)]
    pub logo: Option<bool>,
    #[serde(default)]
    pub background: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCriteria {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub subcategory: Option<Subcategory>,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub performance: Option<Performance>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub compatibility: Option<CompatibilityCriteria>,
}

impl FilterCriteria {
    pub fn matches(&self, def: &EffectDefinition) -> bool {
        if self.category.is_some_and(|c| c != def.category) {
            return false;
        }
        if self.subcategory.is_some_and(|s| s != def.subcategory) {
            return false;
        }
        if self.intensity.is_some_and(|i| i != def.intensity) {
            return false;
        }
        if self.performance.is_some_and(|p| p != def.performance) {
            return false;
        }
        if let Some(tags) = &self.tags {
            if !tags.is_empty() && !tags.iter().any(|t| def.tags.contains(t)) {
                return false;
            }
        }
        if let Some(wanted) = &self.compatibility {
            let have = &def.compatibility;
            let required = [
                (wanted.text, have.text),
                (wanted.image, have.image),
                (wanted.logo, have.logo),
                (wanted.background, have.background),
            ];
            if required.iter().any(|(w, h)| *w == Some(true) && !h) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub categories: BTreeMap<String, usize>,
    pub subcategories: BTreeMap<String, usize>,
    pub intensities: BTreeMap<String, usize>,
    pub performances: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    definitions: Vec<EffectDefinition>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: EffectDefinition) -> Result<(), ManifestError> {
        if self.contains(&def.id) {
            return Err(ManifestError::DuplicateIdentifier(def.id));
        }
        self.definitions.push(def);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&EffectDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.id.as_str()).collect()
    }

    pub fn definitions(&self) -> &[EffectDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&EffectDefinition> {
        self.definitions.iter().filter(|d| criteria.matches(d)).collect()
    }

    /// Sorted, de-duplicated tags across the catalog.
    pub fn all_tags(&self) -> Vec<String> {
        self.definitions
            .iter()
            .flat_map(|d| d.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.definitions.len(),
            ..Default::default()
        };
        for d in &self.definitions {
            *stats.categories.entry(d.category.as_str().to_string()).or_default() += 1;
            *stats.subcategories.entry(d.subcategory.as_str().to_string()).or_default() += 1;
            *stats.intensities.entry(d.intensity.as_str().to_string()).or_default() += 1;
            *stats.performances.entry(d.performance.as_str().to_string()).or_default() += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::definition::{build_definition, EffectSource};

    fn def(name: &str, description: &str) -> EffectDefinition {
        let source = EffectSource::new(name, description, "");
        build_definition(&source, &classify(name, description))
    }

    fn catalog() -> Manifest {
        let mut m = Manifest::new();
        m.insert(def("pulse-glow", "soft breathing light")).unwrap();
        m.insert(def("typewriter", "letters appear one by one")).unwrap();
        m.insert(def("pixel-storm", "particle explosion")).unwrap();
        m
    }

    #[test]
    fn test_empty_criteria_returns_all() {
        let m = catalog();
        let all = m.filter(&FilterCriteria::default());
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "pulse-glow");
    }

    #[test]
    fn test_tag_filter_is_any_match() {
        let m = catalog();
        let criteria = FilterCriteria {
            tags: Some(vec!["glow".to_string()]),
            ..Default::default()
        };
        let ids: Vec<_> = m.filter(&criteria).iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec!["pulse-glow"]);

        let criteria = FilterCriteria {
            tags: Some(vec!["glow".to_string(), "typewriter".to_string()]),
            ..Default::default()
        };
        assert_eq!(m.filter(&criteria).len(), 2);
    }

    #[test]
    fn test_empty_tag_list_is_unconstrained() {
        let m = catalog();
        let criteria = FilterCriteria { tags: Some(vec![]), ..Default::default() };
        assert_eq!(m.filter(&criteria).len(), 3);
    }

    #[test]
    fn test_scalar_and_compatibility_filters() {
        let m = catalog();
        let text_only = FilterCriteria { category: Some(Category::Text), ..Default::default() };
        assert_eq!(m.filter(&text_only)[0].id, "typewriter");

        let needs_background = FilterCriteria {
            compatibility: Some(CompatibilityCriteria {
                background: Some(true),
                text: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let ids: Vec<_> = m.filter(&needs_background).iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["pulse-glow", "pixel-storm"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut m = catalog();
        let err = m.insert(def("pulse-glow", "again")).unwrap_err();
        assert_eq!(err, ManifestError::DuplicateIdentifier("pulse-glow".to_string()));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_stats_and_tags() {
        let m = catalog();
        let stats = m.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories.values().sum::<usize>(), 3);

        let tags = m.all_tags();
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"glow".to_string()));
    }
}

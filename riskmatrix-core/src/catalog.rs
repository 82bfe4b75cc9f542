//! Hazard catalog with a per-session overlay
//!
//! Global invariants enforced:
//! - Built-in hazard lists are never mutated
//! - Custom hazards belong to one catalog instance and are appended after
//!   the built-ins, in insertion order
//! - Category names are matched exactly; hazard search is case-insensitive

use crate::category::{Category, Method};
use crate::error::{RiskError, RiskResult};
use crate::hazards::builtin_hazards;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HazardCatalog {
    method: Method,
    additions: BTreeMap<Category, Vec<String>>,
}

impl HazardCatalog {
    pub fn new(method: Method) -> Self {
        HazardCatalog {
            method,
            additions: BTreeMap::new(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn categories(&self) -> &'static [Category] {
        self.method.categories()
    }

    /// Hazards listed under a category name; empty if the name is unknown
    pub fn hazards_of(&self, category: &str) -> Vec<String> {
        match self.method.category(category) {
            Some(c) => self.hazards_in(c),
            None => Vec::new(),
        }
    }

    /// Built-in hazards followed by session additions
    pub fn hazards_in(&self, category: Category) -> Vec<String> {
        let builtins = builtin_hazards(self.method, category)
            .iter()
            .map(|h| h.to_string());
        let custom = self
            .additions
            .get(&category)
            .into_iter()
            .flatten()
            .cloned();
        builtins.chain(custom).collect()
    }

    /// Append a hazard for the rest of this session
    ///
    /// Duplicates are accepted. The name is stored trimmed.
    pub fn add_custom_hazard(&mut self, category: Category, name: &str) -> RiskResult<()> {
        if !self.method.offers(category) {
            return Err(RiskError::CategoryNotInMethod {
                category: category.as_str().to_string(),
                method: self.method.as_str().to_string(),
            });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RiskError::EmptyHazardName);
        }

        debug!(method = %self.method, category = %category, hazard = name, "custom hazard added");
        self.additions
            .entry(category)
            .or_default()
            .push(name.to_string());
        Ok(())
    }

    /// Case-insensitive substring search within one category
    pub fn search(&self, category: &str, substring: &str) -> Vec<String> {
        let needle = substring.to_lowercase();
        self.hazards_of(category)
            .into_iter()
            .filter(|h| h.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn contains(&self, category: Category, hazard: &str) -> bool {
        builtin_hazards(self.method, category)
            .iter()
            .any(|h| *h == hazard)
            || self
                .additions
                .get(&category)
                .is_some_and(|list| list.iter().any(|h| h == hazard))
    }

    /// Number of hazards added during this session
    pub fn custom_count(&self) -> usize {
        self.additions.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazards_of_unknown_category_is_empty() {
        let catalog = HazardCatalog::new(Method::Dgms);
        assert!(catalog.hazards_of("Roof Bolting").is_empty());
        assert!(catalog.hazards_of("ground movement").is_empty());
        assert!(catalog.hazards_of("Human Factors").is_empty());
    }

    #[test]
    fn test_custom_hazard_is_appended() {
        let mut catalog = HazardCatalog::new(Method::Tram);
        catalog
            .add_custom_hazard(Category::Environmental, "Heat stress")
            .unwrap();

        let hazards = catalog.hazards_of("Environmental");
        assert_eq!(
            hazards,
            vec!["Gas emission", "Water inrush", "Fire hazard", "Heat stress"]
        );
        assert!(catalog.contains(Category::Environmental, "Heat stress"));
        assert_eq!(catalog.custom_count(), 1);
    }

    #[test]
    fn test_duplicate_custom_hazards_are_kept() {
        let mut catalog = HazardCatalog::new(Method::Tram);
        catalog.add_custom_hazard(Category::HumanFactors, "Fatigue").unwrap();
        catalog.add_custom_hazard(Category::HumanFactors, "Fatigue").unwrap();
        catalog.add_custom_hazard(Category::HumanFactors, "Operator error").unwrap();

        let hazards = catalog.hazards_of("Human Factors");
        assert_eq!(hazards.len(), 6);
        assert_eq!(hazards.iter().filter(|h| *h == "Fatigue").count(), 2);
    }

    #[test]
    fn test_custom_hazards_are_isolated_per_catalog() {
        let mut first = HazardCatalog::new(Method::Dgms);
        let second = HazardCatalog::new(Method::Dgms);
        first.add_custom_hazard(Category::MineFire, "Battery charging bay").unwrap();

        assert!(first.contains(Category::MineFire, "Battery charging bay"));
        assert!(!second.contains(Category::MineFire, "Battery charging bay"));
        assert_eq!(
            second.hazards_of("Mine Fire").len(),
            builtin_hazards(Method::Dgms, Category::MineFire).len()
        );
    }

    #[test]
    fn test_add_rejects_blank_and_foreign_category() {
        let mut catalog = HazardCatalog::new(Method::Tram);
        assert_eq!(
            catalog.add_custom_hazard(Category::GroundMovement, "   "),
            Err(RiskError::EmptyHazardName)
        );
        assert!(matches!(
            catalog.add_custom_hazard(Category::Explosives, "Misfire"),
            Err(RiskError::CategoryNotInMethod { .. })
        ));
        assert_eq!(catalog.custom_count(), 0);
    }

    #[test]
    fn test_search_is_case_insensitive_within_category() {
        let catalog = HazardCatalog::new(Method::Dgms);
        let hits = catalog.search("Belt Conveyor System", "BELT");
        assert!(hits.contains(&"Improper belt condition".to_string()));
        assert!(hits.contains(&"Defective belt alignment".to_string()));
        assert!(hits.iter().all(|h| h.to_lowercase().contains("belt")));

        // Category name itself is not searched
        assert!(catalog.search("Inundation", "inundation").is_empty());
    }

    #[test]
    fn test_search_with_empty_substring_returns_all() {
        let catalog = HazardCatalog::new(Method::Tram);
        assert_eq!(catalog.search("Ground Movement", "").len(), 3);
        assert!(catalog.search("Nowhere", "").is_empty());
    }

    #[test]
    fn test_search_includes_custom_hazards() {
        let mut catalog = HazardCatalog::new(Method::Tram);
        catalog.add_custom_hazard(Category::GroundMovement, "Roof bolt failure").unwrap();
        let hits = catalog.search("Ground Movement", "roof");
        assert_eq!(hits, vec!["Roof fall", "Roof bolt failure"]);
    }
}

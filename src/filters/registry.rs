use std::collections::HashMap;

use crate::filters::{BrightFilter, PixelFilter, SmoothFilter, StaticFilterKind, VintageFilter};

/// Registry for managing available static filters
///
/// Filters are registered by name and instantiated on demand.
pub struct FilterRegistry {
    filters: HashMap<String, Box<dyn Fn() -> Box<dyn PixelFilter>>>,
}

impl FilterRegistry {
    /// Create a new filter registry with all built-in filters
    pub fn new() -> Self {
        let mut registry = Self {
            filters: HashMap::new(),
        };

        registry.register_builtin_filters();
        registry
    }

    fn register_builtin_filters(&mut self) {
        self.filters.insert(
            "vintage".to_string(),
            Box::new(|| Box::new(VintageFilter::new())),
        );

        self.filters.insert(
            "bright".to_string(),
            Box::new(|| Box::new(BrightFilter::new())),
        );

        self.filters.insert(
            "smooth".to_string(),
            Box::new(|| Box::new(SmoothFilter::new())),
        );
    }

    /// Register a custom filter
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name for the filter
    /// * `factory` - Function that creates new instances of the filter
    pub fn register<F>(&mut self, name: String, factory: F)
    where
        F: Fn() -> Box<dyn PixelFilter> + 'static,
    {
        self.filters.insert(name, Box::new(factory));
    }

    /// Get a filter by name
    pub fn get_filter(&self, name: &str) -> Option<Box<dyn PixelFilter>> {
        self.filters.get(name).map(|factory| factory())
    }

    /// Get the filter implementing a kind. `None` has no filter: it is the identity.
    pub fn for_kind(&self, kind: StaticFilterKind) -> Option<Box<dyn PixelFilter>> {
        match kind {
            StaticFilterKind::None => None,
            other => self.get_filter(&other.to_string()),
        }
    }

    /// Get all available filter names, sorted
    pub fn available_filters(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a filter is available
    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_filters_available() {
        let registry = FilterRegistry::new();

        assert!(registry.has_filter("vintage"));
        assert!(registry.has_filter("bright"));
        assert!(registry.has_filter("smooth"));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.available_filters(), vec!["bright", "smooth", "vintage"]);
    }

    #[test]
    fn test_for_kind() {
        let registry = FilterRegistry::new();

        assert!(registry.for_kind(StaticFilterKind::None).is_none());
        let smooth = registry.for_kind(StaticFilterKind::Smooth).unwrap();
        assert_eq!(smooth.name(), "smooth");
        assert_eq!(smooth.kind(), StaticFilterKind::Smooth);
    }

    #[test]
    fn test_custom_filter_registration() {
        let mut registry = FilterRegistry::new();

        registry.register("extra-bright".to_string(), || Box::new(BrightFilter::new()));

        assert!(registry.has_filter("extra-bright"));
        assert_eq!(registry.len(), 4);
        assert!(registry.get_filter("unknown").is_none());
    }
}

//! Cache key derivation for recipe requests

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::recipe::RecipeRequest;

/// Default namespace prepended to recipe keys
pub const DEFAULT_KEY_NAMESPACE: &str = "recipe";

/// Normalized key material
///
/// Serialized as JSON before hashing, so free-form values can never collide by
/// smuggling in a delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheKeyParams {
    /// Primary identifier (the sorted ingredient list)
    pub primary: Vec<String>,
    /// Optional components, ordered by name
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    pub fn new<I, S>(primary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary: primary.into_iter().map(Into::into).collect(),
            components: BTreeMap::new(),
        }
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }

    /// Canonical JSON form of the parameters
    pub fn canonical(&self) -> String {
        // Vec<String> and BTreeMap<String, String> always serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Builds normalized parameters from a recipe request
    pub fn from_request(request: &RecipeRequest) -> Self {
        let mut params = Self::new(request.sorted_ingredients());

        if let Some(cuisine) = &request.cuisine_type {
            params = params.with_component("cuisine_type", cuisine.clone());
        }

        if let Some(restrictions) = request.sorted_dietary_restrictions() {
            let encoded = serde_json::to_string(&restrictions).unwrap_or_default();
            params = params.with_component("dietary_restrictions", encoded);
        }

        params
    }
}

/// Derives stable cache keys from recipe requests
///
/// Keys have the form `<namespace>:<sha256 hex>`. Ingredient and dietary
/// restriction order never affects the key; case does.
#[derive(Debug, Clone)]
pub struct RecipeKeyDeriver {
    namespace: String,
}

impl Default for RecipeKeyDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_NAMESPACE)
    }
}

impl RecipeKeyDeriver {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Derives the cache key for a request
    pub fn derive(&self, request: &RecipeRequest) -> String {
        self.derive_from_params(&CacheKeyParams::from_request(request))
    }

    pub fn derive_from_params(&self, params: &CacheKeyParams) -> String {
        let digest = Sha256::digest(params.canonical().as_bytes());
        format!("{}:{}", self.namespace, hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(request: &RecipeRequest) -> String {
        RecipeKeyDeriver::default().derive(request)
    }

    #[test]
    fn test_permutations_collide() {
        let a = RecipeRequest::new(["egg", "rice", "scallion"]);
        let b = RecipeRequest::new(["scallion", "egg", "rice"]);
        let c = RecipeRequest::new(["rice", "scallion", "egg"]);

        assert_eq!(derive(&a), derive(&b));
        assert_eq!(derive(&b), derive(&c));
    }

    #[test]
    fn test_case_is_preserved() {
        let lower = RecipeRequest::new(["egg"]);
        let upper = RecipeRequest::new(["Egg"]);

        assert_ne!(derive(&lower), derive(&upper));
    }

    #[test]
    fn test_duplicates_are_significant() {
        let once = RecipeRequest::new(["egg", "rice"]);
        let twice = RecipeRequest::new(["egg", "egg", "rice"]);

        assert_ne!(derive(&once), derive(&twice));
    }

    #[test]
    fn test_cuisine_type_changes_key() {
        let base = RecipeRequest::new(["chicken", "rice"]);
        let thai = base.clone().with_cuisine_type("Thai");
        let mexican = base.clone().with_cuisine_type("Mexican");

        assert_ne!(derive(&base), derive(&thai));
        assert_ne!(derive(&thai), derive(&mexican));
    }

    #[test]
    fn test_dietary_restrictions_change_key_but_not_order() {
        let base = RecipeRequest::new(["tofu"]);
        let vegan = base.clone().with_dietary_restrictions(["vegan", "halal"]);
        let reordered = base.clone().with_dietary_restrictions(["halal", "vegan"]);
        let empty = base.clone().with_dietary_restrictions(Vec::<String>::new());

        assert_ne!(derive(&base), derive(&vegan));
        assert_eq!(derive(&vegan), derive(&reordered));
        assert_ne!(derive(&base), derive(&empty));
    }

    #[test]
    fn test_delimiter_injection_does_not_collide() {
        let joined = RecipeRequest::new(["a,b"]);
        let split = RecipeRequest::new(["a", "b"]);

        assert_ne!(derive(&joined), derive(&split));
    }

    #[test]
    fn test_filter_cannot_masquerade_as_ingredient() {
        let filtered = RecipeRequest::new(["rice"]).with_cuisine_type("Thai");
        let smuggled = RecipeRequest::new(["rice", "cuisine_type=Thai"]);

        assert_ne!(derive(&filtered), derive(&smuggled));
    }

    #[test]
    fn test_empty_request_has_key() {
        let key = derive(&RecipeRequest::default());

        assert!(key.starts_with("recipe:"));
        assert_eq!(key.len(), "recipe:".len() + 64);
    }

    #[test]
    fn test_namespace_prefix() {
        let deriver = RecipeKeyDeriver::new("recipes:v2");
        let key = deriver.derive(&RecipeRequest::new(["egg"]));

        assert!(key.starts_with("recipes:v2:"));
        assert_eq!(deriver.namespace(), "recipes:v2");
    }

    #[test]
    fn test_canonical_form() {
        let params = CacheKeyParams::new(["egg"])
            .with_component("zebra", "z")
            .with_component("apple", "a");

        assert_eq!(
            params.canonical(),
            r#"{"primary":["egg"],"components":{"apple":"a","zebra":"z"}}"#
        );
    }
}

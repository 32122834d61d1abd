//! Recipe request and recipe entities

use serde::{Deserialize, Serialize};

/// Maximum number of suggestions kept on a [`Recipe`]
pub const MAX_SUGGESTIONS: usize = 2;

/// Inbound request for a generated recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Ingredients on hand; order carries no meaning
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
}

impl RecipeRequest {
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            cuisine_type: None,
            dietary_restrictions: None,
        }
    }

    pub fn with_cuisine_type(mut self, cuisine_type: impl Into<String>) -> Self {
        self.cuisine_type = Some(cuisine_type.into());
        self
    }

    pub fn with_dietary_restrictions<I, S>(mut self, restrictions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dietary_restrictions = Some(restrictions.into_iter().map(Into::into).collect());
        self
    }

    /// Ingredients in lexicographic order
    pub fn sorted_ingredients(&self) -> Vec<&str> {
        let mut ingredients: Vec<&str> = self.ingredients.iter().map(String::as_str).collect();
        ingredients.sort_unstable();
        ingredients
    }

    /// Dietary restrictions in lexicographic order, if any were given
    pub fn sorted_dietary_restrictions(&self) -> Option<Vec<&str>> {
        self.dietary_restrictions.as_ref().map(|restrictions| {
            let mut sorted: Vec<&str> = restrictions.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            sorted
        })
    }
}

/// Generated recipe as returned to callers and stored in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub cuisine_name: String,
    /// Sequential instructions
    pub steps: Vec<String>,
    /// Up to two enhancement suggestions or incompatibility notes
    pub suggested_ingredients: Vec<String>,
}

impl Recipe {
    pub fn new(cuisine_name: impl Into<String>, steps: Vec<String>) -> Self {
        Self {
            cuisine_name: cuisine_name.into(),
            steps,
            suggested_ingredients: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggested_ingredients = suggestions;
        self
    }
}

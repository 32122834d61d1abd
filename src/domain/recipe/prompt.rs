//! Prompt construction for recipe generation
//!
//! The template uses `${ingredients}` and `${preferences}` placeholders. The
//! rendered prompt always asks for a single JSON object shaped like
//! [`Recipe`](super::Recipe); surrounding prose in the answer is tolerated by
//! the parser.

use super::RecipeRequest;

const INGREDIENTS_PLACEHOLDER: &str = "${ingredients}";
const PREFERENCES_PLACEHOLDER: &str = "${preferences}";

const DEFAULT_TEMPLATE: &str = r#"Given the ingredients: ${ingredients}
${preferences}
Generate:
1. A creative, attractive cuisine name that would excite a professional chef or foodie.
2. Detailed cooking instructions in Gordon Ramsay's tone: precise, high-energy and professional.
3. Up to two suggested ingredients that would enhance the dish, or a note about any ingredient that does not belong.

Respond with a single JSON object and nothing else:
{
  "cuisine_name": "Your amazing dish name",
  "steps": [
    "Step 1...",
    "Step 2..."
  ],
  "suggested_ingredients": [
    "Suggestion 1...",
    "Suggestion 2..."
  ]
}"#;

/// Fixed prompt template for recipe generation
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            content: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Render the prompt for a request, using the sorted ingredient list
    ///
    /// Placeholders are replaced in a single pass over the template, so
    /// substituted values are never scanned for further placeholders.
    pub fn render(&self, request: &RecipeRequest) -> String {
        let ingredients = request.sorted_ingredients().join(", ");
        let preferences = render_preferences(request);

        let mut rendered = String::with_capacity(self.content.len() + ingredients.len());
        let mut rest = self.content.as_str();

        while let Some(idx) = rest.find("${") {
            rendered.push_str(&rest[..idx]);
            let tail = &rest[idx..];

            rest = if let Some(after) = tail.strip_prefix(INGREDIENTS_PLACEHOLDER) {
                rendered.push_str(&ingredients);
                after
            } else if let Some(after) = tail.strip_prefix(PREFERENCES_PLACEHOLDER) {
                rendered.push_str(&preferences);
                after
            } else {
                rendered.push_str("${");
                &tail[2..]
            };
        }

        rendered.push_str(rest);
        rendered
    }
}

fn render_preferences(request: &RecipeRequest) -> String {
    let mut lines = Vec::new();

    if let Some(cuisine) = &request.cuisine_type {
        lines.push(format!("Cuisine style: {}", cuisine));
    }

    if let Some(restrictions) = request.sorted_dietary_restrictions() {
        if !restrictions.is_empty() {
            lines.push(format!(
                "Dietary restrictions to respect: {}",
                restrictions.join(", ")
            ));
        }
    }

    lines.join("\n")
}

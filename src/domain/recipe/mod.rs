//! Recipe domain - requests, generated recipes, prompt and response parsing

mod entity;
mod parser;
mod prompt;

pub use entity::{Recipe, RecipeRequest, MAX_SUGGESTIONS};
pub use parser::{extract_json_object, parse_recipe};
pub use prompt::PromptTemplate;

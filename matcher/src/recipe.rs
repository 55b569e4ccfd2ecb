use crate::error::{Error, Result};
use crate::DocId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "recipe_name")]
    pub name: String,
    #[serde(rename = "ingredients_list")]
    pub ingredients: String,
    pub image_url: String,
}

impl Recipe {
    pub fn new(name: impl Into<String>, ingredients: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self { name: name.into(), ingredients: ingredients.into(), image_url: image_url.into() }
    }

    /// Reject recipes with a blank name or blank ingredients. `record` is the
    /// corpus position reported in the error.
    pub(crate) fn validate(&self, record: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField { record, field: "recipe_name" });
        }
        if self.ingredients.trim().is_empty() {
            return Err(Error::MissingField { record, field: "ingredients_list" });
        }
        Ok(())
    }
}

/// A recipe that cleared the similarity threshold.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RecipeMatch<'a> {
    /// Position of the recipe in the corpus.
    pub id: DocId,
    #[serde(flatten)]
    pub recipe: &'a Recipe,
    pub similarity: f32,
}

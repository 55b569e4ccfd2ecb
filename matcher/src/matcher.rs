use crate::error::{Error, Result};
use crate::recipe::{Recipe, RecipeMatch};
use crate::vector::SparseVector;
use crate::vectorizer::{VectorSpace, VectorizerConfig};
use crate::DocId;

pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Minimum cosine similarity a recipe needs to be recommended, within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f32);

impl Threshold {
    /// Out-of-range and NaN values are rejected, not clamped.
    pub fn new(value: f32) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<f32> for Threshold {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value)
    }
}

/// A recipe corpus together with its fitted TF-IDF space.
///
/// Everything is computed in the constructor and never changes afterwards, so
/// one matcher can be shared across threads behind an `Arc` without locking.
#[derive(Debug)]
pub struct RecipeMatcher {
    recipes: Vec<Recipe>,
    space: VectorSpace,
    vectors: Vec<SparseVector>,
}

impl RecipeMatcher {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        Self::with_config(recipes, VectorizerConfig::default())
    }

    /// Validate every recipe and vectorize the corpus. A single bad recipe
    /// fails the whole corpus, including one whose ingredients weigh nothing
    /// (only stopwords, or only terms the IDF mode zeroes out).
    pub fn with_config(recipes: Vec<Recipe>, config: VectorizerConfig) -> Result<Self> {
        if recipes.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        for (record, recipe) in recipes.iter().enumerate() {
            recipe.validate(record)?;
        }
        let docs: Vec<&str> = recipes.iter().map(|r| r.ingredients.as_str()).collect();
        let (space, vectors) = VectorSpace::fit(&docs, config)?;
        if let Some(record) = vectors.iter().position(SparseVector::is_zero) {
            return Err(Error::DegenerateRecord { record });
        }
        Ok(Self { recipes, space, vectors })
    }

    /// Recipes whose ingredients are at least `threshold` similar to `query`,
    /// most similar first. Equal scores keep corpus order.
    pub fn recommend(&self, query: &str, threshold: Threshold) -> Vec<RecipeMatch<'_>> {
        let q = self.space.transform(query);
        let mut matches: Vec<RecipeMatch<'_>> = self
            .recipes
            .iter()
            .zip(&self.vectors)
            .enumerate()
            .map(|(id, (recipe, doc))| RecipeMatch { id: id as DocId, recipe, similarity: q.cosine(doc) })
            .filter(|m| m.similarity >= threshold.value())
            .collect();
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        tracing::debug!(query, threshold = threshold.value(), hits = matches.len(), "recommend");
        matches
    }

    /// Recipes whose name contains `query`, ignoring case, in corpus order.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.to_lowercase();
        let hits: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect();
        tracing::debug!(query, hits = hits.len(), "search");
        hits
    }

    pub fn get(&self, id: DocId) -> Option<&Recipe> {
        self.recipes.get(id as usize)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

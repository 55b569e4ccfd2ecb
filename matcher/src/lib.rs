pub mod error;
pub mod loader;
pub mod matcher;
pub mod recipe;
pub mod text;
pub mod tokenizer;
pub mod vector;
pub mod vectorizer;

pub type TermId = u32;
pub type DocId = u32;

pub use error::{Error, Result};
pub use loader::load_corpus;
pub use matcher::{RecipeMatcher, Threshold, DEFAULT_THRESHOLD};
pub use recipe::{Recipe, RecipeMatch};
pub use text::{truncate, DEFAULT_TRUNCATE_LEN, TRUNCATION_MARKER};
pub use vectorizer::{IdfMode, VectorSpace, VectorizerConfig};

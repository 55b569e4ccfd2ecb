pub mod error;
pub mod languages;

use anyhow::Result;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use error::ApiError;
use languages::{Language, LanguagePatch, LanguageStore, NewLanguage};
use matcher::{load_corpus, truncate, DocId, Recipe, RecipeMatcher, Threshold, VectorizerConfig, DEFAULT_THRESHOLD, DEFAULT_TRUNCATE_LEN};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    pub limit: Option<usize>,
}
fn default_threshold() -> f32 { DEFAULT_THRESHOLD }

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub threshold: f32,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<RecommendHit>,
}

#[derive(Serialize)]
pub struct RecommendHit {
    pub id: DocId,
    pub recipe_name: String,
    pub ingredients_list: String,
    pub ingredients_preview: String,
    pub image_url: String,
    pub similarity: f32,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub recipe_name: String,
    pub ingredients_list: String,
    pub ingredients_preview: String,
    pub image_url: String,
}

impl From<&Recipe> for SearchHit {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_name: recipe.name.clone(),
            ingredients_list: recipe.ingredients.clone(),
            ingredients_preview: truncate(&recipe.ingredients, DEFAULT_TRUNCATE_LEN).into_owned(),
            image_url: recipe.image_url.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct LanguageList {
    pub languages: Vec<Language>,
    pub count: usize,
}

/// Shared across requests. The matcher is read-only; the language catalog is
/// the only state that changes while serving.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<RecipeMatcher>,
    pub languages: Arc<LanguageStore>,
}

impl AppState {
    pub fn new(matcher: RecipeMatcher) -> Self {
        Self { matcher: Arc::new(matcher), languages: Arc::new(LanguageStore::seeded()) }
    }
}

/// Load and vectorize the corpus, then build the router. Fails before any
/// request is served if the corpus is unusable.
pub fn build_app(corpus_path: String, config: VectorizerConfig) -> Result<Router> {
    let recipes = load_corpus(&corpus_path)?;
    let matcher = RecipeMatcher::with_config(recipes, config)?;
    tracing::info!(corpus = %corpus_path, recipes = matcher.len(), terms = matcher.space().num_terms(), "recipe matcher ready");
    Ok(router(AppState::new(matcher)))
}

/// Origins come from `CORS_ALLOW_ORIGIN` (comma-separated); any origin is
/// allowed when it is unset or holds nothing parseable.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .route("/search", get(search_handler))
        .route("/recipes/:id", get(recipe_handler))
        .route("/api/languages", get(list_languages).post(create_language))
        .route("/api/languages/:id", get(get_language).put(update_language).delete(delete_language))
        .route("/api/languages/name/:name", get(get_language_by_name))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    params: Result<Query<RecommendParams>, QueryRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let start = std::time::Instant::now();
    let Query(params) =
        params.map_err(|rejection| ApiError::BadRequest(format!("invalid query parameters: {}", rejection.body_text())))?;
    let threshold = Threshold::new(params.threshold)?;
    let matches = state.matcher.recommend(&params.q, threshold);
    let total_hits = matches.len();
    let limit = params.limit.unwrap_or(total_hits);

    let results = matches
        .into_iter()
        .take(limit)
        .map(|m| RecommendHit {
            id: m.id,
            recipe_name: m.recipe.name.clone(),
            ingredients_list: m.recipe.ingredients.clone(),
            ingredients_preview: truncate(&m.recipe.ingredients, DEFAULT_TRUNCATE_LEN).into_owned(),
            image_url: m.recipe.image_url.clone(),
            similarity: m.similarity,
        })
        .collect();

    let elapsed = start.elapsed();
    Ok(Json(RecommendResponse {
        query: params.q,
        threshold: threshold.value(),
        took_ms: elapsed.as_millis(),
        took_s: elapsed.as_secs_f64(),
        total_hits,
        results,
    }))
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let results: Vec<SearchHit> = state.matcher.search(&params.q).into_iter().map(SearchHit::from).collect();
    Json(SearchResponse { query: params.q, total_hits: results.len(), results })
}

pub async fn recipe_handler(State(state): State<AppState>, Path(id): Path<DocId>) -> Result<Json<Recipe>, ApiError> {
    state
        .matcher
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Recipe not found".into()))
}

// --- Language catalog ---

fn language_not_found() -> ApiError {
    ApiError::NotFound("Language not found".into())
}

fn bad_request() -> ApiError {
    ApiError::BadRequest("Bad request".into())
}

async fn list_languages(State(state): State<AppState>) -> Json<LanguageList> {
    let languages = state.languages.list();
    Json(LanguageList { count: languages.len(), languages })
}

async fn get_language(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<Language>, ApiError> {
    state.languages.get(id).map(Json).ok_or_else(language_not_found)
}

async fn get_language_by_name(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<Language>, ApiError> {
    state.languages.find_by_name(&name).map(Json).ok_or_else(language_not_found)
}

async fn create_language(
    State(state): State<AppState>,
    payload: Result<Json<NewLanguage>, JsonRejection>,
) -> Result<(StatusCode, Json<Language>), ApiError> {
    let Json(new) = payload.map_err(|_| bad_request())?;
    let language = state.languages.insert(new);
    tracing::info!(id = language.id, name = %language.name, "language added");
    Ok((StatusCode::CREATED, Json(language)))
}

async fn update_language(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Language>, ApiError> {
    if state.languages.get(id).is_none() {
        return Err(language_not_found());
    }
    // An empty object counts as a missing body.
    let Ok(Json(serde_json::Value::Object(body))) = payload else {
        return Err(bad_request());
    };
    if body.is_empty() {
        return Err(bad_request());
    }
    let patch: LanguagePatch = serde_json::from_value(serde_json::Value::Object(body)).map_err(|_| bad_request())?;
    state.languages.update(id, patch).map(Json).ok_or_else(language_not_found)
}

async fn delete_language(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.languages.remove(id) {
        return Err(language_not_found());
    }
    tracing::info!(id, "language deleted");
    Ok(Json(serde_json::json!({ "result": true })))
}

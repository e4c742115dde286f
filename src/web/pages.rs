//! Singleton page endpoints (home, about, contact page, region guide, settings)
//!
//! The same two handlers serve every [`Document`]; the router instantiates
//! them once per document type.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::model::Document;
use crate::store::JsonStore;
use crate::web::admin::AdminSession;
use crate::web::error::ApiResult;

/// GET - Read the document, bootstrapping defaults on first access
pub async fn api_get_document<T: Document>(
    State(store): State<Arc<JsonStore>>,
) -> ApiResult<Json<T>> {
    let doc: T = store.load_or_init(T::FILE, T::default).await?;
    Ok(Json(doc))
}

/// PUT - Replace the whole document (admin)
///
/// Fields left out of the body fall back to their defaults.
pub async fn api_put_document<T: Document>(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<Json<T>> {
    let Json(doc) = payload?;
    store.save(T::FILE, &doc).await?;
    info!(file = T::FILE, "page content saved");
    Ok(Json(doc))
}

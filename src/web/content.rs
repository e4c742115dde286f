//! Slug-keyed content page endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::core::error::{Error, Result};
use crate::model::content::{self, sort_by_updated, ContentInput, ContentPage};
use crate::model::de::opt_flag;
use crate::store::JsonStore;
use crate::web::admin::AdminSession;
use crate::web::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(default, deserialize_with = "opt_flag")]
    pub published: Option<bool>,
}

fn ensure_unique_slug(pages: &[ContentPage], slug: &str, except_id: Option<&str>) -> Result<()> {
    let taken = pages
        .iter()
        .any(|p| p.slug == slug && Some(p.id.as_str()) != except_id);
    if taken {
        return Err(Error::validation(format!(
            "a page with slug '{}' already exists",
            slug
        )));
    }
    Ok(())
}

/// GET /api/content - All pages, most recently updated first
pub async fn api_list_content(
    State(store): State<Arc<JsonStore>>,
    query: std::result::Result<Query<ContentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ContentPage>>> {
    let Query(query) = query?;
    let mut pages: Vec<ContentPage> = store.load_list(content::FILE).await?;
    if let Some(published) = query.published {
        pages.retain(|p| p.published == published);
    }
    sort_by_updated(&mut pages);
    Ok(Json(pages))
}

/// GET /api/content/:slug
pub async fn api_get_content(
    State(store): State<Arc<JsonStore>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ContentPage>> {
    let pages: Vec<ContentPage> = store.load_list(content::FILE).await?;
    pages
        .into_iter()
        .find(|p| p.slug == slug)
        .map(Json)
        .ok_or_else(|| Error::not_found("page", slug).into())
}

/// POST /api/content - Create a page (admin)
pub async fn api_create_content(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    payload: std::result::Result<Json<ContentInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ContentPage>)> {
    let Json(input) = payload?;
    let page = ContentPage::create(input)?;

    let created = store
        .update_list(content::FILE, move |pages: &mut Vec<ContentPage>| {
            ensure_unique_slug(pages, &page.slug, None)?;
            pages.push(page.clone());
            Ok(page)
        })
        .await?;

    info!(slug = %created.slug, "content page created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/content/:slug - Update a page (admin)
pub async fn api_update_content(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    Path(slug): Path<String>,
    payload: std::result::Result<Json<ContentInput>, JsonRejection>,
) -> ApiResult<Json<ContentPage>> {
    let Json(input) = payload?;

    let updated = store
        .update_list(content::FILE, |pages: &mut Vec<ContentPage>| {
            let index = pages
                .iter()
                .position(|p| p.slug == slug)
                .ok_or_else(|| Error::not_found("page", slug.as_str()))?;

            let mut page = pages[index].clone();
            page.apply(input)?;
            ensure_unique_slug(pages, &page.slug, Some(page.id.as_str()))?;
            pages[index] = page.clone();
            Ok(page)
        })
        .await?;

    info!(slug = %updated.slug, "content page updated");
    Ok(Json(updated))
}

/// DELETE /api/content/:slug (admin)
pub async fn api_delete_content(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    store
        .update_list(content::FILE, |pages: &mut Vec<ContentPage>| {
            let before = pages.len();
            pages.retain(|p| p.slug != slug);
            if pages.len() == before {
                return Err(Error::not_found("page", slug.as_str()));
            }
            Ok(())
        })
        .await?;

    info!(slug = %slug, "content page deleted");
    Ok(StatusCode::NO_CONTENT)
}

//! Property listing endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::core::error::Error;
use crate::listing::{PropertyFilter, PropertyQuery};
use crate::model::property::{self, Property, PropertyInput};
use crate::store::JsonStore;
use crate::web::admin::AdminSession;
use crate::web::error::ApiResult;

/// GET /api/properties - Filtered listing
pub async fn api_list_properties(
    State(store): State<Arc<JsonStore>>,
    query: Result<Query<PropertyQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Property>>> {
    let Query(query) = query?;
    let filter = PropertyFilter::from(query);
    let properties: Vec<Property> = store.load_list(property::FILE).await?;
    Ok(Json(filter.apply(properties)))
}

/// GET /api/properties/:id
pub async fn api_get_property(
    State(store): State<Arc<JsonStore>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Property>> {
    let properties: Vec<Property> = store.load_list(property::FILE).await?;
    properties
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| Error::not_found("property", id).into())
}

/// POST /api/properties - Create a listing (admin)
pub async fn api_create_property(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let Json(input) = payload?;
    let property = Property::create(input)?;

    let created = property.clone();
    store
        .update_list(property::FILE, move |properties: &mut Vec<Property>| {
            properties.push(property);
            Ok(())
        })
        .await?;

    info!(
        id = %created.id,
        category = %created.category,
        title = %created.title,
        "property created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/properties/:id - Merge-update a listing (admin)
pub async fn api_update_property(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> ApiResult<Json<Property>> {
    let Json(input) = payload?;

    let updated = store
        .update_list(property::FILE, |properties: &mut Vec<Property>| {
            let property = properties
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| Error::not_found("property", id.as_str()))?;
            property.apply(input)?;
            Ok(property.clone())
        })
        .await?;

    info!(id = %updated.id, "property updated");
    Ok(Json(updated))
}

/// DELETE /api/properties/:id (admin)
pub async fn api_delete_property(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    store
        .update_list(property::FILE, |properties: &mut Vec<Property>| {
            let before = properties.len();
            properties.retain(|p| p.id != id);
            if properties.len() == before {
                return Err(Error::not_found("property", id.as_str()));
            }
            Ok(())
        })
        .await?;

    info!(id = %id, "property deleted");
    Ok(StatusCode::NO_CONTENT)
}

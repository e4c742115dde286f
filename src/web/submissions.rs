//! Form submission endpoints, shared by inquiries and contact messages
//!
//! Public visitors POST; everything else is admin-only.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::core::error::{Error, Result};
use crate::model::{Submission, SubmissionInput};
use crate::store::JsonStore;
use crate::web::admin::AdminSession;
use crate::web::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// `?id=X` for one record, `?ids=a,b,c` for a batch
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
    pub ids: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: usize,
}

impl DeleteQuery {
    fn targets(&self) -> Result<HashSet<String>> {
        let targets: HashSet<String> = self
            .id
            .iter()
            .chain(self.ids.iter())
            .flat_map(|value| value.split(','))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        if targets.is_empty() {
            return Err(Error::validation("id or ids query parameter is required"));
        }
        Ok(targets)
    }
}

/// Remove every record whose id is in `targets`
pub fn remove_by_ids<T: Submission>(records: &mut Vec<T>, targets: &HashSet<String>) -> usize {
    let before = records.len();
    records.retain(|r| !targets.contains(r.id()));
    before - records.len()
}

/// POST - Record a public form submission
pub async fn api_submit<T: Submission>(
    State(store): State<Arc<JsonStore>>,
    payload: std::result::Result<Json<SubmissionInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<T>)> {
    let Json(input) = payload?;
    let record = T::from_input(input)?;

    let saved = record.clone();
    store
        .update_list(T::FILE, move |records: &mut Vec<T>| {
            records.push(record);
            Ok(())
        })
        .await?;

    // Notification delivery is not wired up; the record is already persisted
    info!(kind = T::KIND, id = %saved.id(), "submission received");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET - List submissions, newest first (admin)
pub async fn api_list_submissions<T: Submission>(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<T>>> {
    let Query(query) = query?;
    let status = match query.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() && s != "all" => Some(s.parse::<T::Status>()?),
        _ => None,
    };

    let mut records: Vec<T> = store.load_list(T::FILE).await?;
    if let Some(status) = status {
        records.retain(|r| r.status() == status);
    }
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    Ok(Json(records))
}

/// PATCH - Move a submission to another status (admin)
pub async fn api_update_status<T: Submission>(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    payload: std::result::Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<T>> {
    let Json(update) = payload?;
    let status: T::Status = update.status.parse()?;

    let updated = store
        .update_list(T::FILE, |records: &mut Vec<T>| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == update.id)
                .ok_or_else(|| Error::not_found(T::KIND, update.id.as_str()))?;
            record.set_status(status);
            Ok(record.clone())
        })
        .await?;

    info!(kind = T::KIND, id = %update.id, "status updated");
    Ok(Json(updated))
}

/// DELETE - Remove one (`?id=`) or many (`?ids=`) submissions (admin)
pub async fn api_delete_submissions<T: Submission>(
    _admin: AdminSession,
    State(store): State<Arc<JsonStore>>,
    query: std::result::Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Query(query) = query?;
    let targets = query.targets()?;

    let deleted = store
        .update_list(T::FILE, |records: &mut Vec<T>| {
            let deleted = remove_by_ids(records, &targets);
            if deleted == 0 {
                return Err(Error::not_found(T::KIND, targets_label(&targets)));
            }
            Ok(deleted)
        })
        .await?;

    info!(kind = T::KIND, deleted, "submissions deleted");
    Ok(Json(DeleteResponse { deleted }))
}

fn targets_label(targets: &HashSet<String>) -> String {
    let mut ids: Vec<&str> = targets.iter().map(String::as_str).collect();
    ids.sort_unstable();
    ids.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Inquiry;

    fn inquiry(message: &str) -> Inquiry {
        Inquiry::from_input(SubmissionInput {
            email: Some("buyer@example.com".to_string()),
            message: Some(message.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_delete_targets() {
        let query = DeleteQuery {
            id: Some("a".to_string()),
            ids: Some("b, c,,a".to_string()),
        };
        let targets = query.targets().unwrap();
        assert_eq!(targets.len(), 3);
        assert!(targets.contains("b"));

        assert!(DeleteQuery::default().targets().is_err());
        assert!(DeleteQuery {
            ids: Some(" , ".to_string()),
            ..Default::default()
        }
        .targets()
        .is_err());
    }

    #[test]
    fn test_remove_by_ids_leaves_others() {
        let mut records = vec![inquiry("one"), inquiry("two"), inquiry("three")];
        let targets: HashSet<String> = [records[1].id.clone()].into_iter().collect();

        assert_eq!(remove_by_ids(&mut records, &targets), 1);
        let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "three"]);

        assert_eq!(remove_by_ids(&mut records, &targets), 0);
    }
}

//! Diagnostic log endpoints.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::AuthUser;
use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ApiLogItem {
    endpoint: String,
    user_uid: Option<String>,
    status: i16,
    detail: serde_json::Value,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LogsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileLogsData {
    logs: Vec<ApiLogItem>,
}

fn to_log_item(row: verdure_db::ApiLogRow) -> ApiLogItem {
    ApiLogItem {
        endpoint: row.endpoint,
        user_uid: row.user_uid,
        status: row.status,
        detail: row.detail,
        created_at: row.created_at,
    }
}

pub(super) async fn list_api_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<ApiResponse<Vec<ApiLogItem>>>, ApiError> {
    let rows = verdure_db::list_api_logs(&state.pool, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(to_log_item).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_profile_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<ApiResponse<ProfileLogsData>>, ApiError> {
    let rows = verdure_db::list_user_logs(&state.pool, &user.uid, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ProfileLogsData {
            logs: rows.into_iter().map(to_log_item).collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_log_item_is_serializable() {
        let item = ApiLogItem {
            endpoint: "grocery-items".to_string(),
            user_uid: None,
            status: 200,
            detail: serde_json::json!({ "count": 20 }),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&item).expect("serialize");
        assert!(json.contains("\"endpoint\":\"grocery-items\""));
        assert!(json.contains("\"count\":20"));
    }

    #[test]
    fn profile_logs_data_wraps_logs_field() {
        let data = ProfileLogsData { logs: vec![] };
        let json = serde_json::to_string(&data).expect("serialize");
        assert_eq!(json, "{\"logs\":[]}");
    }
}

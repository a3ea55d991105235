//! Match report handlers.
//!
//! Matches are reported under a record and inherit its visibility. Every
//! report is checked for consistency before it is stored, on creation and
//! on replacement alike.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use decklog_store::query::MatchRepository;
use decklog_store::types::OffsetPagination;
use decklog_store::{Entity, MemoryStore, StoreError};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{MatchPathParams, MatchReport, Pagination, RecordPathParams};
use crate::handler::response::{ErrorResponse, Match, MatchesPage};
use crate::handler::{ErrorKind, Result};
use crate::policy::{AccessContext, Authorize, Pipeline, ResourceRef, ValidateMatch};
use crate::service::ServiceState;
use crate::validate::Malformed;

/// Tracing target for match operations.
const TRACING_TARGET: &str = "decklog_server::handler::matches";

/// Reports a match under a record owned by the caller.
#[tracing::instrument(skip_all, fields(record_id = ?request.record_id))]
async fn create_match(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<MatchReport>,
) -> Result<(StatusCode, Json<Match>)> {
    let payload = request.payload();
    let record_id = payload.record_id.ok_or(Malformed::MissingRecord)?;
    let record = ResourceRef::new(Entity::Record, record_id);

    let mut pipeline = Pipeline::new().then(Authorize::strict_owner(&store));
    if let Some(deck_id) = request.deck_id {
        let deck = ResourceRef::new(Entity::Deck, deck_id);
        pipeline = pipeline.then(Authorize::strict_owner(&store).on(deck));
    }
    let context = pipeline
        .then(ValidateMatch(&payload))
        .run(AccessContext::for_target(record).with_actor(auth_state.into()))
        .await?;

    let actor = context.into_actor();
    let reported = store
        .create_match(request.into_model(actor.uid(), record_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_uid = %actor.uid(),
        match_id = %reported.id,
        "match created",
    );

    Ok((StatusCode::CREATED, Json(reported.into())))
}

fn create_match_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create match")
        .description("Reports a match under a record owned by the caller. Inconsistent reports are rejected.")
        .response::<201, Json<Match>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a match whose record is public or owned by the caller.
#[tracing::instrument(skip_all, fields(match_id = %path_params.match_id))]
async fn read_match(
    State(store): State<MemoryStore>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<MatchPathParams>,
) -> Result<(StatusCode, Json<Match>)> {
    let target = ResourceRef::new(Entity::Match, path_params.match_id);
    Pipeline::new()
        .then(Authorize::cascading_read(&store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    let reported = find_match(&store, path_params.match_id).await?;

    tracing::debug!(target: TRACING_TARGET, "match read");

    Ok((StatusCode::OK, Json(reported.into())))
}

fn read_match_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get match")
        .description("Returns a match. Matches under a private record are visible to the record owner only.")
        .response::<200, Json<Match>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Replaces a match owned by the caller.
#[tracing::instrument(skip_all, fields(match_id = %path_params.match_id))]
async fn replace_match(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<MatchPathParams>,
    ValidateJson(request): ValidateJson<MatchReport>,
) -> Result<(StatusCode, Json<Match>)> {
    let payload = request.payload();
    let record_id = payload.record_id.ok_or(Malformed::MissingRecord)?;
    let target = ResourceRef::new(Entity::Match, path_params.match_id);

    let mut pipeline = Pipeline::new().then(Authorize::strict_owner(&store));
    if let Some(deck_id) = request.deck_id {
        let deck = ResourceRef::new(Entity::Deck, deck_id);
        pipeline = pipeline.then(Authorize::strict_owner(&store).on(deck));
    }
    let context = pipeline
        .then(ValidateMatch(&payload))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    let current = find_match(&store, path_params.match_id).await?;
    if record_id != current.record_id {
        return Err(ErrorKind::BadRequest
            .with_message("match cannot move to another record")
            .with_resource("match"));
    }

    let actor = context.into_actor();
    let reported = store
        .replace_match(
            path_params.match_id,
            request.into_model(actor.uid(), current.record_id),
        )
        .await?;

    tracing::info!(target: TRACING_TARGET, "match replaced");

    Ok((StatusCode::OK, Json(reported.into())))
}

fn replace_match_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Replace match")
        .description("Replaces a match owned by the caller. The report is checked like a new one and must keep its record.")
        .response::<200, Json<Match>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a match owned by the caller.
#[tracing::instrument(skip_all, fields(match_id = %path_params.match_id))]
async fn delete_match(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<MatchPathParams>,
) -> Result<StatusCode> {
    let target = ResourceRef::new(Entity::Match, path_params.match_id);
    Pipeline::new()
        .then(Authorize::strict_owner(&store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    store.delete_match(path_params.match_id).await?;

    tracing::info!(target: TRACING_TARGET, "match deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_match_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete match")
        .description("Permanently removes a match owned by the caller.")
        .response::<204, ()>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Lists the matches of a record that is public or owned by the caller.
#[tracing::instrument(skip_all, fields(record_id = %path_params.record_id))]
async fn list_record_matches(
    State(store): State<MemoryStore>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<RecordPathParams>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<MatchesPage>)> {
    let record = ResourceRef::new(Entity::Record, path_params.record_id);
    Pipeline::new()
        .then(Authorize::privacy_read(&store))
        .run(AccessContext::for_target(record).with_actor(auth_state.into()))
        .await?;
    pagination.validate()?;

    let pagination = OffsetPagination::from(pagination);
    let matches = store
        .list_matches_by_record(path_params.record_id, pagination)
        .await?;
    let page = MatchesPage::from_models(matches, pagination);

    tracing::debug!(
        target: TRACING_TARGET,
        match_count = page.len(),
        "record matches listed",
    );

    Ok((StatusCode::OK, Json(page)))
}

fn list_record_matches_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List record matches")
        .description("Returns the matches of a record in the order they were reported.")
        .response::<200, Json<MatchesPage>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

async fn find_match(store: &MemoryStore, match_id: Uuid) -> Result<decklog_store::model::Match> {
    let reported = store
        .find_match_by_id(match_id)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::Match, match_id))?;
    Ok(reported)
}

/// Returns routes for match reports.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/matches/", post_with(create_match, create_match_docs))
        .api_route(
            "/matches/{matchId}/",
            get_with(read_match, read_match_docs)
                .put_with(replace_match, replace_match_docs)
                .delete_with(delete_match, delete_match_docs),
        )
        .api_route(
            "/records/{recordId}/matches/",
            get_with(list_record_matches, list_record_matches_docs),
        )
        .with_path_items(|item| item.tag("Matches"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use decklog_store::model::{NewMatch, NewRecord, Record, UpdateRecord};
    use decklog_store::query::{MatchRepository, RecordRepository};
    use serde_json::{Value, json};

    use crate::handler::response::{Match, MatchesPage};
    use crate::handler::test::{bearer, create_test_server};
    use crate::service::ServiceState;

    async fn seed_record(state: &ServiceState, uid: &str, is_private: bool) -> anyhow::Result<Record> {
        let record = state
            .store
            .create_record(NewRecord {
                user_uid: uid.to_owned(),
                is_private,
                ..Default::default()
            })
            .await?;
        Ok(record)
    }

    fn sweep(record: &Record) -> Value {
        json!({
            "recordId": record.id,
            "bo3": true,
            "victory": true,
            "games": [{ "winning": true }, { "winning": true }],
        })
    }

    #[tokio::test]
    async fn consistent_report_is_stored() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", false).await?;
        let (name, value) = bearer("u1")?;

        let response = server
            .post("/matches/")
            .add_header(name, value)
            .json(&json!({
                "recordId": record.id,
                "bo3": true,
                "victory": true,
                "games": [{ "winning": true }, { "winning": false }, { "winning": true }],
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let created: Match = response.json();
        assert_eq!(created.record_id, record.id);
        assert_eq!(created.games.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn inconsistent_reports_are_bad_requests() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", false).await?;
        let (name, value) = bearer("u1")?;

        let reports = [
            json!({ "bo3": false }),
            json!({
                "recordId": record.id,
                "bo3": true,
                "victory": false,
                "games": [{ "winning": true }, { "winning": true }],
            }),
            json!({ "recordId": record.id, "defaultVictory": true, "victory": false }),
            json!({ "recordId": record.id, "defaultVictory": true, "defaultDefeat": true }),
            json!({ "recordId": record.id, "bo3": true, "games": [{ "winning": false }] }),
        ];

        for report in reports {
            let response = server
                .post("/matches/")
                .add_header(name.clone(), value.clone())
                .json(&report)
                .await;
            response.assert_status_bad_request();
            response.assert_json(&json!({ "message": "bad request" }));
        }
        Ok(())
    }

    #[tokio::test]
    async fn missing_record_id_is_checked_before_lookup() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        state.store.close();
        let (name, value) = bearer("u1")?;

        server
            .post("/matches/")
            .add_header(name, value)
            .json(&json!({ "victory": true }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn report_under_foreign_record_is_forbidden() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", false).await?;
        let (name, value) = bearer("u2")?;

        server
            .post("/matches/")
            .add_header(name, value)
            .json(&sweep(&record))
            .await
            .assert_status_forbidden();
        Ok(())
    }

    #[tokio::test]
    async fn ownership_is_checked_before_consistency() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", true).await?;
        let (name, value) = bearer("u2")?;

        let lost_sweep = |record_id: uuid::Uuid| {
            json!({
                "recordId": record_id,
                "bo3": true,
                "victory": false,
                "games": [{ "winning": true }, { "winning": true }],
            })
        };

        let foreign = server
            .post("/matches/")
            .add_header(name.clone(), value.clone())
            .json(&lost_sweep(record.id))
            .await;
        foreign.assert_status_forbidden();
        foreign.assert_json(&json!({ "message": "forbidden" }));

        let unknown = server
            .post("/matches/")
            .add_header(name, value)
            .json(&lost_sweep(uuid::Uuid::now_v7()))
            .await;
        unknown.assert_status_not_found();
        unknown.assert_json(&json!({ "message": "not found" }));
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_report_is_unauthorized_before_body_checks() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let invalid_json = server
            .post("/matches/")
            .text("{not json")
            .content_type("application/json")
            .await;
        invalid_json.assert_status_unauthorized();
        invalid_json.assert_json(&json!({ "message": "unauthorized" }));

        server
            .post("/matches/")
            .json(&json!({ "victory": true }))
            .await
            .assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn foreign_replace_is_forbidden_whatever_the_report() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", false).await?;
        let reported = state
            .store
            .create_match(NewMatch {
                record_id: record.id,
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;
        let (name, value) = bearer("u2")?;

        server
            .put(&format!("/matches/{}/", reported.id))
            .add_header(name, value)
            .json(&json!({
                "recordId": record.id,
                "victory": true,
                "games": [{ "winning": false }],
            }))
            .await
            .assert_status_forbidden();
        Ok(())
    }

    #[tokio::test]
    async fn match_visibility_follows_record() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", true).await?;
        let reported = state
            .store
            .create_match(NewMatch {
                record_id: record.id,
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;

        let match_path = format!("/matches/{}/", reported.id);
        let list_path = format!("/records/{}/matches/", record.id);

        server.get(&match_path).await.assert_status_forbidden();
        server.get(&list_path).await.assert_status_forbidden();

        let (name, value) = bearer("u1")?;
        server
            .get(&match_path)
            .add_header(name.clone(), value.clone())
            .await
            .assert_status_ok();
        let page: MatchesPage = server
            .get(&list_path)
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert_eq!(page.len(), 1);

        state
            .store
            .update_record(
                record.id,
                UpdateRecord {
                    is_private: Some(false),
                    ..Default::default()
                },
            )
            .await?;
        server.get(&match_path).await.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn replace_keeps_record_and_rechecks() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = seed_record(&state, "u1", false).await?;
        let other = seed_record(&state, "u1", false).await?;
        let (name, value) = bearer("u1")?;

        let created: Match = server
            .post("/matches/")
            .add_header(name.clone(), value.clone())
            .json(&sweep(&record))
            .await
            .json();
        let path = format!("/matches/{}/", created.match_id);

        server
            .put(&path)
            .add_header(name.clone(), value.clone())
            .json(&sweep(&other))
            .await
            .assert_status_bad_request();
        server
            .put(&path)
            .add_header(name.clone(), value.clone())
            .json(&json!({ "recordId": record.id, "games": [{ "winning": true }, { "winning": true }] }))
            .await
            .assert_status_bad_request();

        let replaced: Match = server
            .put(&path)
            .add_header(name.clone(), value.clone())
            .json(&json!({ "recordId": record.id, "victory": false, "games": [{ "winning": false }] }))
            .await
            .json();
        assert_eq!(replaced.match_id, created.match_id);
        assert!(!replaced.bo3 && !replaced.victory);

        let (other_name, other_value) = bearer("u2")?;
        server
            .delete(&path)
            .add_header(other_name, other_value)
            .await
            .assert_status_forbidden();
        server
            .delete(&path)
            .add_header(name, value)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        Ok(())
    }
}

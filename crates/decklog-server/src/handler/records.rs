//! Record handlers.
//!
//! A record describes one event a player took part in. Records may be
//! private, in which case only their owner can read them and the matches
//! reported under them.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use decklog_store::query::RecordRepository;
use decklog_store::types::OffsetPagination;
use decklog_store::{Entity, MemoryStore, StoreError};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{CreateRecord, Pagination, RecordPathParams, UpdateRecord};
use crate::handler::response::{ErrorResponse, Record, RecordsPage};
use crate::handler::Result;
use crate::policy::{AccessContext, Authorize, Pipeline, ResourceRef};
use crate::service::ServiceState;

/// Tracing target for record operations.
const TRACING_TARGET: &str = "decklog_server::handler::records";

/// Appends ownership checks for the deck and deck code a record points at.
fn with_references<'a>(
    mut pipeline: Pipeline<'a>,
    store: &'a MemoryStore,
    deck_id: Option<Uuid>,
    deck_code_id: Option<Uuid>,
) -> Pipeline<'a> {
    if let Some(deck_id) = deck_id {
        let target = ResourceRef::new(Entity::Deck, deck_id);
        pipeline = pipeline.then(Authorize::strict_owner(store).on(target));
    }

    if let Some(deck_code_id) = deck_code_id {
        let target = ResourceRef::new(Entity::DeckCode, deck_code_id);
        pipeline = pipeline.then(Authorize::strict_owner(store).on(target));
    }

    pipeline
}

/// Creates a record owned by the caller.
#[tracing::instrument(skip_all)]
async fn create_record(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateRecord>,
) -> Result<(StatusCode, Json<Record>)> {
    let context = with_references(Pipeline::new(), &store, request.deck_id, request.deck_code_id)
        .run(AccessContext::for_actor(auth_state))
        .await?;

    let actor = context.into_actor();
    let record = store.create_record(request.into_model(actor.uid())).await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_uid = %actor.uid(),
        record_id = %record.id,
        "record created",
    );

    Ok((StatusCode::CREATED, Json(record.into())))
}

fn create_record_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create record")
        .description("Creates a record of one event. Referenced decks and deck codes must belong to the caller.")
        .response::<201, Json<Record>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Lists the caller's records, newest first.
#[tracing::instrument(skip_all)]
async fn list_records(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<RecordsPage>)> {
    pagination.validate()?;

    let pagination = OffsetPagination::from(pagination);
    let records = store
        .list_user_records(auth_state.uid(), pagination)
        .await?;
    let page = RecordsPage::from_models(records, pagination);

    tracing::debug!(
        target: TRACING_TARGET,
        record_count = page.len(),
        "records listed",
    );

    Ok((StatusCode::OK, Json(page)))
}

fn list_records_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List records")
        .description("Returns the caller's records, newest first.")
        .response::<200, Json<RecordsPage>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a public record, or a private one to its owner.
#[tracing::instrument(skip_all, fields(record_id = %path_params.record_id))]
async fn read_record(
    State(store): State<MemoryStore>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<RecordPathParams>,
) -> Result<(StatusCode, Json<Record>)> {
    let target = ResourceRef::new(Entity::Record, path_params.record_id);
    Pipeline::new()
        .then(Authorize::privacy_read(&store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    let record = find_record(&store, path_params.record_id).await?;

    tracing::debug!(target: TRACING_TARGET, "record read");

    Ok((StatusCode::OK, Json(record.into())))
}

fn read_record_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get record")
        .description("Returns a record. Private records are visible to their owner only; no token is needed for public ones.")
        .response::<200, Json<Record>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Updates a record owned by the caller.
#[tracing::instrument(skip_all, fields(record_id = %path_params.record_id))]
async fn update_record(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<RecordPathParams>,
    ValidateJson(request): ValidateJson<UpdateRecord>,
) -> Result<(StatusCode, Json<Record>)> {
    let target = ResourceRef::new(Entity::Record, path_params.record_id);
    let pipeline = Pipeline::new().then(Authorize::strict_owner(&store));
    with_references(pipeline, &store, request.deck_id, request.deck_code_id)
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    let record = store
        .update_record(path_params.record_id, request.into_model())
        .await?;

    tracing::info!(target: TRACING_TARGET, "record updated");

    Ok((StatusCode::OK, Json(record.into())))
}

fn update_record_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update record")
        .description("Changes a record owned by the caller. Absent fields are left unchanged.")
        .response::<200, Json<Record>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a record owned by the caller together with its matches.
#[tracing::instrument(skip_all, fields(record_id = %path_params.record_id))]
async fn delete_record(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<RecordPathParams>,
) -> Result<StatusCode> {
    let target = ResourceRef::new(Entity::Record, path_params.record_id);
    Pipeline::new()
        .then(Authorize::strict_owner(&store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    store.delete_record(path_params.record_id).await?;

    tracing::info!(target: TRACING_TARGET, "record deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_record_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete record")
        .description("Permanently removes a record owned by the caller and every match reported under it.")
        .response::<204, ()>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

async fn find_record(
    store: &MemoryStore,
    record_id: Uuid,
) -> Result<decklog_store::model::Record> {
    let record = store
        .find_record_by_id(record_id)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::Record, record_id))?;
    Ok(record)
}

/// Returns routes for record management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/records/",
            post_with(create_record, create_record_docs).get_with(list_records, list_records_docs),
        )
        .api_route(
            "/records/{recordId}/",
            get_with(read_record, read_record_docs)
                .patch_with(update_record, update_record_docs)
                .delete_with(delete_record, delete_record_docs),
        )
        .with_path_items(|item| item.tag("Records"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use decklog_store::model::{NewDeck, NewRecord};
    use decklog_store::query::{DeckRepository, RecordRepository};
    use serde_json::json;

    use crate::handler::response::{Record, RecordsPage};
    use crate::handler::test::{bearer, create_test_server};

    #[tokio::test]
    async fn private_record_visibility() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = state
            .store
            .create_record(NewRecord {
                user_uid: "u1".to_owned(),
                is_private: true,
                ..Default::default()
            })
            .await?;
        let path = format!("/records/{}/", record.id);

        let anonymous = server.get(&path).await;
        anonymous.assert_status_forbidden();
        anonymous.assert_json(&json!({ "message": "forbidden" }));

        let (name, value) = bearer("u2")?;
        server
            .get(&path)
            .add_header(name, value)
            .await
            .assert_status_forbidden();

        let (name, value) = bearer("u1")?;
        let owner = server.get(&path).add_header(name, value).await;
        owner.assert_status_ok();
        assert_eq!(owner.json::<Record>().record_id, record.id);
        Ok(())
    }

    #[tokio::test]
    async fn public_record_is_readable_anonymously() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = state
            .store
            .create_record(NewRecord {
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;

        server
            .get(&format!("/records/{}/", record.id))
            .await
            .assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn malformed_credential_is_not_anonymous() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = state
            .store
            .create_record(NewRecord {
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;

        let response = server
            .get(&format!("/records/{}/", record.id))
            .authorization_bearer("not-a-token")
            .await;
        response.assert_status_unauthorized();
        response.assert_json(&json!({ "message": "unauthorized" }));
        Ok(())
    }

    #[tokio::test]
    async fn missing_record_is_not_found() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server
            .get(&format!("/records/{}/", uuid::Uuid::now_v7()))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "not found" }));
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_store_is_internal_error() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = state
            .store
            .create_record(NewRecord {
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;
        state.store.close();

        let (name, value) = bearer("u1")?;
        let response = server
            .delete(&format!("/records/{}/", record.id))
            .add_header(name, value)
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "internal server error" }));
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_store_fails_anonymous_read() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let record = state
            .store
            .create_record(NewRecord {
                user_uid: "u1".to_owned(),
                ..Default::default()
            })
            .await?;
        state.store.close();

        let response = server.get(&format!("/records/{}/", record.id)).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "internal server error" }));
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_create_is_unauthorized_before_body_checks() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let oversized_memo = server
            .post("/records/")
            .json(&json!({ "memo": "x".repeat(2000) }))
            .await;
        oversized_memo.assert_status_unauthorized();
        oversized_memo.assert_json(&json!({ "message": "unauthorized" }));

        let (name, value) = bearer("u1")?;
        server
            .post("/records/")
            .add_header(name, value)
            .json(&json!({ "memo": "x".repeat(2000) }))
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_update_is_unauthorized_before_path_checks() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server
            .patch("/records/not-a-uuid/")
            .text("{not json")
            .content_type("application/json")
            .await;
        response.assert_status_unauthorized();
        response.assert_json(&json!({ "message": "unauthorized" }));
        Ok(())
    }

    #[tokio::test]
    async fn foreign_deck_cannot_be_referenced() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let deck = state
            .store
            .create_deck(NewDeck {
                user_uid: "u2".to_owned(),
                name: "Lost Box".to_owned(),
            })
            .await?;

        let (name, value) = bearer("u1")?;
        server
            .post("/records/")
            .add_header(name, value)
            .json(&json!({ "deckId": deck.id }))
            .await
            .assert_status_forbidden();
        Ok(())
    }

    #[tokio::test]
    async fn list_returns_only_own_records() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (u1_name, u1_value) = bearer("u1")?;
        let (u2_name, u2_value) = bearer("u2")?;

        for _ in 0..3 {
            server
                .post("/records/")
                .add_header(u1_name.clone(), u1_value.clone())
                .json(&json!({ "isPrivate": true }))
                .await
                .assert_status(StatusCode::CREATED);
        }
        server
            .post("/records/")
            .add_header(u2_name, u2_value)
            .json(&json!({}))
            .await
            .assert_status(StatusCode::CREATED);

        let page: RecordsPage = server
            .get("/records/")
            .add_query_param("limit", 2)
            .add_header(u1_name.clone(), u1_value.clone())
            .await
            .json();
        assert_eq!(page.len(), 2);
        assert_eq!(page.limit, 2);
        assert!(page.items.iter().all(|record| record.user_uid == "u1"));

        server
            .get("/records/")
            .add_query_param("limit", 101)
            .add_header(u1_name, u1_value)
            .await
            .assert_status_bad_request();
        Ok(())
    }
}

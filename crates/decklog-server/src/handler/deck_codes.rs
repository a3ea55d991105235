//! Deck code handlers.
//!
//! Codes are registered under a deck by its owner. A public code can be
//! read by anyone; a private one by its owner only.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use decklog_store::query::DeckCodeRepository;
use decklog_store::types::OffsetPagination;
use decklog_store::{Entity, MemoryStore, StoreError};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{
    CreateDeckCode, DeckCodePathParams, DeckPathParams, Pagination, UpdateDeckCode,
};
use crate::handler::response::{DeckCode, DeckCodesPage, ErrorResponse};
use crate::handler::Result;
use crate::policy::{AccessContext, Authorize, Pipeline, ResourceRef};
use crate::service::ServiceState;

/// Tracing target for deck code operations.
const TRACING_TARGET: &str = "decklog_server::handler::deck_codes";

/// Registers a deck code under a deck owned by the caller.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn create_deck_code(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
    ValidateJson(request): ValidateJson<CreateDeckCode>,
) -> Result<(StatusCode, Json<DeckCode>)> {
    let deck = ResourceRef::new(Entity::Deck, path_params.deck_id);
    let context = Pipeline::new()
        .then(Authorize::strict_owner(&store))
        .run(AccessContext::for_target(deck).with_actor(auth_state.into()))
        .await?;

    let actor = context.into_actor();
    let new_code = request.into_model(actor.uid(), path_params.deck_id);
    let deck_code = store.create_deck_code(new_code).await?;

    tracing::info!(
        target: TRACING_TARGET,
        deck_code_id = %deck_code.id,
        "deck code created",
    );

    Ok((StatusCode::CREATED, Json(deck_code.into())))
}

fn create_deck_code_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create deck code")
        .description("Registers a deck code under a deck owned by the caller.")
        .response::<201, Json<DeckCode>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Lists the codes registered under a deck owned by the caller.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn list_deck_codes(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<DeckCodesPage>)> {
    let deck = ResourceRef::new(Entity::Deck, path_params.deck_id);
    Pipeline::new()
        .then(Authorize::strict_owner(&store))
        .run(AccessContext::for_target(deck).with_actor(auth_state.into()))
        .await?;
    pagination.validate()?;

    let pagination = OffsetPagination::from(pagination);
    let codes = store
        .list_deck_codes_by_deck(path_params.deck_id, pagination)
        .await?;
    let page = DeckCodesPage::from_models(codes, pagination);

    tracing::debug!(
        target: TRACING_TARGET,
        deck_code_count = page.len(),
        "deck codes listed",
    );

    Ok((StatusCode::OK, Json(page)))
}

fn list_deck_codes_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List deck codes")
        .description("Returns the codes registered under a deck owned by the caller, newest first.")
        .response::<200, Json<DeckCodesPage>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a public deck code, or a private one to its owner.
#[tracing::instrument(skip_all, fields(deck_code_id = %path_params.deck_code_id))]
async fn read_deck_code(
    State(store): State<MemoryStore>,
    auth_state: Option<AuthState>,
    Path(path_params): Path<DeckCodePathParams>,
) -> Result<(StatusCode, Json<DeckCode>)> {
    let target = ResourceRef::new(Entity::DeckCode, path_params.deck_code_id);
    Pipeline::new()
        .then(Authorize::privacy_read(&store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;

    let deck_code = find_deck_code(&store, path_params.deck_code_id).await?;

    tracing::debug!(target: TRACING_TARGET, "deck code read");

    Ok((StatusCode::OK, Json(deck_code.into())))
}

fn read_deck_code_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get deck code")
        .description("Returns a deck code. Private codes are visible to their owner only.")
        .response::<200, Json<DeckCode>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Updates a deck code owned by the caller.
#[tracing::instrument(skip_all, fields(deck_code_id = %path_params.deck_code_id))]
async fn update_deck_code(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckCodePathParams>,
    ValidateJson(request): ValidateJson<UpdateDeckCode>,
) -> Result<(StatusCode, Json<DeckCode>)> {
    authorize_owner(&store, auth_state, path_params.deck_code_id).await?;

    let deck_code = store
        .update_deck_code(path_params.deck_code_id, request.into_model())
        .await?;

    tracing::info!(target: TRACING_TARGET, "deck code updated");

    Ok((StatusCode::OK, Json(deck_code.into())))
}

fn update_deck_code_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update deck code")
        .description("Changes a deck code owned by the caller. Absent fields are left unchanged.")
        .response::<200, Json<DeckCode>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a deck code owned by the caller.
#[tracing::instrument(skip_all, fields(deck_code_id = %path_params.deck_code_id))]
async fn delete_deck_code(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckCodePathParams>,
) -> Result<StatusCode> {
    authorize_owner(&store, auth_state, path_params.deck_code_id).await?;

    store.delete_deck_code(path_params.deck_code_id).await?;

    tracing::info!(target: TRACING_TARGET, "deck code deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_deck_code_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete deck code")
        .description("Permanently removes a deck code owned by the caller.")
        .response::<204, ()>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

async fn authorize_owner(
    store: &MemoryStore,
    auth_state: AuthState,
    deck_code_id: Uuid,
) -> Result<()> {
    let target = ResourceRef::new(Entity::DeckCode, deck_code_id);
    Pipeline::new()
        .then(Authorize::strict_owner(store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;
    Ok(())
}

async fn find_deck_code(
    store: &MemoryStore,
    deck_code_id: Uuid,
) -> Result<decklog_store::model::DeckCode> {
    let deck_code = store
        .find_deck_code_by_id(deck_code_id)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::DeckCode, deck_code_id))?;
    Ok(deck_code)
}

/// Returns routes for deck code management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/decks/{deckId}/deckcodes/",
            post_with(create_deck_code, create_deck_code_docs)
                .get_with(list_deck_codes, list_deck_codes_docs),
        )
        .api_route(
            "/deckcodes/{deckCodeId}/",
            get_with(read_deck_code, read_deck_code_docs)
                .patch_with(update_deck_code, update_deck_code_docs)
                .delete_with(delete_deck_code, delete_deck_code_docs),
        )
        .with_path_items(|item| item.tag("Deck codes"))
}

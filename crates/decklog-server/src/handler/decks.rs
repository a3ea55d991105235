//! Deck handlers.
//!
//! Decks have no privacy flag; every route is limited to the owner.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use decklog_store::query::DeckRepository;
use decklog_store::types::OffsetPagination;
use decklog_store::{Entity, MemoryStore, StoreError};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{
    CreateDeck, DeckPathParams, ListDecksQuery, Pagination, UpdateDeck,
};
use crate::handler::response::{Deck, DecksPage, ErrorResponse};
use crate::handler::Result;
use crate::policy::{AccessContext, Authorize, Pipeline, ResourceRef};
use crate::service::ServiceState;

/// Tracing target for deck operations.
const TRACING_TARGET: &str = "decklog_server::handler::decks";

/// Creates a deck owned by the caller.
#[tracing::instrument(skip_all)]
async fn create_deck(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateDeck>,
) -> Result<(StatusCode, Json<Deck>)> {
    let actor = auth_state.into_actor();
    let deck = store.create_deck(request.into_model(actor.uid())).await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_uid = %actor.uid(),
        deck_id = %deck.id,
        "deck created",
    );

    Ok((StatusCode::CREATED, Json(deck.into())))
}

fn create_deck_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create deck")
        .description("Creates a deck owned by the caller.")
        .response::<201, Json<Deck>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Lists the caller's decks, newest first.
#[tracing::instrument(skip_all, fields(archived = ?query.archived))]
async fn list_decks(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Query(query): Query<ListDecksQuery>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<DecksPage>)> {
    pagination.validate()?;

    let pagination = OffsetPagination::from(pagination);
    let decks = store
        .list_user_decks(auth_state.uid(), query.archived, pagination)
        .await?;
    let page = DecksPage::from_models(decks, pagination);

    tracing::debug!(
        target: TRACING_TARGET,
        deck_count = page.len(),
        "decks listed",
    );

    Ok((StatusCode::OK, Json(page)))
}

fn list_decks_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List decks")
        .description("Returns the caller's decks, newest first. `archived` narrows the list to archived or active decks.")
        .response::<200, Json<DecksPage>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a deck owned by the caller.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn read_deck(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
) -> Result<(StatusCode, Json<Deck>)> {
    authorize_owner(&store, auth_state, path_params.deck_id).await?;

    let deck = store
        .find_deck_by_id(path_params.deck_id)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::Deck, path_params.deck_id))?;

    tracing::debug!(target: TRACING_TARGET, "deck read");

    Ok((StatusCode::OK, Json(deck.into())))
}

fn read_deck_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get deck")
        .description("Returns a deck owned by the caller.")
        .response::<200, Json<Deck>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Renames a deck owned by the caller.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn update_deck(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
    ValidateJson(request): ValidateJson<UpdateDeck>,
) -> Result<(StatusCode, Json<Deck>)> {
    authorize_owner(&store, auth_state, path_params.deck_id).await?;

    let deck = store
        .update_deck(path_params.deck_id, request.into_model())
        .await?;

    tracing::info!(target: TRACING_TARGET, "deck updated");

    Ok((StatusCode::OK, Json(deck.into())))
}

fn update_deck_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update deck")
        .description("Renames a deck owned by the caller.")
        .response::<200, Json<Deck>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a deck owned by the caller together with its deck codes.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn delete_deck(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
) -> Result<StatusCode> {
    authorize_owner(&store, auth_state, path_params.deck_id).await?;

    store.delete_deck(path_params.deck_id).await?;

    tracing::info!(target: TRACING_TARGET, "deck deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_deck_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete deck")
        .description("Permanently removes a deck owned by the caller and its deck codes.")
        .response::<204, ()>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Archives a deck owned by the caller.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn archive_deck(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
) -> Result<(StatusCode, Json<Deck>)> {
    authorize_owner(&store, auth_state, path_params.deck_id).await?;

    let deck = store.archive_deck(path_params.deck_id).await?;

    tracing::info!(target: TRACING_TARGET, "deck archived");

    Ok((StatusCode::OK, Json(deck.into())))
}

fn archive_deck_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Archive deck")
        .description("Hides a deck from the active list. Archiving twice keeps the first timestamp.")
        .response::<200, Json<Deck>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Restores an archived deck owned by the caller.
#[tracing::instrument(skip_all, fields(deck_id = %path_params.deck_id))]
async fn unarchive_deck(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<DeckPathParams>,
) -> Result<(StatusCode, Json<Deck>)> {
    authorize_owner(&store, auth_state, path_params.deck_id).await?;

    let deck = store.unarchive_deck(path_params.deck_id).await?;

    tracing::info!(target: TRACING_TARGET, "deck unarchived");

    Ok((StatusCode::OK, Json(deck.into())))
}

fn unarchive_deck_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Unarchive deck")
        .description("Returns an archived deck to the active list.")
        .response::<200, Json<Deck>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

async fn authorize_owner(
    store: &MemoryStore,
    auth_state: AuthState,
    deck_id: Uuid,
) -> Result<()> {
    let target = ResourceRef::new(Entity::Deck, deck_id);
    Pipeline::new()
        .then(Authorize::strict_owner(store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;
    Ok(())
}

/// Returns routes for deck management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/decks/",
            post_with(create_deck, create_deck_docs).get_with(list_decks, list_decks_docs),
        )
        .api_route(
            "/decks/{deckId}/",
            get_with(read_deck, read_deck_docs)
                .patch_with(update_deck, update_deck_docs)
                .delete_with(delete_deck, delete_deck_docs),
        )
        .api_route(
            "/decks/{deckId}/archive/",
            post_with(archive_deck, archive_deck_docs),
        )
        .api_route(
            "/decks/{deckId}/unarchive/",
            post_with(unarchive_deck, unarchive_deck_docs),
        )
        .with_path_items(|item| item.tag("Decks"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handler::response::{Deck, DecksPage};
    use crate::handler::test::{bearer, create_test_server};

    #[tokio::test]
    async fn archive_filters_listing() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (name, value) = bearer("u1")?;

        let mut decks = Vec::new();
        for deck_name in ["Charizard", "Gardevoir"] {
            let deck: Deck = server
                .post("/decks/")
                .add_header(name.clone(), value.clone())
                .json(&json!({ "name": deck_name }))
                .await
                .json();
            decks.push(deck);
        }

        let archived: Deck = server
            .post(&format!("/decks/{}/archive/", decks[0].deck_id))
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert!(archived.archived_at.is_some());

        let page: DecksPage = server
            .get("/decks/")
            .add_query_param("archived", true)
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].deck_id, decks[0].deck_id);

        let restored: Deck = server
            .post(&format!("/decks/{}/unarchive/", decks[0].deck_id))
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert!(restored.archived_at.is_none());

        let page: DecksPage = server
            .get("/decks/")
            .add_query_param("archived", false)
            .add_header(name, value)
            .await
            .json();
        assert_eq!(page.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn only_owner_may_change_deck() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (owner_name, owner_value) = bearer("u1")?;
        let (other_name, other_value) = bearer("u2")?;

        let deck: Deck = server
            .post("/decks/")
            .add_header(owner_name, owner_value)
            .json(&json!({ "name": "Lugia" }))
            .await
            .json();
        let path = format!("/decks/{}/", deck.deck_id);

        server.get(&path).await.assert_status_unauthorized();
        server
            .patch(&path)
            .add_header(other_name.clone(), other_value.clone())
            .json(&json!({ "name": "Mine now" }))
            .await
            .assert_status_forbidden();
        server
            .post(&format!("{path}archive/"))
            .add_header(other_name.clone(), other_value.clone())
            .await
            .assert_status_forbidden();
        server
            .delete(&path)
            .add_header(other_name, other_value)
            .await
            .assert_status_forbidden();
        Ok(())
    }

    #[tokio::test]
    async fn long_name_is_rejected() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (name, value) = bearer("u1")?;

        server
            .post("/decks/")
            .add_header(name, value)
            .json(&json!({ "name": "x".repeat(65) }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}

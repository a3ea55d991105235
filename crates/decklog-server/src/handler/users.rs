//! User profile handlers.
//!
//! A profile is keyed by the token subject that created it. Every route
//! requires a valid bearer token, and only the owner may read or change a
//! profile.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use decklog_store::query::UserRepository;
use decklog_store::{Entity, MemoryStore, StoreError};
use uuid::Uuid;

use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::request::{CreateUser, UpdateUser, UserPathParams};
use crate::handler::response::{ErrorResponse, User};
use crate::handler::Result;
use crate::policy::{AccessContext, Authorize, Pipeline, ResourceRef};
use crate::service::ServiceState;

/// Tracing target for user profile operations.
const TRACING_TARGET: &str = "decklog_server::handler::users";

/// Creates the caller's profile.
#[tracing::instrument(skip_all)]
async fn create_user(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateUser>,
) -> Result<(StatusCode, Json<User>)> {
    let actor = auth_state.into_actor();
    let user = store.create_user(request.into_model(actor.uid())).await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_uid = %actor.uid(),
        user_id = %user.id,
        "profile created",
    );

    Ok((StatusCode::CREATED, Json(user.into())))
}

fn create_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create profile")
        .description("Creates the profile of the token subject. Fails if one already exists.")
        .response::<201, Json<User>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Returns a profile owned by the caller.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn read_user(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<UserPathParams>,
) -> Result<(StatusCode, Json<User>)> {
    authorize_owner(&store, auth_state, path_params.user_id).await?;

    let user = find_user(&store, path_params.user_id).await?;

    tracing::debug!(target: TRACING_TARGET, "profile read");

    Ok((StatusCode::OK, Json(user.into())))
}

fn read_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get profile")
        .description("Returns a profile. Only its owner may read it.")
        .response::<200, Json<User>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Updates a profile owned by the caller.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn update_user(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<UserPathParams>,
    ValidateJson(request): ValidateJson<UpdateUser>,
) -> Result<(StatusCode, Json<User>)> {
    authorize_owner(&store, auth_state, path_params.user_id).await?;

    let user = store
        .update_user(path_params.user_id, request.into_model())
        .await?;

    tracing::info!(target: TRACING_TARGET, "profile updated");

    Ok((StatusCode::OK, Json(user.into())))
}

fn update_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update profile")
        .description("Changes the display name of a profile owned by the caller.")
        .response::<200, Json<User>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a profile owned by the caller.
#[tracing::instrument(skip_all, fields(user_id = %path_params.user_id))]
async fn delete_user(
    State(store): State<MemoryStore>,
    auth_state: AuthState,
    Path(path_params): Path<UserPathParams>,
) -> Result<StatusCode> {
    authorize_owner(&store, auth_state, path_params.user_id).await?;

    store.delete_user(path_params.user_id).await?;

    tracing::info!(target: TRACING_TARGET, "profile deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete profile")
        .description("Permanently removes a profile owned by the caller.")
        .response::<204, ()>()
        .response::<401, Json<ErrorResponse>>()
        .response::<403, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

async fn authorize_owner(
    store: &MemoryStore,
    auth_state: AuthState,
    user_id: Uuid,
) -> Result<()> {
    let target = ResourceRef::new(Entity::User, user_id);
    Pipeline::new()
        .then(Authorize::strict_owner(store))
        .run(AccessContext::for_target(target).with_actor(auth_state.into()))
        .await?;
    Ok(())
}

async fn find_user(store: &MemoryStore, user_id: Uuid) -> Result<decklog_store::model::User> {
    let user = store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| StoreError::not_found(Entity::User, user_id))?;
    Ok(user)
}

/// Returns routes for user profile management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/users/", post_with(create_user, create_user_docs))
        .api_route(
            "/users/{userId}/",
            get_with(read_user, read_user_docs)
                .patch_with(update_user, update_user_docs)
                .delete_with(delete_user, delete_user_docs),
        )
        .with_path_items(|item| item.tag("Users"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handler::response::User;
    use crate::handler::test::{bearer, create_test_server};

    #[tokio::test]
    async fn profile_lifecycle() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (name, value) = bearer("u1")?;

        let response = server
            .post("/users/")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "displayName": "Ash" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let user: User = response.json();
        assert_eq!(user.uid, "u1");

        let duplicate = server
            .post("/users/")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "displayName": "Ash" }))
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
        duplicate.assert_json(&json!({ "message": "conflict" }));

        let path = format!("/users/{}/", user.user_id);
        server
            .patch(&path)
            .add_header(name.clone(), value.clone())
            .json(&json!({ "displayName": "Ash K." }))
            .await
            .assert_status_ok();
        server
            .delete(&path)
            .add_header(name.clone(), value.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&path)
            .add_header(name, value)
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn other_users_profile_is_forbidden() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (owner_name, owner_value) = bearer("u1")?;
        let (other_name, other_value) = bearer("u2")?;

        let user: User = server
            .post("/users/")
            .add_header(owner_name, owner_value)
            .json(&json!({ "displayName": "Ash" }))
            .await
            .json();

        let response = server
            .get(&format!("/users/{}/", user.user_id))
            .add_header(other_name, other_value)
            .await;
        response.assert_status_forbidden();
        response.assert_json(&json!({ "message": "forbidden" }));
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_token() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server
            .post("/users/")
            .json(&json!({ "displayName": "Ash" }))
            .await;
        response.assert_status_unauthorized();
        response.assert_json(&json!({ "message": "unauthorized" }));

        server
            .post("/users/")
            .json(&json!({ "displayName": "" }))
            .await
            .assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn empty_display_name_is_rejected() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        let (name, value) = bearer("u1")?;

        let response = server
            .post("/users/")
            .add_header(name, value)
            .json(&json!({ "displayName": "" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "message": "bad request" }));
        Ok(())
    }
}

//! Store failure to HTTP error conversion.

use decklog_store::StoreError;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "decklog_server::store_error";

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity, id } => ErrorKind::NotFound
                .with_resource(entity.to_string())
                .with_context(format!("id: {id}")),
            StoreError::Conflict(reason) => ErrorKind::Conflict.with_message(reason),
            error => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "store failure",
                );
                ErrorKind::InternalServerError.with_context(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use decklog_store::Entity;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn store_errors_map_to_status() {
        let not_found: Error = StoreError::not_found(Entity::Deck, Uuid::nil()).into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(not_found.resource(), Some("deck"));

        let conflict: Error = StoreError::Conflict("exists".into()).into();
        assert_eq!(conflict.kind(), ErrorKind::Conflict);

        let closed: Error = StoreError::Closed.into();
        assert_eq!(closed.kind(), ErrorKind::InternalServerError);
    }
}

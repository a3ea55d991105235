use decklog_store::StoreResult;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::Actor;
use crate::handler::{Error, ErrorKind};
use crate::policy::{Ownership, OwnershipResolver, ResourceLookup, ResourceRef};

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The actor is not entitled to the resource.
    Forbidden,
    /// The resource does not exist.
    NotFound,
    /// The resource could not be looked up.
    Error,
}

impl From<Denial> for Error<'static> {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Forbidden => ErrorKind::Forbidden.into_error(),
            Denial::NotFound => ErrorKind::NotFound.into_error(),
            Denial::Error => ErrorKind::InternalServerError.into_error(),
        }
    }
}

/// Outcome of an authorization rule.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    /// Returns whether the request may proceed.
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Turns a lookup result into the resource or the matching denial.
fn found(resolved: &StoreResult<Option<Ownership>>) -> Result<&Ownership, Denial> {
    match resolved {
        Ok(Some(ownership)) => Ok(ownership),
        Ok(None) => Err(Denial::NotFound),
        Err(_) => Err(Denial::Error),
    }
}

/// The actor must be signed in and own the resource.
///
/// Anonymous actors are denied before the lookup result is considered.
pub fn strict_owner(actor: &Actor, resolved: &StoreResult<Option<Ownership>>) -> Decision {
    if actor.is_anonymous() {
        return Decision::Deny(Denial::Forbidden);
    }

    match found(resolved) {
        Ok(ownership) if actor.is(&ownership.owner_uid) => Decision::Allow,
        Ok(_) => Decision::Deny(Denial::Forbidden),
        Err(denial) => Decision::Deny(denial),
    }
}

/// Public resources are readable by anyone, private ones only by the owner.
pub fn privacy_read(actor: &Actor, resolved: &StoreResult<Option<Ownership>>) -> Decision {
    match found(resolved) {
        Ok(ownership) if !ownership.is_private || actor.is(&ownership.owner_uid) => {
            Decision::Allow
        }
        Ok(_) => Decision::Deny(Denial::Forbidden),
        Err(denial) => Decision::Deny(denial),
    }
}

/// Evaluates the rule families against the store.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationPolicy<'a, L> {
    resolver: OwnershipResolver<'a, L>,
}

impl<'a, L> AuthorizationPolicy<'a, L>
where
    L: ResourceLookup,
{
    /// Creates a policy resolving ownership through `lookup`.
    #[inline]
    pub const fn new(lookup: &'a L) -> Self {
        Self {
            resolver: OwnershipResolver::new(lookup),
        }
    }

    /// Strict-owner rule for updates, deletes and owner-only reads.
    pub async fn strict_owner(&self, actor: &Actor, target: ResourceRef) -> Decision {
        let decision = if actor.is_anonymous() {
            Decision::Deny(Denial::Forbidden)
        } else {
            let resolved = self.resolver.resolve(target).await;
            log_failure(&resolved, target);
            strict_owner(actor, &resolved)
        };

        log_decision("strict_owner", actor, target, decision);
        decision
    }

    /// Privacy-aware read of the resource itself.
    pub async fn privacy_read(&self, actor: &Actor, target: ResourceRef) -> Decision {
        let resolved = self.resolver.resolve(target).await;
        log_failure(&resolved, target);

        let decision = privacy_read(actor, &resolved);
        log_decision("privacy_read", actor, target, decision);
        decision
    }

    /// Privacy-aware read decided by the parent of the resource.
    ///
    /// Only the owner and privacy flag of the parent matter.
    pub async fn cascading_read(&self, actor: &Actor, target: ResourceRef) -> Decision {
        let resolved = self.resolver.resolve_parent(target).await;
        log_failure(&resolved, target);

        let decision = privacy_read(actor, &resolved);
        log_decision("cascading_read", actor, target, decision);
        decision
    }
}

fn log_failure(resolved: &StoreResult<Option<Ownership>>, target: ResourceRef) {
    if let Err(error) = resolved {
        tracing::error!(
            target: TRACING_TARGET_AUTHORIZATION,
            resource = %target,
            error = %error,
            "ownership lookup failed",
        );
    }
}

fn log_decision(rule: &'static str, actor: &Actor, target: ResourceRef, decision: Decision) {
    match decision {
        Decision::Allow => tracing::debug!(
            target: TRACING_TARGET_AUTHORIZATION,
            rule,
            account_uid = %actor.uid(),
            resource = %target,
            "access granted",
        ),
        Decision::Deny(denial) => tracing::warn!(
            target: TRACING_TARGET_AUTHORIZATION,
            rule,
            account_uid = %actor.uid(),
            resource = %target,
            denial = ?denial,
            "access denied",
        ),
    }
}

#[cfg(test)]
mod tests {
    use decklog_store::{Entity, StoreError};
    use uuid::Uuid;

    use super::*;
    use crate::policy::resolver::tests::FakeLookup;

    fn actors() -> [Actor; 3] {
        [Actor::anonymous(), Actor::new("u1"), Actor::new("u2")]
    }

    fn lookups() -> Vec<StoreResult<Option<Ownership>>> {
        let mut results = vec![Ok(None), Err(StoreError::Closed)];
        for owner in ["u1", "u2"] {
            for is_private in [false, true] {
                results.push(Ok(Some(Ownership::new(owner, is_private))));
            }
        }
        results
    }

    #[test]
    fn strict_owner_allows_only_signed_in_owner() {
        for actor in actors() {
            for resolved in lookups() {
                let expected = !actor.is_anonymous()
                    && matches!(&resolved, Ok(Some(o)) if o.owner_uid == actor.uid());
                let decision = strict_owner(&actor, &resolved);
                assert_eq!(decision.is_allowed(), expected, "{actor:?} {resolved:?}");
            }
        }
    }

    #[test]
    fn strict_owner_denial_reasons() {
        let owner = Actor::new("u1");
        assert_eq!(
            strict_owner(&Actor::anonymous(), &Err(StoreError::Closed)),
            Decision::Deny(Denial::Forbidden)
        );
        assert_eq!(
            strict_owner(&owner, &Ok(None)),
            Decision::Deny(Denial::NotFound)
        );
        assert_eq!(
            strict_owner(&owner, &Err(StoreError::Closed)),
            Decision::Deny(Denial::Error)
        );
        assert_eq!(
            strict_owner(&owner, &Ok(Some(Ownership::new("u2", false)))),
            Decision::Deny(Denial::Forbidden)
        );
    }

    #[test]
    fn privacy_read_allows_public_or_owner() {
        for actor in actors() {
            for resolved in lookups() {
                let expected = matches!(
                    &resolved,
                    Ok(Some(o)) if !o.is_private || o.owner_uid == actor.uid()
                );
                let decision = privacy_read(&actor, &resolved);
                assert_eq!(decision.is_allowed(), expected, "{actor:?} {resolved:?}");
            }
        }
    }

    #[test]
    fn anonymous_cannot_read_private_record() {
        let resolved = Ok(Some(Ownership::new("u1", true)));
        assert_eq!(
            privacy_read(&Actor::anonymous(), &resolved),
            Decision::Deny(Denial::Forbidden)
        );
    }

    #[test]
    fn lookup_failures_are_never_client_errors() {
        let failed = Err(StoreError::Unexpected("timeout".into()));
        for actor in [Actor::new("u1"), Actor::new("u2")] {
            assert_eq!(strict_owner(&actor, &failed), Decision::Deny(Denial::Error));
            assert_eq!(privacy_read(&actor, &failed), Decision::Deny(Denial::Error));
        }
    }

    #[tokio::test]
    async fn anonymous_strict_owner_skips_lookup() {
        let target = ResourceRef::new(Entity::Record, Uuid::now_v7());
        let lookup = FakeLookup::default().failing(Entity::Record);

        let decision = AuthorizationPolicy::new(&lookup)
            .strict_owner(&Actor::anonymous(), target)
            .await;
        assert_eq!(decision, Decision::Deny(Denial::Forbidden));
    }

    #[tokio::test]
    async fn cascade_ignores_match_fields() {
        let record = ResourceRef::new(Entity::Record, Uuid::now_v7());
        let child = ResourceRef::new(Entity::Match, Uuid::now_v7());

        for record_private in [false, true] {
            for match_private in [false, true] {
                for match_owner in ["u1", "u2"] {
                    let lookup = FakeLookup::default()
                        .with(record, Ownership::new("u1", record_private))
                        .with(
                            child,
                            Ownership::new(match_owner, match_private).with_parent(record.id),
                        );
                    let policy = AuthorizationPolicy::new(&lookup);

                    for actor in actors() {
                        let expected = !record_private || actor.uid() == "u1";
                        let decision = policy.cascading_read(&actor, child).await;
                        assert_eq!(decision.is_allowed(), expected);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn cascade_denials() {
        let record = ResourceRef::new(Entity::Record, Uuid::now_v7());
        let child = ResourceRef::new(Entity::Match, Uuid::now_v7());
        let actor = Actor::new("u1");

        let missing_child = FakeLookup::default();
        let decision = AuthorizationPolicy::new(&missing_child)
            .cascading_read(&actor, child)
            .await;
        assert_eq!(decision, Decision::Deny(Denial::NotFound));

        let failing_parent = FakeLookup::default()
            .with(child, Ownership::new("u1", false).with_parent(record.id))
            .failing(Entity::Record);
        let decision = AuthorizationPolicy::new(&failing_parent)
            .cascading_read(&actor, child)
            .await;
        assert_eq!(decision, Decision::Deny(Denial::Error));

        let no_parent_kind = AuthorizationPolicy::new(&missing_child)
            .cascading_read(&actor, record)
            .await;
        assert_eq!(no_parent_kind, Decision::Deny(Denial::Error));
    }

    #[test]
    fn denials_map_to_status() {
        let forbidden: Error = Denial::Forbidden.into();
        let not_found: Error = Denial::NotFound.into();
        let failed: Error = Denial::Error.into();

        assert_eq!(forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(failed.kind(), ErrorKind::InternalServerError);
    }
}

use async_trait::async_trait;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::Credential;
use crate::handler::{Error, ErrorKind, Result};
use crate::policy::{AccessContext, AuthorizationPolicy, Decision, ResourceLookup, ResourceRef};
use crate::service::{AuthError, TokenVerifier};
use crate::validate::{MatchPayload, validate};

/// What a step decided about the request.
#[derive(Debug)]
pub enum Flow {
    /// Pass the (possibly updated) context to the next step.
    Continue(AccessContext),
    /// Stop and answer with this error.
    Halt(Error<'static>),
}

/// One stage of request admission.
#[async_trait]
pub trait Step: Send + Sync {
    /// Runs the step against the current context.
    async fn run(&self, context: AccessContext) -> Flow;
}

/// An ordered list of steps; the first [`Flow::Halt`] wins.
#[must_use]
#[derive(Default)]
pub struct Pipeline<'a> {
    steps: Vec<Box<dyn Step + 'a>>,
}

impl<'a> Pipeline<'a> {
    /// Creates an empty pipeline.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn then(mut self, step: impl Step + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Runs every step in order and returns the final context.
    pub async fn run(self, mut context: AccessContext) -> Result<AccessContext> {
        for step in &self.steps {
            context = match step.run(context).await {
                Flow::Continue(context) => context,
                Flow::Halt(error) => return Err(error),
            };
        }

        Ok(context)
    }
}

/// Whether a route accepts anonymous callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Verifies the bearer credential and records the actor.
///
/// A credential that is present but fails to verify always halts, even on
/// routes that accept anonymous callers.
pub struct Authenticate<'a> {
    verifier: &'a TokenVerifier,
    credential: &'a Credential,
    presence: Presence,
}

impl<'a> Authenticate<'a> {
    /// Rejects requests without a valid credential.
    #[inline]
    pub fn required(verifier: &'a TokenVerifier, credential: &'a Credential) -> Self {
        Self {
            verifier,
            credential,
            presence: Presence::Required,
        }
    }

    /// Lets requests without a credential through as anonymous.
    #[inline]
    pub fn optional(verifier: &'a TokenVerifier, credential: &'a Credential) -> Self {
        Self {
            verifier,
            credential,
            presence: Presence::Optional,
        }
    }
}

#[async_trait]
impl Step for Authenticate<'_> {
    async fn run(&self, context: AccessContext) -> Flow {
        let token = match self.credential {
            Credential::Bearer(token) => token,
            Credential::Absent if self.presence == Presence::Optional => {
                return Flow::Continue(context);
            }
            Credential::Absent => return Flow::Halt(AuthError::MissingToken.into()),
            Credential::Malformed => return Flow::Halt(AuthError::MalformedHeader.into()),
        };

        match self.verifier.verify(token) {
            Ok(actor) => Flow::Continue(context.with_actor(actor)),
            Err(error) => Flow::Halt(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    StrictOwner,
    PrivacyRead,
    CascadingRead,
}

/// Applies one authorization rule to the target resource.
///
/// The target defaults to the one in the context; [`Authorize::on`]
/// overrides it.
pub struct Authorize<'a, L> {
    policy: AuthorizationPolicy<'a, L>,
    rule: Rule,
    target: Option<ResourceRef>,
}

impl<'a, L> Authorize<'a, L>
where
    L: ResourceLookup,
{
    fn new(lookup: &'a L, rule: Rule) -> Self {
        Self {
            policy: AuthorizationPolicy::new(lookup),
            rule,
            target: None,
        }
    }

    /// The actor must own the target.
    #[inline]
    pub fn strict_owner(lookup: &'a L) -> Self {
        Self::new(lookup, Rule::StrictOwner)
    }

    /// The target must be public or owned by the actor.
    #[inline]
    pub fn privacy_read(lookup: &'a L) -> Self {
        Self::new(lookup, Rule::PrivacyRead)
    }

    /// The parent of the target must be public or owned by the actor.
    #[inline]
    pub fn cascading_read(lookup: &'a L) -> Self {
        Self::new(lookup, Rule::CascadingRead)
    }

    /// Authorizes against `target` instead of the context target.
    #[inline]
    pub fn on(self, target: ResourceRef) -> Self {
        Self {
            target: Some(target),
            ..self
        }
    }
}

#[async_trait]
impl<L> Step for Authorize<'_, L>
where
    L: ResourceLookup,
{
    async fn run(&self, context: AccessContext) -> Flow {
        let Some(target) = self.target.or(context.target()) else {
            tracing::error!(
                target: TRACING_TARGET_AUTHORIZATION,
                rule = ?self.rule,
                "authorization step without a target",
            );
            return Flow::Halt(
                ErrorKind::InternalServerError.with_context("authorization target missing"),
            );
        };

        let actor = context.actor();
        let decision = match self.rule {
            Rule::StrictOwner => self.policy.strict_owner(actor, target).await,
            Rule::PrivacyRead => self.policy.privacy_read(actor, target).await,
            Rule::CascadingRead => self.policy.cascading_read(actor, target).await,
        };

        match decision {
            Decision::Allow => Flow::Continue(context),
            Decision::Deny(denial) => {
                let error = Error::from(denial).with_resource(target.kind.to_string());
                Flow::Halt(error)
            }
        }
    }
}

/// Rejects inconsistent match reports.
pub struct ValidateMatch<'a>(pub &'a MatchPayload);

#[async_trait]
impl Step for ValidateMatch<'_> {
    async fn run(&self, context: AccessContext) -> Flow {
        match validate(self.0) {
            Ok(()) => Flow::Continue(context),
            Err(reason) => Flow::Halt(reason.into()),
        }
    }
}

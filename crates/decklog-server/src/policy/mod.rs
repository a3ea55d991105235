//! Access control for resource routes.
//!
//! Every request builds one immutable [`AccessContext`] and runs it through
//! a [`Pipeline`] of steps: authenticate the bearer credential, authorize
//! the actor against the target resource, and validate match payloads.
//! The first step that halts decides the response.
//!
//! Authorization is one of three rule families evaluated by
//! [`AuthorizationPolicy`]:
//!
//! - strict-owner: the actor must be signed in and own the resource;
//! - privacy-read: public resources are readable by anyone, private ones
//!   only by their owner;
//! - cascading-read: privacy-read applied to the parent of the resource.
//!
//! Ownership is re-resolved from the store on every request.

mod context;
mod pipeline;
mod resolver;
mod rules;

pub use self::context::{AccessContext, ResourceRef};
pub use self::pipeline::{Authenticate, Authorize, Flow, Pipeline, Step, ValidateMatch};
pub use self::resolver::{Ownership, OwnershipResolver, ResourceLookup, parent_kind};
pub use self::rules::{AuthorizationPolicy, Decision, Denial, privacy_read, strict_owner};

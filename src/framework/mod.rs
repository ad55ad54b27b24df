//! Generic actor plumbing for resource management.
//!
//! This module provides the building blocks the order-status service is built on:
//! an entity trait, a generic actor that owns a store of entities, and a
//! type-safe client that talks to it over channels.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns and mutates entities
//! - [`ResourceClient`] - Cloneable handle that sends requests to a `ResourceActor`
//! - [`ActorClient`] - Default `get`/`list` for resource-specific client wrappers
//! - [`FrameworkError`] - Plumbing errors (closed channels, missing ids, entity failures)
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};

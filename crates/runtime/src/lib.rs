//! Persistence boundary and services around the combat engine.
//!
//! This crate wires repositories and services into a cohesive runtime API.
//! Consumers build a [`Runtime`], then drive battles through
//! [`CombatService`] and offline farming through [`IdleService`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the wiring and builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`services`] validates requests, runs `game-core` and persists deltas
//! - [`repository`] provides storage contracts and in-memory adapters
pub mod api;
pub mod repository;
pub mod runtime;
pub mod services;

pub use api::{Result, RuntimeError};
pub use repository::{
    CharacterRepository, ClaimOutcome, EncounterRepository, IdleSession, IdleSessionRepository,
    InMemoryCharacterRepo, InMemoryEncounterRepo, InMemoryIdleSessionRepo, InMemoryMissionRepo,
    InventoryStack, MissionRepository, RepositoryError, RewardApplication,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use services::{CombatResolution, CombatService, IdleClaim, IdleService};

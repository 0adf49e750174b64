//! Search sessions
//!
//! A session owns one [`QueryState`] behind an actor. Handles submit mood
//! searches and page changes; every change is published as a [`QueryView`]
//! on a watch channel for the UI to render. Responses are matched to the
//! request that is current when they arrive, so a slow response can never
//! overwrite the outcome of a newer one.

mod actor;
mod commands;
mod handle;
pub mod state;

#[cfg(test)]
mod tests;

pub use actor::{spawn_search_session, spawn_search_session_with_table};
pub use commands::SessionCommand;
pub use handle::SearchSessionHandle;
pub use state::{FetchTicket, Phase, QueryState, QueryView, SettleOutcome};

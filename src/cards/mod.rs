//! Card-Game Engines
//!
//! A standard 52-card deck plus two rule sets built on it:
//!
//! - `war`: both sides flip their top card, higher rank takes the spoils,
//!   ties escalate into a war
//! - `battler`: value-only cards, pick from a hand, race to 100 points
//!   against a computer opponent
//!
//! The engines share the deterministic shuffle from [`crate::GameRng`] and
//! the generation-token pattern for the shell's animation delays: an action
//! hands back a ticket, the shell calls the follow-up with it after its
//! pause, and tickets issued before a reset are silently ignored.

pub mod battler;
pub mod deck;
pub mod war;

// Re-export key types
pub use battler::{BattlerCard, BattlerState, BattlerStatus, Seat, TurnTicket};
pub use deck::{Card, Color, Rank, Suit};
pub use war::{RoundTicket, WarState, WarStatus};

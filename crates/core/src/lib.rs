//! # EcoTrack Core
//!
//! Pure client-side logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - The session storage port and the session bookkeeping built on it
//! - Client-side searching, ranking and paging of fetched lists
//!
//! ## Architecture Principles
//! - Only depends on `ecotrack-domain`
//! - No HTTP or platform code
//! - Storage reached through the [`SessionStore`] trait

pub mod listing;
pub mod session;

pub use listing::{filter_facilities, filter_users, sort_by_co2e, top_categories, Page};
pub use session::{SessionManager, SessionStore};

//! In-memory data provider for the yield dashboard.
//!
//! Serves seeded reference data with simulated request latency and keeps
//! per-user session state in memory.

pub mod history;
pub mod latency;
pub mod provider;
pub mod seed;

pub use history::{generate_history, HISTORY_DAYS};
pub use latency::LatencyProfile;
pub use provider::InMemoryProvider;
pub use seed::{seed_opportunities, seed_platforms, seed_users, DEMO_USER_ID};

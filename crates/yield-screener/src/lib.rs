//! Yield Screener
//!
//! Client-side filtering, sorting and premium gating for the opportunity
//! views. Pure functions over reference data; no I/O.

pub mod filter;
pub mod format;
pub mod gate;
pub mod models;

pub use filter::{sort_by_apy, top_n, OpportunityFilter, TOP_OPPORTUNITIES};
pub use format::{format_currency, format_percent};
pub use gate::{gate_detail, is_locked, premium_hint, GatedDetail, RiskAssessment};
pub use models::{ActiveFilter, ApyTier, FilterCriteria, Tab};

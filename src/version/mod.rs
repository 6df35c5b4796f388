//! Version model and comparison engine
//!
//! Raw version strings fetched from upstreams are parsed under a [`schema::Schema`]
//! into [`types::Version`] values, compared, and arbitrated into a single
//! [`arbitrator::Update`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Schema    │────▶│   Parser    │────▶│   Version   │
//! │  (rules)    │     │  (split)    │     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │ Arbitrator  │
//!                                         │  (select)   │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`schema`]: Parsing rules, classifier specs and priorities
//! - [`parser`]: Raw string to [`types::Version`]
//! - [`types`]: Version and classifier values and their ordering
//! - [`arbitrator`]: Channel prioritisation and multi-upstream selection
//! - [`error`]: Error types for schema, comparison, upstream and updater failures

pub mod arbitrator;
pub mod error;
pub mod parser;
pub mod schema;
pub mod types;

//! fuzzytip - Fuzzy Tip Advisor
//!
//! Computes a tip percentage from two quality scores (food, service)
//! with a fixed two-rule Mamdani fuzzy-inference pipeline, and
//! demonstrates three search strategies (breadth-first, depth-first,
//! greedy best-first) over an implicit 11x11 integer grid derived from
//! the same two scores.
//!
//! # Architecture
//!
//! Two independent, stateless pipelines composed only at the boundary:
//!
//! - [`fuzzy`] - membership, rule evaluation, centroid defuzzification
//! - [`search`] - implicit grid model and the three traversal strategies
//!
//! The web layer ([`server`]) and the CLI are external collaborators:
//! they parse and validate two numeric fields, call
//! [`fuzzy::compute_tip`] and [`search::run_searches`], and render the
//! results. Neither pipeline depends on the other or on the
//! presentation layer.
//!
//! # Example
//!
//! ```rust
//! use fuzzytip::fuzzy::compute_tip;
//! use fuzzytip::search::{run_searches, GridState};
//!
//! let tip = compute_tip(8.0, 9.0);
//! assert!(tip > 10.0 && tip < 20.0);
//!
//! let report = run_searches(GridState::new(0, 0), GridState::new(8, 9));
//! assert_eq!(report.bfs, Some(GridState::new(8, 9)));
//! ```

pub mod config;
pub mod error;
pub mod fuzzy;
pub mod search;
pub mod server;

// Re-export the core entry points
pub use fuzzy::{compute_tip, defuzzify, fuzzy_inference, triangular, FoodQuality, RuleStrengths, ServiceQuality};
pub use search::{bfs, dfs, greedy_best_first, run_searches, GridState, SearchReport};

// Re-export server types
pub use server::{create_router, run_server, AppState};

// Re-export configuration types
pub use config::{GeneralConfig, LogLevel, ServerConfig, TipConfig};

// Re-export error types
pub use error::{ErrorCode, ErrorResponse, TipError, TipResult};

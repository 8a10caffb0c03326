//! HTTP API for clause-roster.
//!
//! ```text
//! POST /analyze_contract {"document": "..."}
//!   ↓
//! ContractAnalyzer::analyze_document()
//!   ├── RosterPlanner (first pages)
//!   └── Coordinator → findings
//!   ↓
//! 200 {"status", "strategy_used", "executive_summary"}
//! 400 / 500 {"detail"}
//! ```

pub mod params;
pub mod routes;
pub mod transport;

pub use params::{AnalyzeParams, ErrorBody};
pub use routes::{ApiError, AppState, router};
pub use transport::serve;

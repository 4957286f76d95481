//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (configuration phase):
//!     (method, pattern, handler) or RouteGroup::routes()
//!     → router.rs (store in RouteTable, overwrite duplicates)
//!     → matcher.rs (compile pattern into segments)
//!
//! Incoming Request (method, path):
//!     → router.rs (scan routes in insertion order)
//!     → matcher.rs (segment-by-segment match, bind :params)
//!     → Return: matched Route + Params, or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable once the App is built
//! - No regex, no wildcards: literal and `:param` segments only
//! - Deterministic: first match in insertion order wins
//! - Method mismatch is reported as a plain no-match (no 405)

pub mod group;
pub mod matcher;
pub mod router;

pub use group::RouteGroup;
pub use matcher::{match_path, Params, PathPattern};
pub use router::{Route, RouteMatch, RouteTable};

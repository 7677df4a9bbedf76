//! Leaves tracker web front-end: server-rendered pages whose root layout
//! chooses between stylesheet links and inlined critical CSS per request.

pub mod assets;
pub mod config;
pub mod critical;
pub mod layout;
pub mod middleware;
pub mod pages;
pub mod server;
pub mod styles;

pub use critical::{CriticalCss, CriticalCssLookup};
pub use layout::Layout;
pub use middleware::PathForwarding;
pub use styles::stylesheet_links;

/// Request header carrying the logical page path.
pub const PATHNAME_HEADER: &str = "x-pathname";

// ============================================================================
// ROUTER MODULE - Router por hash con guard de autenticación
// ============================================================================

pub mod lifecycle;
pub mod navigator;
pub mod pending;
pub mod route;

pub use lifecycle::MountScope;
pub use navigator::{Completion, NavState, NavigationTicket, Resolution, Router};
pub use pending::PendingRedirect;
pub use route::{Route, RouteEntry, ViewName, ROUTES};

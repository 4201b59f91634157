//! HTTP handlers, one module per domain area.

pub mod broadcasters;
pub mod events;
pub mod pricing;
pub mod rights;
pub mod rights_grants;
pub mod rights_packages;
pub mod territories;
pub mod workflows;

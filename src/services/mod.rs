//! Domain services used by the HTTP routes and the sweep task.
//!
//! ARCHITECTURE
//! ============
//! Service functions take an explicit `&dyn ChatStore` handle so route
//! handlers stay focused on request translation, and tests can run the
//! same logic against the in-memory store.

pub mod clock;
pub mod message;
pub mod presence;

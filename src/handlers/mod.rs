// handlers/mod.rs - Page and record API handlers
//
// Public pages are reachable signed out; protected handlers expect the
// session the navigation guard put in the session store.

pub mod public;
pub mod protected;

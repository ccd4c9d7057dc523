//! LSP Protocol Implementation
//!
//! Publishes statement diagnostics and answers hover, completion and
//! document symbol requests.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;

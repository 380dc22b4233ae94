//! dclscraper — scrapes the judiciary daily cause lists and normalizes the
//! several incompatible table layouts into a uniform record shape.
//!
//! The parsing core (`layout`, `parse`, `export`) is synchronous and pure:
//! `(markup, layout) -> result`. Networking and file output live in `fetch`
//! and the orchestrator binary.

pub mod datecode;
pub mod error;
pub mod export;
pub mod fetch;
pub mod layout;
pub mod parse;

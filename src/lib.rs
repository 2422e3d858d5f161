//! # ui-options-server
//!
//! A small self-hosted admin page for tabbed UI options. Two independent
//! option sets ("extension" and "theme") are declared as tabs of typed
//! fields; the form renders both, and a submission merges the posted values
//! back into each set's YAML options file under the reserved `ui-options`
//! key, leaving everything else in those documents untouched.
//!
//! # Architecture
//!
//! ```text
//! OptionsServer
//!   ├─> AppState (one locked OptionSetState per set)
//!   ├─> web::router (GET / and POST /post)
//!   ├─> options::apply_submission (form values -> registry)
//!   └─> options::merge_options (registry -> YAML file)
//! ```
//!
//! # Data Flow
//!
//! **Render path:** registry → HTML form (bracket-named inputs)
//!
//! **Save path:** form pairs → per-set submission → registry → `ui-options`
//! section of the persisted document
//!
//! Unknown tab or field keys in a submission are skipped and reported, not
//! faulted on; a file read or write failure surfaces as an error response
//! instead of a redirect.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Server configuration
pub mod config;

/// Structured configuration patching (apply + persist)
pub mod options;

/// Field registry: tabs, fields, values
pub mod registry;

/// Orchestration: shared state and the serve loop
pub mod server;

/// HTTP surface: router, handlers, form decoding, rendering
pub mod web;

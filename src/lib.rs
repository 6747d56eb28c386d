//! ClipStack - clipboard history daemon
//!
//! This crate watches the system clipboard, keeps a bounded deduplicated
//! history of what passes through it, and lets the user browse that
//! history and paste any entry back.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (clipboard, cache, config, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

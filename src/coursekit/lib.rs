//! # Coursekit Architecture
//!
//! Coursekit organizes a course: ordered **modules**, each holding ordered
//! **resources** (links or file descriptors), plus resources that have not
//! been placed in any module yet. Everything can be reordered and moved by
//! drag-and-drop, searched, and persisted to a key-value store.
//!
//! It is a library that happens to have a CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, colored output, exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, parses selectors, owns the drag session     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validates forms, mutates, persists, returns CmdResult    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (placement.rs, drag.rs, search.rs, ordering.rs)     │
//! │  - Pure mutation and projection over the two stores         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ResourceStore, ModuleStore, CourseStore                  │
//! │  - StorageBackend: FsBackend, MemBackend                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! A resource lives in exactly one container: one module's list or the
//! unassigned list. No container holds the same id twice. Stores only
//! expose operations that keep this true, and moves happen as one
//! synchronous splice in [`placement`].
//!
//! ## No I/O in Core
//!
//! From `api.rs` inward, code never writes to stdout or stderr, never
//! prompts, and never exits. Diagnostics go through `tracing`; the CLI
//! decides whether to show them.
//!
//! ## Testing
//!
//! 1. **Stores and engine**: unit tests next to the code.
//! 2. **Commands**: the bulk of behavior tests, on [`store::mem_backend::MemBackend`].
//! 3. **Integration** (`tests/`): filesystem persistence, property tests of
//!    the placement invariants, and end-to-end CLI runs.
//!
//! ## Module Overview
//!
//! - [`api`]: facade for UI clients
//! - [`commands`]: business operations
//! - [`placement`]: cross-container moves
//! - [`drag`]: gesture signals to mutations
//! - [`search`]: filtered projections
//! - [`forms`]: form validation
//! - [`model`]: resources, modules, locations
//! - [`ordering`]: ids, dedupe, reorder, transfer
//! - [`store`]: containers and persistence
//! - [`config`]: layered configuration
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod forms;
pub mod model;
pub mod ordering;
pub mod placement;
pub mod search;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

//! Application layer use cases for profview.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules, here `profview-core`) and the infrastructure
//! (files, terminal).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "save the
//!   view shown at this URL under the name `hot paths`").
//! - **Depend on abstractions** (the [`named_configs::SettingsRepository`]
//!   trait) rather than concrete implementations, so the settings file can be
//!   swapped for an in-memory store in tests.
//! - **Contain no file system access**.
//!
//! # Sub-modules
//!
//! - **`current_config`** – The live configuration shared by the command
//!   handler and any request handlers, guarded by a mutex.
//!
//! - **`named_configs`** – Saving, removing and listing named views, and
//!   building the view menu shown in the web UI.

pub mod current_config;
pub mod named_configs;

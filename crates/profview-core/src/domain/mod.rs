//! Domain entities for profview.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application is the **domain**.  Domain code
//! never touches the file system, the network or the terminal, so it can be
//! compiled and tested anywhere without setup.
//!
//! For profview the domain is small:
//!
//! - [`config::ViewConfig`] – the value being configured.
//! - [`field::FieldDescriptor`] – static metadata and typed access to one field.
//! - [`registry::FieldRegistry`] – the ordered set of descriptors, built once.
//! - [`settings::Settings`] – the list of named views as persisted on disk.

/// The view configuration record and its fixed defaults.
pub mod config;
pub mod field;
pub mod registry;
pub mod settings;

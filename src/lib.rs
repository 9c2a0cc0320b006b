#![forbid(unsafe_code)]
//! Runtime localization layer for structured data models.
//!
//! A [`Model`] holds a single live value per translatable attribute while a
//! hidden locale store keeps that attribute's value in every known locale.
//! Application code reads and writes tracked fields as plain attributes;
//! [`Model::localize`] switches the active locale and rewrites every tracked
//! attribute in place, recursively through nested models, objects, and
//! arrays. At the serialization boundary, [`Model::init_value`] populates
//! the store from a wire-format locale dictionary and [`Model::inflate`]
//! reconstructs one.
//!
//! # Quick Start
//!
//! ```rust
//! use langmodel::Model;
//!
//! let mut model = Model::new();
//! model.set("header", "Welcome");
//! model.localize("fr");
//! model.set("header", "Bienvenue");
//!
//! let locales = model.inflate(&[("header", "header")], None);
//! assert_eq!(locales["en"]["header"], "Welcome");
//! assert_eq!(locales["fr"]["header"], "Bienvenue");
//! ```
//!
//! # Features
//!
//! - Tracked attribute writes mirrored into a per-locale store
//! - Recursive locale switching across nested models, objects, and arrays
//! - Wire-format locale dictionaries with a symmetric key set per locale
//! - Tracked arrays with per-index attribute paths and lifecycle cleanup
//! - Full-state JSON snapshots for caching and reloading

pub mod builder;
pub mod error;
pub mod model;
pub mod path;
pub mod store;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    builder::ModelBuilder,
    error::Error,
    model::{ArraySlot, DEFAULT_LOCALE, Model, ObjectSlot},
    store::LocaleStore,
    types::{Attr, LocaleDict},
};

//! Builder for creating a `Model` instance with a fluent interface.
//!
//! # Example
//!
//! ```rust
//! use langmodel::Model;
//!
//! let mut model = Model::builder()
//!     .locale("en")
//!     .tracked_array("items", &["header", "title"])
//!     .attr("published", "true")
//!     .build();
//!
//! model.set("header", "Welcome");
//! assert_eq!(model.text("header"), Some("Welcome"));
//! ```

use std::collections::BTreeMap;

use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    model::{DEFAULT_LOCALE, Model},
    types::Attr,
};

pub struct ModelBuilder {
    locale: String,
    attrs: BTreeMap<String, Attr>,
    array_fields: BTreeMap<String, Vec<String>>,
}

impl ModelBuilder {
    /// Creates a new `ModelBuilder` with the default locale and no
    /// attributes.
    pub fn new() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            attrs: BTreeMap::new(),
            array_fields: BTreeMap::new(),
        }
    }

    /// Sets the starting active locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Seeds an untracked attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Attr>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Declares a tracked array attribute with the element field names
    /// that become per-index attribute paths.
    pub fn tracked_array(mut self, key: impl Into<String>, fields: &[&str]) -> Self {
        self.array_fields.insert(
            key.into(),
            fields.iter().map(|field| field.to_string()).collect(),
        );
        self
    }

    /// Builds the final `Model` instance.
    pub fn build(self) -> Model {
        let mut model = Model::new();
        model.locale = self.locale;
        model.attrs = self.attrs;
        for key in self.array_fields.keys() {
            model
                .attrs
                .entry(key.clone())
                .or_insert_with(|| Attr::Array(Vec::new()));
        }
        model.array_fields = self.array_fields;
        model
    }

    /// Builds the final `Model` instance, rejecting a starting locale
    /// that is not a valid BCP-47 language identifier.
    pub fn build_checked(self) -> Result<Model, Error> {
        if self.locale.parse::<LanguageIdentifier>().is_err() {
            return Err(Error::InvalidLocale(self.locale));
        }
        Ok(self.build())
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let model = ModelBuilder::new().build();
        assert_eq!(model.locale(), DEFAULT_LOCALE);
        assert!(model.store().is_empty());
    }

    #[test]
    fn test_builder_locale_and_attrs() {
        let model = Model::builder()
            .locale("fr")
            .attr("published", "true")
            .build();
        assert_eq!(model.locale(), "fr");
        assert_eq!(model.text("published"), Some("true"));
        // seeded attrs are structural, not tracked
        assert!(!model.store().is_tracked("published"));
    }

    #[test]
    fn test_builder_tracked_array_is_usable() {
        let mut model = Model::builder()
            .tracked_array("items", &["header"])
            .build();
        let mut items = model.array("items").expect("declared array");
        items.push(BTreeMap::new());
        items.item(0).set("header", "hello");
        assert_eq!(model.text("items.0.header"), Some("hello"));
    }

    #[test]
    fn test_build_checked_rejects_invalid_locale() {
        let result = Model::builder().locale("not a locale").build_checked();
        assert!(matches!(result, Err(Error::InvalidLocale(_))));

        let model = Model::builder().locale("de-AT").build_checked().unwrap();
        assert_eq!(model.locale(), "de-AT");
    }
}

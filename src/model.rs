//! The localized model: an active locale, a locale store, and a live
//! attribute tree kept in sync through tracked writes.
//!
//! Application code reads and writes translatable fields as plain
//! attributes; the model mirrors every tracked write into the
//! [`LocaleStore`] under the currently active locale. Switching locales
//! with [`Model::localize`] rewrites every tracked attribute in place and
//! recurses through nested models, objects, and arrays. The serialization
//! primitives ([`Model::init_value`], [`Model::init_array_value`],
//! [`Model::inflate`]) exchange the wire-format locale dictionary.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{
    builder::ModelBuilder,
    error::Error,
    path,
    store::LocaleStore,
    types::{Attr, LocaleDict},
};

/// Active locale for a freshly constructed model.
pub const DEFAULT_LOCALE: &str = "en";

/// A localizable entity.
///
/// Holds one live value per attribute plus a hidden per-locale map behind
/// every tracked attribute path. Models nest inside other models' attribute
/// trees and are localized recursively.
///
/// # Example
///
/// ```rust
/// use langmodel::Model;
///
/// let mut model = Model::new();
/// model.set("header", "Welcome");
/// model.localize("fr");
/// model.set("header", "Bienvenue");
///
/// model.localize("en");
/// assert_eq!(model.text("header"), Some("Welcome"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    /// Locale currently applied to live attributes.
    pub(crate) locale: String,

    /// Tracked attribute values across all locales.
    pub(crate) store: LocaleStore,

    /// Live attribute tree.
    pub(crate) attrs: BTreeMap<String, Attr>,

    /// Declared element field names per tracked array attribute.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(default)]
    pub(crate) array_fields: BTreeMap<String, Vec<String>>,
}

impl Model {
    /// Creates an empty model with the [`DEFAULT_LOCALE`] active.
    pub fn new() -> Self {
        Model {
            locale: DEFAULT_LOCALE.to_string(),
            store: LocaleStore::new(),
            attrs: BTreeMap::new(),
            array_fields: BTreeMap::new(),
        }
    }

    /// Returns a [`ModelBuilder`] for fluent construction.
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    /// The currently active locale code.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Read-only view of the locale store.
    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    /// Resolves an attribute by dotted/bracketed path.
    pub fn get(&self, attr_path: &str) -> Option<&Attr> {
        path::get(&self.attrs, attr_path)
    }

    /// Resolves a text attribute by path.
    pub fn text(&self, attr_path: &str) -> Option<&str> {
        self.get(attr_path)?.as_text()
    }

    /// Tracked write: mirrors `value` into the locale store under the
    /// active locale, then applies it to the live attribute at `attr_path`.
    pub fn set(&mut self, attr_path: &str, value: impl Into<String>) {
        let value = value.into();
        self.store.set(attr_path, &self.locale, value.clone());
        path::set(&mut self.attrs, attr_path, Attr::Text(value));
    }

    /// Structural write: places `value` at `attr_path` without tracking.
    ///
    /// Use this for non-translatable attributes and for embedding nested
    /// models, objects, and arrays.
    pub fn set_attr(&mut self, attr_path: &str, value: impl Into<Attr>) {
        path::set(&mut self.attrs, attr_path, value.into());
    }

    /// Declares a tracked array attribute whose elements carry the given
    /// translatable field names, and ensures an empty live array exists.
    pub fn track_array(&mut self, key: &str, fields: &[&str]) {
        self.array_fields.insert(
            key.to_string(),
            fields.iter().map(|field| field.to_string()).collect(),
        );
        self.attrs
            .entry(key.to_string())
            .or_insert_with(|| Attr::Array(Vec::new()));
    }

    /// Handle over a nested object attribute; writes through it are tracked
    /// under `"<key>.<field>"`.
    pub fn object(&mut self, key: &str) -> ObjectSlot<'_> {
        ObjectSlot {
            model: self,
            prefix: key.to_string(),
        }
    }

    /// Handle over a tracked array attribute, or `None` if `key` was never
    /// declared with [`Model::track_array`].
    pub fn array(&mut self, key: &str) -> Option<ArraySlot<'_>> {
        let fields = self.array_fields.get(key)?.clone();
        Some(ArraySlot {
            model: self,
            key: key.to_string(),
            fields,
        })
    }

    /// Switches the active locale and re-applies every tracked attribute.
    ///
    /// Store slots missing an entry for `locale` are backfilled with `""`.
    /// The live attribute tree is then walked depth-first: embedded models
    /// localize themselves, arrays are entered only when their first
    /// element is object-like, and plain objects are searched for embedded
    /// models. Arrays of scalars and empty arrays are left untouched.
    pub fn localize(&mut self, locale: &str) {
        self.locale = locale.to_string();
        let paths: Vec<String> = self.store.paths().cloned().collect();
        for attr_path in paths {
            let value = self.store.backfill(&attr_path, locale);
            path::set(&mut self.attrs, &attr_path, Attr::Text(value));
        }
        for value in self.attrs.values_mut() {
            localize_nested(value, locale);
        }
    }

    /// Like [`Model::localize`], but rejects locale codes that are not
    /// valid BCP-47 language identifiers.
    pub fn localize_checked(&mut self, locale: &str) -> Result<(), Error> {
        if locale.parse::<LanguageIdentifier>().is_err() {
            return Err(Error::InvalidLocale(locale.to_string()));
        }
        self.localize(locale);
        Ok(())
    }

    /// Initializes the tracked slot for `attr_key` from a wire locale
    /// dictionary and applies the active locale's value to the live
    /// attribute.
    ///
    /// Any prior tracking for `attr_key` is overwritten. When `locales` is
    /// absent the slot is left empty and `""` is returned. `source_key`
    /// names the field to read inside each locale's map when the external
    /// key differs from the internal attribute path; it defaults to
    /// `attr_key`.
    pub fn init_value(
        &mut self,
        attr_key: &str,
        locales: Option<&LocaleDict>,
        source_key: Option<&str>,
    ) -> String {
        self.store.replace(attr_key);
        let Some(locales) = locales else {
            return String::new();
        };
        let field = source_key.unwrap_or(attr_key);
        for (locale, values) in locales {
            let value = values.get(field).cloned().unwrap_or_default();
            self.store.set(attr_key, locale, value);
        }
        let value = self.store.backfill(attr_key, &self.locale);
        path::set(&mut self.attrs, attr_key, Attr::Text(value.clone()));
        value
    }

    /// Initializes the tracked slot for one array-element field at
    /// `"<arr_key>.<index>.<attr_key>"` and returns the active locale's
    /// value without touching the live attribute.
    ///
    /// The caller consumes the returned value when assembling the element,
    /// since the element object may not exist yet at call time.
    pub fn init_array_value(
        &mut self,
        arr_key: &str,
        index: usize,
        attr_key: &str,
        locales: Option<&LocaleDict>,
        source_key: Option<&str>,
    ) -> String {
        let attr_path = format!("{arr_key}.{index}.{attr_key}");
        self.store.replace(&attr_path);
        let Some(locales) = locales else {
            return String::new();
        };
        let field = source_key.unwrap_or(attr_key);
        for (locale, values) in locales {
            let value = values.get(field).cloned().unwrap_or_default();
            self.store.set(&attr_path, locale, value);
        }
        self.store
            .value(&attr_path, &self.locale)
            .unwrap_or_default()
            .to_string()
    }

    /// Builds a wire locale dictionary for the given internal-path →
    /// output-key pairs.
    ///
    /// `arr_index` substitutes the `{index}` placeholder in each internal
    /// path. Every locale found in any referenced slot appears in the
    /// output with the full declared output key set; absent values default
    /// to `""`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use langmodel::Model;
    ///
    /// let mut model = Model::new();
    /// model.set("title", "first value");
    /// let locales = model.inflate(&[("title", "subHeader")], None);
    /// assert_eq!(locales["en"]["subHeader"], "first value");
    /// ```
    pub fn inflate(&self, key_map: &[(&str, &str)], arr_index: Option<usize>) -> LocaleDict {
        let mut out = LocaleDict::new();
        for (attr_key, output_key) in key_map {
            let resolved = match arr_index {
                Some(index) => attr_key.replace("{index}", &index.to_string()),
                None => (*attr_key).to_string(),
            };
            let Some(slot) = self.store.slot(&resolved) else {
                continue;
            };
            for (locale, value) in slot {
                out.entry(locale.clone())
                    .or_default()
                    .insert((*output_key).to_string(), value.clone());
            }
        }
        // every discovered locale carries the full output key set
        for values in out.values_mut() {
            for (_, output_key) in key_map {
                values.entry((*output_key).to_string()).or_default();
            }
        }
        out
    }

    /// Serializes the full model state (store included) as JSON.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer(writer, self).map_err(Error::Parse)
    }

    /// Reads a full model state previously written with
    /// [`Model::to_writer`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    /// Caches the full model state to a JSON file.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        let file = File::create(path).map_err(Error::Io)?;
        self.to_writer(BufWriter::new(file))
    }

    /// Loads a model state from a JSON cache file.
    pub fn load_from_cache<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

fn localize_nested(attr: &mut Attr, locale: &str) {
    match attr {
        Attr::Model(model) => model.localize(locale),
        Attr::Array(items) => {
            // arrays are entered only when the first element is object-like
            if matches!(items.first(), Some(Attr::Object(_) | Attr::Model(_))) {
                for item in items.iter_mut() {
                    localize_nested(item, locale);
                }
            }
        }
        Attr::Object(map) => {
            for value in map.values_mut() {
                localize_nested(value, locale);
            }
        }
        Attr::Null | Attr::Text(_) => {}
    }
}

/// Write-through handle over a nested object attribute.
///
/// Writes are tracked under `"<prefix>.<field>"` with the same mirror rule
/// as [`Model::set`].
#[derive(Debug)]
pub struct ObjectSlot<'a> {
    model: &'a mut Model,
    prefix: String,
}

impl ObjectSlot<'_> {
    /// The attribute path prefix this handle writes under.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Tracked write to `"<prefix>.<field>"`.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let attr_path = format!("{}.{}", self.prefix, field);
        self.model.set(&attr_path, value);
    }

    /// Resolves `"<prefix>.<field>"` in the live attribute tree.
    pub fn get(&self, field: &str) -> Option<&Attr> {
        self.model.get(&format!("{}.{}", self.prefix, field))
    }

    /// Resolves a text field under this handle's prefix.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field)?.as_text()
    }
}

/// Write-through handle over a tracked array attribute.
///
/// Element fields declared at [`Model::track_array`] time become per-index
/// attribute paths (`"<key>.<index>.<field>"`). Removing an element drops
/// its store entries; entries for trailing indices are not re-keyed, so
/// they go stale when elements shift.
#[derive(Debug)]
pub struct ArraySlot<'a> {
    model: &'a mut Model,
    key: String,
    fields: Vec<String>,
}

impl ArraySlot<'_> {
    /// Number of elements in the live array.
    pub fn len(&self) -> usize {
        match self.model.attrs.get(&self.key) {
            Some(Attr::Array(items)) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The live element at `index`.
    pub fn get(&self, index: usize) -> Option<&Attr> {
        self.model.get(&format!("{}.{}", self.key, index))
    }

    /// Appends `element`, ensuring a store slot for every declared field
    /// and seeding slots from the element's non-empty text fields under
    /// the active locale.
    pub fn push(&mut self, element: BTreeMap<String, Attr>) {
        self.replace(self.len(), element);
    }

    /// Places `element` at `index` with the same slot-seeding as
    /// [`ArraySlot::push`].
    pub fn replace(&mut self, index: usize, element: BTreeMap<String, Attr>) {
        let locale = self.model.locale.clone();
        for field in &self.fields {
            let attr_path = format!("{}.{}.{}", self.key, index, field);
            self.model.store.ensure(&attr_path);
            if let Some(Attr::Text(value)) = element.get(field) {
                if !value.is_empty() {
                    self.model.store.set(&attr_path, &locale, value.clone());
                }
            }
        }
        path::set(
            &mut self.model.attrs,
            &format!("{}.{}", self.key, index),
            Attr::Object(element),
        );
    }

    /// Handle for tracked writes to the element at `index`.
    pub fn item(&mut self, index: usize) -> ObjectSlot<'_> {
        ObjectSlot {
            model: &mut *self.model,
            prefix: format!("{}.{}", self.key, index),
        }
    }

    /// Removes the element at `index`, dropping every store entry under
    /// `"<key>.<index>."` first.
    pub fn remove(&mut self, index: usize) -> Option<Attr> {
        self.model
            .store
            .remove_prefix(&format!("{}.{}.", self.key, index));
        match self.model.attrs.get_mut(&self.key) {
            Some(Attr::Array(items)) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    /// Removes the last element, dropping its store entries.
    pub fn pop(&mut self) -> Option<Attr> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.remove(len - 1)
    }
}

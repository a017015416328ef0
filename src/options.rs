//! Construction-time configuration for a [`Select`](crate::Select).
//!
//! [`SelectOptions`] gathers the keys config, behavior toggles, the default
//! selection and the change callback. Presentation fields (placeholder,
//! width, ...) are carried through untouched for the renderer.

use serde_json::Value;

use crate::keys::KeysConfig;

/// Callback receiving the projected values after every selection change.
pub type ChangeCallback = Box<dyn FnMut(&[Value])>;

/// Everything a [`Select`](crate::Select) is built from, besides the options.
///
/// # Defaults
///
/// - single-select, no limit, no default selection, no checkboxes
/// - clearable and searchable; not required, loading or disabled
/// - placeholder `"Search..."`, width `"100%"`, max list height `"300px"`
///
/// # Examples
///
/// ```
/// use matchselect::{KeysConfig, SelectOptions};
/// use serde_json::Value;
///
/// let opts = SelectOptions::new(KeysConfig::<Value>::new("id", "name").value_field("id"))
///     .multi()
///     .limit(3)
///     .checkbox();
/// assert!(opts.is_multi);
/// assert_eq!(opts.selects_limit, Some(3));
/// assert!(opts.with_checkbox);
/// assert!(opts.is_clearable);
/// ```
pub struct SelectOptions<'a, T> {
    /// Field mapping for identity, label and emitted value.
    pub keys: KeysConfig<T>,
    /// Allow more than one selected option.
    pub is_multi: bool,
    /// Maximum number of selections in multi mode. `None` or `Some(0)`
    /// means no limit beyond the option count.
    pub selects_limit: Option<usize>,
    /// Option selected at construction, if it belongs to the option list.
    pub default_selected: Option<&'a T>,
    /// Keep selected options visible as checked rows (multi mode).
    pub with_checkbox: bool,
    /// Honor clear requests from the renderer.
    pub is_clearable: bool,
    /// Report an empty selection as missing.
    pub is_required: bool,
    /// Accept typed search input.
    pub is_searchable: bool,
    /// Options are still being fetched by the host.
    pub is_loading: bool,
    /// Ignore every user event.
    pub is_disabled: bool,
    /// Search input placeholder.
    pub placeholder: String,
    /// Extra CSS class (or theme name) for the renderer.
    pub class_name: String,
    /// Widget width, renderer-defined units.
    pub width: String,
    /// Maximum height of the candidate list, renderer-defined units.
    pub max_list_height: String,
    /// Selection change callback.
    pub on_change: Option<ChangeCallback>,
}

impl<'a, T> SelectOptions<'a, T> {
    /// Default options around the given keys config.
    pub fn new(keys: KeysConfig<T>) -> Self {
        Self {
            keys,
            is_multi: false,
            selects_limit: None,
            default_selected: None,
            with_checkbox: false,
            is_clearable: true,
            is_required: false,
            is_searchable: true,
            is_loading: false,
            is_disabled: false,
            placeholder: "Search...".to_owned(),
            class_name: String::new(),
            width: "100%".to_owned(),
            max_list_height: "300px".to_owned(),
            on_change: None,
        }
    }

    /// Enable multi-selection (builder).
    #[must_use]
    pub fn multi(mut self) -> Self {
        self.is_multi = true;
        self
    }

    /// Cap the number of selections in multi mode (builder).
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.selects_limit = Some(limit);
        self
    }

    /// Render selected options as checked rows (builder).
    #[must_use]
    pub fn checkbox(mut self) -> Self {
        self.with_checkbox = true;
        self
    }

    /// Seed the selection with `option` (builder).
    #[must_use]
    pub fn default_selected(mut self, option: &'a T) -> Self {
        self.default_selected = Some(option);
        self
    }

    /// Set whether clear requests are honored (builder).
    #[must_use]
    pub fn clearable(mut self, on: bool) -> Self {
        self.is_clearable = on;
        self
    }

    /// Set whether an empty selection counts as missing (builder).
    #[must_use]
    pub fn required(mut self, on: bool) -> Self {
        self.is_required = on;
        self
    }

    /// Set whether typed input is accepted (builder).
    #[must_use]
    pub fn searchable(mut self, on: bool) -> Self {
        self.is_searchable = on;
        self
    }

    /// Set the loading flag (builder).
    #[must_use]
    pub fn loading(mut self, on: bool) -> Self {
        self.is_loading = on;
        self
    }

    /// Set whether user events are ignored (builder).
    #[must_use]
    pub fn disabled(mut self, on: bool) -> Self {
        self.is_disabled = on;
        self
    }

    /// Set the search placeholder (builder).
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Register the selection change callback (builder).
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&[Value]) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

impl<T> std::fmt::Debug for SelectOptions<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectOptions")
            .field("keys.key", &self.keys.key)
            .field("keys.label", &self.keys.label)
            .field("keys.value", &self.keys.value)
            .field("is_multi", &self.is_multi)
            .field("selects_limit", &self.selects_limit)
            .field("default_selected", &self.default_selected.is_some())
            .field("with_checkbox", &self.with_checkbox)
            .field("is_clearable", &self.is_clearable)
            .field("is_required", &self.is_required)
            .field("is_searchable", &self.is_searchable)
            .field("is_loading", &self.is_loading)
            .field("is_disabled", &self.is_disabled)
            .field("placeholder", &self.placeholder)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

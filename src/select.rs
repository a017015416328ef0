//! Selection state for a searchable dropdown.
//!
//! [`Select`] owns the search text and the ordered selection for one
//! widget instance. The renderer drives it with [`SelectEvent`]s and reads
//! a [`SelectView`] back; the host hears about selection changes through
//! the `on_change` callback in [`SelectOptions`].
//!
//! # Invariants
//!
//! 1. `selected().len() <= limit()`, and `limit() == 1` in single mode.
//! 2. No two selected options share an identity (see
//!    [`KeysConfig::same_option`]).
//! 3. The callback runs only when the selection actually changed, after
//!    the change is applied.
//!
//! # Usage
//!
//! ```
//! use matchselect::{KeysConfig, Select, SelectEvent, SelectOptions};
//! use serde_json::{Value, json};
//!
//! let options = vec![
//!     json!({ "id": 1, "name": "Lima" }),
//!     json!({ "id": 2, "name": "Quito" }),
//! ];
//! let keys = KeysConfig::<Value>::new("id", "name").value_field("id");
//! let mut select = Select::new(&options, SelectOptions::new(keys).multi()).unwrap();
//!
//! select.handle_event(SelectEvent::Input("qui".into()));
//! let first = select.view().candidates[0].index;
//! assert!(select.handle_event(SelectEvent::Click(first)));
//! assert_eq!(select.value(), vec![json!(2)]);
//! ```

use serde_json::Value;

use crate::error::ConfigError;
use crate::keys::{Record, ValueProjection};
use crate::matching::{LabelChar, PreparedQuery, Tier, filter_options};
use crate::options::SelectOptions;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// User intent reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// The search text changed to the given string.
    Input(String),
    /// The option at this host index was clicked.
    Click(usize),
    /// The checkbox of the option at `index` was set to `checked`.
    Check {
        /// Host index of the option.
        index: usize,
        /// New checkbox state.
        checked: bool,
    },
    /// Backspace was pressed in the search input.
    Backspace,
    /// The clear button was pressed.
    Clear,
    /// The widget gained focus.
    Focus,
    /// The widget lost focus.
    Blur,
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// One row of the candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a, T> {
    /// The host option.
    pub option: &'a T,
    /// Position of the option in the host-supplied list.
    pub index: usize,
    /// Tier the option matched in.
    pub tier: Tier,
    /// Label characters with highlight flags.
    pub chars: Vec<LabelChar>,
    /// Whether the option is currently selected.
    pub selected: bool,
}

impl<T> Candidate<'_, T> {
    /// The plain label text.
    pub fn label(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }
}

/// Snapshot of everything the renderer needs for one frame.
#[derive(Debug)]
pub struct SelectView<'s, 'a, T> {
    /// Ranked, annotated candidates. Empty while loading.
    pub candidates: Vec<Candidate<'a, T>>,
    /// Selected options, oldest first.
    pub selected: &'s [&'a T],
    /// Current search text.
    pub search: &'s str,
    /// Search placeholder.
    pub placeholder: &'s str,
    /// Host is still fetching options.
    pub loading: bool,
    /// Widget has focus.
    pub focused: bool,
    /// Rows carry checkboxes.
    pub checkboxes: bool,
    /// Clear button should be shown.
    pub show_clear: bool,
    /// Search input should be shown.
    pub searchable: bool,
    /// A required selection is missing.
    pub required_missing: bool,
}

impl<T> SelectView<'_, '_, T> {
    /// Whether the renderer should show its "nothing matches" state.
    pub fn nothing_matches(&self) -> bool {
        !self.loading && self.candidates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// Searchable single or multi select over a borrowed option list.
pub struct Select<'a, T> {
    options: &'a [T],
    config: SelectOptions<'a, T>,
    projection: ValueProjection<T>,
    selects: Vec<&'a T>,
    search: String,
    limit: usize,
    focused: bool,
}

impl<'a, T: Record> Select<'a, T> {
    /// Build a select over `options`.
    ///
    /// The keys config is validated here so misconfiguration surfaces
    /// immediately. The default selection is applied when it is one of
    /// `options` (by reference); seeding does not invoke `on_change`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the keys config is invalid.
    pub fn new(options: &'a [T], mut config: SelectOptions<'a, T>) -> Result<Self, ConfigError> {
        config.keys.validate()?;
        let projection = config
            .keys
            .value
            .take()
            .ok_or(ConfigError::InvalidValueKey("missing"))?;

        let limit = if config.is_multi {
            config
                .selects_limit
                .filter(|&n| n > 0)
                .unwrap_or(options.len())
        } else {
            1
        };

        let selects = match config.default_selected {
            Some(default) if options.iter().any(|o| std::ptr::eq(o, default)) => vec![default],
            _ => Vec::new(),
        };

        Ok(Self {
            options,
            config,
            projection,
            selects,
            search: String::new(),
            limit,
            focused: false,
        })
    }

    // --- accessors ---

    /// The host option list.
    pub fn options(&self) -> &'a [T] {
        self.options
    }

    /// Selected options, oldest first.
    pub fn selected(&self) -> &[&'a T] {
        &self.selects
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Maximum number of selected options.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether the widget currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the host marked the options as loading.
    pub fn is_loading(&self) -> bool {
        self.config.is_loading
    }

    /// Set or clear the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.config.is_loading = loading;
    }

    /// The construction options (keys config minus its value projection).
    pub fn config(&self) -> &SelectOptions<'a, T> {
        &self.config
    }

    /// Whether `option` is selected.
    pub fn is_selected(&self, option: &T) -> bool {
        self.position_of(option).is_some()
    }

    /// `false` only when a selection is required and none is made.
    pub fn is_satisfied(&self) -> bool {
        !self.config.is_required || !self.selects.is_empty()
    }

    /// Projected values of the current selection.
    pub fn value(&self) -> Vec<Value> {
        self.selects
            .iter()
            .map(|option| self.projection.apply(*option))
            .collect()
    }

    // --- operations ---

    /// Replace the search text.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Select `option`, or deselect it if it is already selected.
    ///
    /// Always resets the search text. In single mode the option replaces
    /// the current selection; in multi mode it is appended unless the limit
    /// is reached, in which case nothing changes. Returns whether the
    /// selection changed.
    pub fn add(&mut self, option: &'a T) -> bool {
        self.search.clear();

        if self.is_selected(option) {
            return self.remove(option);
        }

        if !self.config.is_multi {
            self.selects = vec![option];
            return self.selection_changed();
        }

        if self.selects.len() >= self.limit {
            #[cfg(feature = "tracing")]
            tracing::debug!(limit = self.limit, "selection limit reached, add ignored");
            return false;
        }

        self.selects.push(option);
        self.selection_changed()
    }

    /// Deselect `option` if selected. Returns whether the selection changed.
    pub fn remove(&mut self, option: &T) -> bool {
        match self.position_of(option) {
            Some(pos) => {
                self.selects.remove(pos);
                self.selection_changed()
            }
            None => false,
        }
    }

    /// Empty both the selection and the search text.
    ///
    /// Returns whether the selection changed.
    pub fn clear(&mut self) -> bool {
        self.search.clear();
        if self.selects.is_empty() {
            return false;
        }
        self.selects.clear();
        self.selection_changed()
    }

    /// Remove the most recent selection when the search text is empty.
    ///
    /// With non-empty search text this does nothing: deleting characters
    /// is the text input's job. Returns whether the selection changed.
    pub fn on_backspace(&mut self) -> bool {
        if !self.search.is_empty() {
            return false;
        }
        match self.selects.pop() {
            Some(_) => self.selection_changed(),
            None => false,
        }
    }

    /// Apply a renderer event. Returns whether the selection changed.
    ///
    /// Disabled widgets ignore everything. Input is ignored when the widget
    /// is not searchable, clear requests when it is not clearable, and
    /// indexes outside the option list always.
    pub fn handle_event(&mut self, event: SelectEvent) -> bool {
        if self.config.is_disabled {
            #[cfg(feature = "tracing")]
            tracing::trace!(?event, "widget disabled, event ignored");
            return false;
        }

        let options = self.options;
        match event {
            SelectEvent::Input(text) => {
                if self.config.is_searchable {
                    self.set_search(text);
                }
                false
            }
            SelectEvent::Click(index) => match options.get(index) {
                Some(option) => self.add(option),
                None => false,
            },
            SelectEvent::Check { index, checked } => {
                if !self.checkboxes() {
                    return false;
                }
                match options.get(index) {
                    Some(option) if checked => {
                        if self.is_selected(option) {
                            false
                        } else {
                            self.add(option)
                        }
                    }
                    Some(option) => self.remove(option),
                    None => false,
                }
            }
            SelectEvent::Backspace => self.on_backspace(),
            SelectEvent::Clear => self.config.is_clearable && self.clear(),
            SelectEvent::Focus => {
                self.focused = true;
                false
            }
            SelectEvent::Blur => {
                self.focused = false;
                false
            }
        }
    }

    // --- view ---

    /// Ranked, highlighted candidates for the current search text.
    ///
    /// A selected option stays listed only while the search is empty and
    /// the widget is in checkbox or single mode; otherwise it is hidden.
    pub fn candidates(&self) -> Vec<Candidate<'a, T>> {
        let keep_selected = self.search.is_empty() && (self.checkboxes() || !self.config.is_multi);
        let pq = PreparedQuery::new(&self.search);

        filter_options(self.options, &self.config.keys, &self.search)
            .into_iter()
            .filter_map(|ranked| {
                let selected = self.is_selected(ranked.option);
                if selected && !keep_selected {
                    return None;
                }
                Some(Candidate {
                    option: ranked.option,
                    index: ranked.index,
                    tier: ranked.tier,
                    chars: pq.highlight(&ranked.label),
                    selected,
                })
            })
            .collect()
    }

    /// Snapshot for the renderer.
    pub fn view(&self) -> SelectView<'_, 'a, T> {
        let loading = self.config.is_loading;
        SelectView {
            candidates: if loading { Vec::new() } else { self.candidates() },
            selected: &self.selects,
            search: &self.search,
            placeholder: &self.config.placeholder,
            loading,
            focused: self.focused,
            checkboxes: self.checkboxes(),
            show_clear: self.config.is_clearable
                && (!self.selects.is_empty() || !self.search.is_empty()),
            searchable: self.config.is_searchable,
            required_missing: !self.is_satisfied(),
        }
    }

    // --- internals ---

    fn checkboxes(&self) -> bool {
        self.config.with_checkbox && self.config.is_multi
    }

    fn position_of(&self, option: &T) -> Option<usize> {
        self.selects
            .iter()
            .position(|selected| self.config.keys.same_option(selected, option))
    }

    /// Project the new selection, notify the host, and take focus.
    fn selection_changed(&mut self) -> bool {
        #[cfg(feature = "tracing")]
        tracing::debug!(selected = self.selects.len(), "selection changed");

        if let Some(on_change) = self.config.on_change.as_mut() {
            let values: Vec<Value> = self
                .selects
                .iter()
                .map(|option| self.projection.apply(*option))
                .collect();
            on_change(&values);
        }
        self.focused = true;
        true
    }
}

impl<T> std::fmt::Debug for Select<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("options", &self.options.len())
            .field("selected", &self.selects.len())
            .field("search", &self.search)
            .field("limit", &self.limit)
            .field("focused", &self.focused)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Field access for host options and value projection.
//!
//! Host options are opaque records. The [`Record`] trait is the only way the
//! crate reads them: a [`KeysConfig`] names which field identifies an
//! option, which one carries its label, and how a selected option is turned
//! into the value emitted to the host ([`ValueProjection`]).

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Read access to the fields of a host-supplied option.
///
/// # Built-in Implementations
///
/// - [`Value`] -- objects expose their members; every other JSON value has
///   no fields
/// - [`Map<String, Value>`] -- members by name
///
/// # Examples
///
/// ```
/// use matchselect::Record;
/// use serde_json::{Value, json};
///
/// struct City { id: u32, name: String }
///
/// impl Record for City {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(json!(self.id)),
///             "name" => Some(json!(self.name)),
///             _ => None,
///         }
///     }
/// }
///
/// let city = City { id: 7, name: "Lima".to_owned() };
/// assert_eq!(city.field("name"), Some(json!("Lima")));
/// assert_eq!(city.field("population"), None);
/// ```
pub trait Record {
    /// Returns the value of field `name`, or `None` if the option has no
    /// such field.
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.get(name).cloned(),
            _ => None,
        }
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Type alias for the boxed transform stored in [`ValueProjection::Transform`].
type Transform<T> = Box<dyn Fn(&T) -> Value>;

/// How a selected option becomes the value emitted to the host.
pub enum ValueProjection<T> {
    /// Emit the value of a single field (`null` when the option lacks it).
    Field(String),
    /// Emit an object holding only the named fields the option has.
    Fields(Vec<String>),
    /// Emit whatever the closure returns.
    Transform(Transform<T>),
}

impl<T> ValueProjection<T> {
    /// Project a single option. The projection must already be validated.
    pub(crate) fn apply(&self, option: &T) -> Value
    where
        T: Record,
    {
        match self {
            ValueProjection::Field(name) => option.field(name).unwrap_or(Value::Null),
            ValueProjection::Fields(names) => pick_fields(option, names),
            ValueProjection::Transform(f) => f(option),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ValueProjection::Field(name) if name.is_empty() => {
                Err(ConfigError::InvalidValueKey("empty field name"))
            }
            ValueProjection::Fields(names) if names.iter().any(String::is_empty) => {
                Err(ConfigError::InvalidValueKey("empty field name in list"))
            }
            _ => Ok(()),
        }
    }
}

// Closures are not `Debug`, so the transform is shown by name only.
impl<T> std::fmt::Debug for ValueProjection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueProjection::Field(name) => f.debug_tuple("Field").field(name).finish(),
            ValueProjection::Fields(names) => f.debug_tuple("Fields").field(names).finish(),
            ValueProjection::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Field mapping for reading options: identity, display label, emitted value.
///
/// # Examples
///
/// ```
/// use matchselect::KeysConfig;
/// use serde_json::{Value, json};
///
/// let keys = KeysConfig::<Value>::new("id", "name").value_field("id");
/// let option = json!({ "id": 3, "name": "Quito" });
///
/// assert_eq!(keys.label_of(&option), "Quito");
/// assert_eq!(keys.project_one(&option), Ok(json!(3)));
/// ```
#[derive(Debug)]
pub struct KeysConfig<T> {
    /// Field holding the option's unique identity.
    pub key: String,
    /// Field holding the option's human-readable label.
    pub label: String,
    /// How selected options are emitted. `None` is a configuration error.
    pub value: Option<ValueProjection<T>>,
}

impl<T> KeysConfig<T> {
    /// Create a config reading identity from `key` and text from `label`.
    ///
    /// The value projection starts unset and must be supplied with one of
    /// the `value*` builder methods before the config is usable.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: None,
        }
    }

    /// Set the value projection (builder).
    #[must_use]
    pub fn value(mut self, projection: ValueProjection<T>) -> Self {
        self.value = Some(projection);
        self
    }

    /// Emit a single field of each selected option (builder).
    #[must_use]
    pub fn value_field(self, name: impl Into<String>) -> Self {
        self.value(ValueProjection::Field(name.into()))
    }

    /// Emit an object with only the given fields of each selected option (builder).
    #[must_use]
    pub fn value_fields<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value(ValueProjection::Fields(
            names.into_iter().map(Into::into).collect(),
        ))
    }

    /// Emit the result of `f` for each selected option (builder).
    #[must_use]
    pub fn value_with<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Value + 'static,
    {
        self.value(ValueProjection::Transform(Box::new(f)))
    }

    /// Check that every field name is usable and a value projection is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKeyField);
        }
        if self.label.is_empty() {
            return Err(ConfigError::EmptyLabelField);
        }
        match &self.value {
            Some(projection) => projection.validate(),
            None => Err(ConfigError::InvalidValueKey("missing")),
        }
    }
}

impl<T: Record> KeysConfig<T> {
    /// The identity value of `option`, if it has one.
    pub fn key_of(&self, option: &T) -> Option<Value> {
        option.field(&self.key)
    }

    /// Whether `a` and `b` denote the same option.
    ///
    /// Two options are the same when they are the same object, or when both
    /// carry an identity value and those values are equal.
    pub fn same_option(&self, a: &T, b: &T) -> bool {
        if std::ptr::eq(a, b) {
            return true;
        }
        match (self.key_of(a), self.key_of(b)) {
            (Some(ka), Some(kb)) => ka == kb,
            _ => false,
        }
    }

    /// The display label of `option`.
    ///
    /// Strings are used verbatim; numbers and booleans use their JSON text;
    /// `null` and missing fields yield an empty label.
    pub fn label_of(&self, option: &T) -> String {
        match option.field(&self.label) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Project a single option into its emitted value.
    pub fn project_one(&self, option: &T) -> Result<Value, ConfigError> {
        self.validate()?;
        match &self.value {
            Some(projection) => Ok(projection.apply(option)),
            None => Err(ConfigError::InvalidValueKey("missing")),
        }
    }
}

/// Project every selected option, in selection order.
///
/// # Errors
///
/// Returns [`ConfigError`] when `keys` is misconfigured; this indicates a
/// host bug, not a user error.
///
/// # Examples
///
/// ```
/// use matchselect::{KeysConfig, project};
/// use serde_json::{Value, json};
///
/// let keys = KeysConfig::<Value>::new("id", "label").value_fields(["id", "label"]);
/// let option = json!({ "id": 5, "label": "X", "extra": 9 });
///
/// let values = project(&[&option], &keys).unwrap();
/// assert_eq!(values, vec![json!({ "id": 5, "label": "X" })]);
/// ```
pub fn project<T: Record>(selects: &[&T], keys: &KeysConfig<T>) -> Result<Vec<Value>, ConfigError> {
    keys.validate()?;
    let Some(projection) = &keys.value else {
        return Err(ConfigError::InvalidValueKey("missing"));
    };
    Ok(selects.iter().map(|option| projection.apply(*option)).collect())
}

/// Build an object holding only the listed fields that `option` has.
///
/// Fields the option lacks are left out rather than emitted as `null`.
pub fn pick_fields<T: Record + ?Sized>(option: &T, names: &[String]) -> Value {
    let mut picked = Map::new();
    for name in names {
        if let Some(value) = option.field(name) {
            picked.insert(name.clone(), value);
        }
    }
    Value::Object(picked)
}

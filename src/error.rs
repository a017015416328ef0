//! Configuration errors.
//!
//! The only failures this crate reports are host misconfigurations. Limit
//! violations and other selection policy outcomes are silent no-ops and
//! never surface here.

/// A fatal configuration problem in the [`KeysConfig`](crate::KeysConfig).
///
/// Reported eagerly by [`Select::new`](crate::Select::new), so a
/// misconfigured widget is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `keys.value` is missing, or names an empty field.
    #[error("invalid value key: {0}")]
    InvalidValueKey(&'static str),
    /// `keys.key` is empty, so options cannot be told apart.
    #[error("invalid keys: the key field name is empty")]
    EmptyKeyField,
    /// `keys.label` is empty, so there is nothing to match against.
    #[error("invalid keys: the label field name is empty")]
    EmptyLabelField,
}

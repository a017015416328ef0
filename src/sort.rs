//! Ordering of matched options within a tier.
//!
//! Labels are compared on their normalized form (lowercased, diacritics
//! stripped) with plain lexicographic ordering, so `"Ávila"` sorts next to
//! `"avila"` instead of after `"zaragoza"`.

use std::cmp::Ordering;

use crate::normalize::normalize;

/// Compare two labels by their normalized form.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use matchselect::compare_labels;
///
/// assert_eq!(compare_labels("Ávila", "Bilbao"), Ordering::Less);
/// assert_eq!(compare_labels("ÉCIJA", "ecija"), Ordering::Equal);
/// ```
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b))
}

/// Stable ascending sort of `items` by normalized label.
///
/// `label_of` is called once per item; items whose labels normalize to the
/// same string keep their relative order.
///
/// # Examples
///
/// ```
/// use matchselect::sort_by_label;
///
/// let mut cities = vec!["zaragoza", "Ávila", "bilbao", "avila"];
/// sort_by_label(&mut cities, |c| c.to_string());
/// assert_eq!(cities, ["Ávila", "avila", "bilbao", "zaragoza"]);
/// ```
pub fn sort_by_label<T, K, F>(items: &mut [T], mut label_of: F)
where
    F: FnMut(&T) -> K,
    K: AsRef<str>,
{
    items.sort_by_cached_key(|item| normalize(label_of(item).as_ref()).into_owned());
}

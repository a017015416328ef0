//! Tiered classification of option labels against a search query.
//!
//! A label matches a query in at most one of three tiers, tried in priority
//! order:
//!
//! | Tier            | Rule                                                       |
//! |-----------------|------------------------------------------------------------|
//! | `FirstWord`     | The label's first word equals the query                    |
//! | `FullSubstring` | The query is the whole label, a spaced word, or its ending |
//! | `AnyChar`       | Every query character occurs somewhere in the label        |
//!
//! Both sides are normalized first (see [`crate::normalize`]); the query is
//! also trimmed and deduplicated, so `"Anna"` is searched as `"an"`.

use memchr::memmem::Finder;

use crate::keys::{KeysConfig, Record};
use crate::normalize::{dedupe, normalize, normalize_char};
use crate::sort::sort_by_label;

/// Display priority class of a matching option.
///
/// Ordering follows display order: `FirstWord < FullSubstring < AnyChar`,
/// so sorting ascending by tier puts the strongest matches first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// The label's first whitespace-delimited word equals the query.
    FirstWord,
    /// The query occurs as a whole word-ish substring of the label. Also
    /// the tier of every option when the query is empty.
    FullSubstring,
    /// Every distinct query character occurs in the label, in any order.
    AnyChar,
}

/// A single label character annotated for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelChar {
    /// The character as it appears in the label.
    pub ch: char,
    /// Whether the character's normalized form occurs in the query.
    pub matched: bool,
}

/// An option that survived filtering, with its tier and display label.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a, T> {
    /// The host option.
    pub option: &'a T,
    /// Position of the option in the host-supplied list.
    pub index: usize,
    /// Tier the option matched in.
    pub tier: Tier,
    /// The option's label, as read through the keys config.
    pub label: String,
}

/// A query normalized once and reused across every candidate in a pass.
///
/// Holds the trimmed, normalized, deduplicated query plus substring
/// searchers for the bare query and its space-padded form.
pub struct PreparedQuery {
    cleaned: String,
    finder: Option<Finder<'static>>,
    padded: Option<Finder<'static>>,
}

impl PreparedQuery {
    /// Prepare `query` for matching.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchselect::PreparedQuery;
    ///
    /// let pq = PreparedQuery::new("  Ánna ");
    /// assert_eq!(pq.as_str(), "an");
    /// assert!(!pq.is_empty());
    /// ```
    pub fn new(query: &str) -> Self {
        let cleaned = dedupe(&normalize(query.trim()));
        // memmem needles must be non-empty.
        let (finder, padded) = if cleaned.is_empty() {
            (None, None)
        } else {
            let padded = format!(" {cleaned} ");
            (
                Some(Finder::new(cleaned.as_bytes()).into_owned()),
                Some(Finder::new(padded.as_bytes()).into_owned()),
            )
        };
        Self {
            cleaned,
            finder,
            padded,
        }
    }

    /// The prepared query text.
    pub fn as_str(&self) -> &str {
        &self.cleaned
    }

    /// Whether the query is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }

    /// First-word rule on an already normalized label.
    fn first_word(&self, label: &str) -> bool {
        label.split(char::is_whitespace).next().unwrap_or("") == self.cleaned
    }

    /// Whole-substring rule on an already normalized label.
    fn whole_substring(&self, label: &str) -> bool {
        let (Some(finder), Some(padded)) = (&self.finder, &self.padded) else {
            // The empty query is contained in, and ends, every label.
            return true;
        };
        let bytes = label.as_bytes();
        if finder.find(bytes).is_none() {
            return false;
        }
        label == self.cleaned || padded.find(bytes).is_some() || label.ends_with(&self.cleaned)
    }

    /// Character-coverage rule on an already normalized label.
    fn any_char(&self, label: &str) -> bool {
        self.cleaned.chars().all(|c| label.contains(c))
    }

    /// Classify a raw label, or `None` if it matches no tier.
    pub fn classify(&self, label: &str) -> Option<Tier> {
        let label = normalize(label);
        if self.first_word(&label) {
            Some(Tier::FirstWord)
        } else if self.whole_substring(&label) {
            Some(Tier::FullSubstring)
        } else if self.any_char(&label) {
            Some(Tier::AnyChar)
        } else {
            None
        }
    }

    /// Annotate each character of `label` for highlighting.
    ///
    /// A character is matched when its normalized form occurs in the
    /// prepared query. Whitespace is never matched, and nothing is matched
    /// for an empty query.
    pub fn highlight(&self, label: &str) -> Vec<LabelChar> {
        label
            .chars()
            .map(|ch| LabelChar {
                ch,
                matched: !self.is_empty()
                    && !ch.is_whitespace()
                    && normalize_char(ch).is_some_and(|n| self.cleaned.contains(n)),
            })
            .collect()
    }
}

impl std::fmt::Debug for PreparedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedQuery")
            .field("cleaned", &self.cleaned)
            .finish_non_exhaustive()
    }
}

/// Whether the query equals the first word of `label`.
///
/// Exact equality, not a prefix test: `"jo"` does not match `"John"`.
///
/// # Examples
///
/// ```
/// use matchselect::matches_first_word;
///
/// assert!(matches_first_word("juan", "Juan Pérez"));
/// assert!(matches_first_word("JOSÉ", "jose maria"));
/// assert!(!matches_first_word("jo", "John"));
/// ```
pub fn matches_first_word(query: &str, label: &str) -> bool {
    PreparedQuery::new(query).first_word(&normalize(label))
}

/// Whether the query occurs in `label` as a whole unit.
///
/// The normalized label must contain the query and either equal it, contain
/// it surrounded by spaces, or end with it.
///
/// # Examples
///
/// ```
/// use matchselect::matches_substring;
///
/// assert!(matches_substring("de", "Casa de Campo"));
/// assert!(matches_substring("campo", "Casa de Campo"));
/// assert!(!matches_substring("cas", "Casa de Campo"));
/// ```
pub fn matches_substring(query: &str, label: &str) -> bool {
    PreparedQuery::new(query).whole_substring(&normalize(label))
}

/// Whether every distinct query character occurs somewhere in `label`.
///
/// # Examples
///
/// ```
/// use matchselect::matches_any_char;
///
/// assert!(matches_any_char("nua", "Juana"));
/// assert!(!matches_any_char("xa", "Juana"));
/// ```
pub fn matches_any_char(query: &str, label: &str) -> bool {
    PreparedQuery::new(query).any_char(&normalize(label))
}

/// Classify `label` against `query`, returning `None` for no match.
///
/// # Examples
///
/// ```
/// use matchselect::{Tier, classify};
///
/// assert_eq!(classify("juan", "Juan"), Some(Tier::FirstWord));
/// assert_eq!(classify("juan", "Juana"), Some(Tier::AnyChar));
/// assert_eq!(classify("juan", "Ana"), None);
/// ```
pub fn classify(query: &str, label: &str) -> Option<Tier> {
    PreparedQuery::new(query).classify(label)
}

/// Annotate each character of `label` for highlighting against `query`.
pub fn highlight(label: &str, query: &str) -> Vec<LabelChar> {
    PreparedQuery::new(query).highlight(label)
}

/// Filter and order `options` for display.
///
/// With an empty (or all-whitespace) query every option is returned in
/// host order, tagged [`Tier::FullSubstring`]. Otherwise options are
/// grouped by tier, each tier sorted by normalized label, and options
/// matching no tier are dropped.
///
/// # Examples
///
/// ```
/// use matchselect::{KeysConfig, Tier, filter_options};
/// use serde_json::{Value, json};
///
/// let options = vec![
///     json!({ "key": 1, "label": "Ana" }),
///     json!({ "key": 2, "label": "Juan" }),
///     json!({ "key": 3, "label": "Juana" }),
/// ];
/// let keys = KeysConfig::<Value>::new("key", "label").value_field("key");
///
/// let ranked = filter_options(&options, &keys, "juan");
/// let labels: Vec<_> = ranked.iter().map(|r| r.label.as_str()).collect();
/// assert_eq!(labels, ["Juan", "Juana"]);
/// assert_eq!(ranked[0].tier, Tier::FirstWord);
/// assert_eq!(ranked[1].tier, Tier::AnyChar);
/// ```
pub fn filter_options<'a, T: Record>(
    options: &'a [T],
    keys: &KeysConfig<T>,
    query: &str,
) -> Vec<Ranked<'a, T>> {
    let pq = PreparedQuery::new(query);

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "matchselect.filter",
        query_len = pq.as_str().len(),
        options = options.len()
    )
    .entered();

    if pq.is_empty() {
        return options
            .iter()
            .enumerate()
            .map(|(index, option)| Ranked {
                option,
                index,
                tier: Tier::FullSubstring,
                label: keys.label_of(option),
            })
            .collect();
    }

    let mut tiers: [Vec<Ranked<'a, T>>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (index, option) in options.iter().enumerate() {
        let label = keys.label_of(option);
        let Some(tier) = pq.classify(&label) else {
            continue;
        };
        let bucket = match tier {
            Tier::FirstWord => 0,
            Tier::FullSubstring => 1,
            Tier::AnyChar => 2,
        };
        tiers[bucket].push(Ranked {
            option,
            index,
            tier,
            label,
        });
    }

    let mut ranked = Vec::with_capacity(tiers.iter().map(Vec::len).sum());
    for mut bucket in tiers {
        sort_by_label(&mut bucket, |r| r.label.clone());
        ranked.append(&mut bucket);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(matched = ranked.len(), "filtered options");

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Tier ordering ---

    #[test]
    fn tier_display_order() {
        assert!(Tier::FirstWord < Tier::FullSubstring);
        assert!(Tier::FullSubstring < Tier::AnyChar);
    }

    // --- PreparedQuery ---

    #[test]
    fn prepared_query_trims_normalizes_dedupes() {
        assert_eq!(PreparedQuery::new("  MÁMÁ ").as_str(), "ma");
        assert!(PreparedQuery::new("   ").is_empty());
    }

    #[test]
    fn prepared_query_keeps_inner_spaces() {
        assert_eq!(PreparedQuery::new("de la").as_str(), "de la");
    }

    // --- first word ---

    #[test]
    fn first_word_exact_equality() {
        assert!(matches_first_word("juan", "Juan"));
        assert!(matches_first_word("juan", "Juan Carlos"));
        assert!(!matches_first_word("juan", "Juana"));
        assert!(!matches_first_word("carlos", "Juan Carlos"));
    }

    #[test]
    fn first_word_is_diacritic_insensitive() {
        assert!(matches_first_word("jose", "José Luis"));
        assert!(matches_first_word("JOSÉ", "jose"));
    }

    #[test]
    fn first_word_uses_deduped_query() {
        // "anna" is searched as "an", which is not the word "anna".
        assert!(!matches_first_word("anna", "Anna"));
        assert!(matches_first_word("ann", "An"));
    }

    #[test]
    fn first_word_splits_on_any_whitespace() {
        assert!(matches_first_word("eva", "Eva\tMaría"));
    }

    // --- whole substring ---

    #[test]
    fn substring_full_label() {
        assert!(matches_substring("luis", "Luis"));
    }

    #[test]
    fn substring_surrounded_by_spaces() {
        assert!(matches_substring("del", "Banco del Campo"));
    }

    #[test]
    fn substring_trailing() {
        assert!(matches_substring("campo", "Banco del Campo"));
        // Trailing occurrence inside a word still counts.
        assert!(matches_substring("mpo", "Banco del Campo"));
    }

    #[test]
    fn substring_leading_without_trailing_space_is_rejected() {
        assert!(!matches_substring("banco", "Banco del Campo"));
        assert!(!matches_substring("juan", "Juana"));
    }

    #[test]
    fn substring_inside_word_is_rejected() {
        assert!(!matches_substring("anc", "Banco del Campo"));
    }

    #[test]
    fn substring_absent() {
        assert!(!matches_substring("lima", "Banco del Campo"));
    }

    #[test]
    fn substring_query_is_deduped_first() {
        // "pacifico" is searched as "pacifo", which the label lacks.
        assert!(!matches_substring("pacifico", "Banco del Pacífico"));
    }

    // --- any char ---

    #[test]
    fn any_char_is_unordered() {
        assert!(matches_any_char("naj", "Juana"));
    }

    #[test]
    fn any_char_requires_every_char() {
        assert!(!matches_any_char("juanx", "Juana"));
    }

    #[test]
    fn any_char_counts_spaces() {
        assert!(!matches_any_char("a b", "ab"));
        assert!(matches_any_char("a b", "b a"));
    }

    // --- classify ---

    #[test]
    fn classify_prefers_first_word() {
        // "rio" is both the first word and the whole label.
        assert_eq!(classify("rio", "Río"), Some(Tier::FirstWord));
    }

    #[test]
    fn classify_first_name_scenario() {
        assert_eq!(classify("juan", "Juan"), Some(Tier::FirstWord));
        assert_eq!(classify("juan", "Juana"), Some(Tier::AnyChar));
        assert_eq!(classify("juan", "Ana"), None);
    }

    #[test]
    fn classify_full_substring() {
        assert_eq!(classify("grande", "Río Grande"), Some(Tier::FullSubstring));
    }

    // --- highlight ---

    #[test]
    fn highlight_marks_normalized_chars() {
        let chars = highlight("Ána", "a");
        let matched: Vec<bool> = chars.iter().map(|c| c.matched).collect();
        assert_eq!(matched, [true, false, true]);
        assert_eq!(chars[0].ch, 'Á');
    }

    #[test]
    fn highlight_never_marks_spaces() {
        let chars = highlight("a b", "a b");
        assert!(!chars[1].matched);
        assert!(chars[0].matched && chars[2].matched);
    }

    #[test]
    fn highlight_empty_query_marks_nothing() {
        assert!(highlight("Juan", "").iter().all(|c| !c.matched));
    }
}

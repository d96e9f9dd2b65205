//! Slug and title helpers shared by the loader and navigation.

use std::collections::{HashMap, HashSet};

/// URL-safe form of a heading or tag.
///
/// Whitespace, `-` and `_` separate words; other punctuation is dropped
/// and letters are lowercased. Non-ASCII letters are kept.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Human-readable label for a file or folder name.
///
/// ```
/// use folio_content::titlecase_from_slug;
///
/// assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
/// assert_eq!(titlecase_from_slug("my_page"), "My Page");
/// ```
#[must_use]
pub fn titlecase_from_slug(slug: &str) -> String {
    slug.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Hands out unique anchors within one document.
#[derive(Debug, Default)]
pub(crate) struct Slugger {
    taken: HashSet<String>,
    /// Next suffix to try per base slug.
    next: HashMap<String, usize>,
}

impl Slugger {
    /// Reserve an explicit `{#id}` so generated anchors avoid it.
    pub fn reserve(&mut self, id: &str) {
        self.taken.insert(id.to_owned());
    }

    /// Anchor for a heading, suffixed `-1`, `-2`, ... until unused.
    pub fn generate(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base.push_str("section");
        }
        if self.taken.insert(base.clone()) {
            return base;
        }
        let next = self.next.entry(base.clone()).or_insert(1);
        loop {
            let candidate = format!("{base}-{next}");
            *next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

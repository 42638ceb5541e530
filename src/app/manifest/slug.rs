//! Slug derivation for manifest directory names
//!
//! A display name becomes a slug in three steps:
//!
//! 1. snake-case it: split on anything that is not alphanumeric and on case
//!    boundaries (`fooBar`, `HTMLParser`), lowercase, join with `_`
//! 2. fold every word to plain ASCII (accents stripped)
//! 3. collapse the first `_s_` into `s_`, so `Bob's Sword` gives `bobs_sword`
//!    instead of `bob_s_sword`

use rslug::slugify;

use crate::app::hash::IdHash;

/// Snake-case a display name, keeping non-ASCII letters as they are
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut words, &mut current);
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let lower_to_upper = (prev.is_lowercase() || prev.is_numeric()) && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if lower_to_upper || acronym_end {
                flush(&mut words, &mut current);
            }
        }

        current.push(c);
    }
    flush(&mut words, &mut current);

    words.join("_")
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(current.to_lowercase());
        current.clear();
    }
}

/// Strip accents from a snake-cased name, word by word
pub fn fold_ascii(snake: &str) -> String {
    snake
        .split('_')
        .map(|word| slugify!(word).replace('-', "_"))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Full slug for a display name
///
/// # Examples
///
/// ```rust
/// use gear_sync::app::manifest::slugify_name;
///
/// assert_eq!(slugify_name("Bob's Sword"), "bobs_sword");
/// assert_eq!(slugify_name("Café Noir"), "cafe_noir");
/// ```
pub fn slugify_name(name: &str) -> String {
    fold_ascii(&snake_case(name)).replacen("_s_", "s_", 1)
}

/// Directory name for an item: `<slug>_<hash>`
///
/// A name with no sluggable characters still gets the separator, giving
/// `_<hash>`.
pub fn directory_name(name: &str, hash: &IdHash) -> String {
    format!("{}_{}", slugify_name(name), hash)
}

//! Naming strategy for root keys and XML tags.
//!
//! Root-node keys and XML element names are derived from type names and
//! field keys by an injectable [`NamingStrategy`], keeping the inflection
//! rules testable independently of the renderer. [`BasicInflector`] covers
//! the regular English cases; applications with irregular nouns can supply
//! their own strategy.

/// Derives document keys and element names from type names and field keys.
pub trait NamingStrategy {
    /// Root key for a singular render: `"UserProfile"` → `"user_profile"`.
    fn singular_key(&self, api_type: &str) -> String;

    /// Root key for a collection render: `"UserProfile"` → `"user_profiles"`.
    fn plural_key(&self, api_type: &str) -> String;

    /// XML element name for a field key: `"first_name"` → `"first-name"`.
    fn xml_tag(&self, key: &str) -> String;

    /// XML element name for one item of an array keyed `key`:
    /// `"users"` → `"user"`.
    fn item_tag(&self, key: &str) -> String;
}

/// Regular-noun inflector: snake_cases type names, pluralizes with the
/// s/es/ies rules, hyphenates XML tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInflector;

impl NamingStrategy for BasicInflector {
    fn singular_key(&self, api_type: &str) -> String {
        underscore(api_type)
    }

    fn plural_key(&self, api_type: &str) -> String {
        pluralize(&underscore(api_type))
    }

    fn xml_tag(&self, key: &str) -> String {
        key.replace('_', "-")
    }

    fn item_tag(&self, key: &str) -> String {
        singularize(key)
    }
}

/// Converts a CamelCase type name to snake_case.
///
/// Runs of capitals stay together: `"HTTPResponse"` → `"http_response"`.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let before_lower =
                i > 0 && chars[i - 1].is_uppercase() && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if after_lower || before_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

/// Pluralizes a regular English noun.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if ends_in_sibilant(word) {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(is_consonant) {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}

/// Singularizes a regular English plural; returns irregular input unchanged.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        // Only undo an "-es" that a sibilant cluster forced; a lone trailing
        // "s" ("cases") is handled by the plain strip below.
        if stem.ends_with("ss")
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return stem.to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn ends_in_sibilant(word: &str) -> bool {
    word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

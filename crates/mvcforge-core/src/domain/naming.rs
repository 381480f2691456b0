//! Naming-convention transforms.
//!
//! # Design
//!
//! Pure string functions, total over all inputs; they never fail and never
//! touch the filesystem. The resolver composes them into the two naming
//! policies:
//!
//! - **convention mode**: `underscore_to_camel` then `dash_to_camel` for
//!   anything that becomes a class-style name.
//! - **literal mode**: `dash_to_underscore` only, preserving user casing.
//!
//! View directories and view files always go through `camel_to_dash` +
//! `to_lower`, regardless of mode.

/// `foo_bar` → `FooBar`. Capitalises the first letter of every
/// underscore-separated segment and drops the underscores. Inner casing of
/// each segment is preserved (`foo_bAr` → `FooBAr`).
pub fn underscore_to_camel(input: &str) -> String {
    capitalize_segments(input, '_')
}

/// `foo-bar` → `FooBar`.
pub fn dash_to_camel(input: &str) -> String {
    capitalize_segments(input, '-')
}

/// `FooBar` → `Foo-Bar`. A dash is inserted at each camel-hump boundary:
/// an uppercase letter following a lowercase letter or digit, or the last
/// uppercase of an acronym run followed by lowercase (`ABCWidget` →
/// `ABC-Widget`). Uppercase after a non-word character is left alone, so
/// `my_odd_Casing` stays `my_odd_Casing`.
pub fn camel_to_dash(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                out.push('-');
            }
        }
        out.push(c);
    }

    out
}

/// `foo-bar` → `foo_bar`. Separator normalisation only; casing untouched.
pub fn dash_to_underscore(input: &str) -> String {
    input.replace('-', "_")
}

/// Unicode-aware lowercasing.
pub fn to_lower(input: &str) -> String {
    input.to_lowercase()
}

/// `IndexAction` → `indexAction`. Lowercases the first character only.
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize_segments(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    for segment in input.split(separator) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

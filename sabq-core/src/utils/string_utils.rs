//! String helpers.
//!
//! Color roles are camelCase in theme documents and kebab-case as CSS custom
//! properties, so the two case conversions here have to be inverse of each
//! other for ordinary role names (`cardForeground` <-> `card-foreground`).

fn is_delimiter(c: char) -> bool {
    c == '_' || c == '-' || c == ' '
}

/// Truncates a string to at most `max_len` characters, ending in `...` when shortened.
///
/// # Examples
/// ```
/// use sabq_core::utils::string_utils::truncate_string;
/// assert_eq!(truncate_string("Hello, world!", 8), "Hello...");
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < 3 {
        return "...".to_string();
    }
    let mut out: String = s.chars().take(max_len - 3).collect();
    out.push_str("...");
    out
}

/// Converts a string to `kebab-case`.
///
/// A run of capitals counts as one word (`MyAPIService` -> `my-api-service`).
///
/// # Examples
/// ```
/// use sabq_core::utils::string_utils::to_kebab_case;
/// assert_eq!(to_kebab_case("primaryForeground"), "primary-foreground");
/// assert_eq!(to_kebab_case("HTTP_REQUEST"), "http-request");
/// assert_eq!(to_kebab_case("my api service"), "my-api-service");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_delimiter = true;

    for (i, &c) in chars.iter().enumerate() {
        if is_delimiter(c) {
            if !prev_was_delimiter && !result.is_empty() {
                result.push('-');
                prev_was_delimiter = true;
            }
            continue;
        }
        if c.is_uppercase() && !prev_was_delimiter && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                result.push('-');
            }
        }
        result.extend(c.to_lowercase());
        prev_was_delimiter = false;
    }

    if result.ends_with('-') {
        result.pop();
    }
    result
}

/// Converts a string to `camelCase`.
///
/// Words are split on `_`, `-` and spaces; all-caps words are lowered
/// (`HTTP_REQUEST` -> `httpRequest`).
///
/// # Examples
/// ```
/// use sabq_core::utils::string_utils::to_camel_case;
/// assert_eq!(to_camel_case("card-foreground"), "cardForeground");
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in s.split(is_delimiter).filter(|w| !w.is_empty()) {
        let all_upper = word.chars().all(|c| !c.is_lowercase());
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if result.is_empty() {
                result.extend(first.to_lowercase());
            } else {
                result.extend(first.to_uppercase());
            }
        }
        for c in chars {
            if all_upper {
                result.extend(c.to_lowercase());
            } else {
                result.push(c);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello, world!", 20), "Hello, world!");
        assert_eq!(truncate_string("Hello, world!", 8), "Hello...");
        assert_eq!(truncate_string("Tiny", 3), "...");
        assert_eq!(truncate_string("", 0), "");
        assert_eq!(truncate_string("سبق الذكية", 6), "سبق...");
    }

    #[rstest]
    #[case("background", "background")]
    #[case("cardForeground", "card-foreground")]
    #[case("primaryForeground", "primary-foreground")]
    #[case("hello_world", "hello-world")]
    #[case("hello-world", "hello-world")]
    #[case("HelloWorld", "hello-world")]
    #[case("HTTP_REQUEST", "http-request")]
    #[case("MyAPIService", "my-api-service")]
    #[case("My API Service", "my-api-service")]
    #[case("chart2Accent", "chart2-accent")]
    #[case("  leading_space", "leading-space")]
    #[case("", "")]
    fn test_to_kebab_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_kebab_case(input), expected);
    }

    #[rstest]
    #[case("card-foreground", "cardForeground")]
    #[case("hello_world", "helloWorld")]
    #[case("HelloWorld", "helloWorld")]
    #[case("helloWorld", "helloWorld")]
    #[case("HTTP_REQUEST", "httpRequest")]
    #[case("  leading_space", "leadingSpace")]
    #[case("", "")]
    fn test_to_camel_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_camel_case(input), expected);
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in ["mutedForeground", "destructiveForeground", "ring", "popover"] {
            assert_eq!(to_camel_case(&to_kebab_case(role)), role);
        }
    }
}

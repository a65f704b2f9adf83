/// Translate a parameter identifier into a long option name.
///
/// `outputFile` → `output-file`, `max_depth` → `max-depth`,
/// `HTTPServer` → `http-server`.
pub fn to_long_name(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }

        out.extend(c.to_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(to_long_name("outputFile"), "output-file");
        assert_eq!(to_long_name("count"), "count");
        assert_eq!(to_long_name("maxRecordsInRam"), "max-records-in-ram");
    }

    #[test]
    fn test_acronyms_and_digits() {
        assert_eq!(to_long_name("HTTPServer"), "http-server");
        assert_eq!(to_long_name("useSSL"), "use-ssl");
        assert_eq!(to_long_name("v2Api"), "v2-api");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_long_name("max_depth"), "max-depth");
        assert_eq!(to_long_name("_leading__double_"), "leading-double");
    }
}

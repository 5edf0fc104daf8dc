/// Interpret an environment variable value such as "1" or "no" as a boolean.
///
/// Unrecognized values are reported on stderr and treated as `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" | "" => Some(false),
        other => {
            eprintln!("Unrecognized boolean value \"{}\"", other);
            None
        }
    }
}

/// Return whether an option controlled by the environment variable `name`
/// is enabled, or `default` if the variable is unset or invalid.
pub fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|value| parse_flag(&value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn test_parse_flag() {
        for value in ["1", "true", "YES", " on "] {
            assert_eq!(parse_flag(value), Some(true), "{}", value);
        }
        for value in ["0", "False", "no", ""] {
            assert_eq!(parse_flag(value), Some(false), "{}", value);
        }
        assert_eq!(parse_flag("maybe"), None);
    }
}

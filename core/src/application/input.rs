//! User input validation, run before any command is built.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::parse_integer;
use crate::error::{Error, Result};

static PROCESS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^<>:"|?*]{1,255}$"#).expect("valid process name regex"));

/// Validate a port query. `None` means "all ports".
pub fn validate_port_number(input: &str) -> Result<Option<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let port = parse_integer(input)
        .ok_or_else(|| Error::InvalidInput(format!("Port number must be numeric: {}", input)))?;
    if !(1..=65535).contains(&port) {
        return Err(Error::InvalidInput(format!(
            "Port number must be between 1 and 65535: {}",
            port
        )));
    }

    Ok(Some(port.to_string()))
}

/// Validate a process query: a positive PID or a process name. `None` means "all processes".
pub fn validate_process_identifier(input: &str) -> Result<Option<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Some(pid) = parse_integer(input) {
        if pid <= 0 {
            return Err(Error::InvalidInput(format!(
                "PID must be a positive integer: {}",
                pid
            )));
        }
        return Ok(Some(pid.to_string()));
    }

    if !validate_process_name(input) {
        return Err(Error::InvalidInput(format!(
            "Invalid process name format: {}",
            input
        )));
    }
    Ok(Some(input.to_string()))
}

/// 1 to 255 characters, none of `<>:"|?*`.
pub fn validate_process_name(name: &str) -> bool {
    PROCESS_NAME.is_match(name.trim())
}

/// Numeric, positive PID.
pub fn validate_pid(pid: &str) -> Option<i64> {
    parse_integer(pid).filter(|pid| *pid > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_port_number() {
        assert_eq!(validate_port_number("").unwrap(), None);
        assert_eq!(validate_port_number("  ").unwrap(), None);
        assert_eq!(validate_port_number(" 8080 ").unwrap(), Some("8080".to_string()));
        assert_eq!(validate_port_number("065535").unwrap(), Some("65535".to_string()));

        for bad in ["0", "65536", "-1", "http", "80; rm -rf /", "8.5"] {
            assert!(
                matches!(validate_port_number(bad), Err(Error::InvalidInput(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validate_process_identifier() {
        assert_eq!(validate_process_identifier("").unwrap(), None);
        assert_eq!(validate_process_identifier("0042").unwrap(), Some("42".to_string()));
        assert_eq!(
            validate_process_identifier(" node ").unwrap(),
            Some("node".to_string())
        );
        assert!(validate_process_identifier("0").is_err());
        assert!(validate_process_identifier("-7").is_err());
        assert!(validate_process_identifier("a|b").is_err());
        assert!(validate_process_identifier(&"n".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_process_name() {
        assert!(validate_process_name("chrome.exe"));
        assert!(validate_process_name("Google Chrome Helper"));
        assert!(!validate_process_name(""));
        for c in ['<', '>', ':', '"', '|', '?', '*'] {
            assert!(!validate_process_name(&format!("bad{}name", c)));
        }
    }

    #[test]
    fn test_validate_pid() {
        assert_eq!(validate_pid("1234"), Some(1234));
        assert_eq!(validate_pid(" 12 "), Some(12));
        assert_eq!(validate_pid("0"), None);
        assert_eq!(validate_pid("-3"), None);
        assert_eq!(validate_pid("12a"), None);
        assert_eq!(validate_pid(""), None);
    }
}

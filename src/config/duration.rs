//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "1h", "30m", "300s", "300" into seconds.
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration_to_secs(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (num_str, unit, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, "hours", 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, "minutes", 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, "seconds", 1)
    } else {
        (s, "duration", 1)
    };

    let value: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid {unit} value: {num_str}"))?;
    value
        .checked_mul(multiplier)
        .with_context(|| format!("Duration too large: {s}"))
}

/// Parse a run duration; zero means run until interrupted.
pub fn parse_run_duration(s: &str) -> anyhow::Result<Option<Duration>> {
    let secs = parse_duration_to_secs(s)?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration_to_secs("300").unwrap(), 300);
        assert_eq!(parse_duration_to_secs("45s").unwrap(), 45);
        assert_eq!(parse_duration_to_secs("30m").unwrap(), 1800);
        assert_eq!(parse_duration_to_secs(" 1h ").unwrap(), 3600);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_duration_to_secs("").is_err());
        assert!(parse_duration_to_secs("-5s").is_err());
        let err = parse_duration_to_secs("tenm").unwrap_err();
        assert_eq!(err.to_string(), "Invalid minutes value: ten");
    }

    #[test]
    fn test_zero_runs_forever() {
        assert_eq!(parse_run_duration("0").unwrap(), None);
        assert_eq!(parse_run_duration("0s").unwrap(), None);
        assert_eq!(
            parse_run_duration("2m").unwrap(),
            Some(Duration::from_secs(120))
        );
    }
}

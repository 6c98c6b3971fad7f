use anyhow::bail;
use std::time::Duration;

/// Parses a compact delay string like `100m`, `10s` or `1M`.
///
/// The last character selects the unit (`m` = milliseconds, `s` = seconds,
/// `M` = minutes, case-sensitive) and the prefix must be an integer.
/// Negative values are accepted and resolve to a zero delay.
pub fn parse_delay(delay_str: &str) -> anyhow::Result<Duration> {
    if delay_str.len() < 2 {
        bail!("invalid delay format: {}", delay_str);
    }

    let Some(unit) = delay_str.chars().last() else {
        bail!("invalid delay format: {}", delay_str);
    };
    let num_str = &delay_str[..delay_str.len() - unit.len_utf8()];

    let num: i64 = match num_str.parse() {
        Ok(num) => num,
        Err(err) => bail!("invalid delay number: {}", err),
    };
    let num = u64::try_from(num).unwrap_or(0);

    match unit {
        'm' => Ok(Duration::from_millis(num)),
        's' => Ok(Duration::from_secs(num)),
        'M' => Ok(Duration::from_secs(num.saturating_mul(60))),
        _ => bail!("invalid delay unit: {}", unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_milliseconds() {
        assert_eq!(parse_delay("100m").unwrap(), Duration::from_millis(100));
    }

    #[test]
    fn parses_seconds() {
        assert_eq!(parse_delay("10s").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn parses_minutes() {
        assert_eq!(parse_delay("1M").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(parse_delay("invalid").is_err());
    }

    #[test]
    fn rejects_missing_unit() {
        assert!(parse_delay("100").is_err());
    }

    #[test]
    fn rejects_garbage_prefix() {
        assert!(parse_delay("x10m").is_err());
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(parse_delay("10h").is_err());
    }

    #[test]
    fn rejects_too_short_input() {
        assert!(parse_delay("m").is_err());
        assert!(parse_delay("").is_err());
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        assert_eq!(parse_delay("-5m").unwrap(), Duration::ZERO);
    }
}

//! Human-facing size strings: parsing `"1.5MB"`-style arguments and
//! formatting byte counts for the stderr report.

/// Parse a size string into bytes: a non-negative decimal value followed by
/// an optional unit (`B`, `KB`, `MB`, `GB`, case-insensitive, powers of
/// 1024, default `B`). Fractional values truncate, so `"0.5MB"` is 524288.
pub fn parse_size(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    let unit_start = trimmed
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (value_part, unit_part) = trimmed.split_at(unit_start);

    let value: f64 = value_part
        .parse()
        .map_err(|_| format!("unable to parse size value: {raw:?}"))?;
    if !value.is_finite() || value.is_sign_negative() {
        return Err(format!("size must be non-negative: {raw:?}"));
    }

    let multiplier: f64 = match unit_part.to_ascii_uppercase().as_str() {
        "" | "B" => 1.0,
        "KB" => 1024.0,
        "MB" => 1024.0 * 1024.0,
        "GB" => 1024.0 * 1024.0 * 1024.0,
        other => return Err(format!("unknown size unit {other:?} (use B, KB, MB, or GB)")),
    };

    let bytes = (value * multiplier) as u64;
    if bytes == 0 {
        return Err("target size must be positive".into());
    }
    Ok(bytes)
}

/// Format a byte count for display: `"100 B"`, `"512.00 KB"`, `"1.50 MB"`.
pub fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_bytes() {
        assert_eq!(parse_size("100").unwrap(), 100);
        assert_eq!(parse_size("100B").unwrap(), 100);
    }

    #[test]
    fn parses_binary_units_case_insensitively() {
        assert_eq!(parse_size("500KB").unwrap(), 512_000);
        assert_eq!(parse_size("500kb").unwrap(), 512_000);
        assert_eq!(parse_size("0.5MB").unwrap(), 524_288);
        assert_eq!(parse_size("2gb").unwrap(), 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_size("  1.5MB ").unwrap(), 1_572_864);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "abc", "12XB", "1.2.3MB", "-5KB", "1e3"] {
            assert!(parse_size(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_zero() {
        assert!(parse_size("0").is_err());
        assert!(parse_size("0KB").is_err());
    }

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(100), "100 B");
        assert_eq!(human_bytes(512_000), "500.00 KB");
        assert_eq!(human_bytes(1_572_864), "1.50 MB");
        assert_eq!(human_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}

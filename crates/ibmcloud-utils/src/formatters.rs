/// Maximum length of a response body written to logs
pub const MAX_LOG_BODY_LENGTH: usize = 200;

/// Trait for formatting different types of data
pub trait Formatter<T> {
    fn format(&self, input: T) -> String;
}

/// Masks secrets down to their first and last four characters
pub struct SecretFormatter;

impl Formatter<&str> for SecretFormatter {
    fn format(&self, secret: &str) -> String {
        let chars: Vec<char> = secret.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }

        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// Truncates response bodies and strips control characters before logging
pub struct LogBodyFormatter {
    pub max_length: usize,
}

impl Default for LogBodyFormatter {
    fn default() -> Self {
        Self {
            max_length: MAX_LOG_BODY_LENGTH,
        }
    }
}

impl Formatter<&str> for LogBodyFormatter {
    fn format(&self, body: &str) -> String {
        let cleaned: String = body
            .chars()
            .filter(|c| c.is_ascii_graphic() || *c == ' ')
            .collect();

        if cleaned.len() > self.max_length {
            format!(
                "{}... [truncated, {} bytes total]",
                &cleaned[..self.max_length],
                body.len()
            )
        } else {
            cleaned
        }
    }
}

/// Formats an age in seconds as a compact human-readable string
pub struct AgeFormatter;

impl Formatter<u64> for AgeFormatter {
    fn format(&self, seconds: u64) -> String {
        let days = seconds / 86400;
        let hours = (seconds % 86400) / 3600;
        let mins = (seconds % 3600) / 60;

        if days > 0 {
            format!("{}d {}h", days, hours)
        } else if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        }
    }
}

// Convenience functions
pub fn mask_secret(secret: &str) -> String {
    SecretFormatter.format(secret)
}

pub fn truncate_for_log(body: &str) -> String {
    LogBodyFormatter::default().format(body)
}

pub fn format_age(seconds: u64) -> String {
    AgeFormatter.format(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_masking() {
        assert_eq!(mask_secret("abcd1234efgh5678"), "abcd...5678");
        assert_eq!(mask_secret("short"), "****");
    }

    #[test]
    fn test_log_body_truncation() {
        let formatter = LogBodyFormatter { max_length: 10 };
        assert_eq!(formatter.format("0123456789abc"), "0123456789... [truncated, 13 bytes total]");
        assert_eq!(formatter.format("line\nbreak"), "linebreak");
    }

    #[test]
    fn test_age_formatting() {
        let formatter = AgeFormatter;

        assert_eq!(formatter.format(30), "0m");
        assert_eq!(formatter.format(3661), "1h 1m");
        assert_eq!(formatter.format(90061), "1d 1h");
    }
}

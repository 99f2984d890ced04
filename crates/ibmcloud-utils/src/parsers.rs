use crate::errors::{ParseError, Result, UtilsError};

/// Trait for parsing different types of inputs
pub trait Parser<T> {
    type Output;

    fn parse(&self, input: &str) -> Result<Self::Output>;
}

/// Parser for dotted config keys such as `api.region`
pub struct ConfigKeyParser;

impl Parser<String> for ConfigKeyParser {
    type Output = (String, String); // (section, key)

    fn parse(&self, input: &str) -> Result<Self::Output> {
        let (section, key) = input.trim().split_once('.').ok_or_else(|| {
            UtilsError::Parse(ParseError::InvalidFormat(format!(
                "expected <section>.<key>, got '{}'",
                input
            )))
        })?;

        if section.is_empty() {
            return Err(UtilsError::Parse(ParseError::MissingField("section".to_string())));
        }
        if key.is_empty() || key.contains('.') {
            return Err(UtilsError::Parse(ParseError::InvalidFormat(format!(
                "invalid key in '{}'",
                input
            ))));
        }

        Ok((section.to_lowercase(), key.to_lowercase()))
    }
}

/// Parser for comma-separated lists, dropping blanks
pub struct ListParser;

impl Parser<Vec<String>> for ListParser {
    type Output = Vec<String>;

    fn parse(&self, input: &str) -> Result<Self::Output> {
        Ok(input
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect())
    }
}

// Convenience functions
pub fn parse_config_key(input: &str) -> Result<(String, String)> {
    ConfigKeyParser.parse(input)
}

pub fn parse_list(input: &str) -> Result<Vec<String>> {
    ListParser.parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        let parser = ConfigKeyParser;

        assert_eq!(
            parser.parse("api.region").unwrap(),
            ("api".to_string(), "region".to_string())
        );
        assert_eq!(
            parser.parse("Resolver.Ambiguity").unwrap(),
            ("resolver".to_string(), "ambiguity".to_string())
        );

        assert!(parser.parse("region").is_err());
        assert!(parser.parse(".region").is_err());
        assert!(parser.parse("api.").is_err());
        assert!(parser.parse("api.a.b").is_err());
    }

    #[test]
    fn test_list_parsing() {
        assert_eq!(parse_list("a, b,,c ").unwrap(), vec!["a", "b", "c"]);
        assert!(parse_list("").unwrap().is_empty());
    }
}

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// No indentation and no line breaks.
    #[default]
    Compact,
    /// One node per line, indented by tree depth.
    Readable,
}

// -----------------------------------------------------------------------------------------------

/// Document-wide parse and write settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: Format,
    pub indent: String,
    pub line_break: String,
    /// Never write childless elements as `<name/>`.
    pub use_full_nodes: bool,
    /// Reject documents that fail structural validation.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: Format::Compact,
            indent: "  ".to_string(),
            line_break: "\r\n".to_string(),
            use_full_nodes: true,
            strict: true,
        }
    }
}

impl Config {
    pub fn readable() -> Self {
        Config {
            format: Format::Readable,
            ..Config::default()
        }
    }

    pub fn indent_for(&self, depth: usize) -> String {
        match self.format {
            Format::Compact => String::new(),
            Format::Readable => self.indent.repeat(depth),
        }
    }

    pub fn line_feed(&self) -> &str {
        match self.format {
            Format::Compact => "",
            Format::Readable => self.line_break.as_str(),
        }
    }
}

// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(Format::Compact, config.format);
        assert_eq!("  ", config.indent);
        assert!(config.use_full_nodes);
        assert!(config.strict);
        assert_eq!("", config.indent_for(3));
        assert_eq!("", config.line_feed());
    }

    #[test]
    fn test_config_readable() {
        let config = Config::readable();
        assert_eq!("", config.indent_for(0));
        assert_eq!("      ", config.indent_for(3));
        assert_eq!("\r\n", config.line_feed());
    }

    #[test]
    fn test_config_deserialize() {
        let config: Config =
            serde_json::from_str(r#"{"format":"Readable","indent":"\t","strict":false}"#).unwrap();
        assert_eq!(Format::Readable, config.format);
        assert_eq!("\t\t", config.indent_for(2));
        assert_eq!("\r\n", config.line_break);
        assert!(config.use_full_nodes);
        assert!(!config.strict);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

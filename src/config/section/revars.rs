//! `[revars]` placeholder substitution configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevarsConfig {
    /// Apply substitution to intro texts and channel descriptions.
    pub enable: bool,
    /// Number of substitution passes.
    pub nesting: u32,
    /// Ordered placeholder table.
    pub variables: Vec<RevarVariable>,
}

impl Default for RevarsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            nesting: 1,
            variables: Vec::new(),
        }
    }
}

/// One `{ variable = "...", value = "..." }` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevarVariable {
    pub variable: String,
    #[serde(default)]
    pub value: String,
}

impl RevarsConfig {
    pub const NESTING: FieldPath = FieldPath::new("revars.nesting");
    pub const VARIABLES: FieldPath = FieldPath::new("revars.variables");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.nesting == 0 {
            diag.error_with_hint(
                Self::NESTING,
                "nesting must be at least 1",
                format!("remove {} or set it to 1", Self::NESTING),
            );
        }

        let empty = self.variables.iter().filter(|v| v.variable.is_empty()).count();
        if empty > 0 {
            diag.warn(
                Self::VARIABLES,
                format!("{empty} variable(s) with an empty name will be ignored"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(!config.revars.enable);
        assert_eq!(config.revars.nesting, 1);
        assert!(config.revars.variables.is_empty());
    }

    #[test]
    fn test_variables_keep_order() {
        let config = test_parse_config(
            r#"[revars]
enable = true
nesting = 2
variables = [
    { variable = "{phone}", value = "+7 000" },
    { variable = "{city}", value = "Moscow" },
]"#,
        );
        assert!(config.revars.enable);
        assert_eq!(config.revars.nesting, 2);
        assert_eq!(config.revars.variables[0].variable, "{phone}");
        assert_eq!(config.revars.variables[1].value, "Moscow");
    }

    #[test]
    fn test_validate() {
        let revars = RevarsConfig {
            enable: true,
            nesting: 0,
            variables: vec![RevarVariable {
                variable: String::new(),
                value: "x".into(),
            }],
        };
        let mut diag = ConfigDiagnostics::new();
        revars.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.warnings().len(), 1);
    }
}

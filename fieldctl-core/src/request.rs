//! Component requests as given on the command line or collected by the wizard

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScaffoldError};

/// A child selection for a composite: `identifier[:Custom Name]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    pub identifier: String,
    pub custom_name: Option<String>,
}

impl ComponentSpec {
    pub fn new(identifier: impl Into<String>, custom_name: Option<String>) -> Self {
        Self {
            identifier: identifier.into(),
            custom_name,
        }
    }
}

impl FromStr for ComponentSpec {
    type Err = ScaffoldError;

    /// Splits on the first `:`; the remainder is kept verbatim so custom names
    /// may contain colons. `id:` with nothing after it is rejected.
    fn from_str(raw: &str) -> Result<Self> {
        let (identifier, custom_name) = match raw.split_once(':') {
            Some((identifier, custom)) => {
                if custom.trim().is_empty() {
                    return Err(ScaffoldError::validation(format!(
                        "Custom name after ':' cannot be empty in '{raw}'"
                    )));
                }
                (identifier.trim(), Some(custom.to_string()))
            }
            None => (raw.trim(), None),
        };

        if identifier.is_empty() {
            return Err(ScaffoldError::validation(format!(
                "Missing component identifier in '{raw}'"
            )));
        }

        Ok(Self::new(identifier, custom_name))
    }
}

impl fmt::Display for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.custom_name {
            Some(custom) => write!(f, "{}:{custom}", self.identifier),
            None => write!(f, "{}", self.identifier),
        }
    }
}

/// Parse composite child specs.
///
/// A single argument containing a comma is split on commas; otherwise every
/// argument is one spec.
pub fn parse_specs<S: AsRef<str>>(args: &[S]) -> Result<Vec<ComponentSpec>> {
    let pieces: Vec<&str> = match args {
        [single] if single.as_ref().contains(',') => single
            .as_ref()
            .split(',')
            .filter(|piece| !piece.trim().is_empty())
            .collect(),
        _ => args.iter().map(|arg| arg.as_ref()).collect(),
    };

    pieces.into_iter().map(str::parse).collect()
}

/// What to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRequest {
    Simple {
        name: String,
        base: String,
    },
    Composite {
        name: String,
        children: Vec<ComponentSpec>,
    },
}

impl ComponentRequest {
    pub fn name(&self) -> &str {
        match self {
            Self::Simple { name, .. } | Self::Composite { name, .. } => name,
        }
    }

    /// Arguments that reproduce this request non-interactively
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Self::Simple { name, base } => {
                vec!["simple".to_string(), name.clone(), base.clone()]
            }
            Self::Composite { name, children } => {
                let mut args = vec!["composite".to_string(), name.clone()];
                args.extend(children.iter().map(ToString::to_string));
                args
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(specs: &[ComponentSpec]) -> Vec<&str> {
        specs.iter().map(|s| s.identifier.as_str()).collect()
    }

    #[test]
    fn test_spec_without_custom_name() {
        let spec: ComponentSpec = "text-input".parse().unwrap();
        assert_eq!(spec, ComponentSpec::new("text-input", None));
    }

    #[test]
    fn test_spec_keeps_colons_in_custom_name() {
        let spec: ComponentSpec = "text-input:Time: HH:MM".parse().unwrap();
        assert_eq!(spec.identifier, "text-input");
        assert_eq!(spec.custom_name.as_deref(), Some("Time: HH:MM"));
    }

    #[test]
    fn test_spec_custom_name_kept_verbatim() {
        let spec: ComponentSpec = "email: Work  Email ".parse().unwrap();
        assert_eq!(spec.custom_name.as_deref(), Some(" Work  Email "));
        assert!("email:   ".parse::<ComponentSpec>().is_err());
    }

    #[test]
    fn test_spec_empty_custom_name_rejected() {
        let err = "email:".parse::<ComponentSpec>().unwrap_err();
        assert!(matches!(err, ScaffoldError::Validation { .. }));
        assert!(err.to_string().contains("cannot be empty"));

        assert!(":Title".parse::<ComponentSpec>().is_err());
    }

    #[test]
    fn test_parse_specs_single_comma_joined_argument() {
        let specs = parse_specs(&["text-input,email:Work Email,button"]).unwrap();
        assert_eq!(ids(&specs), vec!["text-input", "email", "button"]);
        assert_eq!(specs[1].custom_name.as_deref(), Some("Work Email"));
    }

    #[test]
    fn test_parse_specs_separate_arguments_not_split() {
        let specs = parse_specs(&["text-input:Last, First", "email"]).unwrap();
        assert_eq!(ids(&specs), vec!["text-input", "email"]);
        assert_eq!(specs[0].custom_name.as_deref(), Some("Last, First"));
    }

    #[test]
    fn test_parse_specs_propagates_errors() {
        assert!(parse_specs(&["a,b:"]).is_err());
    }

    #[test]
    fn test_request_to_args() {
        let request = ComponentRequest::Composite {
            name: "survey".to_string(),
            children: vec![
                ComponentSpec::new("text-input", None),
                ComponentSpec::new("email", Some("Work Email".to_string())),
            ],
        };
        assert_eq!(
            request.to_args(),
            vec!["composite", "survey", "text-input", "email:Work Email"]
        );
        assert_eq!(request.name(), "survey");
    }
}

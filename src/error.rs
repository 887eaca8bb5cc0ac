use std::{fmt, io};

use serde_yaml::Error as YamlError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("No root specifications found: every spec is referenced by another spec")]
    NoRootSpecs,
    #[error("No specifications found near the configured roots")]
    NoSpecsFound,
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("HTML rendering error: {0}")]
    Render(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl SpecError {
    /// True for errors that stop a command before any batch work starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SpecError::Config(_) | SpecError::NoSpecsFound | SpecError::NoRootSpecs
        )
    }
}

impl From<YamlError> for SpecError {
    fn from(src: YamlError) -> SpecError {
        SpecError::Serialization(format!("YAML deserialization error: {src}"))
    }
}

impl From<io::Error> for SpecError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => SpecError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => SpecError::PermissionDenied,
            _ => SpecError::Io(format!("IOError: {}: {x}", x.kind())),
        }
    }
}

impl From<fmt::Error> for SpecError {
    fn from(x: fmt::Error) -> Self {
        SpecError::Render(format!("{x}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_to_dedicated_variants() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(SpecError::from(missing), SpecError::NotFound(_)));

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(SpecError::from(denied), SpecError::PermissionDenied);

        let other = io::Error::new(io::ErrorKind::Other, "disk on fire");
        assert!(matches!(SpecError::from(other), SpecError::Io(_)));
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(SpecError::NoRootSpecs.is_configuration());
        assert!(SpecError::NoSpecsFound.is_configuration());
        assert!(SpecError::Config("no roots".into()).is_configuration());
        assert!(!SpecError::Io("write".into()).is_configuration());
    }
}

//! Body catalog loading
//!
//! The catalog is the external data source describing every celestial body.
//! Loading is fatal on failure: the application must not construct any scene
//! state from a partial or malformed catalog.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::BodyDescriptor;

/// The full set of top-level body descriptors, in catalog order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub bodies: Vec<BodyDescriptor>,
}

impl Catalog {
    /// Load a catalog from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse a catalog from a RON string
    ///
    /// Optional fields parse without an explicit `Some`, so the catalog
    /// reads as plain key-value data.
    pub fn from_ron_str(s: &str) -> Result<Self, CatalogError> {
        let options = ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME);
        Ok(options.from_str(s)?)
    }

}

/// Error type for catalog loading
#[derive(Debug)]
pub enum CatalogError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// RON parse error
    Parse(ron::error::SpannedError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "Catalog IO error: {}", e),
            CatalogError::Parse(e) => write!(f, "Catalog parse error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<ron::error::SpannedError> for CatalogError {
    fn from(e: ron::error::SpannedError) -> Self {
        CatalogError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"(
        bodies: [
            (
                name: "sun",
                class: Star,
                size: 5.0,
                texture: "sun.jpg",
                corona: true,
                rotation_speed: 0.0005,
            ),
            (
                name: "earth",
                class: Planet,
                size: 1.0,
                texture: "earth.jpg",
                distance: 20.0,
                orbit_speed: 0.01,
                rotation_speed: 0.02,
                trail: true,
                satellites: [
                    (
                        name: "moon",
                        class: Moon,
                        size: 0.27,
                        texture: "moon.jpg",
                        distance: 2.0,
                        orbit_speed: 0.05,
                    ),
                ],
            ),
        ],
    )"#;

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::from_ron_str(SAMPLE).unwrap();
        assert_eq!(catalog.bodies.len(), 2);
        assert_eq!(catalog.bodies[1].satellites.len(), 1);
        assert_eq!(catalog.bodies[1].satellites[0].name, "moon");
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        let result = Catalog::from_ron_str("(bodies: [(name: \"x\")])");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = Catalog::load("/nonexistent/bodies.ron");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_error_display() {
        let err = Catalog::load("/nonexistent/bodies.ron").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("IO error"));
    }
}

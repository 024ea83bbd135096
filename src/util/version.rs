use semver::Version;
use thiserror::Error;

pub const APP_NAME: &str = "Salon Valuation";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

#[derive(Error, Debug, PartialEq)]
pub enum VersionError {
    #[error("invalid version format: {0}")]
    InvalidVersion(String),
}

fn parse_version_str(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim_start_matches(['v', 'V']);
    Version::parse(trimmed).map_err(|err| VersionError::InvalidVersion(err.to_string()))
}

/// Release tag when built from a tagged checkout, package version otherwise.
pub fn current_version() -> Result<Version, VersionError> {
    if let Some(tag) = GIT_TAG {
        if let Ok(version) = parse_version_str(tag) {
            return Ok(version);
        }
    }

    parse_version_str(APP_VERSION)
}

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// Stamped on every stored lead so figures can be traced to the constants that produced them.
pub fn engine_version() -> String {
    current_version()
        .map(|version| version.to_string())
        .unwrap_or_else(|_| APP_VERSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_prefix_is_stripped() {
        assert_eq!(parse_version_str("v1.4.2").unwrap(), Version::new(1, 4, 2));
        assert_eq!(parse_version_str("V0.3.0").unwrap(), Version::new(0, 3, 0));
    }

    #[test]
    fn garbage_tag_is_an_error() {
        assert!(matches!(
            parse_version_str("release-candidate"),
            Err(VersionError::InvalidVersion(_))
        ));
    }

    #[test]
    fn engine_version_is_semver() {
        assert!(Version::parse(&engine_version()).is_ok());
    }
}

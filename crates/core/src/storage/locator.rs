use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("not a valid URL: {0}")]
    Malformed(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("URL must include container name and blob path")]
    MissingObjectPath,

    #[error("URL must include a container name")]
    MissingContainer,
}

/// Identifies a single blob: storage account, container, and object path.
///
/// Parsed from URLs of the form
/// `https://{account}.blob.core.windows.net/{container}/{path...}`. The
/// account is the first label of the host; path segments are decoded, so a
/// locator carries the literal object path rather than its URL encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobLocator {
    pub account: String,
    pub container: String,
    pub object_path: String,
}

/// Identifies a container; extra path segments after the container name are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLocator {
    pub account: String,
    pub container: String,
}

impl BlobLocator {
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        let url = Url::parse(raw).map_err(|e| LocatorError::Malformed(e.to_string()))?;
        let account = account_from_host(&url)?;
        let segments = decoded_segments(&url);

        if segments.len() < 2 {
            return Err(LocatorError::MissingObjectPath);
        }

        Ok(Self {
            account,
            container: segments[0].clone(),
            object_path: segments[1..].join("/"),
        })
    }
}

impl ContainerLocator {
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        let url = Url::parse(raw).map_err(|e| LocatorError::Malformed(e.to_string()))?;
        let account = account_from_host(&url)?;
        let segments = decoded_segments(&url);

        let container = segments.first().ok_or(LocatorError::MissingContainer)?;

        Ok(Self {
            account,
            container: container.clone(),
        })
    }

    /// Locator for an object inside this container.
    pub fn object(&self, name: &str) -> BlobLocator {
        BlobLocator {
            account: self.account.clone(),
            container: self.container.clone(),
            object_path: name.to_string(),
        }
    }
}

impl fmt::Display for BlobLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.account, self.container, self.object_path)
    }
}

impl fmt::Display for ContainerLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account, self.container)
    }
}

/// The account name is the first dot-separated label of the host.
fn account_from_host(url: &Url) -> Result<String, LocatorError> {
    let host = url.host_str().ok_or(LocatorError::MissingHost)?;
    let account = host.split('.').next().unwrap_or_default();
    if account.is_empty() {
        return Err(LocatorError::MissingHost);
    }
    Ok(account.to_ascii_lowercase())
}

fn decoded_segments(url: &Url) -> Vec<String> {
    url.path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            urlencoding::decode(s)
                .map(|c| c.into_owned())
                .unwrap_or_else(|_| s.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blob_locator() {
        let locator =
            BlobLocator::parse("https://myaccount.blob.core.windows.net/media/raw/clip.mp4")
                .unwrap();
        assert_eq!(locator.account, "myaccount");
        assert_eq!(locator.container, "media");
        assert_eq!(locator.object_path, "raw/clip.mp4");
    }

    #[test]
    fn test_parse_blob_locator_single_segment_path() {
        let locator =
            BlobLocator::parse("https://acct.blob.core.windows.net/videos/input.mp4").unwrap();
        assert_eq!(locator.container, "videos");
        assert_eq!(locator.object_path, "input.mp4");
    }

    #[test]
    fn test_parse_blob_locator_without_object_path() {
        let result = BlobLocator::parse("https://acct.blob.core.windows.net/videos");
        assert_eq!(result.unwrap_err(), LocatorError::MissingObjectPath);

        let result = BlobLocator::parse("https://acct.blob.core.windows.net/videos/");
        assert_eq!(result.unwrap_err(), LocatorError::MissingObjectPath);

        let result = BlobLocator::parse("https://acct.blob.core.windows.net/");
        assert_eq!(result.unwrap_err(), LocatorError::MissingObjectPath);
    }

    #[test]
    fn test_parse_blob_locator_not_a_url() {
        let result = BlobLocator::parse("definitely not a url");
        assert!(matches!(result, Err(LocatorError::Malformed(_))));
    }

    #[test]
    fn test_parse_host_is_case_insensitive() {
        let locator =
            BlobLocator::parse("HTTPS://MyAccount.Blob.Core.Windows.Net/media/clip.mp4").unwrap();
        assert_eq!(locator.account, "myaccount");
        // Path casing is preserved
        assert_eq!(locator.container, "media");
    }

    #[test]
    fn test_parse_decodes_path_segments() {
        let locator =
            BlobLocator::parse("https://acct.blob.core.windows.net/media/raw%20footage/clip%231.mp4")
                .unwrap();
        assert_eq!(locator.object_path, "raw footage/clip#1.mp4");
    }

    #[test]
    fn test_parse_container_locator() {
        let locator = ContainerLocator::parse("https://acct.blob.core.windows.net/processed")
            .unwrap();
        assert_eq!(locator.account, "acct");
        assert_eq!(locator.container, "processed");
    }

    #[test]
    fn test_parse_container_locator_ignores_extra_segments() {
        let locator =
            ContainerLocator::parse("https://acct.blob.core.windows.net/processed/leftover/bits")
                .unwrap();
        assert_eq!(locator.container, "processed");
    }

    #[test]
    fn test_parse_container_locator_without_container() {
        let result = ContainerLocator::parse("https://acct.blob.core.windows.net/");
        assert_eq!(result.unwrap_err(), LocatorError::MissingContainer);
    }

    #[test]
    fn test_container_object_builder() {
        let container = ContainerLocator::parse("https://acct.blob.core.windows.net/processed")
            .unwrap();
        let blob = container.object("output.mp4");
        assert_eq!(blob.account, "acct");
        assert_eq!(blob.container, "processed");
        assert_eq!(blob.object_path, "output.mp4");
    }

    #[test]
    fn test_display() {
        let blob = BlobLocator {
            account: "acct".to_string(),
            container: "media".to_string(),
            object_path: "raw/clip.mp4".to_string(),
        };
        assert_eq!(blob.to_string(), "acct/media/raw/clip.mp4");

        let container = ContainerLocator {
            account: "acct".to_string(),
            container: "media".to_string(),
        };
        assert_eq!(container.to_string(), "acct/media");
    }
}

//! Stylesheet source loading

use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, warn};
use tokio::task::JoinSet;
use url::Url;

use crate::client::{ClientConfig, HttpClient};
use crate::error::{NetError, NetResult};

/// Where a stylesheet's source lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocator {
    /// http or https URL
    Remote(Url),
    /// Local file
    File(PathBuf),
}

impl SourceLocator {
    /// Resolve a stylesheet identifier.
    ///
    /// Absolute URLs are used as given. Relative identifiers are joined onto
    /// `base` when one is set, otherwise they are treated as filesystem
    /// paths.
    pub fn parse(identifier: &str, base: Option<&Url>) -> NetResult<Self> {
        if has_drive_prefix(identifier) {
            return Ok(SourceLocator::File(PathBuf::from(identifier)));
        }

        let url = match Url::parse(identifier) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => match base {
                Some(base) => base.join(identifier)?,
                None => return Ok(SourceLocator::File(PathBuf::from(identifier))),
            },
            Err(e) => return Err(e.into()),
        };

        match url.scheme() {
            "http" | "https" => Ok(SourceLocator::Remote(url)),
            "file" => url
                .to_file_path()
                .map(SourceLocator::File)
                .map_err(|_| NetError::InvalidUrl(url.to_string())),
            other => Err(NetError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Whether `identifier` starts with a Windows drive (`C:\` or `C:/`).
/// `Url::parse` would read the drive letter as a scheme.
fn has_drive_prefix(identifier: &str) -> bool {
    match identifier.as_bytes() {
        [drive, b':'] => drive.is_ascii_alphabetic(),
        [drive, b':', sep, ..] => drive.is_ascii_alphabetic() && matches!(sep, b'\\' | b'/'),
        _ => false,
    }
}

/// Loads stylesheet source text from URLs and paths
#[derive(Clone)]
pub struct SourceLoader {
    client: HttpClient,
    base: Option<Url>,
}

impl SourceLoader {
    /// Create a new loader with default client settings
    pub fn new() -> NetResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> NetResult<Self> {
        Ok(Self {
            client: HttpClient::with_config(config)?,
            base: None,
        })
    }

    /// Resolve relative identifiers against `base`
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    /// Load the full source text of one stylesheet
    pub async fn load_source(&self, identifier: &str) -> NetResult<String> {
        match SourceLocator::parse(identifier, self.base.as_ref())? {
            SourceLocator::Remote(url) => {
                let response = self.client.get(&url).await?;
                if response.status == 404 {
                    return Err(NetError::NotFound(url.to_string()));
                }
                if !response.is_success() {
                    return Err(NetError::HttpError {
                        status: response.status,
                    });
                }
                if !response.is_stylesheet() {
                    debug!(
                        "{} served as {}",
                        url,
                        response.content_type().unwrap_or("unknown type")
                    );
                }
                Ok(response.text_lossy())
            }
            SourceLocator::File(path) => {
                debug!("Reading: {}", path.display());
                tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
                    ErrorKind::NotFound => NetError::NotFound(path.display().to_string()),
                    _ => NetError::Io(e),
                })
            }
        }
    }

    /// Load several stylesheets concurrently.
    ///
    /// Results come back in the order of `identifiers`; one failure does
    /// not affect the others.
    pub async fn load_all(&self, identifiers: &[String]) -> Vec<NetResult<String>> {
        let mut tasks = JoinSet::new();
        for (index, identifier) in identifiers.iter().enumerate() {
            let loader = self.clone();
            let identifier = identifier.clone();
            tasks.spawn(async move { (index, loader.load_source(&identifier).await) });
        }

        let mut results: Vec<Option<NetResult<String>>> =
            (0..identifiers.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => warn!("Load task failed: {}", e),
            }
        }

        results
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|| Err(NetError::RequestFailed("load task aborted".into())))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_locator_http() {
        let locator = SourceLocator::parse("https://example.com/theme.css", None).unwrap();
        assert_eq!(
            locator,
            SourceLocator::Remote(Url::parse("https://example.com/theme.css").unwrap())
        );
    }

    #[test]
    fn test_locator_relative_path() {
        let locator = SourceLocator::parse("css/theme.css", None).unwrap();
        assert_eq!(locator, SourceLocator::File(PathBuf::from("css/theme.css")));
    }

    #[test]
    fn test_locator_relative_to_base() {
        let base = Url::parse("https://example.com/css/").unwrap();
        let locator = SourceLocator::parse("theme.css", Some(&base)).unwrap();
        assert_eq!(
            locator,
            SourceLocator::Remote(Url::parse("https://example.com/css/theme.css").unwrap())
        );
    }

    #[test]
    fn test_locator_windows_path() {
        let locator = SourceLocator::parse(r"C:\css\theme.css", None).unwrap();
        assert_eq!(locator, SourceLocator::File(PathBuf::from(r"C:\css\theme.css")));

        let locator = SourceLocator::parse("d:/css/theme.css", None).unwrap();
        assert_eq!(locator, SourceLocator::File(PathBuf::from("d:/css/theme.css")));
    }

    #[test]
    fn test_locator_unsupported_scheme() {
        let err = SourceLocator::parse("ftp://example.com/theme.css", None).unwrap_err();
        assert!(matches!(err, NetError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_load_file() {
        let mut file = tempfile::Builder::new().suffix(".css").tempfile().unwrap();
        write!(file, "@macros {{ accent: red; }} a {{ color: accent; }}").unwrap();

        let loader = SourceLoader::new().unwrap();
        let text = loader
            .load_source(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(text.starts_with("@macros"));
    }

    #[tokio::test]
    async fn test_load_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a {{}}").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let loader = SourceLoader::new().unwrap();
        assert_eq!(loader.load_source(url.as_str()).await.unwrap(), "a {}");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.css");

        let loader = SourceLoader::new().unwrap();
        let err = loader
            .load_source(missing.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_load_all_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.css");
        let second = dir.path().join("second.css");
        std::fs::write(&first, "a {}").unwrap();
        std::fs::write(&second, "b {}").unwrap();

        let identifiers = vec![
            first.display().to_string(),
            dir.path().join("gone.css").display().to_string(),
            second.display().to_string(),
        ];
        let loader = SourceLoader::new().unwrap();
        let results = loader.load_all(&identifiers).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), "a {}");
        assert!(results[1].as_ref().unwrap_err().is_not_found());
        assert_eq!(results[2].as_ref().unwrap(), "b {}");
    }
}

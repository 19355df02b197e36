use once_cell::sync::Lazy;
use regex::Regex;

// Two separators, a server, one separator, a share, remainder verbatim.
static UNC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\\\([^\\]+)\\([^\\]+)(.*)").expect("pattern is valid"));

/// A UNC path split into its server, share, and trailing components.
///
/// `remainder` is either empty or starts with a separator; it is whatever
/// followed the share, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncPath {
    pub server: String,
    pub share: String,
    pub remainder: String,
}

impl UncPath {
    /// Splits `\\server\share\rest` into its parts.
    ///
    /// Returns `None` when the input does not have the two-separator prefix
    /// followed by a server and a share. That is an expected outcome, not an
    /// error: callers fall back to handling the raw string.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = UNC.captures(raw)?;
        Some(Self {
            server: caps[1].to_string(),
            share: caps[2].to_string(),
            remainder: caps[3].to_string(),
        })
    }

    /// The `\\server\share` key existing mappings are looked up under.
    pub fn server_share(&self) -> String {
        format!(r"\\{}\{}", self.server, self.share)
    }
}

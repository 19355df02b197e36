//! Resolve UNC network paths (`\\server\share\...`) into locally addressable
//! drive letters.
//!
//! Windows processes frequently refuse a UNC path as a working directory, so
//! a share has to be reachable through a mapped drive letter first. This crate
//! parses the UNC path, reuses an existing OS mapping for the share when one
//! exists, and otherwise maps the highest free letter to it. When none of that
//! is possible the caller gets a structured [`Unresolved`] reason and is
//! expected to degrade to the raw path instead of aborting.
//!
//! The OS side (mapping enumeration, the mounted-volume bitmask, mapping
//! creation) sits behind the [`MountTable`] trait; [`platform::SystemMounts`]
//! implements it against the real OS.
//!
//! ```no_run
//! use resolve_unc::{DriveMapper, platform::SystemMounts};
//!
//! let mapper = DriveMapper::new(SystemMounts);
//! match mapper.resolve(r"\\server\share\docs") {
//!     Ok(resolved) => println!("working directory: {}", resolved.local_path),
//!     Err(reason) => println!("keeping the raw path: {reason}"),
//! }
//! ```

mod letters;
mod mapper;
mod mappings;
mod parse;
pub mod platform;

pub use letters::free_letters;
pub use mapper::{DriveMapper, MountTable, Unresolved};
pub use mappings::find_mapping;
pub use parse::UncPath;

use std::fmt;

/// A volume letter A–Z, displayed with its `:` suffix ("Z:").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DriveLetter(char);

impl DriveLetter {
    /// Accepts an ASCII letter, normalizing to uppercase.
    pub fn new(letter: char) -> Option<Self> {
        letter
            .is_ascii_alphabetic()
            .then(|| Self(letter.to_ascii_uppercase()))
    }

    /// Letter at position `index` in the alphabet (0 = A, 25 = Z).
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 26).then(|| Self((b'A' + index) as char))
    }

    /// Parses a whitespace-delimited report token such as `"V:"`.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), Some(':'), None) => Self::new(letter),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Display for DriveLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.0)
    }
}

/// The outcome of a successful resolution: a mapped drive letter and the
/// local path addressing the same location the UNC path did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub letter: DriveLetter,
    pub local_path: String,
}

impl ResolvedPath {
    /// Joins the letter with the post-share remainder of a [`UncPath`]. An
    /// empty remainder addresses the share root, so it becomes `X:\` rather
    /// than the drive-relative `X:`.
    pub fn new(letter: DriveLetter, remainder: &str) -> Self {
        let local_path = if remainder.is_empty() {
            format!("{letter}\\")
        } else {
            format!("{letter}{remainder}")
        };
        Self { letter, local_path }
    }
}

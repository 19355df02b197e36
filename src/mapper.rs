use std::io;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{DriveLetter, ResolvedPath, UncPath, find_mapping, free_letters};

/// The OS-level mount table: mapping enumeration, the mounted-volume bitmask,
/// and mapping creation.
///
/// [`platform::SystemMounts`](crate::platform::SystemMounts) implements this
/// against the real OS; tests substitute an in-memory table. All three calls
/// are blocking and are assumed to complete in bounded time.
pub trait MountTable {
    /// Raw mapping report, one active mapping per line, in OS report order.
    /// The text is OS-defined and untrusted.
    fn mappings(&self) -> io::Result<String>;

    /// Bitmask of mounted volumes; bit `i` set means letter A+`i` is in use.
    fn volume_mask(&self) -> u32;

    /// Asks the OS to map `letter` to the `remote` share. Returns the raw
    /// status, `0` meaning success.
    fn connect(&self, letter: DriveLetter, remote: &str) -> u32;
}

impl<T: MountTable + ?Sized> MountTable for &T {
    fn mappings(&self) -> io::Result<String> {
        (**self).mappings()
    }

    fn volume_mask(&self) -> u32 {
        (**self).volume_mask()
    }

    fn connect(&self, letter: DriveLetter, remote: &str) -> u32 {
        (**self).connect(letter, remote)
    }
}

/// Why a path could not be resolved to a local drive letter.
///
/// Every variant is recoverable: callers degrade to operating on the raw UNC
/// path (or surface the message) rather than aborting.
#[derive(Debug, Error)]
pub enum Unresolved {
    /// The input has no `\\` prefix. Use it unchanged; no OS call was made.
    #[error("not a network path")]
    NotNetworkPath,
    /// The OS mapping enumeration failed.
    #[error("could not enumerate drive mappings")]
    MappingQuery(#[source] io::Error),
    /// The input names no server and share. A drive-letter path cannot be
    /// built; callers needing the location must change directory by string.
    #[error("path does not name a server and share")]
    UnparsablePath,
    /// All 26 letters are mounted.
    #[error("no free drive letters")]
    NoFreeLetters,
    /// The OS rejected the mapping request.
    #[error("mapping {letter} to {remote} failed with status {status}")]
    MappingFailed {
        letter: DriveLetter,
        remote: String,
        status: u32,
    },
}

/// Resolves UNC paths to mapped drive letters over a [`MountTable`].
pub struct DriveMapper<T> {
    table: T,
}

impl<T: MountTable> DriveMapper<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Resolves `raw` to a local path addressed through a drive letter.
    ///
    /// An existing mapping for the share is always reused, so resolving an
    /// already-mapped share twice returns the same letter and never creates a
    /// second mapping. On a miss the highest free letter is mapped to the
    /// share. A single creation attempt is made; on rejection the error is
    /// returned rather than retrying with another letter.
    pub fn resolve(&self, raw: &str) -> Result<ResolvedPath, Unresolved> {
        if !raw.starts_with(r"\\") {
            debug!(path = raw, "not a network path");
            return Err(Unresolved::NotNetworkPath);
        }

        debug!("checking existing drive mappings");
        let report = self.table.mappings().map_err(Unresolved::MappingQuery)?;

        let unc = UncPath::parse(raw).ok_or(Unresolved::UnparsablePath)?;
        let remote = unc.server_share();
        debug!(
            server = %unc.server,
            share = %unc.share,
            remainder = %unc.remainder,
            "parsed network path"
        );

        if let Some(letter) = find_mapping(&remote, &report) {
            let resolved = ResolvedPath::new(letter, &unc.remainder);
            debug!(%letter, path = %resolved.local_path, "reusing existing mapping");
            return Ok(resolved);
        }

        let free = free_letters(self.table.volume_mask());
        debug!(free = free.len(), "no existing mapping for the share");
        let Some(&letter) = free.first() else {
            warn!(%remote, "no free drive letters");
            return Err(Unresolved::NoFreeLetters);
        };

        debug!(%letter, %remote, "creating new mapping");
        let status = self.table.connect(letter, &remote);
        if status != 0 {
            warn!(%letter, %remote, status, "mapping request rejected");
            return Err(Unresolved::MappingFailed {
                letter,
                remote,
                status,
            });
        }

        Ok(ResolvedPath::new(letter, &unc.remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    const REPORT: &str = "\
Status       Local     Remote                    Network\n\
-------------------------------------------------------------------------------\n\
OK           V:        \\\\server1\\share1          Microsoft Windows Network\n";

    struct FakeTable {
        report: Option<String>,
        mask: u32,
        connect_status: u32,
        queries: Cell<u32>,
        connects: RefCell<Vec<(DriveLetter, String)>>,
    }

    impl FakeTable {
        fn new(report: &str, mask: u32) -> Self {
            Self {
                report: Some(report.to_string()),
                mask,
                connect_status: 0,
                queries: Cell::new(0),
                connects: RefCell::new(Vec::new()),
            }
        }

        fn failing_query() -> Self {
            Self {
                report: None,
                ..Self::new("", 0)
            }
        }
    }

    impl MountTable for FakeTable {
        fn mappings(&self) -> io::Result<String> {
            self.queries.set(self.queries.get() + 1);
            self.report
                .clone()
                .ok_or_else(|| io::Error::other("net use unavailable"))
        }

        fn volume_mask(&self) -> u32 {
            self.mask
        }

        fn connect(&self, letter: DriveLetter, remote: &str) -> u32 {
            self.connects
                .borrow_mut()
                .push((letter, remote.to_string()));
            self.connect_status
        }
    }

    fn letter(c: char) -> DriveLetter {
        DriveLetter::new(c).unwrap()
    }

    #[test]
    fn reuses_an_existing_mapping() {
        let table = FakeTable::new(REPORT, 0);
        let mapper = DriveMapper::new(&table);

        let resolved = mapper.resolve(r"\\server1\share1\docs").unwrap();
        assert_eq!(resolved.letter, letter('V'));
        assert_eq!(resolved.local_path, r"V:\docs");
        assert!(table.connects.borrow().is_empty());
    }

    #[test]
    fn repeated_resolution_is_idempotent() {
        let table = FakeTable::new(REPORT, 0);
        let mapper = DriveMapper::new(&table);

        let first = mapper.resolve(r"\\server1\share1\docs").unwrap();
        let second = mapper.resolve(r"\\server1\share1\docs").unwrap();
        assert_eq!(first, second);
        assert!(table.connects.borrow().is_empty());
    }

    #[test]
    fn maps_the_highest_free_letter_on_a_miss() {
        let table = FakeTable::new(REPORT, 0);
        let mapper = DriveMapper::new(&table);

        let resolved = mapper.resolve(r"\\server2\share2").unwrap();
        assert_eq!(resolved.letter, letter('Z'));
        assert_eq!(resolved.local_path, "Z:\\");
        assert_eq!(
            *table.connects.borrow(),
            vec![(letter('Z'), r"\\server2\share2".to_string())],
        );
    }

    #[test]
    fn skips_used_letters_when_allocating() {
        // Z in use: bit 25.
        let table = FakeTable::new("", 1 << 25);
        let mapper = DriveMapper::new(&table);

        let resolved = mapper.resolve(r"\\server2\share2\a\b").unwrap();
        assert_eq!(resolved.letter, letter('Y'));
        assert_eq!(resolved.local_path, r"Y:\a\b");
    }

    #[test]
    fn rejected_mapping_is_reported_with_its_status() {
        let mut table = FakeTable::new("", 0);
        table.connect_status = 2;
        let mapper = DriveMapper::new(&table);

        match mapper.resolve(r"\\server2\share2") {
            Err(Unresolved::MappingFailed {
                letter: l,
                remote,
                status,
            }) => {
                assert_eq!(l, letter('Z'));
                assert_eq!(remote, r"\\server2\share2");
                assert_eq!(status, 2);
            }
            other => panic!("expected MappingFailed, got {other:?}"),
        }
        // One attempt, no retry with the next letter.
        assert_eq!(table.connects.borrow().len(), 1);
    }

    #[test]
    fn local_paths_skip_the_os_entirely() {
        let table = FakeTable::new(REPORT, 0);
        let mapper = DriveMapper::new(&table);

        match mapper.resolve(r"C:\local\path") {
            Err(Unresolved::NotNetworkPath) => {}
            other => panic!("expected NotNetworkPath, got {other:?}"),
        }
        assert_eq!(table.queries.get(), 0);
        assert!(table.connects.borrow().is_empty());
    }

    #[test]
    fn query_failure_propagates_with_its_cause() {
        let table = FakeTable::failing_query();
        let mapper = DriveMapper::new(&table);

        match mapper.resolve(r"\\server1\share1") {
            Err(Unresolved::MappingQuery(cause)) => {
                assert_eq!(cause.to_string(), "net use unavailable");
            }
            other => panic!("expected MappingQuery, got {other:?}"),
        }
        assert!(table.connects.borrow().is_empty());
    }

    #[test]
    fn unparsable_network_paths_are_reported() {
        let table = FakeTable::new(REPORT, 0);
        let mapper = DriveMapper::new(&table);

        match mapper.resolve(r"\\serveronly") {
            Err(Unresolved::UnparsablePath) => {}
            other => panic!("expected UnparsablePath, got {other:?}"),
        }
        assert!(table.connects.borrow().is_empty());
    }

    #[test]
    fn exhausted_letters_are_reported() {
        let table = FakeTable::new("", 0x03FF_FFFF);
        let mapper = DriveMapper::new(&table);

        match mapper.resolve(r"\\server2\share2") {
            Err(Unresolved::NoFreeLetters) => {}
            other => panic!("expected NoFreeLetters, got {other:?}"),
        }
        assert!(table.connects.borrow().is_empty());
    }
}

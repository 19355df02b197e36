use std::io;

use crate::{DriveLetter, MountTable};

/// Stub for platforms without drive letters.
///
/// Enumeration reports itself unsupported and the bitmask claims every letter
/// is in use, so resolution always degrades to the raw path.
pub struct SystemMounts;

impl MountTable for SystemMounts {
    fn mappings(&self) -> io::Result<String> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }

    fn volume_mask(&self) -> u32 {
        u32::MAX
    }

    fn connect(&self, _letter: DriveLetter, _remote: &str) -> u32 {
        1
    }
}

use std::io;
use std::process::Command;

use windows::Win32::Storage::FileSystem::GetLogicalDrives;

use crate::{DriveLetter, MountTable};

/// The live OS mount table.
///
/// Mapping enumeration and creation go through `net use`, whose report text
/// and exit status match what [`MountTable`] promises; the volume bitmask
/// comes straight from the Win32 `GetLogicalDrives` call.
pub struct SystemMounts;

impl MountTable for SystemMounts {
    fn mappings(&self) -> io::Result<String> {
        let output = Command::new("net").arg("use").output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "net use exited with {}",
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn volume_mask(&self) -> u32 {
        unsafe { GetLogicalDrives() }
    }

    fn connect(&self, letter: DriveLetter, remote: &str) -> u32 {
        let status = Command::new("net")
            .arg("use")
            .arg(letter.to_string())
            .arg(remote)
            .status();
        match status {
            Ok(status) => status.code().unwrap_or(1) as u32,
            Err(_) => 1,
        }
    }
}

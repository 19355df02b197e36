use std::error::Error;

use resolve_unc::{DriveMapper, platform::SystemMounts};

fn main() -> Result<(), Box<dyn Error>> {
    let mapper = DriveMapper::new(SystemMounts);

    for raw in [r"\\server\share\docs", r"\\server\share", r"C:\Windows"] {
        match mapper.resolve(raw) {
            Ok(resolved) => println!("{raw} -> {} on {}", resolved.local_path, resolved.letter),
            Err(reason) => println!("{raw} -> unresolved: {reason}"),
        }
    }

    Ok(())
}

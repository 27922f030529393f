//! Fmt command implementation
//!
//! Re-encodes each grid file so it matches what a save would write.

use std::fs;
use std::io;
use std::process::ExitCode;

use crate::codec::{decode, encode};
use crate::store::GridKind;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the fmt command
pub fn run_fmt(session: &Session, check: bool) -> ExitCode {
    let column_height = session.config.world.column_height;
    let mut needs_formatting = false;

    for kind in GridKind::ALL {
        let path = session.paths.grid(kind);
        let original = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                eprintln!("Error: Cannot read '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let formatted = encode(&decode(&original, kind.fixed_height(column_height)));
        if formatted == original {
            continue;
        }

        if check {
            println!("{}: needs formatting", path.display());
            needs_formatting = true;
        } else if let Err(e) = fs::write(path, &formatted) {
            eprintln!("Error: Cannot write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        } else {
            println!("Formatted {} grid: {}", kind, path.display());
        }
    }

    if needs_formatting {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

//! Standalone unmask binary for selector-lockr
//!
//! Minimal binary that restores a hashed file to stdout using its map file.
//!
//! Usage:
//!   unmask <file.hashed.ext> [--map <map.yaml>]
//!
//! Map lookup:
//!   1. --map argument (if given)
//!   2. <stem>.map.yaml next to the hashed file

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Binding structure (subset of the full SelectorMap for minimal deps)
#[derive(serde::Deserialize)]
struct Binding {
    original: String,
    token: String,
}

#[derive(serde::Deserialize)]
struct SelectorMap {
    ids: Vec<Binding>,
    classes: Vec<Binding>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: unmask <file.hashed.ext> [--map <map.yaml>]");
        process::exit(1);
    }

    let file_path = PathBuf::from(&args[1]);

    // Parse --map argument
    let map_path = if args.len() >= 4 && args[2] == "--map" {
        PathBuf::from(&args[3])
    } else {
        derive_map_path(&file_path)?
    };

    let map_content = fs::read_to_string(&map_path)
        .map_err(|e| format!("Failed to read map file {:?}: {}", map_path, e))?;

    let map: SelectorMap = serde_yaml::from_str(&map_content)
        .map_err(|e| format!("Failed to parse map file: {}", e))?;

    let hashed = fs::read_to_string(&file_path)
        .map_err(|e| format!("Failed to read hashed file {:?}: {}", file_path, e))?;

    // Tokens are 6-character hash-derived strings, so a bare global
    // replacement back to the original name is safe.
    let mut restored = hashed;
    for binding in map.ids.iter().chain(map.classes.iter()) {
        restored = restored.replace(&binding.token, &binding.original);
    }

    print!("{}", restored);

    Ok(())
}

/// Derive the sibling map path: `dist/index.hashed.html` -> `dist/index.map.yaml`
fn derive_map_path(file_path: &Path) -> Result<PathBuf, String> {
    let filename = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("Invalid file path: {:?}", file_path))?;

    let stem = match filename.find(".hashed") {
        Some(pos) if pos > 0 => &filename[..pos],
        _ => return Err(format!("Not a hashed file name: {}", filename)),
    };

    let map_path = file_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}.map.yaml", stem));

    if map_path.exists() {
        Ok(map_path)
    } else {
        Err(format!(
            "Map file not found. Expected at: {:?}\n\
             Or pass it explicitly with --map.",
            map_path
        ))
    }
}

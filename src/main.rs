use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use selector_lockr::{run, RewrittenBundle, Sha256Digester};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// selector-lockr - hash away your selectors
///
/// Rewrite ids and classes in an HTML file into short hashed tokens and
/// propagate the rewrite into the CSS/JS files that reference them.
#[derive(Parser)]
#[command(name = "selector-lockr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash all ids and classes of an HTML file and its CSS/JS companions
    Hash {
        /// Path to the HTML file
        html: PathBuf,

        /// CSS files referencing the HTML selectors
        #[arg(long)]
        css: Vec<PathBuf>,

        /// JS files referencing the HTML selectors
        #[arg(long)]
        js: Vec<PathBuf>,

        /// Directory to write the hashed files into (default: next to inputs)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write a <name>.map.yaml file pairing originals with tokens
        #[arg(long, default_value_t = false)]
        map: bool,
    },

    /// Show version information
    Version,

    /// Clean up all selector-lockr generated files (*.hashed.*, *.map.yaml)
    Clean {
        /// Path to directory to clean
        path: PathBuf,
    },
}

/// Output name for a hashed copy: `index.html` becomes `index.hashed.html`.
fn hashed_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.hashed.{}", stem, ext),
        None => format!("{}.hashed", stem),
    }
}

/// Comment header prepended to map files
fn map_header() -> String {
    "# selector-lockr map file\n\
     # Pairs each original id/class with its hashed token. Anyone holding\n\
     # this file can restore the original names - keep it out of releases.\n"
        .to_string()
}

fn write_output(path: &Path, out_dir: Option<&Path>, content: &str) -> Result<PathBuf> {
    let target_dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let target = target_dir.join(hashed_filename(path));
    fs::write(&target, content)
        .with_context(|| format!("Failed to write hashed file: {:?}", target))?;

    Ok(target)
}

fn handle_hash(
    html: PathBuf,
    css: Vec<PathBuf>,
    js: Vec<PathBuf>,
    out: Option<PathBuf>,
    map: bool,
) -> Result<()> {
    if !html.is_file() {
        anyhow::bail!("HTML path must be an existing file: {:?}", html);
    }
    for path in css.iter().chain(js.iter()) {
        if !path.is_file() {
            anyhow::bail!("Path must be an existing file: {:?}", path);
        }
    }

    if let Some(dir) = &out {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {:?}", dir))?;
    }

    println!("Hashing: {:?}", html);
    println!("  CSS files: {}", css.len());
    println!("  JS files: {}", js.len());

    // Step 1: Read all inputs
    let markup = fs::read_to_string(&html)
        .with_context(|| format!("Failed to read HTML file: {:?}", html))?;

    let mut styles = Vec::new();
    for path in &css {
        styles.push(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read CSS file: {:?}", path))?,
        );
    }

    let mut scripts = Vec::new();
    for path in &js {
        scripts.push(
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read JS file: {:?}", path))?,
        );
    }

    // Step 2: Run the id and class passes
    let bundle = run(&markup, &styles, &scripts, &Sha256Digester)?;
    println!(
        "✓ Hashed {} ids and {} classes",
        bundle.ids.len(),
        bundle.classes.len()
    );

    // Step 3: Write the rewritten files
    let out_dir = out.as_deref();
    let target = write_output(&html, out_dir, &bundle.markup)?;
    println!("✓ Hashed file: {:?}", target);

    for (path, content) in css.iter().zip(&bundle.styles) {
        let target = write_output(path, out_dir, content)?;
        println!("✓ Hashed file: {:?}", target);
    }

    for (path, content) in js.iter().zip(&bundle.scripts) {
        let target = write_output(path, out_dir, content)?;
        println!("✓ Hashed file: {:?}", target);
    }

    // Step 4: Write the map file if requested
    if map {
        let map_path = write_map(&html, out_dir, &bundle)?;
        println!("✓ Map file: {:?}", map_path);
    }

    println!();
    println!("Done! Ship the hashed files; originals are untouched.");

    Ok(())
}

fn write_map(html: &Path, out_dir: Option<&Path>, bundle: &RewrittenBundle) -> Result<PathBuf> {
    let stem = html
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let target_dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => html
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    let map_path = target_dir.join(format!("{}.map.yaml", stem));
    let yaml = serde_yaml::to_string(&bundle.map()).context("Failed to serialize map file")?;
    fs::write(&map_path, format!("{}{}", map_header(), yaml))
        .with_context(|| format!("Failed to write map file: {:?}", map_path))?;

    Ok(map_path)
}

/// True for files this tool generates: `*.hashed.*` and `*.map.yaml`.
fn is_generated_file(filename: &str) -> bool {
    filename.contains(".hashed") || filename.ends_with(".map.yaml")
}

fn handle_clean(path: PathBuf) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {:?}", path);
    }

    if !path.is_dir() {
        anyhow::bail!("Path must be a directory: {:?}", path);
    }

    let mut files_to_delete: Vec<PathBuf> = Vec::new();

    fn scan_directory(dir: &PathBuf, files: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                scan_directory(&path, files)?;
            } else if path.is_file() {
                let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                if is_generated_file(filename) {
                    files.push(path.clone());
                }
            }
        }
        Ok(())
    }

    scan_directory(&path, &mut files_to_delete)?;

    if files_to_delete.is_empty() {
        println!("No selector-lockr files found in {:?}", path);
        return Ok(());
    }

    println!("selector-lockr clean");
    println!("WARNING: This will permanently delete:");
    println!();

    // Group by directory for cleaner display
    let mut by_dir: HashMap<PathBuf, Vec<String>> = HashMap::new();
    for file in &files_to_delete {
        let parent = file.parent().unwrap_or(&path).to_path_buf();
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        by_dir.entry(parent).or_default().push(filename);
    }

    for (dir, filenames) in &by_dir {
        println!("   {:?}", dir);
        for f in filenames {
            println!("      - {}", f);
        }
    }

    println!();
    println!(
        "Summary: {} files in {} directories",
        files_to_delete.len(),
        by_dir.len()
    );
    println!();
    println!("This action cannot be undone!");
    println!();
    print!("Type 'yes' to confirm: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim() != "yes" {
        println!("Aborted.");
        return Ok(());
    }

    let mut deleted = 0;
    let mut failed = 0;

    for file in &files_to_delete {
        match fs::remove_file(file) {
            Ok(_) => {
                deleted += 1;
            }
            Err(e) => {
                eprintln!("Failed to delete {:?}: {}", file, e);
                failed += 1;
            }
        }
    }

    println!();
    println!("✓ Deleted {} files", deleted);
    if failed > 0 {
        println!("✗ Failed to delete {} files", failed);
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            html,
            css,
            js,
            out,
            map,
        } => handle_hash(html, css, js, out, map),
        Commands::Clean { path } => handle_clean(path),
        Commands::Version => {
            println!("selector-lockr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

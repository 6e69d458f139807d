//! Writes synthetic snapshots to disk for offline viewing.
//!
//! ```text
//! snapview-fixtures --view devices --seed 7 --out devices.json
//! snapview-fixtures --view game --count 20 --brotli --out frames/game.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use snapview::config::LoggingConfig;
use snapview::transport::{write_snapshot, DemoSource};
use snapview::ViewKind;

#[derive(Parser, Debug)]
#[command(name = "snapview-fixtures", version, about = "Write demo snapshot files")]
struct Args {
    /// Snapshot family: game, devices or system
    #[arg(long, default_value = "game")]
    view: ViewKind,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output file; numbered when --count is above one
    #[arg(long)]
    out: PathBuf,

    /// Number of consecutive snapshots to write
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Brotli-compress the output and add a .br extension
    #[arg(long)]
    brotli: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    snapview::logging::init(&LoggingConfig::default());

    let out = if args.brotli { with_brotli_extension(&args.out) } else { args.out.clone() };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut source = DemoSource::new(args.view, args.seed);
    for index in 0..args.count.max(1) {
        let path = if args.count > 1 { numbered_path(&out, index) } else { out.clone() };
        let snapshot = source.next_value()?;
        write_snapshot(&path, &snapshot).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(view = %args.view, path = %path.display(), "snapshot written");
    }

    println!("Wrote {} {} snapshot(s) to {}", args.count.max(1), args.view, out.display());
    Ok(())
}

/// Appends `.br` unless the path already ends with it.
fn with_brotli_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "br") {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".br");
    PathBuf::from(name)
}

/// `frames/game.json.br` -> `frames/game-0003.json.br`
fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let numbered = match name.split_once('.') {
        Some((stem, rest)) => format!("{}-{:04}.{}", stem, index, rest),
        None => format!("{}-{:04}", name, index),
    };
    path.with_file_name(numbered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brotli_extension_added_once() {
        assert_eq!(with_brotli_extension(Path::new("a.json")), PathBuf::from("a.json.br"));
        assert_eq!(with_brotli_extension(Path::new("a.json.br")), PathBuf::from("a.json.br"));
    }

    #[test]
    fn test_numbered_path_keeps_extensions() {
        assert_eq!(
            numbered_path(Path::new("frames/game.json.br"), 3),
            PathBuf::from("frames/game-0003.json.br")
        );
        assert_eq!(numbered_path(Path::new("out"), 12), PathBuf::from("out-0012"));
    }
}

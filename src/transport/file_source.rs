//! Snapshot files on disk.
//!
//! A file source re-reads its file on every poll, so an external process
//! rewriting the file drives the dashboard the same way a server would.
//! Files ending in `.br` are Brotli-compressed.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use brotli::enc::BrotliEncoderParams;
use brotli::{CompressorWriter, Decompressor};
use serde::Serialize;

use crate::error::FeedResult;
use crate::traits::SnapshotSource;

pub fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "br")
}

/// Reads a whole snapshot file, decompressing `.br` files.
pub fn read_snapshot_bytes(path: &Path) -> FeedResult<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader: Box<dyn Read> = if is_compressed(path) {
        Box::new(Decompressor::new(file, 4096))
    } else {
        Box::new(file)
    };
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Writes `snapshot` as JSON, compressing when `path` ends in `.br`.
pub fn write_snapshot<T: Serialize>(path: &Path, snapshot: &T) -> FeedResult<()> {
    let file = File::create(path)?;
    let buf_writer = BufWriter::new(file);
    let mut writer: Box<dyn Write> = if is_compressed(path) {
        let params = BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        };
        Box::new(CompressorWriter::with_params(buf_writer, 4096, &params))
    } else {
        Box::new(buf_writer)
    };
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.flush()?;
    Ok(())
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&mut self) -> FeedResult<Vec<u8>> {
        read_snapshot_bytes(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::snapshot::GameSnapshot;

    #[test]
    fn test_plain_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        let snapshot = GameSnapshot {
            score: 7,
            ..GameSnapshot::default()
        };
        write_snapshot(&path, &snapshot).unwrap();

        let mut source = FileSource::new(&path);
        let decoded: GameSnapshot = serde_json::from_slice(&source.fetch().unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_brotli_file_is_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json.br");
        write_snapshot(&path, &GameSnapshot::default()).unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert!(serde_json::from_slice::<serde_json::Value>(&raw).is_err());

        let bytes = FileSource::new(&path).fetch().unwrap();
        let decoded: GameSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded.lives, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FileSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.fetch(), Err(FeedError::Io(_))));
    }

    #[test]
    fn test_rereads_on_every_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        let mut source = FileSource::new(&path);

        std::fs::write(&path, r#"{"score":1}"#).unwrap();
        assert_eq!(source.fetch().unwrap(), br#"{"score":1}"#.to_vec());
        std::fs::write(&path, r#"{"score":2}"#).unwrap();
        assert_eq!(source.fetch().unwrap(), br#"{"score":2}"#.to_vec());
    }
}

//! Snapshot file backend
//!
//! Writes the whole record sequence to a single file, replacing the previous
//! snapshot atomically via a temp file + rename.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, TreeDbError};
use crate::record::Record;

use super::{Durable, FOOTER_SIZE, HEADER_SIZE, MAGIC, VERSION};

/// On-disk snapshot of a record sequence
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    /// Target file path
    path: PathBuf,
}

impl SnapshotFile {
    /// Bind to a path; nothing is touched on disk until `persist`/`restore`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the in-progress write
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Encode `records` into a complete snapshot image
    fn encode(records: &[Record]) -> Result<Vec<u8>> {
        let body = bincode::serialize(records)?;
        let body_len = u32::try_from(body.len()).map_err(|_| {
            TreeDbError::Serialization(format!(
                "Snapshot body too large: {} bytes",
                body.len()
            ))
        })?;

        let mut image = Vec::with_capacity(HEADER_SIZE + body.len() + FOOTER_SIZE);

        // Header
        image.extend_from_slice(MAGIC);
        image.extend_from_slice(&VERSION.to_le_bytes());
        image.extend_from_slice(&(records.len() as u64).to_le_bytes());

        // Body
        image.extend_from_slice(&body);

        // Footer
        image.extend_from_slice(&body_len.to_le_bytes());
        image.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());

        Ok(image)
    }

    /// Validate and decode a snapshot image
    fn decode(image: &[u8]) -> Result<Vec<Record>> {
        if image.len() < HEADER_SIZE + FOOTER_SIZE {
            return Err(TreeDbError::Corruption(format!(
                "Snapshot truncated: {} bytes, need at least {}",
                image.len(),
                HEADER_SIZE + FOOTER_SIZE
            )));
        }

        // Header
        let (header, rest) = image.split_at(HEADER_SIZE);
        if &header[0..4] != MAGIC {
            return Err(TreeDbError::Corruption(format!(
                "Invalid snapshot magic: expected TRDB, got {:?}",
                &header[0..4]
            )));
        }

        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != VERSION {
            return Err(TreeDbError::Corruption(format!(
                "Unsupported snapshot version: {}",
                version
            )));
        }

        let mut count_bytes = [0u8; 8];
        count_bytes.copy_from_slice(&header[6..14]);
        let expected_count = u64::from_le_bytes(count_bytes);

        // Footer
        let (body, footer) = rest.split_at(rest.len() - FOOTER_SIZE);
        let body_len = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]) as usize;
        let body_crc = u32::from_le_bytes([footer[4], footer[5], footer[6], footer[7]]);

        if body_len != body.len() {
            return Err(TreeDbError::Corruption(format!(
                "Snapshot body length mismatch: footer says {}, found {}",
                body_len,
                body.len()
            )));
        }

        let actual_crc = crc32fast::hash(body);
        if actual_crc != body_crc {
            return Err(TreeDbError::Corruption(format!(
                "Snapshot checksum mismatch: expected {:08x}, got {:08x}",
                body_crc, actual_crc
            )));
        }

        // Body
        let records: Vec<Record> = bincode::deserialize(body).map_err(|e| {
            TreeDbError::Corruption(format!("Snapshot body undecodable: {}", e))
        })?;

        if records.len() as u64 != expected_count {
            return Err(TreeDbError::Corruption(format!(
                "Snapshot record count mismatch: header says {}, decoded {}",
                expected_count,
                records.len()
            )));
        }

        Ok(records)
    }

    fn write_temp(&self, temp_path: &Path, image: &[u8]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(temp_path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(image)?;
        writer.flush()?;

        let file = writer
            .into_inner()
            .map_err(|e| TreeDbError::Io(e.into_error()))?;
        file.sync_all()?;

        Ok(())
    }
}

impl Durable for SnapshotFile {
    fn persist(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let image = Self::encode(records)?;
        let temp_path = self.temp_path();

        let written = self
            .write_temp(&temp_path, &image)
            .and_then(|()| fs::rename(&temp_path, &self.path).map_err(TreeDbError::from));

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove partial snapshot");
            }
            return Err(e);
        }

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            bytes = image.len(),
            "Snapshot written"
        );
        Ok(())
    }

    fn restore(&self) -> Result<Option<Vec<Record>>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No snapshot found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut image = Vec::new();
        file.read_to_end(&mut image)?;

        let records = Self::decode(&image)?;
        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Snapshot restored"
        );
        Ok(Some(records))
    }
}

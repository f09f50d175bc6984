//! Size-based rotating log file.
//!
//! # Responsibilities
//! - Append to the active log file, tracking its size
//! - Rotate the file before a write would push it past the size limit
//! - Prune rotated files by count and by age
//! - Gzip rotated files that are kept
//!
//! # Design Decisions
//! - Backups live next to the active file as `<stem>-<UTC timestamp><ext>`
//! - Backup housekeeping failures go to stderr and never fail the write
//! - Not internally synchronized: owned by the single non-blocking worker

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use flate2::{write::GzEncoder, Compression};

use crate::config::LoggingConfig;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";
const MEGABYTE: u64 = 1024 * 1024;
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Limits applied to a [`RotatingFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum size of the active file in bytes.
    pub max_size: u64,
    /// Rotated files to keep (0 = unlimited).
    pub max_backups: usize,
    /// Rotated files older than this are removed.
    pub max_age: Option<Duration>,
    /// Gzip rotated files.
    pub compress: bool,
}

impl RotationPolicy {
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            max_size: config.max_size_mb.saturating_mul(MEGABYTE),
            max_backups: config.max_backups,
            max_age: (config.max_age_days > 0)
                .then(|| DAY.saturating_mul(config.max_age_days.min(u32::MAX as u64) as u32)),
            compress: config.compress,
        }
    }
}

/// A rotated file found next to the active one.
#[derive(Debug)]
struct Backup {
    path: PathBuf,
    rotated_at: DateTime<Utc>,
    compressed: bool,
}

/// An append-only log file that rotates itself by size.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    file: File,
    size: u64,
}

impl RotatingFile {
    /// Open (or create) the active file, creating parent directories.
    ///
    /// An existing file is appended to and its size counts toward the limit.
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let file = open_append(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            policy,
            file,
            size,
        })
    }

    /// Bytes currently in the active file.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Move the active file aside and start a fresh one.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let backup = self.backup_name(Utc::now());
        fs::rename(&self.path, &backup)?;
        self.file = open_append(&self.path)?;
        self.size = 0;

        if let Err(e) = self.mill() {
            eprintln!("log rotation: failed to process backups of {}: {}", self.path.display(), e);
        }
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// `("auth-", ".log")` for `auth.log`.
    fn name_parts(&self) -> (String, String) {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = self
            .path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        (format!("{stem}-"), ext)
    }

    /// First free backup name at or after `at` and newer than every existing
    /// backup, stepping by one millisecond.
    fn backup_name(&self, mut at: DateTime<Utc>) -> PathBuf {
        let newest = self
            .backups()
            .ok()
            .and_then(|backups| backups.first().map(|b| b.rotated_at));
        if let Some(newest) = newest {
            if at <= newest {
                at = newest + TimeDelta::milliseconds(1);
            }
        }

        let (prefix, ext) = self.name_parts();
        loop {
            let name = format!("{prefix}{}{ext}", at.format(BACKUP_TIME_FORMAT));
            let candidate = self.dir().join(&name);
            let compressed = self.dir().join(format!("{name}{COMPRESS_SUFFIX}"));
            if !candidate.exists() && !compressed.exists() {
                return candidate;
            }
            at += TimeDelta::milliseconds(1);
        }
    }

    /// Rotated files, newest first.
    fn backups(&self) -> io::Result<Vec<Backup>> {
        let (prefix, ext) = self.name_parts();
        let mut backups = Vec::new();

        for entry in fs::read_dir(self.dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(rest) = name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let (rest, compressed) = match rest.strip_suffix(COMPRESS_SUFFIX) {
                Some(rest) => (rest, true),
                None => (rest, false),
            };
            let Some(stamp) = rest.strip_suffix(ext.as_str()) else {
                continue;
            };
            let Ok(rotated_at) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT) else {
                continue;
            };

            backups.push(Backup {
                path: entry.path(),
                rotated_at: rotated_at.and_utc(),
                compressed,
            });
        }

        backups.sort_by(|a, b| b.rotated_at.cmp(&a.rotated_at));
        Ok(backups)
    }

    /// Apply the age and count limits, then compress what remains.
    fn mill(&self) -> io::Result<()> {
        let now = Utc::now();

        for (index, backup) in self.backups()?.into_iter().enumerate() {
            let over_count = self.policy.max_backups > 0 && index >= self.policy.max_backups;
            let expired = self.policy.max_age.is_some_and(|max_age| {
                now.signed_duration_since(backup.rotated_at)
                    .to_std()
                    .is_ok_and(|age| age > max_age)
            });

            if over_count || expired {
                fs::remove_file(&backup.path)?;
            } else if self.policy.compress && !backup.compressed {
                compress_file(&backup.path)?;
            }
        }
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.policy.max_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write length {} exceeds maximum file size {}",
                    len, self.policy.max_size
                ),
            ));
        }

        if self.size + len > self.policy.max_size {
            self.rotate()?;
        }

        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn compress_file(src: &Path) -> io::Result<()> {
    let mut dst = src.as_os_str().to_owned();
    dst.push(COMPRESS_SUFFIX);

    let mut input = File::open(src)?;
    let mut encoder = GzEncoder::new(File::create(&dst)?, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.sync_all()?;

    fs::remove_file(src)
}

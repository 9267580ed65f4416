use crate::errors::AppError;
use crate::models::Inquiry;
use chrono::NaiveDateTime;
use fs2::FileExt;
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::debug;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub struct InquiryLog {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl InquiryLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path_for(&self, at: NaiveDateTime) -> PathBuf {
        self.dir
            .join(format!("inquiries_{}.txt", at.format("%Y-%m")))
    }

    pub async fn append(&self, inquiry: &Inquiry, at: NaiveDateTime) -> Result<PathBuf, AppError> {
        let line = format_record(inquiry, at).map_err(AppError::internal)?;
        let path = self.path_for(at);

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.dir).await?;
        let target = path.clone();
        tokio::task::spawn_blocking(move || append_locked(&target, line.as_bytes()))
            .await
            .map_err(AppError::internal)??;

        debug!(path = %path.display(), "inquiry appended");
        Ok(path)
    }
}

// Exclusive lock covers other processes appending to the same month file.
fn append_locked(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;
    let written = file.write_all(bytes).and_then(|()| file.flush());
    let unlocked = FileExt::unlock(&file);
    written?;
    unlocked
}

pub fn format_record(inquiry: &Inquiry, at: NaiveDateTime) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(inquiry)?;
    Ok(format!("{} | {json}\n", at.format(TIMESTAMP_FORMAT)))
}

pub fn parse_record(line: &str) -> Option<(String, Inquiry)> {
    let (stamp, json) = line.split_once(" | ")?;
    let inquiry = serde_json::from_str(json).ok()?;
    Some((stamp.to_string(), inquiry))
}

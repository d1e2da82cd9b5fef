use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("index {index} out of range for history of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Cursor over the defect history for the full-screen viewer.
///
/// `None` means closed. While open the cursor stays inside `[0, len - 1]`;
/// navigation saturates at both ends rather than wrapping.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ModalViewer {
    current: Option<usize>,
}

impl ModalViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn open(&mut self, index: usize, len: usize) -> Result<(), ViewerError> {
        if index >= len {
            return Err(ViewerError::IndexOutOfRange { index, len });
        }
        self.current = Some(index);
        Ok(())
    }

    /// Move the cursor by `delta`, saturating at the first/last entry.
    /// No-op while closed.
    pub fn navigate(&mut self, delta: i64, len: usize) {
        if len == 0 {
            self.current = None;
            return;
        }
        if let Some(current) = self.current {
            let target = current as i64 + delta;
            let clamped = target.clamp(0, len as i64 - 1) as usize;
            self.current = Some(clamped);
        }
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// The "previous" control is disabled exactly at the first entry.
    pub fn at_first(&self) -> bool {
        self.current == Some(0)
    }

    /// The "next" control is disabled exactly at the last entry.
    pub fn at_last(&self, len: usize) -> bool {
        matches!(self.current, Some(current) if current + 1 == len)
    }
}

/// Download filename for the currently displayed image:
/// the ISO timestamp with ':' and 'T' replaced by dashes.
pub fn download_filename(now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y-%m-%dT%H:%M:%S").to_string();
    format!("defect_{}.jpg", stamp.replace([':', 'T'], "-"))
}

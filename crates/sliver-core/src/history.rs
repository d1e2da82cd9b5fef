use chrono::Local;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Maximum number of entries kept in the thumbnail history.
pub const HISTORY_CAP: usize = 10;

/// Placeholder defect images seeded once at startup.
pub const SAMPLE_IMAGES: &[&str] = &[
    "https://placehold.co/640x480/ff4d6d/white?text=EDGE+SLIVER",
    "https://placehold.co/640x480/ef233c/fff?text=DENT+DEFECT",
    "https://picsum.photos/seed/metaldefect1/640/480",
    "https://placehold.co/640x480/c1121f/white?text=SCRATCH+DEFECT",
    "https://picsum.photos/seed/industrialdefect/640/480",
    "https://placehold.co/640x480/d00000/fff?text=CRACK+DETECTED",
];

#[derive(Debug, Clone, Serialize)]
pub struct DefectEntry {
    /// Display timestamp fixed at creation ("Sample" for seeded entries).
    pub captured_at: String,
    pub image_source: String,
    pub sample: bool,
}

/// Ordered defect-thumbnail history, newest first.
///
/// Live entries are inserted at the front; once the sequence exceeds the cap
/// the back entry is evicted. Seeded sample entries share the same cap as
/// live entries, so a long session eventually crowds them out.
#[derive(Debug, Clone)]
pub struct DefectHistory {
    entries: VecDeque<DefectEntry>,
    cap: usize,
}

impl DefectHistory {
    /// History seeded with the fixed sample set, default cap.
    pub fn seeded() -> Self {
        Self::seeded_with_cap(HISTORY_CAP)
    }

    pub fn seeded_with_cap(cap: usize) -> Self {
        let mut entries = VecDeque::with_capacity(cap + 1);
        for src in SAMPLE_IMAGES {
            entries.push_back(DefectEntry {
                captured_at: "Sample".to_string(),
                image_source: src.to_string(),
                sample: true,
            });
        }
        Self { entries, cap }
    }

    /// Insert a live entry at the front, evicting the oldest entry from the
    /// back if the sequence exceeds the cap.
    pub fn push_live(&mut self, image_source: impl Into<String>) {
        let entry = DefectEntry {
            captured_at: Local::now().format("%H:%M:%S").to_string(),
            image_source: image_source.into(),
            sample: false,
        };
        self.entries.push_front(entry);
        while self.entries.len() > self.cap {
            if let Some(evicted) = self.entries.pop_back() {
                debug!("Evicted defect entry from history: {}", evicted.image_source);
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&DefectEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn entries(&self) -> impl Iterator<Item = &DefectEntry> {
        self.entries.iter()
    }
}

impl Default for DefectHistory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_history() {
        let history = DefectHistory::seeded();
        assert_eq!(history.len(), 6);
        assert!(history.entries().all(|e| e.sample));
        assert_eq!(history.get(0).unwrap().captured_at, "Sample");
    }

    #[test]
    fn test_live_entries_insert_at_front() {
        let mut history = DefectHistory::seeded();
        history.push_live("capture_a.jpg");
        history.push_live("capture_b.jpg");

        assert_eq!(history.get(0).unwrap().image_source, "capture_b.jpg");
        assert_eq!(history.get(1).unwrap().image_source, "capture_a.jpg");
        assert!(!history.get(0).unwrap().sample);
        // Seeds stay behind the live entries in seeded order
        assert_eq!(history.get(2).unwrap().image_source, SAMPLE_IMAGES[0]);
    }

    #[test]
    fn test_eviction_at_cap() {
        let mut history = DefectHistory::seeded();
        // 6 seeds + 5 live pushes would be 11; eviction trims to 10
        for i in 0..5 {
            history.push_live(format!("capture_{i}.jpg"));
        }
        assert_eq!(history.len(), HISTORY_CAP);
        // The back entry is now the fifth sample; the sixth was evicted
        let back = history.get(history.len() - 1).unwrap();
        assert_eq!(back.image_source, SAMPLE_IMAGES[4]);
    }

    #[test]
    fn test_live_entries_evict_samples_then_live() {
        let mut history = DefectHistory::seeded_with_cap(10);
        for i in 0..12 {
            history.push_live(format!("capture_{i}.jpg"));
        }
        assert_eq!(history.len(), 10);
        // All samples crowded out, oldest live entries gone from the back
        assert!(history.entries().all(|e| !e.sample));
        assert_eq!(history.get(0).unwrap().image_source, "capture_11.jpg");
        assert_eq!(history.get(9).unwrap().image_source, "capture_2.jpg");
    }
}

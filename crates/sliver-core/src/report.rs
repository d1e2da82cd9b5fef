use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<&'static str>,
    pub data: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Good,
    Bad,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub id: &'static str,
    pub timestamp: &'static str,
    pub camera: &'static str,
    /// Defect-type label; `None` renders as a placeholder for good parts.
    pub defect_type: Option<&'static str>,
    pub confidence_pct: f64,
    pub status: RowStatus,
}

/// Fixed datasets behind the report page: hourly defect time-series,
/// good/defective split, defect-type occurrence counts, and the last ten
/// inspection rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub defects_by_hour: ChartSeries,
    pub outcome_split: ChartSeries,
    pub defect_types: ChartSeries,
    pub rows: Vec<ReportRow>,
}

impl ReportData {
    pub fn sample() -> Self {
        Self {
            defects_by_hour: ChartSeries {
                labels: vec![
                    "00", "02", "04", "06", "08", "10", "12", "14", "16", "18", "20", "22",
                ],
                data: vec![1, 3, 7, 12, 8, 4, 2, 5, 11, 9, 3, 1],
            },
            outcome_split: ChartSeries {
                labels: vec!["Good", "Defective"],
                data: vec![1187, 61],
            },
            defect_types: ChartSeries {
                labels: vec![
                    "Sliver Mark",
                    "Surface Scratch",
                    "Edge Dent",
                    "Oil Stain",
                    "Crack",
                ],
                data: vec![28, 15, 9, 6, 3],
            },
            rows: vec![
                row("0248", "22:41:03", "Camera 1", Some("Sliver Mark"), 96.2),
                row("0247", "22:38:51", "Camera 0", None, 98.8),
                row("0246", "22:35:22", "Camera 0", None, 99.1),
                row("0245", "22:31:14", "Camera 1", Some("Surface Scratch"), 91.4),
                row("0244", "22:28:09", "Camera 0", None, 97.7),
                row("0243", "22:22:50", "Camera 1", Some("Edge Dent"), 88.9),
                row("0242", "22:19:33", "Camera 0", None, 99.3),
                row("0241", "22:14:07", "Camera 0", None, 98.0),
                row("0240", "22:11:42", "Camera 1", Some("Oil Stain"), 93.5),
                row("0239", "22:07:18", "Camera 0", None, 97.2),
            ],
        }
    }
}

fn row(
    id: &'static str,
    timestamp: &'static str,
    camera: &'static str,
    defect_type: Option<&'static str>,
    confidence_pct: f64,
) -> ReportRow {
    let status = if defect_type.is_some() {
        RowStatus::Bad
    } else {
        RowStatus::Good
    };
    ReportRow {
        id,
        timestamp,
        camera,
        defect_type,
        confidence_pct,
        status,
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::candidate::FramingStatus;

/// One line of the run report: which candidate won for a slug and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub slug: String,
    pub chosen: PathBuf,
    pub status: FramingStatus,
    pub face_frac: f64,
    pub score: f64,
    pub acceptable: bool,
    pub out_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub ok: usize,
    pub too_close: usize,
    pub too_far: usize,
    pub no_face: usize,
}

/// Machine-readable record of a batch run, written next to the staging
/// files so a reviewer can audit the picks without rerunning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: ReportSummary,
    pub identities: Vec<IdentityRecord>,
}

impl RunReport {
    pub fn new(identities: Vec<IdentityRecord>) -> Self {
        let mut summary = ReportSummary {
            total: identities.len(),
            ..Default::default()
        };
        for record in &identities {
            match record.status {
                FramingStatus::Ok => summary.ok += 1,
                FramingStatus::TooClose => summary.too_close += 1,
                FramingStatus::TooFar => summary.too_far += 1,
                FramingStatus::NoFace => summary.no_face += 1,
                FramingStatus::FaceTooSmall | FramingStatus::MultiFace => {}
            }
        }
        Self {
            summary,
            identities,
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
        Ok(())
    }
}

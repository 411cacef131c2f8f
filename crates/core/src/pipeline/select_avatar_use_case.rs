use std::path::{Path, PathBuf};

use crate::analysis::analyzer::CandidateAnalyzer;
use crate::analysis::candidate::CandidateAssessment;
use crate::analysis::scoring;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::constants::TARGET_SIZE;

/// The winning candidate for one identity, with its final score.
#[derive(Debug, Clone)]
pub struct Selection {
    pub assessment: CandidateAssessment,
    pub score: f64,
    pub acceptable: bool,
}

/// Scores a group of candidate images, picks the best one, and writes
/// the square avatar crop for it.
///
/// Ties resolve to the earliest candidate in the group's numeric order;
/// a later candidate only wins with a strictly greater score.
pub struct SelectAvatarUseCase {
    analyzer: CandidateAnalyzer,
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
}

impl SelectAvatarUseCase {
    pub fn new(
        analyzer: CandidateAnalyzer,
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
    ) -> Self {
        Self {
            analyzer,
            reader,
            writer,
        }
    }

    pub fn analyzer(&self) -> &CandidateAnalyzer {
        &self.analyzer
    }

    /// Returns `Ok(None)` when no candidate in the group is readable.
    pub fn execute(
        &mut self,
        candidates: &[PathBuf],
        out_path: &Path,
    ) -> Result<Option<Selection>, Box<dyn std::error::Error>> {
        let mut best: Option<Selection> = None;
        for path in candidates {
            let Some(assessment) = self.analyzer.analyze(path) else {
                continue;
            };
            let score = scoring::score(&assessment);
            log::debug!(
                "{}: status={:?} score={score:.3}",
                path.display(),
                assessment.status
            );
            let beats_current = match &best {
                Some(current) => score > current.score,
                None => true,
            };
            if beats_current {
                let acceptable = assessment.acceptable();
                best = Some(Selection {
                    assessment,
                    score,
                    acceptable,
                });
            }
        }

        let Some(selection) = best else {
            return Ok(None);
        };

        let frame = self.reader.read(&selection.assessment.path)?;
        self.writer
            .write_cropped(out_path, &frame, &selection.assessment.crop, TARGET_SIZE)?;
        Ok(Some(selection))
    }
}

use std::path::Path;

use crate::pipeline::groups;
use crate::pipeline::report::{IdentityRecord, RunReport};
use crate::pipeline::select_avatar_use_case::SelectAvatarUseCase;
use crate::shared::constants::{CROPPED_SUBDIR, REPORT_FILENAME};

/// A group that produced no avatar; the batch keeps going regardless.
#[derive(Debug, Clone)]
pub struct IdentityError {
    pub slug: String,
    pub message: String,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub processed: usize,
    pub skipped: usize,
    pub errors: Vec<IdentityError>,
    pub report: RunReport,
}

/// Runs avatar selection over a whole staging directory.
///
/// Re-running is safe: a slug whose output already exists under
/// `cropped/` is skipped without touching the detector, so a partial
/// run can be resumed by invoking the batch again.
pub struct ProcessStagingUseCase {
    select: SelectAvatarUseCase,
}

impl ProcessStagingUseCase {
    pub fn new(select: SelectAvatarUseCase) -> Self {
        Self { select }
    }

    pub fn execute(&mut self, staging_dir: &Path) -> Result<BatchOutcome, Box<dyn std::error::Error>> {
        let groups = groups::discover_groups(staging_dir)?;
        log::info!("found {} identity group(s) in {}", groups.len(), staging_dir.display());

        if !self.select.analyzer().text_available() {
            log::warn!("text detection unavailable; text-overlay penalty disabled for this run");
        }

        let cropped_dir = staging_dir.join(CROPPED_SUBDIR);
        let mut processed = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();
        let mut identities = Vec::new();

        for (slug, candidates) in &groups {
            let out_path = cropped_dir.join(format!("{slug}.jpg"));
            if out_path.exists() {
                log::info!("{slug}: output exists, skipping");
                skipped += 1;
                continue;
            }

            match self.select.execute(candidates, &out_path) {
                Ok(Some(selection)) => {
                    let a = &selection.assessment;
                    if selection.acceptable {
                        log::info!(
                            "{slug}: chose {} (score {:.3})",
                            a.path.display(),
                            selection.score
                        );
                    } else {
                        log::info!(
                            "{slug}: chose {} (score {:.3}, fallback: status={:?})",
                            a.path.display(),
                            selection.score,
                            a.status
                        );
                    }
                    identities.push(IdentityRecord {
                        slug: slug.clone(),
                        chosen: a.path.clone(),
                        status: a.status,
                        face_frac: a.face_frac,
                        score: selection.score,
                        acceptable: selection.acceptable,
                        out_path: out_path.clone(),
                    });
                    processed += 1;
                }
                Ok(None) => {
                    let message =
                        format!("no readable candidate among {} file(s)", candidates.len());
                    log::error!("{slug}: {message}");
                    errors.push(IdentityError {
                        slug: slug.clone(),
                        message,
                    });
                }
                Err(e) => {
                    log::error!("{slug}: {e}");
                    errors.push(IdentityError {
                        slug: slug.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let report = RunReport::new(identities);
        if processed > 0 {
            report.write(&staging_dir.join(REPORT_FILENAME))?;
        } else {
            log::debug!("nothing processed, leaving any existing report untouched");
        }

        Ok(BatchOutcome {
            processed,
            skipped,
            errors,
            report,
        })
    }
}

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use headshot_core::analysis::analyzer::CandidateAnalyzer;
use headshot_core::detection::domain::face_detector::FaceDetector;
use headshot_core::detection::domain::text_detector::NullTextDetector;
use headshot_core::detection::infrastructure::onnx_blazeface_detector::OnnxBlazefaceDetector;
use headshot_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use headshot_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use headshot_core::pipeline::normalize_style_use_case::NormalizeStyleUseCase;
use headshot_core::pipeline::process_staging_use_case::ProcessStagingUseCase;
use headshot_core::pipeline::select_avatar_use_case::SelectAvatarUseCase;
use headshot_core::shared::constants::{
    BLAZEFACE_MODEL_NAME, BLAZEFACE_MODEL_URL, CROPPED_SUBDIR,
};
use headshot_core::shared::model_resolver;

/// Pick the best headshot per person and crop it to a square avatar.
#[derive(Parser)]
#[command(name = "headshot")]
struct Cli {
    /// Staging directory containing {slug}-{n}.jpg candidate files.
    #[arg(short, long, default_value = "headshots_staging")]
    staging_dir: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Use a local ONNX face model instead of the cached/downloaded one.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Equalize brightness and apply a uniform style across the finished
    /// avatars after cropping.
    #[arg(long)]
    normalize: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = build_detector(&cli)?;
    let analyzer = CandidateAnalyzer::new(
        Box::new(ImageFileReader::new()),
        detector,
        Box::new(NullTextDetector),
    );
    let select = SelectAvatarUseCase::new(
        analyzer,
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
    );
    let mut use_case = ProcessStagingUseCase::new(select);

    let outcome = use_case.execute(&cli.staging_dir)?;

    if cli.normalize {
        let cropped_dir = cli.staging_dir.join(CROPPED_SUBDIR);
        if cropped_dir.is_dir() {
            let count = NormalizeStyleUseCase::new().execute(&cropped_dir)?;
            log::info!("Normalized {count} avatar(s)");
        }
    }

    let summary = &outcome.report.summary;
    eprintln!(
        "Processed {} identit(ies), skipped {} (already cropped): {} ok, {} too_close, {} too_far, {} no_face",
        outcome.processed,
        outcome.skipped,
        summary.ok,
        summary.too_close,
        summary.too_far,
        summary.no_face
    );

    if !outcome.errors.is_empty() {
        for error in &outcome.errors {
            eprintln!("  {}: {}", error.slug, error.message);
        }
        return Err(format!("{} identit(ies) produced no avatar", outcome.errors.len()).into());
    }

    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let model_path = match &cli.model {
        Some(path) => path.clone(),
        None => {
            log::info!("Resolving model: {BLAZEFACE_MODEL_NAME}");
            let downloaded = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&downloaded);
            let path = model_resolver::resolve(
                BLAZEFACE_MODEL_NAME,
                BLAZEFACE_MODEL_URL,
                None,
                Some(Box::new(move |done, total| {
                    flag.store(true, Ordering::Relaxed);
                    download_progress(done, total);
                })),
            )?;
            // Terminate the progress line only if one was printed
            if downloaded.load(Ordering::Relaxed) {
                eprintln!();
            }
            path
        }
    };

    Ok(Box::new(OnnxBlazefaceDetector::new(
        &model_path,
        cli.confidence,
    )?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(model) = &cli.model {
        if !model.exists() {
            return Err(format!("Model file not found: {}", model.display()).into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = downloaded * 100 / total;
        eprint!("\rDownloading model: {pct}%");
    } else {
        eprint!("\rDownloading model: {downloaded} bytes");
    }
}

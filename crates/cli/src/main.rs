use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use raidlog_core::extraction::infrastructure::ffmpeg_frame_extractor::FfmpegFrameExtractor;
use raidlog_core::extraction::infrastructure::image_frame_source::ImageFrameSource;
use raidlog_core::output::infrastructure::file_kill_log::FileKillLog;
use raidlog_core::output::infrastructure::image_file_writer::ImageFileWriter;
use raidlog_core::parsing::domain::kill_line_matcher::MatchMode;
use raidlog_core::pipeline::extract_kills_use_case::{
    ExtractKillsUseCase, KillListRequest, PipelineOptions,
};
use raidlog_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use raidlog_core::recognition::infrastructure::contrast_preprocessor::ContrastPreprocessor;
use raidlog_core::recognition::infrastructure::tesseract_recognizer::TesseractRecognizer;
use raidlog_core::shared::output_layout::OutputLayout;
use raidlog_core::shared::region_of_interest::RegionOfInterest;
use raidlog_core::shared::settings::Settings;
use raidlog_core::shared::timestamp::parse_timestamp;

/// Extract end-of-raid kill lists from recorded raid videos.
#[derive(Parser)]
#[command(name = "raidlog")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Time of the first kill (m:s or s). Prompted for when omitted.
    #[arg(long)]
    first_kill: Option<String>,

    /// Time the kill list screen appears (m:s or s). Prompted for when omitted.
    #[arg(long)]
    kill_list: Option<String>,

    /// Seconds of video to sample from the kill list time.
    #[arg(long)]
    duration: Option<u32>,

    /// Frames sampled per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Map keyword a kill row must resemble.
    #[arg(long)]
    map: Option<String>,

    /// Faction keyword a kill row must resemble.
    #[arg(long)]
    faction: Option<String>,

    /// Similarity a line must exceed for both keywords (0.0-1.0).
    #[arg(long)]
    threshold: Option<f64>,

    /// Compare keywords against the whole line or each token: whole or token.
    #[arg(long)]
    match_mode: Option<MatchMode>,

    /// Kill list region as fractions of the frame: left,top,right,bottom.
    #[arg(long)]
    roi: Option<RegionOfInterest>,

    /// Convert the region to grayscale and boost contrast before OCR.
    #[arg(long)]
    enhance: bool,

    /// Contrast adjustment used with --enhance.
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<f32>,

    /// Save every OCR input image to the debug directory.
    #[arg(long)]
    save_debug: bool,

    /// Path to the ffmpeg binary.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Path to the tesseract binary.
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// OCR language.
    #[arg(long)]
    lang: Option<String>,

    /// Seconds to wait for ffmpeg before giving up.
    #[arg(long)]
    timeout: Option<u64>,

    /// Settings file to use instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide [DEBUG] lines.
    #[arg(long)]
    quiet: bool,
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
    let settings = build_settings(&cli)?;

    if !cli.input.is_file() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    let layout = OutputLayout::for_video(&cli.input);
    layout.create_dirs()?;

    let first_kill = timestamp_or_prompt(cli.first_kill.as_deref(), "first kill")?;
    let kill_list = timestamp_or_prompt(cli.kill_list.as_deref(), "kill list screen")?;
    let request = KillListRequest {
        first_kill_seconds: first_kill,
        kill_list_seconds: kill_list,
    };

    let summary = build_use_case(&cli.input, &settings, layout, cli.quiet).execute(&request)?;
    log::info!(
        "Run finished: {} frames found, {} processed, {} skipped, {} records",
        summary.frames_found,
        summary.frames_processed,
        summary.frames_skipped,
        summary.records_logged
    );
    Ok(())
}

/// Settings file first, then explicit flags on top.
fn build_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    if let Some(duration) = cli.duration {
        settings.duration_seconds = duration;
    }
    if let Some(fps) = cli.fps {
        settings.fps = fps;
    }
    if let Some(map) = &cli.map {
        settings.map_keyword = map.clone();
    }
    if let Some(faction) = &cli.faction {
        settings.faction_keyword = faction.clone();
    }
    if let Some(threshold) = cli.threshold {
        settings.threshold = threshold;
    }
    if let Some(mode) = cli.match_mode {
        settings.match_mode = mode;
    }
    if let Some(roi) = cli.roi {
        settings.roi = roi;
    }
    if cli.enhance {
        settings.enhance = true;
    }
    if let Some(contrast) = cli.contrast {
        settings.contrast = contrast;
    }
    if cli.save_debug {
        settings.save_debug = true;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        settings.ffmpeg_path = ffmpeg.clone();
    }
    if let Some(tesseract) = &cli.tesseract {
        settings.tesseract_path = tesseract.clone();
    }
    if let Some(lang) = &cli.lang {
        settings.ocr_language = lang.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.decoder_timeout_seconds = timeout;
    }

    settings.validate()?;
    Ok(settings)
}

fn build_use_case(
    input: &Path,
    settings: &Settings,
    layout: OutputLayout,
    quiet: bool,
) -> ExtractKillsUseCase {
    let extractor = FfmpegFrameExtractor::new(input)
        .with_program(&settings.ffmpeg_path)
        .with_timeout(Duration::from_secs(settings.decoder_timeout_seconds));
    let recognizer = TesseractRecognizer::new()
        .with_program(&settings.tesseract_path)
        .with_language(&settings.ocr_language);
    let kill_log = FileKillLog::new(&layout.kill_log);

    let mut use_case = ExtractKillsUseCase::new(
        Box::new(extractor),
        Box::new(ImageFrameSource::new()),
        Box::new(recognizer),
        Box::new(kill_log),
        Box::new(StdoutPipelineLogger::new(!quiet)),
        PipelineOptions::from_settings(settings, layout),
    );
    if settings.enhance {
        use_case = use_case.with_preprocessor(Box::new(ContrastPreprocessor::new(settings.contrast)));
    }
    if settings.save_debug {
        use_case = use_case.with_debug_writer(Box::new(ImageFileWriter::new()));
    }
    use_case
}

fn timestamp_or_prompt(
    flag: Option<&str>,
    label: &str,
) -> Result<u32, Box<dyn std::error::Error>> {
    let text = match flag {
        Some(text) => text.to_string(),
        None => prompt(&format!("Enter the timestamp of the **{label}** (m:s or s): "))?,
    };
    Ok(parse_timestamp(&text)?)
}

fn prompt(message: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err("No timestamp entered".into());
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("settings.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(["raidlog", "raid.mp4"].iter().chain(args))
    }

    const FILE: &str = r#"{
        "map_keyword": "Woods",
        "faction_keyword": "PMC",
        "threshold": 0.3,
        "roi": {"left": 0.1, "top": 0.1, "right": 0.9, "bottom": 0.9}
    }"#;

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), FILE);
        let config = config.to_str().unwrap();

        let settings = build_settings(&cli(&[
            "--config",
            config,
            "--map",
            "Factory",
            "--threshold",
            "0.8",
            "--roi",
            "0.2,0.25,0.75,0.7",
        ]))
        .unwrap();

        assert_eq!(settings.map_keyword, "Factory");
        assert_eq!(settings.threshold, 0.8);
        assert_eq!(
            settings.roi,
            RegionOfInterest::new(0.2, 0.25, 0.75, 0.7).unwrap()
        );
    }

    #[test]
    fn test_config_file_used_where_no_flag_given() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), FILE);

        let settings =
            build_settings(&cli(&["--config", config.to_str().unwrap(), "--map", "Factory"]))
                .unwrap();

        assert_eq!(settings.faction_keyword, "PMC");
        assert_eq!(settings.threshold, 0.3);
        assert_eq!(settings.duration_seconds, 180);
    }

    #[test]
    fn test_switch_flags_and_match_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "{}");

        let settings = build_settings(&cli(&[
            "--config",
            config.to_str().unwrap(),
            "--enhance",
            "--save-debug",
            "--match-mode",
            "token",
            "--contrast",
            "-10",
        ]))
        .unwrap();

        assert!(settings.enhance);
        assert!(settings.save_debug);
        assert_eq!(settings.match_mode, MatchMode::Token);
        assert_eq!(settings.contrast, -10.0);
    }

    #[test]
    fn test_unreadable_explicit_config_is_error() {
        let result = build_settings(&cli(&["--config", "/nonexistent/raidlog/settings.json"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "{ not json");
        assert!(build_settings(&cli(&["--config", config.to_str().unwrap()])).is_err());
    }

    #[test]
    fn test_invalid_flag_value_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), "{}");
        let result = build_settings(&cli(&[
            "--config",
            config.to_str().unwrap(),
            "--threshold",
            "1.5",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_roi_flag_is_usage_error() {
        let result = Cli::try_parse_from(["raidlog", "raid.mp4", "--roi", "0.9,0.1,0.2,0.8"]);
        assert!(result.is_err());
    }
}

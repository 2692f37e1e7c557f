use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::extraction::domain::frame_extractor::{ExtractionWindow, FrameExtractor};
use crate::extraction::domain::frame_source::FrameSource;
use crate::output::domain::image_writer::ImageWriter;
use crate::output::domain::kill_log::KillLog;
use crate::parsing::domain::kill_line_matcher::KillLineMatcher;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::recognition::domain::frame_preprocessor::FramePreprocessor;
use crate::recognition::domain::region_selector::RegionSelector;
use crate::recognition::domain::text_recognizer::TextRecognizer;
use crate::shared::kill_record::KillRecord;
use crate::shared::output_layout::OutputLayout;
use crate::shared::settings::Settings;
use crate::shared::timestamp::format_timestamp;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to list frames in {path}: {source}")]
    ListFrames {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The two user-supplied moments in the recording, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillListRequest {
    pub first_kill_seconds: u32,
    pub kill_list_seconds: u32,
}

/// What a run did, for the caller's final report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_found: usize,
    pub frames_processed: usize,
    pub frames_skipped: usize,
    pub records_logged: usize,
}

/// Static parameters of a run, derived from [`Settings`].
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub layout: OutputLayout,
    pub selector: RegionSelector,
    pub matcher: KillLineMatcher,
    pub duration_seconds: u32,
    pub fps: u32,
    pub frame_prefix: String,
}

impl PipelineOptions {
    pub fn from_settings(settings: &Settings, layout: OutputLayout) -> Self {
        Self {
            layout,
            selector: RegionSelector::new(settings.roi),
            matcher: KillLineMatcher::new(
                &settings.map_keyword,
                &settings.faction_keyword,
                settings.threshold,
                settings.match_mode,
            ),
            duration_seconds: settings.duration_seconds,
            fps: settings.fps,
            frame_prefix: settings.frame_prefix.clone(),
        }
    }
}

/// Kill-list pipeline: extract → list → (decode → crop → enhance → OCR →
/// parse → log) per frame.
///
/// Only failing to enumerate the frames directory aborts a run; every
/// other failure is reported through the logger and the run moves on.
pub struct ExtractKillsUseCase {
    extractor: Box<dyn FrameExtractor>,
    source: Box<dyn FrameSource>,
    recognizer: Box<dyn TextRecognizer>,
    kill_log: Box<dyn KillLog>,
    logger: Box<dyn PipelineLogger>,
    preprocessor: Option<Box<dyn FramePreprocessor>>,
    debug_writer: Option<Box<dyn ImageWriter>>,
    options: PipelineOptions,
}

impl ExtractKillsUseCase {
    pub fn new(
        extractor: Box<dyn FrameExtractor>,
        source: Box<dyn FrameSource>,
        recognizer: Box<dyn TextRecognizer>,
        kill_log: Box<dyn KillLog>,
        logger: Box<dyn PipelineLogger>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor,
            source,
            recognizer,
            kill_log,
            logger,
            preprocessor: None,
            debug_writer: None,
            options,
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: Box<dyn FramePreprocessor>) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    /// Saves every OCR input image into the layout's debug directory.
    pub fn with_debug_writer(mut self, writer: Box<dyn ImageWriter>) -> Self {
        self.debug_writer = Some(writer);
        self
    }

    pub fn execute(&mut self, request: &KillListRequest) -> Result<RunSummary, PipelineError> {
        self.logger.loading("Starting main process");
        self.logger.info(&format!(
            "First kill at {}s ({})",
            request.first_kill_seconds,
            format_timestamp(request.first_kill_seconds)
        ));
        self.logger.info(&format!(
            "Kill List screen at {}s ({})",
            request.kill_list_seconds,
            format_timestamp(request.kill_list_seconds)
        ));

        self.extract_frames(request.kill_list_seconds);

        let frames_dir = self.options.layout.frames_dir.clone();
        let frames = self
            .source
            .list(&frames_dir)
            .map_err(|source| PipelineError::ListFrames {
                path: frames_dir.clone(),
                source,
            })?;
        let names: Vec<String> = frames.iter().map(|p| file_name(p)).collect();
        self.logger.debug(&format!("Frames found: {names:?}"));
        if frames.is_empty() {
            self.logger.warn(&format!(
                "No frames found in {}; nothing to process",
                frames_dir.display()
            ));
        }

        let mut summary = RunSummary {
            frames_found: frames.len(),
            ..RunSummary::default()
        };
        for (index, path) in frames.iter().enumerate() {
            self.logger.progress(index + 1, frames.len());
            match self.process_frame(path, index) {
                Some(logged) => {
                    summary.frames_processed += 1;
                    summary.records_logged += logged;
                }
                None => summary.frames_skipped += 1,
            }
        }

        self.logger.info(&format!(
            "Logged {} kill records from {} of {} frames to {}",
            summary.records_logged,
            summary.frames_processed,
            summary.frames_found,
            self.options.layout.kill_log.display()
        ));
        self.logger.summary();
        Ok(summary)
    }

    fn extract_frames(&mut self, start_seconds: u32) {
        let window = ExtractionWindow {
            start_seconds,
            duration_seconds: self.options.duration_seconds,
            fps: self.options.fps,
        };
        self.logger.debug(&format!(
            "Attempting to extract frames from {} for {} seconds",
            window.start_seconds, window.duration_seconds
        ));
        self.logger.loading(&format!(
            "Extracting frames from {}s for {}s at {} fps",
            window.start_seconds, window.duration_seconds, window.fps
        ));

        let frames_dir = &self.options.layout.frames_dir;
        let prefix = &self.options.frame_prefix;
        if let Some(command) = self.extractor.command_line(&window, frames_dir, prefix) {
            self.logger.debug(&format!("ffmpeg command: {command}"));
        }

        let started = Instant::now();
        let result = self.extractor.extract(&window, frames_dir, prefix);
        self.logger.timing("extract", elapsed_ms(started));
        match result {
            Ok(report) => {
                self.logger
                    .debug(&format!("ffmpeg stdout: {}", report.stdout.trim_end()));
                self.logger
                    .debug(&format!("ffmpeg stderr: {}", report.stderr.trim_end()));
            }
            Err(e) => {
                self.logger
                    .error(&format!("ffmpeg failed to extract frames: {e}"));
            }
        }
    }

    /// Returns the number of records logged, or `None` if the frame was
    /// skipped.
    fn process_frame(&mut self, path: &Path, index: usize) -> Option<usize> {
        let name = file_name(path);
        self.logger
            .debug(&format!("Extracting kill rows from {name}"));

        let started = Instant::now();
        let frame = match self.source.load(path, index) {
            Ok(frame) => frame,
            Err(e) => {
                self.logger
                    .error(&format!("Failed to load image {name}: {e}"));
                return None;
            }
        };
        self.logger.timing("decode", elapsed_ms(started));

        let roi = match self.options.selector.select(&frame) {
            Ok(roi) => roi,
            Err(e) => {
                self.logger.error(&format!("Skipping {name}: {e}"));
                return None;
            }
        };
        let ocr_input = match &self.preprocessor {
            Some(preprocessor) => match preprocessor.preprocess(&roi) {
                Ok(enhanced) => enhanced,
                Err(e) => {
                    self.logger
                        .error(&format!("Failed to preprocess {name}: {e}"));
                    return None;
                }
            },
            None => roi,
        };

        if let Some(writer) = &self.debug_writer {
            let debug_path = self
                .options
                .layout
                .ocr_debug_dir
                .join(format!("{}_roi.png", file_stem(path)));
            if let Err(e) = writer.write(&debug_path, &ocr_input) {
                self.logger.warn(&format!(
                    "Could not save OCR debug image {}: {e}",
                    debug_path.display()
                ));
            }
        }

        let started = Instant::now();
        let text = match self.recognizer.recognize(&ocr_input) {
            Ok(text) => text,
            Err(e) => {
                self.logger.error(&format!("OCR failed for {name}: {e}"));
                return None;
            }
        };
        self.logger.timing("ocr", elapsed_ms(started));

        let started = Instant::now();
        let matched = self.options.matcher.match_kill_list(&text);
        self.logger.timing("parse", elapsed_ms(started));
        for m in &matched {
            self.logger.debug(&format!("Matched Kill Line: {}", m.line));
        }
        let records: Vec<KillRecord> = matched.into_iter().map(|m| m.record).collect();

        if let Err(e) = self.kill_log.append(&records) {
            self.logger.error(&e.to_string());
            return Some(0);
        }
        for record in &records {
            self.logger.logged(&record.to_string());
        }
        Some(records.len())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

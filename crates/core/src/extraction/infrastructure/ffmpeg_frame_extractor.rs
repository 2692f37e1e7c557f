use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::extraction::domain::frame_extractor::{
    ExtractError, ExtractReport, ExtractionWindow, FrameExtractor,
};
use crate::shared::constants::{DEFAULT_DECODER_TIMEOUT_SECONDS, DEFAULT_FFMPEG_PATH, FRAME_EXTENSION};
use crate::shared::process_runner::run_with_timeout;

/// Extracts frames by running the `ffmpeg` binary once per window.
///
/// Input seeking (`-ss` before `-i`) keeps long recordings fast; `-y` lets
/// a re-run overwrite frames from a previous run instead of prompting.
pub struct FfmpegFrameExtractor {
    program: PathBuf,
    video_path: PathBuf,
    timeout: Duration,
}

impl FfmpegFrameExtractor {
    pub fn new(video_path: &Path) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_FFMPEG_PATH),
            video_path: video_path.to_path_buf(),
            timeout: Duration::from_secs(DEFAULT_DECODER_TIMEOUT_SECONDS),
        }
    }

    pub fn with_program(mut self, program: &Path) -> Self {
        self.program = program.to_path_buf();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Arguments passed to the decoder, without the program name.
    pub fn arguments(
        &self,
        window: &ExtractionWindow,
        output_dir: &Path,
        prefix: &str,
    ) -> Vec<OsString> {
        let pattern = output_dir.join(format!("{prefix}_%04d.{FRAME_EXTENSION}"));
        vec![
            "-y".into(),
            "-ss".into(),
            window.start_seconds.to_string().into(),
            "-i".into(),
            self.video_path.clone().into_os_string(),
            "-t".into(),
            window.duration_seconds.to_string().into(),
            "-vf".into(),
            format!("fps={}", window.fps).into(),
            pattern.into_os_string(),
        ]
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract(
        &self,
        window: &ExtractionWindow,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<ExtractReport, ExtractError> {
        let mut command = Command::new(&self.program);
        command.args(self.arguments(window, output_dir, prefix));
        let output = run_with_timeout(command, Some(self.timeout))?;

        if !output.status.success() {
            return Err(ExtractError::Failed {
                status: output.status.to_string(),
                stderr: output.stderr_lossy().trim().to_string(),
            });
        }
        Ok(ExtractReport {
            stdout: output.stdout_lossy(),
            stderr: output.stderr_lossy(),
        })
    }

    fn command_line(
        &self,
        window: &ExtractionWindow,
        output_dir: &Path,
        prefix: &str,
    ) -> Option<String> {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(
            self.arguments(window, output_dir, prefix)
                .iter()
                .map(|a| a.to_string_lossy().into_owned()),
        );
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::process_runner::ProcessError;

    fn window() -> ExtractionWindow {
        ExtractionWindow {
            start_seconds: 1500,
            duration_seconds: 180,
            fps: 1,
        }
    }

    #[test]
    fn test_arguments_follow_decoder_contract() {
        let extractor = FfmpegFrameExtractor::new(Path::new("/raids/raid.mp4"));
        let args: Vec<String> = extractor
            .arguments(&window(), Path::new("/raids/raid_frames"), "end")
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-y",
                "-ss",
                "1500",
                "-i",
                "/raids/raid.mp4",
                "-t",
                "180",
                "-vf",
                "fps=1",
                "/raids/raid_frames/end_%04d.png",
            ]
        );
    }

    #[test]
    fn test_command_line_is_printable() {
        let extractor = FfmpegFrameExtractor::new(Path::new("/raids/raid.mp4"))
            .with_program(Path::new("/opt/ffmpeg"));
        assert_eq!(
            extractor
                .command_line(&window(), Path::new("/raids/raid_frames"), "end")
                .unwrap(),
            "/opt/ffmpeg -y -ss 1500 -i /raids/raid.mp4 -t 180 -vf fps=1 /raids/raid_frames/end_%04d.png"
        );
    }

    #[test]
    fn test_missing_decoder_is_process_error() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = FfmpegFrameExtractor::new(Path::new("raid.mp4"))
            .with_program(Path::new("/nonexistent/ffmpeg"));
        let err = extractor.extract(&window(), dir.path(), "end").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Process(ProcessError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failed() {
        let dir = tempfile::tempdir().unwrap();
        let extractor =
            FfmpegFrameExtractor::new(Path::new("raid.mp4")).with_program(Path::new("false"));
        assert!(matches!(
            extractor.extract(&window(), dir.path(), "end").unwrap_err(),
            ExtractError::Failed { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_keeps_decoder_stderr() {
        // `ls` rejects the `-y` flag and explains why on stderr.
        let dir = tempfile::tempdir().unwrap();
        let extractor =
            FfmpegFrameExtractor::new(Path::new("raid.mp4")).with_program(Path::new("ls"));
        match extractor.extract(&window(), dir.path(), "end").unwrap_err() {
            ExtractError::Failed { stderr, .. } => assert!(!stderr.is_empty()),
            other => panic!("expected decoder failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let extractor =
            FfmpegFrameExtractor::new(Path::new("raid.mp4")).with_program(Path::new("true"));
        assert_eq!(
            extractor.extract(&window(), dir.path(), "end").unwrap(),
            ExtractReport::default()
        );
    }

    #[test]
    #[ignore] // Requires ffmpeg on PATH
    fn test_extracts_frames_from_generated_clip() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        let status = Command::new("ffmpeg")
            .args(["-y", "-f", "lavfi", "-i", "testsrc=duration=3:size=320x240:rate=10"])
            .arg(&video)
            .status()
            .expect("ffmpeg must be installed");
        assert!(status.success());

        let frames = dir.path().join("frames");
        std::fs::create_dir_all(&frames).unwrap();
        let window = ExtractionWindow {
            start_seconds: 0,
            duration_seconds: 3,
            fps: 1,
        };
        FfmpegFrameExtractor::new(&video)
            .extract(&window, &frames, "end")
            .unwrap();
        assert!(frames.join("end_0001.png").exists());
    }
}

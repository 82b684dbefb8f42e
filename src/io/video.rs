//! Video frame source backed by external `ffprobe`/`ffmpeg` processes.
//!
//! `ffmpeg` decodes the container and streams packed RGB frames through its
//! stdout. Rewinding kills the process and starts a new one at frame zero.

use crate::error::PreviewError;
use crate::style;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

/// One decoded frame as packed 8-bit RGB.
#[derive(Clone, Debug)]
pub struct RgbFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Sequential access to the frames of an opened video.
pub trait FrameSource {
    /// Frames per second reported by the container, if any.
    fn frame_rate(&self) -> Option<f64>;

    fn next_frame(&mut self) -> Result<RgbFrame, PreviewError>;

    /// Move the decode position back to frame zero.
    fn rewind(&mut self) -> Result<(), PreviewError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    streams: Option<Vec<ProbeStream>>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<usize>,
    height: Option<usize>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// Parse an ffprobe rate such as `30000/1001` or `25`.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

/// Output size for a source, capped at `max_width` with an even height.
pub fn scaled_size(width: usize, height: usize, max_width: usize) -> (usize, usize) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled = (height * max_width + width / 2) / width;
    (max_width, (scaled.max(2) / 2) * 2)
}

pub struct FfmpegSource {
    path: PathBuf,
    width: usize,
    height: usize,
    frame_rate: Option<f64>,
    child: Child,
    stdout: ChildStdout,
}

impl FfmpegSource {
    pub fn open(path: &Path) -> Result<Self, PreviewError> {
        let open_err = |reason: String| PreviewError::VideoOpen {
            path: path.to_path_buf(),
            reason,
        };

        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height,r_frame_rate,avg_frame_rate",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| open_err(format!("ffprobe unavailable: {}", e)))?;
        if !output.status.success() {
            return Err(open_err(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let probe: ProbeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| open_err(format!("unreadable ffprobe output: {}", e)))?;
        let stream = probe
            .streams
            .and_then(|s| s.into_iter().next())
            .ok_or_else(|| open_err("no video stream".to_string()))?;
        let (width, height) = match (stream.width, stream.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(open_err("unknown frame size".to_string())),
        };
        let frame_rate = stream
            .avg_frame_rate
            .as_deref()
            .and_then(parse_frame_rate)
            .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_frame_rate));
        let (width, height) = scaled_size(width, height, style::VIDEO_MAX_WIDTH as usize);

        let (child, stdout) = spawn_decoder(path, width, height).map_err(open_err)?;
        log::debug!(
            "Opened {} at {}x{} ({:?} fps)",
            path.display(),
            width,
            height,
            frame_rate
        );

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            frame_rate,
            child,
            stdout,
        })
    }

    fn stop_decoder(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn_decoder(path: &Path, width: usize, height: usize) -> Result<(Child, ChildStdout), String> {
    let mut child = Command::new("ffmpeg")
        .args(["-v", "error", "-nostdin", "-i"])
        .arg(path)
        .args(["-an", "-vf"])
        .arg(format!("scale={}:{}", width, height))
        .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("ffmpeg unavailable: {}", e))?;

    match child.stdout.take() {
        Some(stdout) => Ok((child, stdout)),
        None => {
            let _ = child.kill();
            let _ = child.wait();
            Err("ffmpeg produced no output pipe".to_string())
        }
    }
}

impl FrameSource for FfmpegSource {
    fn frame_rate(&self) -> Option<f64> {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Result<RgbFrame, PreviewError> {
        let mut data = vec![0u8; self.width * self.height * 3];
        self.stdout
            .read_exact(&mut data)
            .map_err(|e| PreviewError::VideoRead(e.to_string()))?;
        Ok(RgbFrame {
            width: self.width,
            height: self.height,
            data,
        })
    }

    fn rewind(&mut self) -> Result<(), PreviewError> {
        self.stop_decoder();
        let (child, stdout) = spawn_decoder(&self.path, self.width, self.height)
            .map_err(PreviewError::VideoRead)?;
        self.child = child;
        self.stdout = stdout;
        Ok(())
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        self.stop_decoder();
    }
}

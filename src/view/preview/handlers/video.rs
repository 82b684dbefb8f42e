// Video preview handler: loops over the first seconds of a clip

use crate::error::PreviewError;
use crate::io::{FfmpegSource, FrameSource, RgbFrame};
use crate::style;
use crate::view::preview::handler::{ExtensionSet, PreviewHandler};
use crate::view::preview::surface::{Bitmap, Surface, SurfaceId};
use crate::view::preview::timer::FrameTimer;
use eframe::egui;
use std::path::Path;
use std::time::{Duration, Instant};

const VIDEO_EXTENSIONS: ExtensionSet = ExtensionSet::new(&[
    ".mp4", ".mkv", ".mov", ".avi", ".webm", ".m4v", ".wmv", ".flv", ".mpg", ".mpeg",
]);

pub type VideoOpener = Box<dyn Fn(&Path) -> Result<Box<dyn FrameSource>, PreviewError>>;

/// Result of one timer callback
#[derive(Debug)]
pub enum Step {
    Frame(RgbFrame),
    Rewound,
    Failed(PreviewError),
}

/// Playback state for the clip being previewed
pub struct Sampler {
    source: Box<dyn FrameSource>,
    frames_sampled: usize,
    max_frames: usize,
    interval: Duration,
}

impl Sampler {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        let fps = source
            .frame_rate()
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .unwrap_or(style::DEFAULT_FRAME_RATE);
        let max_frames = ((fps * style::SAMPLE_SECONDS).round() as usize).max(1);
        Self {
            source,
            frames_sampled: 0,
            max_frames,
            interval: Duration::from_secs_f64(1.0 / fps),
        }
    }

    /// Decode the next frame, or rewind once the sample window is full.
    pub fn advance(&mut self) -> Step {
        if self.frames_sampled >= self.max_frames {
            return match self.source.rewind() {
                Ok(()) => {
                    self.frames_sampled = 0;
                    Step::Rewound
                }
                Err(e) => Step::Failed(e),
            };
        }
        match self.source.next_frame() {
            Ok(frame) => {
                self.frames_sampled += 1;
                Step::Frame(frame)
            }
            Err(e) => Step::Failed(e),
        }
    }

    pub fn frames_sampled(&self) -> usize {
        self.frames_sampled
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Convert packed RGB into the surface's RGBA pixels
pub fn frame_to_image(frame: &RgbFrame) -> egui::ColorImage {
    egui::ColorImage::from_rgb([frame.width, frame.height], &frame.data)
}

pub struct VideoPreviewHandler {
    surface: Surface<Bitmap>,
    opener: VideoOpener,
    session: Option<Sampler>,
    timer: FrameTimer,
}

impl VideoPreviewHandler {
    pub fn new() -> Self {
        Self::with_opener(Box::new(|path: &Path| {
            FfmpegSource::open(path).map(|s| Box::new(s) as Box<dyn FrameSource>)
        }))
    }

    pub fn with_opener(opener: VideoOpener) -> Self {
        Self {
            surface: Surface::new(),
            opener,
            session: None,
            timer: FrameTimer::new(),
        }
    }

    pub fn session(&self) -> Option<&Sampler> {
        self.session.as_ref()
    }

    pub fn is_sampling(&self) -> bool {
        self.timer.is_running()
    }

    pub fn frame_size(&self) -> Option<[usize; 2]> {
        self.surface.content().map(Bitmap::size)
    }

    fn stop(&mut self) {
        self.timer.stop();
        self.session = None;
    }

    /// One timer callback.
    pub(crate) fn tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance() {
            Step::Frame(frame) => {
                let image = frame_to_image(&frame);
                match self.surface.content_mut() {
                    Some(bitmap) => bitmap.replace(image),
                    None => self.surface.set(Bitmap::new(image)),
                }
            }
            Step::Rewound => {}
            Step::Failed(e) => {
                log::warn!("{}", e);
                self.stop();
                self.surface.set_message(e.to_string());
            }
        }
    }
}

impl Default for VideoPreviewHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewHandler for VideoPreviewHandler {
    fn name(&self) -> &str {
        "video"
    }

    fn can_handle(&self, path: &Path) -> bool {
        VIDEO_EXTENSIONS.matches(path)
    }

    fn surface(&self) -> SurfaceId {
        self.surface.id()
    }

    fn render(&mut self, path: &Path) {
        // Release the previous decoder before opening the next one
        self.stop();
        match (self.opener)(path) {
            Ok(source) => {
                let sampler = Sampler::new(source);
                log::debug!(
                    "Sampling {} frames every {:?}",
                    sampler.max_frames(),
                    sampler.interval()
                );
                self.timer.start(sampler.interval(), Instant::now());
                self.session = Some(sampler);
                self.surface.clear();
            }
            Err(e) => {
                log::warn!("{}", e);
                self.surface.set_message(e.to_string());
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        if self.timer.poll(now) {
            self.tick();
        }
        if let Some(bitmap) = self.surface.show_or_message(ui) {
            bitmap.show(ui, "preview_video");
        }
        if let Some(wait) = self.timer.until_next(Instant::now()) {
            ui.ctx().request_repaint_after(wait);
        }
    }

    fn message(&self) -> Option<&str> {
        self.surface.message()
    }

    fn deactivate(&mut self) {
        self.stop();
    }
}

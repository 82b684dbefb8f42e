// Text file preview handler with syntax highlighting

use crate::error::PreviewError;
use crate::style;
use crate::view::preview::handler::{ExtensionSet, PreviewHandler};
use crate::view::preview::surface::{Surface, SurfaceId};
use eframe::egui;
use std::fs;
use std::path::Path;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const TEXT_EXTENSIONS: ExtensionSet = ExtensionSet::new(&[
    ".txt", ".log", ".csv", ".tsv", ".md", ".rst", ".ini", ".cfg", ".conf", ".config", ".env",
    ".toml", ".yaml", ".yml", ".json", ".xml", ".html", ".css", ".rs", ".py", ".js", ".ts",
    ".jsx", ".tsx", ".c", ".cpp", ".h", ".hpp", ".java", ".go", ".rb", ".php", ".swift", ".kt",
    ".sh", ".bash", ".ps1", ".bat", ".sql", ".lua", ".cs", ".diff", ".patch", ".gitignore",
]);

/// File content kept on the surface, highlighted lazily per theme
pub struct TextBody {
    content: String,
    extension: String,
    highlighted: Option<(bool, egui::text::LayoutJob)>,
}

pub struct TextPreviewHandler {
    surface: Surface<TextBody>,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl TextPreviewHandler {
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Text currently on the surface
    pub fn text(&self) -> Option<&str> {
        self.surface.content().map(|body| body.content.as_str())
    }

    fn read(path: &Path) -> Result<String, PreviewError> {
        let read_err = |source| PreviewError::Read {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(read_err)?.len();
        if size > style::MAX_PREVIEW_SIZE {
            return Err(PreviewError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: style::MAX_PREVIEW_SIZE,
            });
        }
        let data = fs::read(path).map_err(read_err)?;
        String::from_utf8(data).map_err(|_| PreviewError::NotText {
            path: path.to_path_buf(),
        })
    }

    fn highlight(
        syntax_set: &SyntaxSet,
        theme_set: &ThemeSet,
        body: &TextBody,
        dark_mode: bool,
    ) -> egui::text::LayoutJob {
        let syntax = syntax_set
            .find_syntax_by_extension(&body.extension)
            .or_else(|| syntax_set.find_syntax_by_first_line(&body.content))
            .unwrap_or_else(|| syntax_set.find_syntax_plain_text());
        let theme_name = if dark_mode {
            "base16-ocean.dark"
        } else {
            "base16-ocean.light"
        };

        let mut job = egui::text::LayoutJob::default();
        let font_id = egui::FontId::monospace(12.0);
        let plain = |job: &mut egui::text::LayoutJob, text: &str| {
            job.append(text, 0.0, egui::TextFormat::simple(font_id.clone(), egui::Color32::GRAY));
        };

        // Colour the head of the file only; the rest follows as plain text
        let split = LinesWithEndings::from(&body.content)
            .take(style::MAX_HIGHLIGHTED_LINES)
            .map(str::len)
            .sum::<usize>();
        let (head, tail) = body.content.split_at(split);

        match theme_set.themes.get(theme_name) {
            Some(theme) => {
                let mut highlighter = HighlightLines::new(syntax, theme);
                for line in LinesWithEndings::from(head) {
                    let ranges = highlighter
                        .highlight_line(line, syntax_set)
                        .unwrap_or_default();
                    for (style, text) in ranges {
                        let color = egui::Color32::from_rgb(
                            style.foreground.r,
                            style.foreground.g,
                            style.foreground.b,
                        );
                        job.append(text, 0.0, egui::TextFormat::simple(font_id.clone(), color));
                    }
                }
            }
            None => plain(&mut job, head),
        }
        if !tail.is_empty() {
            plain(&mut job, tail);
        }
        job
    }
}

impl Default for TextPreviewHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewHandler for TextPreviewHandler {
    fn name(&self) -> &str {
        "text"
    }

    fn can_handle(&self, path: &Path) -> bool {
        TEXT_EXTENSIONS.matches(path)
    }

    fn surface(&self) -> SurfaceId {
        self.surface.id()
    }

    fn render(&mut self, path: &Path) {
        match Self::read(path) {
            Ok(content) => self.surface.set(TextBody {
                content,
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_default(),
                highlighted: None,
            }),
            Err(e) => {
                log::warn!("{}", e);
                self.surface.set_message(e.to_string());
            }
        }
    }

    fn show(&mut self, ui: &mut egui::Ui) {
        let dark_mode = ui.visuals().dark_mode;
        let Some(body) = self.surface.show_or_message(ui) else {
            return;
        };

        let stale = !matches!(&body.highlighted, Some((mode, _)) if *mode == dark_mode);
        if stale {
            let job = Self::highlight(&self.syntax_set, &self.theme_set, body, dark_mode);
            body.highlighted = Some((dark_mode, job));
        }

        let total_lines = body.content.lines().count();
        if total_lines > style::MAX_HIGHLIGHTED_LINES {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").color(egui::Color32::YELLOW));
                ui.label(
                    egui::RichText::new(format!(
                        "Large file: highlighting first {} of {} lines",
                        style::MAX_HIGHLIGHTED_LINES,
                        total_lines
                    ))
                    .italics(),
                );
            });
            ui.separator();
        }

        if let Some((_, job)) = &body.highlighted {
            egui::ScrollArea::both()
                .id_salt("preview_text")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(egui::Label::new(job.clone()).extend());
                });
        }
    }

    fn message(&self) -> Option<&str> {
        self.surface.message()
    }
}

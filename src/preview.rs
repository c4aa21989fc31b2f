// Preview module: images become half-block lines, everything else an info card

use crate::domain::{Item, MediaKind};
use crate::error::{MswpError, Result};
use crate::tui::helpers::format_file_size;
use image::{DynamicImage, GenericImageView, ImageError, ImageReader, Pixel};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::fs::File;
use std::path::Path;

/// Rows used by the dimensions line above an image
const IMAGE_HEADER_ROWS: u16 = 2;

/// Rendered preview ready to be drawn
#[derive(Debug, Clone)]
pub enum PreviewContent {
    /// Half-block rendering of the pixels
    Image(Vec<Line<'static>>),
    /// Metadata card for media we don't draw inline
    Info(Vec<Line<'static>>),
}

impl PreviewContent {
    pub fn lines(&self) -> &[Line<'static>] {
        match self {
            PreviewContent::Image(lines) | PreviewContent::Info(lines) => lines,
        }
    }
}

/// Loads an image from a file path.
///
/// The format is sniffed from the file's bytes, falling back to the extension,
/// so a PNG saved as `.jpg` still decodes.
pub fn load_image(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// Calculates new dimensions to fit image within max width and height while preserving aspect ratio
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;

    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        // Image is smaller than max dimensions, don't upscale
        (original_width, original_height)
    } else {
        let new_width = ((original_width as f64 * ratio) as u32).max(1);
        let new_height = ((original_height as f64 * ratio) as u32).max(1);
        (new_width, new_height)
    }
}

/// Converts an image to styled lines using half-block characters for terminal display.
/// Uses the upper half block character (▀) with foreground color for the upper pixel
/// and background color for the lower pixel, effectively displaying 2 pixels per cell.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    // Even height so every terminal row has a lower pixel
    let height = height + height % 2;

    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let mut lines = Vec::with_capacity((height / 2) as usize);

    for y in (0..height).step_by(2) {
        let spans: Vec<Span<'static>> = (0..width)
            .map(|x| {
                let upper = img.get_pixel(x, y).to_rgb();
                let lower = img.get_pixel(x, y + 1).to_rgb();
                let style = Style::default()
                    .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                    .bg(Color::Rgb(lower[0], lower[1], lower[2]));
                Span::styled("▀", style)
            })
            .collect();

        lines.push(Line::from(spans));
    }

    lines
}

/// Generates a preview for `item` fitting a `width` x `height` cell area.
///
/// Errors mean the file itself is unreadable (empty, truncated, corrupt);
/// a format the decoder simply doesn't know gets an info card instead.
pub fn generate_preview(item: &Item, width: u16, height: u16) -> Result<PreviewContent> {
    let broken = |reason: String| MswpError::Preview {
        name: item.display_name.clone(),
        reason,
    };

    File::open(&item.path).map_err(|e| broken(e.to_string()))?;
    if item.size == 0 {
        return Err(broken("file is empty".to_string()));
    }

    match item.kind {
        MediaKind::Image => match load_image(&item.path) {
            Ok(img) => Ok(image_preview(item, &img, width, height)),
            Err(ImageError::Unsupported(_)) => Ok(info_card(
                item,
                "No inline preview for this format. Press p to open it.",
            )),
            Err(e) => Err(broken(e.to_string())),
        },
        MediaKind::Video => Ok(info_card(item, "Press p to play in your default player.")),
    }
}

fn image_preview(item: &Item, img: &DynamicImage, width: u16, height: u16) -> PreviewContent {
    let (original_width, original_height) = img.dimensions();

    let max_rows = height.saturating_sub(IMAGE_HEADER_ROWS) as u32;
    let (new_width, new_height) = calculate_resize_dimensions(
        original_width,
        original_height,
        width as u32,
        max_rows * 2,
    );

    let info_style = Style::default().fg(Color::Gray);
    let mut lines: Vec<Line<'static>> = vec![
        Line::from(vec![
            Span::styled(
                format!("{}×{} px", original_width, original_height),
                info_style,
            ),
            Span::raw("  "),
            Span::styled(format_file_size(item.size), info_style),
        ]),
        Line::from(""),
    ];

    lines.extend(image_to_halfblock_lines(img, new_width, new_height));

    PreviewContent::Image(lines)
}

fn info_card(item: &Item, hint: &str) -> PreviewContent {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let info_style = Style::default().fg(Color::Gray);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}: ", item.kind.label()), label_style),
            Span::styled(item.display_name.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Size:      {}", format_file_size(item.size)),
            info_style,
        )),
        Line::from(Span::styled(
            format!("Modified:  {}", item.modified.format("%Y-%m-%d %H:%M")),
            info_style,
        )),
        Line::from(Span::styled(
            format!("Location:  {}", item.path.display()),
            info_style,
        )),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), info_style)),
    ];

    PreviewContent::Info(lines)
}

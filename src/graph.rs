use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::ir::{DrawCommand, SceneGraph, TextAnchor, TextBaseline};
use crate::OutputFormat;

const FONT_FAMILY: &str = "sans-serif";

/// Fixed-size drawing surface.
///
/// Holds exactly the commands of the last scene drawn onto it: every draw
/// replaces what was there before.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn mark_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_mark()).count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Clear, then record `scene`. The surface takes the scene's size.
    pub fn draw(&mut self, scene: &SceneGraph) {
        self.clear();
        self.width = scene.width;
        self.height = scene.height;
        self.commands.extend(scene.commands.iter().cloned());
    }

    pub fn encode(&self, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Svg => self.to_svg().map(String::into_bytes),
            OutputFormat::Png => self.to_png(),
        }
    }

    /// Serialize the surface as an SVG document
    pub fn to_svg(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height)).into_drawing_area();
            replay(&root, &self.commands)?;
            root.present().context("Failed to present SVG drawing")?;
        }
        Ok(svg)
    }

    /// Rasterize onto a white background and encode as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).context("Failed to fill background")?;
            replay(&root, &self.commands)?;
            root.present().context("Failed to present bitmap drawing")?;
        }

        let mut png_bytes = Vec::new();
        {
            let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
            encoder
                .write_image(&buffer, self.width, self.height, image::ColorType::Rgb8)
                .context("Failed to encode PNG")?;
        }

        Ok(png_bytes)
    }
}

/// Execute recorded commands against a plotters drawing area
fn replay<DB>(root: &DrawingArea<DB, Shift>, commands: &[DrawCommand]) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    for command in commands {
        match command {
            DrawCommand::Line { from, to, color } => {
                root.draw(&PathElement::new(vec![px(*from), px(*to)], color.stroke_width(1)))
                    .context("Failed to draw axis line")?;
            }
            DrawCommand::Circle { center, radius, fill } => {
                root.draw(&Circle::new(px(*center), radius.round() as i32, fill.filled()))
                    .context("Failed to draw circle")?;
            }
            DrawCommand::Rect { tl, br, fill } => {
                root.draw(&Rectangle::new([px(*tl), px(*br)], fill.filled()))
                    .context("Failed to draw rectangle")?;
            }
            DrawCommand::Text { text, pos, style } => {
                let mut font = (FONT_FAMILY, style.size).into_font();
                if style.bold {
                    font = font.style(FontStyle::Bold);
                }
                if style.vertical {
                    font = font.transform(FontTransform::Rotate270);
                }
                let text_style = TextStyle::from(font)
                    .color(&BLACK)
                    .pos(Pos::new(h_pos(style.anchor), v_pos(style.baseline)));
                root.draw(&Text::new(text.as_str(), px(*pos), text_style))
                    .context("Failed to draw text")?;
            }
        }
    }
    Ok(())
}

/// Surface position to backend pixel; NaN lands on 0
fn px((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn h_pos(anchor: TextAnchor) -> HPos {
    match anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    }
}

fn v_pos(baseline: TextBaseline) -> VPos {
    match baseline {
        TextBaseline::Hanging => VPos::Top,
        TextBaseline::Middle => VPos::Center,
        TextBaseline::Alphabetic => VPos::Bottom,
    }
}

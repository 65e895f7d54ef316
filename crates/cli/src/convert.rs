//! GIF to frame JSON conversion.
//!
//! Every pixel becomes one character picked by brightness from the charset
//! (dense to sparse), wrapped in `[rgb(r,g,b)]c[/]` with the pixel's color.

use anyhow::{bail, Context, Result};
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, DynamicImage, RgbImage};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;
use tracing::info;

pub const DEFAULT_CHARSET: &str = "@%#*+=-:. ";
pub const DEFAULT_WIDTH: u32 = 100;
/// Terminal cells are roughly twice as tall as wide.
pub const DEFAULT_ASPECT: f64 = 0.55;

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub width: u32,
    pub aspect: f64,
    pub charset: Vec<char>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            aspect: DEFAULT_ASPECT,
            charset: DEFAULT_CHARSET.chars().collect(),
        }
    }
}

impl ConvertOptions {
    pub fn new(width: u32, aspect: f64, charset: &str) -> Result<Self> {
        if width == 0 {
            bail!("width must be positive");
        }
        if !aspect.is_finite() || aspect <= 0.0 {
            bail!("aspect must be a positive number");
        }
        let charset: Vec<char> = charset.chars().collect();
        if charset.is_empty() {
            bail!("charset must not be empty");
        }
        Ok(Self {
            width,
            aspect,
            charset,
        })
    }

    /// Target grid for a `w`×`h` source, never fewer than one row.
    pub fn target_size(&self, w: u32, h: u32) -> (u32, u32) {
        let rows = (h as f64 / w.max(1) as f64 * self.width as f64 * self.aspect) as u32;
        (self.width, rows.max(1))
    }

    fn glyph(&self, r: u8, g: u8, b: u8) -> char {
        let brightness = (r as usize + g as usize + b as usize) / 3;
        let index = brightness * (self.charset.len() - 1) / 255;
        self.charset[index]
    }
}

pub fn frame_to_markup(frame: &RgbImage, opts: &ConvertOptions) -> String {
    let (w, h) = opts.target_size(frame.width(), frame.height());
    let small = imageops::resize(frame, w, h, FilterType::Nearest);

    let mut lines = Vec::with_capacity(h as usize);
    for y in 0..h {
        let mut line = String::with_capacity(w as usize * 20);
        for x in 0..w {
            let [r, g, b] = small.get_pixel(x, y).0;
            line.push_str(&format!("[rgb({},{},{})]{}[/]", r, g, b, opts.glyph(r, g, b)));
        }
        lines.push(line);
    }
    lines.join("\n")
}

pub fn convert_gif<R: BufRead + Seek>(reader: R, opts: &ConvertOptions) -> Result<Vec<String>> {
    let decoder = GifDecoder::new(reader).context("failed to read GIF header")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("failed to decode GIF frames")?;

    Ok(frames
        .into_iter()
        .map(|frame| {
            let rgb = DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8();
            frame_to_markup(&rgb, opts)
        })
        .collect())
}

/// Converts `input` and writes the frame array to `output`. Returns the frame count.
pub fn convert_file(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<usize> {
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let frames = convert_gif(BufReader::new(file), opts)?;
    if frames.is_empty() {
        bail!("{} contains no frames", input.display());
    }

    let out = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(out);
    serde_json::to_writer(&mut writer, &frames)?;
    writer.flush()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        frames = frames.len(),
        "GIF converted"
    );
    Ok(frames.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Frame, Rgb, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn rows_follow_aspect() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.target_size(100, 50), (100, 27));
        assert_eq!(opts.target_size(200, 200), (100, 55));
        assert_eq!(opts.target_size(1000, 1), (100, 1));
    }

    #[test]
    fn brightness_picks_glyph() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.glyph(0, 0, 0), '@');
        assert_eq!(opts.glyph(255, 255, 255), ' ');
        // (100+100+100)/3 = 100 -> 100*9/255 = 3
        assert_eq!(opts.glyph(100, 100, 100), '*');
    }

    #[test]
    fn markup_cells() {
        let opts = ConvertOptions::new(2, 1.0, "@ ").unwrap();
        let mut img = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));

        let markup = frame_to_markup(&img, &opts);
        assert_eq!(
            markup,
            "[rgb(0,0,0)]@[/][rgb(255,255,255)] [/]\n[rgb(255,255,255)] [/][rgb(255,255,255)] [/]"
        );
    }

    #[test]
    fn rejects_bad_options() {
        assert!(ConvertOptions::new(0, 0.55, "@").is_err());
        assert!(ConvertOptions::new(10, 0.0, "@").is_err());
        assert!(ConvertOptions::new(10, 0.55, "").is_err());
    }

    #[test]
    fn converts_every_gif_frame() {
        let mut gif = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut gif);
            let frames = (0..3u8).map(|i| {
                Frame::new(RgbaImage::from_pixel(8, 4, image::Rgba([i * 80, 0, 0, 255])))
            });
            encoder.encode_frames(frames).unwrap();
        }

        let opts = ConvertOptions::new(4, 1.0, DEFAULT_CHARSET).unwrap();
        let frames = convert_gif(Cursor::new(gif), &opts).unwrap();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            // 8x4 at width 4 -> 4 cols, 2 rows
            assert_eq!(frame.lines().count(), 2);
            assert_eq!(frame.matches("[/]").count(), 8);
        }
    }

    #[test]
    fn convert_file_writes_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gif");
        let output = dir.path().join("out.json");
        {
            let file = File::create(&input).unwrap();
            let mut encoder = GifEncoder::new(file);
            encoder
                .encode_frame(Frame::new(RgbaImage::from_pixel(
                    2,
                    2,
                    image::Rgba([0, 0, 0, 255]),
                )))
                .unwrap();
        }

        let count = convert_file(&input, &output, &ConvertOptions::default()).unwrap();
        assert_eq!(count, 1);

        let written: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("[rgb("));
    }
}

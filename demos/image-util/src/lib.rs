use std::fs::{self, File};
use std::path::Path;

use anyhow::Context;
use image::codecs::gif::GifEncoder;
use image::imageops::{self, FilterType};
use image::{Delay, DynamicImage, Frame, Rgb, RgbImage};
use ndarray::{Array, Array2};

/// Pairs of exact pixel color and the grid value it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapping(pub Vec<([u8; 3], i32)>);

impl Default for ColorMapping {
    fn default() -> Self {
        ColorMapping(vec![
            // background
            ([0, 108, 234], 0),
            // gaps
            ([255, 255, 255], -1),
            // loops
            ([0, 0, 0], 1),
        ])
    }
}

impl ColorMapping {
    pub fn value(&self, rgb: [u8; 3]) -> Option<i32> {
        self.0.iter().find(|(c, _)| *c == rgb).map(|&(_, v)| v)
    }
}

/// Map every pixel through `mapping`; unknown colors become 0.
pub fn map_colors(img: &RgbImage, mapping: &ColorMapping) -> Array2<i32> {
    let (w, h) = img.dimensions();

    Array::from_shape_fn((h as usize, w as usize), |(i, j)| {
        let p = img.get_pixel(j as u32, i as u32);
        mapping.value(p.0).unwrap_or(0)
    })
}

/// Load an image as a `rows` x `cols` grid.
///
/// Resizing is nearest-neighbour so that every pixel keeps one of the
/// original colors.
pub fn load_grid<P: AsRef<Path>>(
    path: P,
    mapping: &ColorMapping,
    (rows, cols): (usize, usize),
) -> anyhow::Result<Array2<i32>> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgb8();
    let img = imageops::resize(&img, cols as u32, rows as u32, FilterType::Nearest);

    Ok(map_colors(&img, mapping))
}

const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

fn label_color(v: i32) -> Rgb<u8> {
    match v {
        0 => Rgb([0, 0, 0]),
        v if v < 0 => Rgb([255, 255, 255]),
        v => Rgb(PALETTE[v as usize % PALETTE.len()]),
    }
}

/// Black-red-yellow-white ramp for `t` in `0.0..=1.0`.
pub fn hot(t: f64) -> Rgb<u8> {
    let channel = |x: f64| (x.max(0.0).min(1.0) * 255.0).round() as u8;
    let t = t * 3.0;

    Rgb([channel(t), channel(t - 1.0), channel(t - 2.0)])
}

fn heat_image(x: &Array2<f64>, (min, max): (f64, f64)) -> RgbImage {
    let (rows, cols) = x.dim();
    let span = if max > min { max - min } else { 1.0 };

    RgbImage::from_fn(cols as u32, rows as u32, |j, i| {
        hot((x[[i as usize, j as usize]] - min) / span)
    })
}

fn out_path(prefix: &str, index: usize) -> anyhow::Result<String> {
    fs::create_dir_all("out")?;
    Ok(format!("out/{}_{:06}.png", prefix, index))
}

pub fn save_labels(prefix: &str, index: usize, x: &Array2<i32>) -> anyhow::Result<()> {
    let (rows, cols) = x.dim();
    let img = RgbImage::from_fn(cols as u32, rows as u32, |j, i| {
        label_color(x[[i as usize, j as usize]])
    });

    img.save(out_path(prefix, index)?)?;

    Ok(())
}

/// Save `x` with the colormap stretched over `range`.
pub fn save_heat(
    prefix: &str,
    index: usize,
    x: &Array2<f64>,
    range: (f64, f64),
) -> anyhow::Result<()> {
    heat_image(x, range).save(out_path(prefix, index)?)?;

    Ok(())
}

/// Encode a sequence of fields as an animated GIF, `delay_ms` per frame.
pub fn save_gif<'a, I>(
    path: &str,
    fields: I,
    range: (f64, f64),
    delay_ms: u32,
) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a Array2<f64>>,
{
    let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
    let mut encoder = GifEncoder::new(file);

    let frames = fields.into_iter().map(|x| {
        let rgba = DynamicImage::ImageRgb8(heat_image(x, range)).to_rgba8();
        Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    });
    encoder.encode_frames(frames)?;

    Ok(())
}

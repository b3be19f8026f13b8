use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear blend; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| -> u8 {
            let v = (a as f32 + (b as f32 - a as f32) * t).round() as i32;
            v.clamp(0, 255) as u8
        };
        Rgb::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

/// How amplitudes become colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Magnitude only: crests and troughs both light up.
    Interference,
    /// Signed amplitude: zero sits at the midpoint, troughs lean to `low`.
    Signed,
}

impl ColorMode {
    pub fn from_interference(flag: bool) -> Self {
        if flag {
            ColorMode::Interference
        } else {
            ColorMode::Signed
        }
    }

    /// Position in `[0, 1]` along the gradient for one amplitude.
    ///
    /// NaN lands on the low end of the clamp range; infinities land on the
    /// bound they point at.
    #[inline]
    pub fn position(self, v: f32, scale: f32) -> f32 {
        match self {
            ColorMode::Interference => {
                let a = if v.is_nan() { 0.0 } else { v.abs().min(scale) };
                a / scale
            }
            ColorMode::Signed => {
                let half = scale * 0.5;
                let c = if v.is_nan() { -half } else { v.clamp(-half, half) };
                (c + half) / scale
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub low: Rgb,
    pub high: Rgb,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            low: Rgb::new(16, 38, 89),
            high: Rgb::new(35, 221, 221),
        }
    }
}

/// A W×H image of RGB triples, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl Frame {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb::default(); w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.w && y < self.h {
            Some(self.px[y * self.w + x])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.px
    }

    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            let p = self.px[y as usize * self.w + x as usize];
            image::Rgb([p.r, p.g, p.b])
        })
    }

    pub fn save_png(&self, path: &Path) -> image::ImageResult<()> {
        self.to_rgb_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}

/// Color every cell of `field` into `out`, reshaping `out` if it differs.
///
/// Returns the number of non-finite amplitudes met.
pub fn render_into(field: &Field, mode: ColorMode, gradient: Gradient, scale: f32, out: &mut Frame) -> usize {
    if out.w != field.width() || out.h != field.height() {
        *out = Frame::new(field.width(), field.height());
    }
    let mut non_finite = 0;
    for (p, &v) in out.px.iter_mut().zip(field.cells()) {
        if !v.is_finite() {
            non_finite += 1;
        }
        *p = gradient.low.lerp(gradient.high, mode.position(v, scale));
    }
    non_finite
}

pub fn render(field: &Field, mode: ColorMode, gradient: Gradient, scale: f32) -> Frame {
    let mut out = Frame::new(field.width(), field.height());
    render_into(field, mode, gradient, scale, &mut out);
    out
}

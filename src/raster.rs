/// Software raster surface.
///
/// An owned RGB pixel buffer plus the handful of filled primitives the
/// renderer needs.  Every primitive takes a `Color` with an alpha channel and
/// blends source-over onto the (always opaque) destination.  Coordinates are
/// floating point; a pixel is covered when its centre lies inside the shape.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Opaque pixel as stored in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Color> for Pixel {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

fn mix(dst: u8, src: u8, a: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * a).round() as u8
}

#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.into());
    }

    /// Blend one pixel; out-of-bounds writes are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = color.a.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = &mut self.pixels[y as usize * self.width + x as usize];
        *px = Pixel {
            r: mix(px.r, color.r, a),
            g: mix(px.g, color.g, a),
            b: mix(px.b, color.b, a),
        };
    }

    /// Pixel rows whose centres fall within `[top, bottom)`, clipped.
    fn rows(&self, top: f32, bottom: f32) -> std::ops::Range<i64> {
        let first = (top - 0.5).ceil().max(0.0) as i64;
        let last = ((bottom - 0.5).ceil() as i64).min(self.height as i64);
        first..last.max(first)
    }

    /// Fill the horizontal span `[left, right)` on row `y`.
    fn span(&mut self, y: i64, left: f32, right: f32, color: Color) {
        let first = (left - 0.5).ceil().max(0.0) as i64;
        let last = ((right - 0.5).ceil() as i64).min(self.width as i64);
        for x in first..last {
            self.blend(x, y, color);
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        for row in self.rows(y, y + h) {
            self.span(row, x, x + w, color);
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.fill_ellipse(cx, cy, radius, radius, color);
    }

    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        for row in self.rows(cy - ry, cy + ry) {
            let dy = (row as f32 + 0.5 - cy) / ry;
            let half = rx * (1.0 - dy * dy).max(0.0).sqrt();
            self.span(row, cx - half, cx + half, color);
        }
    }

    /// Even-odd scanline fill of a closed polygon.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let top = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let bottom = points.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for row in self.rows(top, bottom) {
            let sy = row as f32 + 0.5;
            crossings.clear();
            for (i, &(x0, y0)) in points.iter().enumerate() {
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= sy && y1 > sy) || (y1 <= sy && y0 > sy) {
                    crossings.push(x0 + (sy - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                self.span(row, pair[0], pair[1], color);
            }
        }
    }

    /// Line segment drawn as a quad of the given thickness.
    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            self.fill_circle(from.0, from.1, width / 2.0, color);
            return;
        }
        // Widen thin lines so they survive rasterisation.
        let half = width.max(1.0) / 2.0;
        let (nx, ny) = (-dy / len * half, dx / len * half);
        self.fill_polygon(
            &[
                (from.0 + nx, from.1 + ny),
                (to.0 + nx, to.1 + ny),
                (to.0 - nx, to.1 - ny),
                (from.0 - nx, from.1 - ny),
            ],
            color,
        );
    }

    /// Average colour of the pixel block `[x0, x1) × [y0, y1)`, clipped.
    /// Used when downsampling for presentation.
    pub fn average(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Pixel {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        if x0 >= x1 || y0 >= y1 {
            return Pixel::default();
        }
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for y in y0..y1 {
            for px in &self.pixels[y * self.width + x0..y * self.width + x1] {
                r += px.r as u64;
                g += px.g as u64;
                b += px.b as u64;
            }
        }
        let n = ((x1 - x0) * (y1 - y0)) as u64;
        Pixel {
            r: (r / n) as u8,
            g: (g / n) as u8,
            b: (b / n) as u8,
        }
    }
}

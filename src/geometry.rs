//! Plain numeric types shared by both renderers.
//!
//! Coordinates are y-up: `Rect::y` is the bottom edge. Angles are radians
//! measured counter-clockwise from the +x axis.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }
}

/// Straight (non-premultiplied) color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const LIGHT_GRAY: Rgba = Rgba::rgb(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
    pub const ACCENT: Rgba = Rgba::rgb(0.0, 0.478, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut out = format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b));
        if self.a < 1.0 {
            out.push_str(&format!("{:02x}", byte(self.a)));
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEl {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathEl>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, point: Point) {
        self.elements.push(PathEl::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.elements.push(PathEl::LineTo(point));
    }

    pub fn close(&mut self) {
        self.elements.push(PathEl::Close);
    }

    /// Vertices of every move/line element, in path order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.elements.iter().filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::Close => None,
        })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.elements.last(), Some(PathEl::Close))
    }

    pub fn is_finite(&self) -> bool {
        self.points().all(|p| p.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center_and_min_side() {
        let rect = Rect::new(10.0, 20.0, 40.0, 30.0);
        assert_eq!(rect.center(), Point::new(30.0, 35.0));
        assert_eq!(rect.min_side(), 30.0);
        assert_eq!(rect.max_x(), 50.0);
        assert_eq!(rect.max_y(), 50.0);
    }

    #[test]
    fn hex_colors_parse_and_format() {
        let color = Rgba::from_hex("#ff8000").unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);
        assert_eq!(color.to_hex(), "#ff8000");

        let translucent = Rgba::from_hex("00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(translucent.to_hex(), "#00000080");

        assert!(Rgba::from_hex("#fff").is_none());
        assert!(Rgba::from_hex("#gg0000").is_none());
    }

    #[test]
    fn path_points_skip_close() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(1.0, 1.0));
        path.close();
        assert_eq!(path.points().count(), 2);
        assert!(path.is_closed());
        assert!(path.is_finite());

        path.line_to(Point::new(f64::NAN, 0.0));
        assert!(!path.is_finite());
    }
}

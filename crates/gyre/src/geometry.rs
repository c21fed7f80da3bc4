use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Canvas convention: 0 is 3 o'clock and angles grow clockwise (y points down).
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Maps canvas-local pointer coordinates into wheel space, where the shared
/// center is the origin and radii are in configuration units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Point::default(),
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(center: Point, scale: f64) -> Self {
        Self { center, scale }
    }

    /// Centers the wheel in a `width` x `height` canvas and scales it so the
    /// outermost ring spans `fill` of the smaller dimension.
    pub fn fit(width: f64, height: f64, outer_radius: f64, fill: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        let available = width.min(height) * fill / 2.0;
        let scale = if outer_radius > 0.0 && available > 0.0 {
            available / outer_radius
        } else {
            1.0
        };
        Self { center, scale }
    }

    pub fn to_wheel(&self, canvas: Point) -> Point {
        Point::new(
            (canvas.x - self.center.x) / self.scale,
            (canvas.y - self.center.y) / self.scale,
        )
    }
}

/// Difference `current - previous` corrected across the -π/π seam so the
/// shortest way around is taken.
pub fn wrapped_delta(current: f64, previous: f64) -> f64 {
    let mut delta = current - previous;
    if delta > PI {
        delta -= TAU;
    }
    if delta < -PI {
        delta += TAU;
    }
    delta
}

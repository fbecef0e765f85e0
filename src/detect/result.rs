/// A ball position in source-resolution pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BallPoint {
    pub x: i32,
    pub y: i32,
}

impl BallPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Per-frame detection outcome: a single position, or nothing.
///
/// `None` covers both "no circle found" and "more than one circle found";
/// an ambiguous frame is recorded the same way as an empty one.
pub type Detection = Option<BallPoint>;

/// A candidate circle returned by the Hough transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

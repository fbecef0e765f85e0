//! Trail overlay renderer.
//!
//! Draws the trajectory history onto the full-resolution frame: one small
//! yellow circle outline per known position. Purely cosmetic; drawing order
//! across the slots does not matter.

use anyhow::Result;
use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;

use crate::trajectory::TrajectoryHistory;

/// Outline radius of each trail marker, in pixels.
const MARKER_RADIUS: i32 = 2;

/// Yellow in BGR.
const MARKER_COLOR: (f64, f64, f64) = (0.0, 255.0, 255.0);

/// Draw the trail onto `frame` in place.
pub fn draw_trail(frame: &mut Mat, history: &TrajectoryHistory) -> Result<()> {
    let color = Scalar::new(MARKER_COLOR.0, MARKER_COLOR.1, MARKER_COLOR.2, 0.0);
    for point in history.known_positions() {
        imgproc::circle(
            frame,
            Point::new(point.x, point.y),
            MARKER_RADIUS,
            color,
            1,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BallPoint;
    use opencv::core::{Scalar, CV_8UC3};
    use opencv::prelude::*;

    fn black_frame() -> Mat {
        Mat::new_rows_cols_with_default(240, 320, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    #[test]
    fn empty_history_leaves_frame_untouched() {
        let mut frame = black_frame();
        draw_trail(&mut frame, &TrajectoryHistory::new()).unwrap();

        let mut gray = Mat::default();
        imgproc::cvt_color(&frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0).unwrap();
        assert_eq!(opencv::core::count_non_zero(&gray).unwrap(), 0);
    }

    #[test]
    fn known_positions_leave_marks() {
        let mut history = TrajectoryHistory::new();
        history.push(Some(BallPoint::new(100, 50)));
        history.push(Some(BallPoint::new(110, 55)));

        let mut frame = black_frame();
        draw_trail(&mut frame, &history).unwrap();

        let mut gray = Mat::default();
        imgproc::cvt_color(&frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0).unwrap();
        assert!(opencv::core::count_non_zero(&gray).unwrap() > 0);
    }
}

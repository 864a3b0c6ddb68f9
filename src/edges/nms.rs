//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! For each interior pixel the gradient direction is folded into [0, 180]
//! degrees and bucketed into one of four orientation bins; the pixel keeps
//! its magnitude only when it is at least as large as both neighbors along
//! that direction. A 2-pixel frame is written as 0: boundary pixels are
//! never considered edges.

use crate::filters::GradientField;
use crate::raster::Raster;

const BORDER: usize = 2;

/// Thin gradient-magnitude ridges to single-pixel width.
pub fn suppress_non_maxima(gradient: &GradientField) -> Raster {
    let width = gradient.magnitude.width();
    let height = gradient.magnitude.height();
    let mut thinned = Raster::with_shape(width, height, 1);
    if width <= 2 * BORDER || height <= 2 * BORDER {
        return thinned;
    }

    for i in BORDER..height - BORDER {
        for j in BORDER..width - BORDER {
            let mag = gradient.magnitude.get(i, j, 0);

            // Fold the direction into [0, 180] degrees.
            let mut angle = gradient.direction.get(i, j, 0).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            let (a, b) = if (22.5..67.5).contains(&angle) {
                // Diagonal.
                (
                    gradient.magnitude.get(i + 1, j + 1, 0),
                    gradient.magnitude.get(i - 1, j - 1, 0),
                )
            } else if (67.5..112.5).contains(&angle) {
                // Vertical.
                (
                    gradient.magnitude.get(i + 1, j, 0),
                    gradient.magnitude.get(i - 1, j, 0),
                )
            } else if (112.5..157.5).contains(&angle) {
                // Anti-diagonal.
                (
                    gradient.magnitude.get(i - 1, j + 1, 0),
                    gradient.magnitude.get(i + 1, j - 1, 0),
                )
            } else {
                // Horizontal: [0, 22.5) and [157.5, 180].
                (
                    gradient.magnitude.get(i, j + 1, 0),
                    gradient.magnitude.get(i, j - 1, 0),
                )
            };

            if mag >= a && mag >= b {
                thinned.set(i, j, 0, mag);
            }
        }
    }
    thinned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: usize, height: usize) -> GradientField {
        GradientField {
            magnitude: Raster::with_shape(width, height, 1),
            direction: Raster::with_shape(width, height, 1),
        }
    }

    #[test]
    fn keeps_a_horizontal_direction_ridge_maximum() {
        let mut g = field(7, 7);
        // Gradient points along +x (angle 0): compare against (i, j-1), (i, j+1).
        g.magnitude.set(3, 2, 0, 1.0);
        g.magnitude.set(3, 3, 0, 5.0);
        g.magnitude.set(3, 4, 0, 2.0);

        let thinned = suppress_non_maxima(&g);
        assert_eq!(thinned.get(3, 3, 0), 5.0);
        assert_eq!(thinned.get(3, 2, 0), 0.0);
        assert_eq!(thinned.get(3, 4, 0), 0.0);
    }

    #[test]
    fn suppresses_non_maxima_along_vertical_direction() {
        let mut g = field(7, 7);
        for i in 2..5 {
            g.direction.set(i, 3, 0, std::f32::consts::FRAC_PI_2); // 90 degrees
        }
        g.magnitude.set(2, 3, 0, 4.0);
        g.magnitude.set(3, 3, 0, 3.0);
        g.magnitude.set(4, 3, 0, 2.0);

        let thinned = suppress_non_maxima(&g);
        // 3.0 is below its upper neighbor 4.0 along the vertical direction.
        assert_eq!(thinned.get(3, 3, 0), 0.0);
        assert_eq!(thinned.get(2, 3, 0), 4.0);
    }

    #[test]
    fn ties_survive() {
        let mut g = field(7, 7);
        g.magnitude.set(3, 2, 0, 5.0);
        g.magnitude.set(3, 3, 0, 5.0);
        g.magnitude.set(3, 4, 0, 5.0);
        let thinned = suppress_non_maxima(&g);
        assert_eq!(thinned.get(3, 3, 0), 5.0);
    }

    #[test]
    fn border_frame_is_zeroed() {
        let mut g = field(6, 6);
        for i in 0..6 {
            for j in 0..6 {
                g.magnitude.set(i, j, 0, 9.0);
            }
        }
        let thinned = suppress_non_maxima(&g);
        for i in 0..6 {
            for j in 0..6 {
                let interior = (2..4).contains(&i) && (2..4).contains(&j);
                if !interior {
                    assert_eq!(thinned.get(i, j, 0), 0.0, "border pixel ({i}, {j})");
                }
            }
        }
    }

    #[test]
    fn tiny_images_produce_an_empty_map() {
        let g = field(4, 4);
        let thinned = suppress_non_maxima(&g);
        assert!(thinned.samples().iter().all(|&v| v == 0.0));
    }
}

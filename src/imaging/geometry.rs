//! Rounded-rectangle inclusion test.
//!
//! A square of side `size` with corner radius `r` keeps every pixel except
//! those in the four `r × r` corner zones that lie farther than `r` from the
//! zone's circle centre. The centres sit `r` inward from the left/top edges
//! and at `size - r` on the right/bottom, so the cut is a hard quarter circle
//! with no anti-aliasing.

/// Whether pixel `(x, y)` survives the corner mask of a `size × size` square.
///
/// `radius == 0` keeps everything.
pub fn is_inside(x: u32, y: u32, size: u32, radius: u32) -> bool {
    if radius == 0 {
        return true;
    }

    let far = size.saturating_sub(radius);

    let center_x = if x < radius {
        radius
    } else if x >= far {
        far
    } else {
        return true;
    };
    let center_y = if y < radius {
        radius
    } else if y >= far {
        far
    } else {
        return true;
    };

    let dx = f64::from(x) - f64::from(center_x);
    let dy = f64::from(y) - f64::from(center_y);
    (dx * dx + dy * dy).sqrt() <= f64::from(radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_kept() {
        assert!(is_inside(50, 50, 100, 20));
    }

    #[test]
    fn zero_radius_keeps_every_pixel() {
        for y in 0..16 {
            for x in 0..16 {
                assert!(is_inside(x, y, 16, 0), "({x}, {y}) masked with r=0");
            }
        }
    }

    #[test]
    fn top_left_corner_within_radius() {
        assert!(is_inside(15, 15, 100, 20));
    }

    #[test]
    fn top_left_corner_outside_radius() {
        assert!(!is_inside(5, 5, 100, 20));
        assert!(!is_inside(0, 0, 100, 20));
    }

    #[test]
    fn edge_pixel_between_corners_kept() {
        assert!(is_inside(50, 0, 100, 20));
        assert!(is_inside(0, 50, 100, 20));
        assert!(is_inside(99, 50, 100, 20));
    }

    #[test]
    fn top_right_corner_within_radius() {
        assert!(is_inside(85, 15, 100, 20));
    }

    #[test]
    fn bottom_left_corner_outside_radius() {
        assert!(!is_inside(5, 95, 100, 20));
    }

    #[test]
    fn all_four_extremities_cut() {
        assert!(!is_inside(0, 0, 100, 20));
        assert!(!is_inside(99, 0, 100, 20));
        assert!(!is_inside(0, 99, 100, 20));
        assert!(!is_inside(99, 99, 100, 20));
    }

    #[test]
    fn distance_exactly_radius_is_inside() {
        // Centre (10, 10), pixel (4, 2) → dx = -6, dy = -8 → distance 10.
        assert!(is_inside(4, 2, 100, 10));
        assert!(!is_inside(3, 2, 100, 10));
    }

    #[test]
    fn far_side_centres_are_size_minus_radius() {
        // Bottom-right centre is (80, 80) for size 100, r 20.
        // (80 + 12, 80 + 16) → distance 20 → kept; one step further is cut.
        assert!(is_inside(92, 96, 100, 20));
        assert!(!is_inside(93, 96, 100, 20));
    }
}

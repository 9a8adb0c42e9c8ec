//! Random Point Sampling
//!
//! Uniform destination sampling inside element boxes and the viewport. Aiming
//! at a random interior point instead of the geometric center is a large part
//! of what makes trajectories look operated by a hand.

use rand::Rng;

use crate::geometry::{BoundingBox, Vector, ORIGIN};

/// Uniformly sample a point inside `bounds`, optionally inset by padding.
///
/// `padding_percentage` must lie in the open interval (0, 100); the box is
/// inset by half the padding on each side before sampling. Validation policy:
/// an absent or out-of-range padding is treated as zero padding rather than
/// rejected, so caller options can be passed through unchecked.
pub fn random_box_point<R: Rng + ?Sized>(
    bounds: &BoundingBox,
    padding_percentage: Option<f64>,
    rng: &mut R,
) -> Vector {
    let (padding_width, padding_height) = match padding_percentage {
        Some(p) if p > 0.0 && p < 100.0 => {
            (bounds.width * p / 100.0, bounds.height * p / 100.0)
        }
        _ => (0.0, 0.0),
    };

    Vector {
        x: bounds.x + padding_width / 2.0 + rng.gen::<f64>() * (bounds.width - padding_width),
        y: bounds.y + padding_height / 2.0 + rng.gen::<f64>() * (bounds.height - padding_height),
    }
}

/// Uniformly sample a point anywhere in a viewport anchored at the origin.
pub fn random_page_point<R: Rng + ?Sized>(
    viewport_width: f64,
    viewport_height: f64,
    rng: &mut R,
) -> Vector {
    let page = BoundingBox::new(ORIGIN.x, ORIGIN.y, viewport_width, viewport_height);
    random_box_point(&page, None, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_padding_50_insets_by_a_quarter_per_side() {
        let mut rng = StdRng::seed_from_u64(9);
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0);

        for _ in 0..200 {
            let p = random_box_point(&bounds, Some(50.0), &mut rng);
            assert!(p.x >= 25.0 && p.x <= 75.0, "x {} out of padded range", p.x);
            assert!(p.y >= 25.0 && p.y <= 75.0, "y {} out of padded range", p.y);
        }
    }

    #[test]
    fn test_out_of_range_padding_falls_back_to_zero() {
        let bounds = BoundingBox::new(10.0, 10.0, 20.0, 20.0);

        for bad in [Some(0.0), Some(100.0), Some(-5.0), Some(250.0), None] {
            let mut rng = StdRng::seed_from_u64(33);
            let sample = random_box_point(&bounds, bad, &mut rng);

            let mut rng = StdRng::seed_from_u64(33);
            let unpadded = random_box_point(&bounds, None, &mut rng);

            assert_eq!(sample, unpadded, "padding {:?} not treated as zero", bad);
        }
    }

    #[test]
    fn test_page_point_spans_viewport() {
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..200 {
            let p = random_page_point(1920.0, 1080.0, &mut rng);
            assert!(p.x >= 0.0 && p.x < 1920.0);
            assert!(p.y >= 0.0 && p.y < 1080.0);
        }
    }

    proptest! {
        #[test]
        fn prop_padded_sample_within_padded_subrect(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            width in 1.0f64..1000.0,
            height in 1.0f64..1000.0,
            padding in 0.01f64..99.99,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let bounds = BoundingBox::new(x, y, width, height);
            let p = random_box_point(&bounds, Some(padding), &mut rng);

            let pw = width * padding / 100.0;
            let ph = height * padding / 100.0;
            let eps = 1e-9;

            prop_assert!(p.x >= x + pw / 2.0 - eps);
            prop_assert!(p.x <= x + width - pw / 2.0 + eps);
            prop_assert!(p.y >= y + ph / 2.0 - eps);
            prop_assert!(p.y <= y + height - ph / 2.0 + eps);
        }
    }
}

//! Scalar reference kernel for ZNCC evaluation.

use crate::image::ImageView;
use crate::kernel::Kernel;
use crate::template::TemplatePlan;

/// Scalar ZNCC kernel.
pub struct ZnccScalar;

impl Kernel for ZnccScalar {
    fn dot_at(image: ImageView<'_, u8>, tpl: &TemplatePlan, x: usize, y: usize) -> f64 {
        let tpl_width = tpl.width();
        let t_prime = tpl.t_prime();
        let mut dot = 0.0f64;
        for ty in 0..tpl.height() {
            let img_row = image.row(y + ty).expect("row within bounds for scan");
            let window = &img_row[x..x + tpl_width];
            let base = ty * tpl_width;
            let tpl_row = &t_prime[base..base + tpl_width];
            let mut row_dot = 0.0f32;
            for (&t, &value) in tpl_row.iter().zip(window) {
                row_dot += t * value as f32;
            }
            dot += f64::from(row_dot);
        }
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::ZnccScalar;
    use crate::kernel::{IntegralImage, Kernel};
    use crate::template::TemplatePlan;
    use crate::ImageView;

    #[test]
    fn zncc_scan_matches_bruteforce() {
        let img_width = 6;
        let img_height = 5;
        let mut image = Vec::with_capacity(img_width * img_height);
        for y in 0..img_height {
            for x in 0..img_width {
                image.push(((x * 17 + y * 9 + x * y) & 0xFF) as u8);
            }
        }
        let tpl_width = 3;
        let tpl_height = 2;
        let mut tpl = Vec::with_capacity(tpl_width * tpl_height);
        for y in 0..tpl_height {
            for x in 0..tpl_width {
                tpl.push(((x * 5 + y * 11 + x * y) & 0xFF) as u8);
            }
        }

        let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, tpl_width, tpl_height).unwrap();
        let plan = TemplatePlan::from_view(tpl_view);
        let integral = IntegralImage::from_view(image_view);
        let best = <ZnccScalar as Kernel>::scan_best(image_view, &integral, &plan).unwrap();

        let n = (tpl_width * tpl_height) as f64;
        let t_mean = tpl.iter().map(|&v| v as f64).sum::<f64>() / n;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_x = 0;
        let mut best_y = 0;
        for y in 0..=(img_height - tpl_height) {
            for x in 0..=(img_width - tpl_width) {
                let mut window = Vec::with_capacity(tpl.len());
                for ty in 0..tpl_height {
                    for tx in 0..tpl_width {
                        window.push(image[(y + ty) * img_width + x + tx] as f64);
                    }
                }
                let i_mean = window.iter().sum::<f64>() / n;
                let mut cov = 0.0;
                let mut var_t = 0.0;
                let mut var_i = 0.0;
                for (t, i) in tpl.iter().zip(&window) {
                    let dt = *t as f64 - t_mean;
                    let di = i - i_mean;
                    cov += dt * di;
                    var_t += dt * dt;
                    var_i += di * di;
                }
                let score = cov / (var_t * var_i).sqrt();
                if score > best_score {
                    best_score = score;
                    best_x = x;
                    best_y = y;
                }
            }
        }

        assert_eq!(best.x, best_x);
        assert_eq!(best.y, best_y);
        assert!((best.score as f64 - best_score).abs() < 1e-5);
    }
}

#![cfg(feature = "rayon")]

mod common;

use common::{noise, paste, scaled};
use scalebar::kernel::rayon::{scan_best_par, score_map_par};
use scalebar::kernel::scalar::ZnccScalar;
use scalebar::kernel::IntegralImage;
use scalebar::{
    ImageView, Kernel, MatchConfig, ScaleBarMatcher, ScaleSchedule, ScaleSweep, Template,
    TemplatePlan,
};

#[test]
fn parallel_candidates_match_sequential() {
    let tpl = noise(60, 12, 21);
    let patch = scaled(&tpl, 60, 12, 69, 13);
    let mut scene = noise(100, 30, 22);
    paste(&mut scene, 100, &patch, 69, 13, 17, 9);
    let view = ImageView::from_slice(&scene, 100, 30).unwrap();

    let sequential = ScaleBarMatcher::new(Template::new(tpl.clone(), 60, 12, 100.0).unwrap())
        .match_image(view)
        .unwrap();
    let parallel = ScaleBarMatcher::new(Template::new(tpl, 60, 12, 100.0).unwrap())
        .with_config(MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        })
        .match_image(view)
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.best.top_left, (17, 9));
}

#[test]
fn parallel_ties_resolve_to_first_candidate() {
    let tpl = noise(8, 4, 23);
    let scene = vec![77u8; 24 * 12];
    let view = ImageView::from_slice(&scene, 24, 12).unwrap();

    let sequential = ScaleBarMatcher::new(Template::new(tpl.clone(), 8, 4, 10.0).unwrap())
        .match_image(view)
        .unwrap();
    let parallel = ScaleBarMatcher::new(Template::new(tpl, 8, 4, 10.0).unwrap())
        .with_config(MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        })
        .match_image(view)
        .unwrap();

    assert_eq!(sequential, parallel);
    let schedule = ScaleSchedule::new(ScaleSweep::default()).unwrap();
    assert_eq!(parallel.best.resize_factor, schedule.candidates()[0].factor);
    assert_eq!(parallel.best.score, 0.0);
}

#[test]
fn row_parallel_scan_matches_sequential() {
    let image = noise(48, 32, 31);
    let tpl = noise(11, 7, 32);
    let image_view = ImageView::from_slice(&image, 48, 32).unwrap();
    let tpl_view = ImageView::from_slice(&tpl, 11, 7).unwrap();
    let plan = TemplatePlan::from_view(tpl_view);
    let integral = IntegralImage::from_view(image_view);

    let seq_map = <ZnccScalar as Kernel>::score_map(image_view, &integral, &plan).unwrap();
    let par_map = score_map_par::<ZnccScalar>(image_view, &integral, &plan).unwrap();
    assert_eq!(seq_map, par_map);

    let seq_best = <ZnccScalar as Kernel>::scan_best(image_view, &integral, &plan).unwrap();
    let par_best = scan_best_par::<ZnccScalar>(image_view, &integral, &plan).unwrap();
    assert_eq!(seq_best, par_best);
    assert_eq!(Some(seq_best), seq_map.max_loc());
}

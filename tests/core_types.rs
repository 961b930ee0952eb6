use scalebar::{
    normalize_min_max, ImageView, OwnedImage, ScaleBarError, ScaleBarMatcher, ScaleSchedule,
    ScaleSweep, SweepDirection, Template,
};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        ScaleBarError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        ScaleBarError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        ScaleBarError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, ScaleBarError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.as_slice(), data.as_slice());

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());
    assert_eq!(roi.min_max(), (5, 10));

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        ScaleBarError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn owned_image_requires_exact_length() {
    assert!(OwnedImage::new(vec![0u8; 6], 3, 2).is_ok());
    assert_eq!(
        OwnedImage::new(vec![0u8; 5], 3, 2).unwrap_err(),
        ScaleBarError::BufferTooSmall { needed: 6, got: 5 }
    );
    assert_eq!(
        OwnedImage::new(vec![0u8; 7], 3, 2).unwrap_err(),
        ScaleBarError::InvalidDimensions {
            width: 3,
            height: 2
        }
    );
}

#[test]
fn normalization_is_idempotent() {
    let data: Vec<u8> = (0..64u32).map(|i| ((i * 97 + 13) % 200 + 20) as u8).collect();
    let view = ImageView::from_slice(&data, 8, 8).unwrap();
    let once = normalize_min_max(view);
    let twice = normalize_min_max(once.view());
    assert_eq!(once, twice);
    assert_eq!(once.view().min_max(), (0, 255));
}

#[test]
fn schedule_preserves_enumeration_order() {
    let schedule = ScaleSchedule::new(ScaleSweep::default()).unwrap();
    let directions: Vec<SweepDirection> = schedule.iter().map(|c| c.direction).collect();
    let switch = directions
        .iter()
        .position(|&d| d == SweepDirection::Down)
        .unwrap();
    assert_eq!(switch, 90);
    assert!(directions[switch..]
        .iter()
        .all(|&d| d == SweepDirection::Down));
}

#[test]
fn evaluate_candidate_skips_templates_that_do_not_fit() {
    let tpl: Vec<u8> = (0..20u32).map(|i| (i * 13 % 256) as u8).collect();
    let template = Template::new(tpl, 10, 2, 1.0).unwrap();
    let matcher = ScaleBarMatcher::new(template);
    let scene = vec![0u8; 10 * 6];
    let scene = ImageView::from_slice(&scene, 10, 6).unwrap();
    let schedule = ScaleSchedule::new(ScaleSweep::default()).unwrap();

    // 1.10 makes the template 11 pixels wide, wider than the scene.
    let too_wide = schedule.candidates()[9];
    assert!(matcher.evaluate_candidate(scene, &too_wide).unwrap().is_none());

    // 0.39 shrinks the height below one pixel.
    let too_thin = schedule.candidates()[90 + 60];
    assert_eq!(too_thin.scaled_size(10, 2).1, 0);
    assert!(matcher.evaluate_candidate(scene, &too_thin).unwrap().is_none());

    let fits = schedule.candidates()[90];
    let result = matcher.evaluate_candidate(scene, &fits).unwrap().unwrap();
    assert_eq!((result.width, result.height), (9, 1));
}

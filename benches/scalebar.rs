use criterion::{criterion_group, criterion_main, Criterion};
use scalebar::kernel::scalar::ZnccScalar;
use scalebar::kernel::IntegralImage;
use scalebar::{ImageView, Kernel, MatchConfig, ScaleBarMatcher, Template, TemplatePlan};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        out.extend_from_slice(&image[row + x0..row + x0 + width]);
    }
    out
}

fn bench_kernel(c: &mut Criterion) {
    let img_width = 320;
    let img_height = 120;
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
    let tpl = extract_patch(&image, img_width, 40, 30, 96, 16);
    let tpl_view = ImageView::from_slice(&tpl, 96, 16).unwrap();
    let plan = TemplatePlan::from_view(tpl_view);
    let integral = IntegralImage::from_view(image_view);

    c.bench_function("zncc_scan_best_scalar", |b| {
        b.iter(|| {
            <ZnccScalar as Kernel>::scan_best(black_box(image_view), &integral, &plan).unwrap()
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let img_width = 240;
    let img_height = 80;
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
    let tpl = extract_patch(&image, img_width, 60, 20, 80, 12);

    let matcher = ScaleBarMatcher::new(Template::new(tpl.clone(), 80, 12, 200.0).unwrap());
    c.bench_function("scale_search_sequential", |b| {
        b.iter(|| matcher.match_image(black_box(image_view)).unwrap())
    });

    let parallel = ScaleBarMatcher::new(Template::new(tpl, 80, 12, 200.0).unwrap()).with_config(
        MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        },
    );
    c.bench_function("scale_search_parallel", |b| {
        b.iter(|| parallel.match_image(black_box(image_view)).unwrap())
    });
}

criterion_group!(benches, bench_kernel, bench_search);
criterion_main!(benches);

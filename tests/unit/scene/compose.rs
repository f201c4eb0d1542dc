use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::*;
use crate::foundation::core::Canvas;
use crate::foundation::error::BlitError;
use crate::scene::config::LayerSpec;

/// Loader serving fixed images from memory.
#[derive(Default)]
struct MapLoader(HashMap<PathBuf, ImageAsset>);

impl AssetLoader for MapLoader {
    fn load(&self, path: &Path) -> BlitResult<ImageAsset> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| BlitError::asset(format!("no such image '{}'", path.display())))
    }
}

fn scene(layers: Vec<LayerSpec>) -> SceneConfig {
    SceneConfig {
        name: "t".to_owned(),
        canvas: Canvas {
            width: 4,
            height: 4,
        },
        clear: Color::rgb(100, 100, 100),
        layers,
    }
}

fn layer(source: LayerSource, at: [i32; 2], blend: Option<BlendState>) -> LayerSpec {
    LayerSpec {
        source,
        src_rect: None,
        at,
        blend,
    }
}

#[test]
fn gradient_ramps_red_and_green() {
    let g = gradient_image(4, 2);
    assert_eq!(g.get_pixel(0, 0), Color::rgb(0, 0, 0));
    assert_eq!(g.get_pixel(2, 0), Color::rgb(127, 0, 0));
    assert_eq!(g.get_pixel(3, 1), Color::rgb(191, 127, 0));
    assert!(gradient_image(0, 0).is_empty());
}

#[test]
fn scene_layers_draw_in_order_with_clipping() {
    let cfg = scene(vec![
        layer(
            LayerSource::Solid {
                color: Color::RED,
                width: 2,
                height: 2,
            },
            [-1, -1],
            None,
        ),
        layer(
            LayerSource::Solid {
                color: Color::new(0, 0, 255, 0),
                width: 4,
                height: 4,
            },
            [0, 0],
            Some(BlendState::ALPHA),
        ),
        layer(
            LayerSource::Image {
                path: PathBuf::from("dot.png"),
            },
            [3, 3],
            Some(BlendState::ADDITIVE),
        ),
    ]);
    let mut loader = MapLoader::default();
    loader.0.insert(
        PathBuf::from("dot.png"),
        ImageAsset {
            width: 2,
            height: 1,
            pixels: vec![Color::new(10, 0, 0, 0), Color::WHITE],
        },
    );

    let frame = render_scene(&cfg, &loader).unwrap();
    assert_eq!(frame.get_pixel(0, 0), Color::RED);
    assert_eq!(frame.get_pixel(1, 0), Color::rgb(100, 100, 100));
    assert_eq!(frame.get_pixel(3, 3), Color::rgb(110, 100, 100));
    assert_eq!(frame.get_pixel(2, 3), Color::rgb(100, 100, 100));
}

#[test]
fn scene_errors_surface_from_loader_and_rects() {
    let cfg = scene(vec![layer(
        LayerSource::Image {
            path: PathBuf::from("missing.png"),
        },
        [0, 0],
        None,
    )]);
    let err = render_scene(&cfg, &MapLoader::default()).unwrap_err();
    assert!(matches!(err, BlitError::Asset(_)));

    let mut bad_rect = layer(
        LayerSource::Gradient {
            width: 2,
            height: 2,
        },
        [0, 0],
        None,
    );
    bad_rect.src_rect = Some(PixelRect::new(1, 1, 2, 2));
    let err = render_scene(&scene(vec![bad_rect]), &MapLoader::default()).unwrap_err();
    assert!(err.to_string().contains("exceeds source bounds"));
}

#[test]
fn sheet_layout_and_samples() {
    let overlay = ImageAsset {
        width: 2,
        height: 2,
        pixels: vec![Color::new(200, 0, 0, 0); 4],
    };
    let sheet = blend_test_sheet(&overlay, &DEFAULT_SHEET_SAMPLES).unwrap();
    assert_eq!(sheet.width(), SHEET_MARGIN + 3 * (2 + SHEET_MARGIN));
    assert_eq!(sheet.height(), SHEET_MARGIN + 3 * (2 + SHEET_MARGIN));
    assert_eq!(sheet.get_pixel(0, 0), SHEET_BACKGROUND);

    let cell = |i: u32| (SHEET_MARGIN + (i % 3) * 52, SHEET_MARGIN + (i / 3) * 52);

    // Header row: gradient base, opaque overlay color, overlay alpha as grey.
    let (x, y) = cell(0);
    assert_eq!(sheet.get_pixel(x + 1, y), Color::rgb(127, 0, 0));
    let (x, y) = cell(1);
    assert_eq!(sheet.get_pixel(x, y), Color::rgb(200, 0, 0));
    let (x, y) = cell(2);
    assert_eq!(sheet.get_pixel(x, y), Color::rgb(0, 0, 0));

    // (SourceAlpha, OneMinusSourceAlpha) with a transparent overlay keeps the base color.
    let (x, y) = cell(3 + 2);
    assert_eq!(sheet.get_pixel(x + 1, y), Color::rgb(127, 0, 0));
    // (One, Zero) overwrites color; alpha accumulates and saturates.
    let (x, y) = cell(3 + 1);
    assert_eq!(sheet.get_pixel(x + 1, y), Color::new(200, 0, 0, 255));
}

#[test]
fn sheet_rejects_overlays_wider_than_i32() {
    for width in [1_000_000_000, 2_000_000_000] {
        let overlay = ImageAsset {
            width,
            height: 0,
            pixels: Vec::new(),
        };
        let err = blend_test_sheet(&overlay, &DEFAULT_SHEET_SAMPLES).unwrap_err();
        assert!(matches!(err, BlitError::Validation(_)), "{err}");
        assert!(err.to_string().contains("too large for a sheet"));
    }
}

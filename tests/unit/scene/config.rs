use super::*;
use crate::blend::factor::BlendFactor;

#[test]
fn minimal_scene_uses_defaults() {
    let cfg = SceneConfig::from_json_str(r#"{"canvas": {"width": 8, "height": 4}}"#).unwrap();
    assert_eq!(cfg.name, "scene");
    assert_eq!(cfg.clear, Color::rgb(100, 100, 100));
    assert!(cfg.layers.is_empty());
}

#[test]
fn full_scene_parses() {
    let json = r##"{
        "name": "blend",
        "canvas": {"width": 32, "height": 32},
        "clear": [0, 0, 0],
        "layers": [
            {"source": {"kind": "gradient", "width": 8, "height": 8}, "at": [-2, 3]},
            {
                "source": {"kind": "solid", "color": "#ff000080", "width": 4, "height": 4},
                "src_rect": {"x": 1, "y": 1, "width": 2, "height": 2},
                "blend": {
                    "color_src": "SourceAlpha", "color_dst": "OneMinusSourceAlpha",
                    "alpha_src": "One", "alpha_dst": "Zero"
                }
            },
            {"source": {"kind": "image", "path": "dot.png"}}
        ]
    }"##;
    let cfg = SceneConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.clear, Color::BLACK);
    assert_eq!(cfg.layers.len(), 3);
    assert_eq!(cfg.layers[0].at, [-2, 3]);
    assert_eq!(
        cfg.layers[1].source,
        LayerSource::Solid {
            color: Color::new(255, 0, 0, 128),
            width: 4,
            height: 4
        }
    );
    assert_eq!(cfg.layers[1].src_rect, Some(PixelRect::new(1, 1, 2, 2)));
    assert_eq!(
        cfg.layers[1].blend,
        Some(BlendState::separate(
            BlendFactor::SourceAlpha,
            BlendFactor::OneMinusSourceAlpha,
            BlendFactor::One,
            BlendFactor::Zero,
        ))
    );
    assert_eq!(
        cfg.layers[2].source,
        LayerSource::Image {
            path: PathBuf::from("dot.png")
        }
    );
    assert_eq!(cfg.layers[2].at, [0, 0]);
}

#[test]
fn unknown_fields_and_factors_are_rejected() {
    let err = SceneConfig::from_json_str(r#"{"canvas": {"width": 1, "height": 1}, "fps": 60}"#)
        .unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    let err = SceneConfig::from_json_str(
        r#"{"canvas": {"width": 1, "height": 1}, "layers": [
            {"source": {"kind": "gradient", "width": 1, "height": 1},
             "blend": {"color_src": "Half", "color_dst": "One", "alpha_src": "One", "alpha_dst": "One"}}
        ]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, BlitError::Serde(_)));
}

#[test]
fn oversized_dimensions_fail_validation() {
    let err = SceneConfig::from_json_str(r#"{"canvas": {"width": 20000, "height": 1}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("validation error:"));

    let err = SceneConfig::from_json_str(
        r#"{"canvas": {"width": 1, "height": 1}, "layers": [
            {"source": {"kind": "image", "path": ""}}
        ]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

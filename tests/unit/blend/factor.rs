use super::*;

#[test]
fn tags_are_dense_and_stable() {
    for (i, f) in BlendFactor::ALL.into_iter().enumerate() {
        assert_eq!(usize::from(f.as_tag()), i);
        assert_eq!(BlendFactor::from_tag(f.as_tag()), f);
    }
}

#[test]
#[should_panic(expected = "invalid blend factor tag")]
fn unknown_tag_fails_fast() {
    let _ = BlendFactor::from_tag(10);
}

#[test]
fn labels_match_sample_sheet_names() {
    assert_eq!(BlendFactor::OneMinusSourceAlpha.label(), "1 - Src Alpha");
    assert_eq!(BlendFactor::DestinationColor.to_string(), "Dest Color");
}

#[test]
fn from_str_is_case_insensitive() {
    assert_eq!(
        "oneminussourcealpha".parse::<BlendFactor>().unwrap(),
        BlendFactor::OneMinusSourceAlpha
    );
    assert_eq!(" Zero ".parse::<BlendFactor>().unwrap(), BlendFactor::Zero);
    let err = "Half".parse::<BlendFactor>().unwrap_err();
    assert!(err.to_string().contains("unknown blend factor"));
}

#[test]
fn resolve_uses_the_right_operand() {
    let (sc, sa, dc, da) = (10, 20, 30, 40);
    assert_eq!(BlendFactor::Zero.resolve(sc, sa, dc, da), 0);
    assert_eq!(BlendFactor::One.resolve(sc, sa, dc, da), 255);
    assert_eq!(BlendFactor::SourceColor.resolve(sc, sa, dc, da), 10);
    assert_eq!(BlendFactor::OneMinusSourceColor.resolve(sc, sa, dc, da), 245);
    assert_eq!(BlendFactor::SourceAlpha.resolve(sc, sa, dc, da), 20);
    assert_eq!(BlendFactor::OneMinusSourceAlpha.resolve(sc, sa, dc, da), 235);
    assert_eq!(BlendFactor::DestinationColor.resolve(sc, sa, dc, da), 30);
    assert_eq!(
        BlendFactor::OneMinusDestinationColor.resolve(sc, sa, dc, da),
        225
    );
    assert_eq!(BlendFactor::DestinationAlpha.resolve(sc, sa, dc, da), 40);
    assert_eq!(
        BlendFactor::OneMinusDestinationAlpha.resolve(sc, sa, dc, da),
        215
    );
}

#[test]
fn serde_uses_variant_names() {
    let json = serde_json::to_string(&BlendFactor::OneMinusDestinationAlpha).unwrap();
    assert_eq!(json, "\"OneMinusDestinationAlpha\"");
    assert!(serde_json::from_str::<BlendFactor>("\"Bogus\"").is_err());
}

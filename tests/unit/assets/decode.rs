use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "softblit_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn decode_image_keeps_straight_alpha() {
    let bytes = png_bytes(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 0]);
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (2, 1));
    assert_eq!(
        img.pixels,
        vec![Color::new(100, 50, 200, 128), Color::new(1, 2, 3, 0)]
    );
    assert_eq!(img.into_buffer().unwrap().get_pixel(0, 0).a, 128);
}

#[test]
fn decode_garbage_is_asset_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, BlitError::Asset(_)));
}

#[test]
fn fs_loader_resolves_relative_paths() {
    let dir = temp_dir("fs_loader");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("dot.png"), png_bytes(1, 1, vec![9, 8, 7, 255])).unwrap();

    let loader = FsAssetLoader::new(&dir);
    let img = loader.load(Path::new("dot.png")).unwrap();
    assert_eq!(img.pixels, vec![Color::rgb(9, 8, 7)]);

    let abs = loader.load(&dir.join("dot.png")).unwrap();
    assert_eq!(abs, img);
}

#[test]
fn fs_loader_reports_missing_and_corrupt_files() {
    let dir = temp_dir("fs_loader_errors");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("bad.png"), b"\x89PNG garbage").unwrap();
    let loader = FsAssetLoader::new(&dir);

    let err = loader.load(Path::new("missing.png")).unwrap_err();
    assert!(err.to_string().contains("asset error:"));
    assert!(err.to_string().contains("missing.png"));

    let err = loader.load(Path::new("bad.png")).unwrap_err();
    assert!(matches!(err, BlitError::Asset(_)));
    assert!(err.to_string().contains("bad.png"));
}

//! End-to-end gallery sessions against real files.
//!
//! Images are written as PNGs into a temp directory, decoded by the
//! `RustBackend`, and the snapshot is persisted next to them. Each test
//! reopens the gallery to check that state survives a restart.
//!
//! Run with: cargo test --test gallery_session

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use picshelf::gallery::{Gallery, GalleryError, GallerySettings};
use picshelf::imaging::{Filter, Interpolation, RustBackend, TransformError};
use picshelf::store::SnapshotStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> String {
    let path = dir.join(name);
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
        .save(&path)
        .unwrap();
    path.to_string_lossy().to_string()
}

fn open(store: &Path) -> Gallery<RustBackend> {
    Gallery::initialize(
        SnapshotStore::new(store),
        RustBackend::new(),
        GallerySettings::default(),
    )
}

fn store_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("state").join("gallery.json")
}

#[test]
fn first_run_creates_default_album_on_disk() {
    let tmp = TempDir::new().unwrap();
    let gallery = open(&store_path(&tmp));

    assert_eq!(gallery.list_albums(), vec!["default"]);
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store_path(&tmp)).unwrap()).unwrap();
    assert_eq!(json["albumData"]["default"], serde_json::json!([]));
    assert_eq!(json["imageFilters"], serde_json::json!({}));
}

#[test]
fn albums_and_filters_survive_restart() {
    let tmp = TempDir::new().unwrap();
    let p1 = write_png(tmp.path(), "p1.png", 20, 10, [200, 40, 40, 255]);
    let p2 = write_png(tmp.path(), "p2.png", 8, 8, [10, 10, 10, 255]);

    {
        let mut gallery = open(&store_path(&tmp));
        gallery.add_image("default", &p1);
        gallery.add_image("Trips", &p2);
        gallery.add_image("Trips", &p1);
        gallery.apply_filter_to(&p1, "sepia").unwrap();
        assert!(gallery.last_save_error().is_none());
    }

    let gallery = open(&store_path(&tmp));
    assert_eq!(gallery.list_albums(), vec!["default", "Trips"]);
    assert_eq!(gallery.images_in("Trips"), [p2.clone(), p1.clone()]);
    assert_eq!(gallery.filter_for(&p1), Filter::Sepia);
    assert_eq!(gallery.filter_for(&p2), Filter::None);
}

#[test]
fn filters_render_from_decoded_source() {
    let tmp = TempDir::new().unwrap();
    let p1 = write_png(tmp.path(), "p1.png", 4, 4, [10, 200, 255, 77]);
    let mut gallery = open(&store_path(&tmp));
    gallery.add_image("default", &p1);

    let inverted = gallery.apply_filter_to(&p1, "invert").unwrap();
    assert_eq!(inverted.to_rgba8().get_pixel(0, 0).0, [245, 55, 0, 77]);

    // Same filter again: still a single inversion
    let again = gallery.apply_filter_to(&p1, "invert").unwrap();
    assert_eq!(again.to_rgba8().get_pixel(3, 3).0, [245, 55, 0, 77]);

    let restored = gallery.apply_filter_to(&p1, "none").unwrap();
    assert_eq!(restored.to_rgba8().get_pixel(1, 2).0, [10, 200, 255, 77]);
}

#[test]
fn resize_then_filter_keeps_both() {
    let tmp = TempDir::new().unwrap();
    let p1 = write_png(tmp.path(), "p1.png", 30, 20, [255, 0, 0, 255]);
    let mut gallery = open(&store_path(&tmp));

    gallery.resize_displayed_image(&p1, 150, 150).unwrap();
    let shown = gallery.apply_filter_to(&p1, "grayscale").unwrap();
    assert_eq!(shown.dimensions(), (150, 150));
    let px = shown.to_rgba8().get_pixel(75, 75).0;
    assert_eq!(px, [76, 76, 76, 255]);
}

#[test]
fn export_writes_transformed_file() {
    let tmp = TempDir::new().unwrap();
    let p1 = write_png(tmp.path(), "p1.png", 16, 12, [100, 100, 100, 255]);
    let out = tmp.path().join("exports").join("p1-small.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    let mut gallery = open(&store_path(&tmp));
    gallery.resize_displayed_image(&p1, 8, 6).unwrap();
    gallery.apply_filter_to(&p1, "sepia").unwrap();
    gallery.export_displayed(&p1, &out).unwrap();

    let written = image::open(&out).unwrap();
    assert_eq!(written.dimensions(), (8, 6));
    assert_eq!(written.to_rgba8().get_pixel(4, 3).0, [135, 120, 94, 255]);
}

#[test]
fn invalid_requests_leave_disk_untouched() {
    let tmp = TempDir::new().unwrap();
    let p1 = write_png(tmp.path(), "p1.png", 4, 4, [1, 2, 3, 255]);
    let mut gallery = open(&store_path(&tmp));
    gallery.add_image("default", &p1);
    let before = std::fs::read(store_path(&tmp)).unwrap();

    let err = gallery.apply_filter_to(&p1, "vintage").unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Transform(TransformError::UnknownFilter(_))
    ));
    let err = gallery.resize_displayed_image(&p1, 0, 0).unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Transform(TransformError::InvalidDimension { .. })
    ));
    let missing = tmp.path().join("missing.png");
    let err = gallery
        .apply_filter_to(&missing.to_string_lossy(), "sepia")
        .unwrap_err();
    assert!(matches!(err, GalleryError::Decode { .. }));

    assert_eq!(std::fs::read(store_path(&tmp)).unwrap(), before);
}

#[test]
fn delete_image_is_forgotten_after_restart() {
    let tmp = TempDir::new().unwrap();
    let p1 = write_png(tmp.path(), "p1.png", 4, 4, [9, 9, 9, 255]);
    {
        let mut gallery = open(&store_path(&tmp));
        gallery.add_image("default", &p1);
        gallery.add_image("Trips", &p1);
        gallery.apply_filter_to(&p1, "grayscale").unwrap();
        assert!(gallery.delete_image(&p1));
    }

    let gallery = open(&store_path(&tmp));
    assert!(gallery.images_in("default").is_empty());
    assert!(gallery.images_in("Trips").is_empty());
    assert_eq!(gallery.filter_for(&p1), Filter::None);
}

#[test]
fn corrupt_snapshot_starts_fresh_and_is_replaced() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("state")).unwrap();
    std::fs::write(store_path(&tmp), "{ this is not json").unwrap();

    let gallery = open(&store_path(&tmp));
    assert_eq!(gallery.list_albums(), vec!["default"]);
    // The default album was created, so a clean snapshot replaced the damage
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store_path(&tmp)).unwrap()).unwrap();
    assert!(json["albumData"]["default"].is_array());
}

#[test]
fn configured_default_album_and_kernel() {
    let tmp = TempDir::new().unwrap();
    let settings = GallerySettings {
        default_album: "Inbox".to_string(),
        interpolation: Interpolation::Triangle,
    };
    let gallery = Gallery::initialize(
        SnapshotStore::new(store_path(&tmp)),
        RustBackend::new(),
        settings,
    );
    assert_eq!(gallery.list_albums(), vec!["Inbox"]);
    assert!(gallery.current_images().is_empty());
}

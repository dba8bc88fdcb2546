use std::{io::Cursor, path::PathBuf};

use confgrid::{BoardConfig, GridError, RenderJob, run};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "confgrid_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn jpeg_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_raw(1, 1, vec![200u8, 40u8, 40u8]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    buf
}

/// Data dir with the fixture documents and an assets root with every speaker photo.
fn workspace(name: &str, with_photos: bool) -> (PathBuf, PathBuf, PathBuf) {
    let root = temp_dir(name);
    let data = root.join("data");
    let assets = root.join("repo");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::create_dir_all(assets.join("photos")).unwrap();

    std::fs::write(
        data.join("schedule-app.json"),
        include_str!("data/schedule-app.json"),
    )
    .unwrap();
    std::fs::write(data.join("sessions.json"), include_str!("data/sessions.json")).unwrap();
    std::fs::write(data.join("speakers.json"), include_str!("data/speakers.json")).unwrap();

    if with_photos {
        let jpeg = jpeg_bytes();
        for name in ["ada", "bob", "cleo"] {
            std::fs::write(assets.join("photos").join(format!("{name}.jpg")), &jpeg).unwrap();
        }
    }
    (root, data, assets)
}

fn job(data: PathBuf, assets: PathBuf, out: PathBuf) -> RenderJob {
    RenderJob {
        data_dir: data,
        assets_root: assets,
        out,
        config: BoardConfig::default(),
    }
}

#[test]
fn renders_the_fixture_board() {
    let (root, data, assets) = workspace("board_full", true);
    let out = root.join("out").join("tv.svg");

    let summary = run(&job(data, assets, out.clone())).unwrap();
    assert_eq!(summary.talks, 7);
    assert_eq!(summary.photos, 3);

    let svg = std::fs::read_to_string(&out).unwrap();
    assert_eq!(summary.bytes, svg.len());
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"width="1920" height="1080""#));

    // Background plus one outline per drawn talk (the party is left out).
    assert_eq!(svg.matches("<rect ").count(), 1 + 6);
    // 6 titles plus 2 time marks per day, two labels each.
    assert_eq!(svg.matches("<text ").count(), 6 + 8);
    assert_eq!(svg.matches("<clipPath ").count(), 5);
    assert_eq!(svg.matches("<image ").count(), 5);
    assert_eq!(svg.matches("data:image/jpeg;base64,").count(), 5);
    assert_eq!(svg.matches("<g transform=").count(), 2);

    assert!(svg.contains(">Compose &amp; &lt;Canvas&gt;</text>"));
    assert!(!svg.contains(">Party</text>"));
    assert!(svg.contains(r#"clip-path="url(#cleo)""#));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn overwrites_existing_output() {
    let (root, data, assets) = workspace("board_overwrite", true);
    let out = root.join("tv.svg");
    std::fs::write(&out, "stale").unwrap();

    run(&job(data, assets, out.clone())).unwrap();
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg "));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_photo_aborts_without_output() {
    let (root, data, assets) = workspace("board_no_photos", false);
    let out = root.join("tv.svg");

    let err = run(&job(data, assets, out.clone())).unwrap_err();
    assert!(matches!(err, GridError::ImageNotFound { .. }), "{err}");
    assert!(!out.exists());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_speaker_aborts_without_output() {
    let (root, data, assets) = workspace("board_missing_speaker", true);
    std::fs::write(
        data.join("speakers.json"),
        r#"{ "ada": { "name": "Ada", "photoUrl": "/photos/ada.jpg" } }"#,
    )
    .unwrap();
    let out = root.join("tv.svg");

    let err = run(&job(data, assets, out.clone())).unwrap_err();
    match err {
        GridError::MissingSpeaker { session, speaker } => {
            assert_eq!(session, "compose");
            assert_eq!(speaker, "bob");
        }
        other => panic!("expected MissingSpeaker, got {other:?}"),
    }
    assert!(!out.exists());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_data_file_is_data_not_found() {
    let (root, data, assets) = workspace("board_no_sessions", true);
    std::fs::remove_file(data.join("sessions.json")).unwrap();

    let err = run(&job(data, assets, root.join("tv.svg"))).unwrap_err();
    assert!(matches!(err, GridError::DataNotFound { .. }), "{err}");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn empty_schedule_renders_background_only() {
    let (root, data, assets) = workspace("board_empty", false);
    std::fs::write(data.join("schedule-app.json"), r#"{ "slots": { "all": [] } }"#).unwrap();
    let out = root.join("tv.svg");

    let summary = run(&job(data, assets, out.clone())).unwrap();
    assert_eq!(summary.talks, 0);

    let svg = std::fs::read_to_string(&out).unwrap();
    assert_eq!(svg.lines().count(), 3);
    assert_eq!(svg.matches("<rect ").count(), 1);
    assert!(svg.contains(r##"fill="#FFFFFF""##));
    assert!(svg.trim_end().ends_with("</svg>"));

    std::fs::remove_dir_all(&root).ok();
}

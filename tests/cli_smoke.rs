use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_confgrid")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "confgrid.exe"
            } else {
                "confgrid"
            });
            p
        })
}

fn write_inputs(dir: &std::path::Path) {
    std::fs::create_dir_all(dir.join("data")).unwrap();
    std::fs::create_dir_all(dir.join("photos")).unwrap();
    std::fs::write(
        dir.join("data").join("schedule-app.json"),
        include_str!("data/schedule-app.json"),
    )
    .unwrap();
    std::fs::write(
        dir.join("data").join("sessions.json"),
        include_str!("data/sessions.json"),
    )
    .unwrap();
    std::fs::write(
        dir.join("data").join("speakers.json"),
        include_str!("data/speakers.json"),
    )
    .unwrap();
    for name in ["ada", "bob", "cleo"] {
        // Not a real JPEG; the board embeds bytes as they are.
        std::fs::write(dir.join("photos").join(format!("{name}.jpg")), name).unwrap();
    }
}

#[test]
fn cli_writes_svg() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    write_inputs(&dir);

    let out_path = dir.join("tv.svg");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--assets-root")
        .arg(&dir)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let svg = std::fs::read_to_string(&out_path).unwrap();
    assert!(svg.contains("<clipPath id=\"ada\">"));
}

#[test]
fn cli_applies_config_overrides() {
    let dir = PathBuf::from("target").join("cli_smoke_config");
    std::fs::create_dir_all(&dir).unwrap();
    write_inputs(&dir);

    let config_path = dir.join("board.json");
    std::fs::write(&config_path, r#"{ "width": 1280, "height": 720 }"#).unwrap();
    let out_path = dir.join("tv.svg");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(exe())
        .arg("--data-dir")
        .arg(dir.join("data"))
        .arg("--assets-root")
        .arg(&dir)
        .arg("--out")
        .arg(&out_path)
        .arg("--config")
        .arg(&config_path)
        .status()
        .unwrap();

    assert!(status.success());
    let svg = std::fs::read_to_string(&out_path).unwrap();
    assert!(svg.contains(r#"width="1280" height="720""#));
}

#[test]
fn cli_fails_on_missing_data() {
    let dir = PathBuf::from("target").join("cli_smoke_missing");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("tv.svg");
    let _ = std::fs::remove_file(&out_path);

    let output = std::process::Command::new(exe())
        .arg("--data-dir")
        .arg(dir.join("nowhere"))
        .arg("--out")
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("data not found"));
    assert!(!out_path.exists());
}

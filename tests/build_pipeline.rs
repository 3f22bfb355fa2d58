//! End-to-end builds through the public API.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use splatter::types::{Colour, Palette, Raster};
use splatter::{read_png, run_batch, write_png, BuildConfig, PixelData, Printer};

fn palette() -> Palette {
    Palette::new(vec![
        Colour::TRANSPARENT,
        Colour::rgb(255, 0, 0),
        Colour::rgb(0, 255, 0),
        Colour::rgb(0, 0, 0),
    ])
    .unwrap()
}

fn setup(root: &Path, rules: &str) -> BuildConfig {
    fs::create_dir(root.join("frames")).unwrap();
    fs::write(root.join("def.json"), rules).unwrap();
    BuildConfig {
        input_dir: root.join("frames"),
        output_dir: root.join("out"),
        definition: root.join("def.json"),
        ..Default::default()
    }
}

#[test]
fn indexed_frames_keep_their_palette() {
    let dir = tempdir().unwrap();
    let mut config = setup(dir.path(), r#"[{"prefix": "slime", "suffixes": ["idle"]}]"#);
    config.margin = 2;

    let frames = dir.path().join("frames");
    write_png(&Raster::filled_indexed(3, 2, palette(), 1), &frames.join("slime_1_idle.png")).unwrap();
    write_png(&Raster::filled_indexed(2, 2, palette(), 2), &frames.join("slime_2_idle.png")).unwrap();

    let report = run_batch(&config, &Printer::quiet()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.built.len(), 1);
    assert!(report.built[0].indexed);

    let sheet = read_png(&dir.path().join("out/slime_idle.png")).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (3, 8));
    assert_eq!(sheet.palette(), Some(&palette()));

    // First frame, then margin rows in the background (last palette index).
    assert_eq!(sheet.index_at(0, 0), Some(1));
    assert_eq!(sheet.index_at(0, 2), Some(3));
    assert_eq!(sheet.index_at(0, 3), Some(3));
    // Second frame is narrower than the sheet.
    assert_eq!(sheet.index_at(1, 4), Some(2));
    assert_eq!(sheet.index_at(2, 4), Some(3));
}

#[test]
fn rule_mask_overrides_global_mask() {
    let dir = tempdir().unwrap();
    let rule_mask = dir.path().join("rule-mask.png");
    let global_mask = dir.path().join("global-mask.png");
    let rules = format!(
        r#"[
            {{"prefix": "bat", "suffixes": ["fly"], "mask": "{}"}},
            {{"prefix": "orc", "suffixes": ["fly"]}}
        ]"#,
        rule_mask.display()
    );
    let mut config = setup(dir.path(), &rules);
    config.mask = Some(global_mask.clone());

    // Rule mask hides (0, 0); global mask hides (1, 0).
    let mut hide_first = vec![Colour::TRANSPARENT; 4];
    hide_first[0] = Colour::BLACK;
    write_png(&Raster::direct(2, 2, hide_first).unwrap(), &rule_mask).unwrap();
    let mut hide_second = vec![Colour::TRANSPARENT; 4];
    hide_second[1] = Colour::BLACK;
    write_png(&Raster::direct(2, 2, hide_second).unwrap(), &global_mask).unwrap();

    let red = Colour::rgb(255, 0, 0);
    let frames = dir.path().join("frames");
    write_png(&Raster::filled_direct(2, 2, red), &frames.join("bat_1_fly.png")).unwrap();
    write_png(&Raster::filled_direct(2, 2, red), &frames.join("orc_1_fly.png")).unwrap();

    let report = run_batch(&config, &Printer::quiet()).unwrap();
    assert_eq!(report.built.len(), 2);

    let bat = read_png(&dir.path().join("out/bat_fly.png")).unwrap();
    assert_eq!(bat.colour_at(0, 0), Some(Colour::TRANSPARENT));
    assert_eq!(bat.colour_at(1, 0), Some(red));

    let orc = read_png(&dir.path().join("out/orc_fly.png")).unwrap();
    assert_eq!(orc.colour_at(0, 0), Some(red));
    assert_eq!(orc.colour_at(1, 0), Some(Colour::TRANSPARENT));
}

#[test]
fn broken_sheet_does_not_stop_the_batch() {
    let dir = tempdir().unwrap();
    let config = setup(
        dir.path(),
        r#"[{"prefixes": ["good", "bad"], "suffixes": ["walk", "run"]}]"#,
    );

    let frames = dir.path().join("frames");
    write_png(&Raster::filled_direct(1, 1, Colour::BLACK), &frames.join("good_1_walk.png")).unwrap();
    fs::write(frames.join("bad_1_walk.png"), b"not a png").unwrap();

    let report = run_batch(&config, &Printer::quiet()).unwrap();

    let built: Vec<&str> = report.built.iter().map(|s| s.name.as_str()).collect();
    let failed: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(built, vec!["good_walk"]);
    assert_eq!(failed, vec!["bad_walk"]);
    assert_eq!(report.skipped, vec!["bad_run", "good_run"]);
    assert!(!dir.path().join("out/good_run.png").exists());
    assert!(report.into_result().is_err());
}

#[test]
fn direct_sheet_has_white_background() {
    let dir = tempdir().unwrap();
    let config = setup(dir.path(), r#"[{"prefix": "foo", "suffixes": ["a"]}]"#);

    let frames = dir.path().join("frames");
    write_png(&Raster::filled_direct(2, 1, Colour::BLACK), &frames.join("foo_1_a.png")).unwrap();
    write_png(&Raster::filled_direct(1, 1, Colour::BLACK), &frames.join("foo_2_a.png")).unwrap();

    run_batch(&config, &Printer::quiet()).unwrap();

    let sheet = read_png(&dir.path().join("out/foo_a.png")).unwrap();
    assert!(matches!(sheet.data(), PixelData::Direct(_)));
    assert_eq!((sheet.width(), sheet.height()), (2, 2));
    assert_eq!(sheet.colour_at(1, 1), Some(Colour::WHITE));
}

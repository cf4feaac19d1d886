//! Song files on disk: load, save and convert between formats.

use std::fs;

use bd_formats::{load_song, save_bdz, save_song, FormatError};
use bd_host::ode_to_joy;
use tempfile::tempdir;

#[test]
fn demo_survives_both_formats() {
    let dir = tempdir().unwrap();
    let song = ode_to_joy();

    for name in ["demo.bdz", "demo.bdt", "DEMO.BDT"] {
        let path = dir.path().join(name);
        save_song(&song, &path).unwrap();
        assert_eq!(load_song(&path).unwrap(), song, "{name}");
    }
}

#[test]
fn convert_text_to_binary_and_back() {
    let dir = tempdir().unwrap();
    let text = dir.path().join("tune.bdt");
    fs::write(
        &text,
        "title: Tune\nmelody: C4/250 E4/250 G4/500 R/100\nharmony: C3/1100\nlyrics: do@0 mi@1 so@2\n",
    )
    .unwrap();

    let song = load_song(&text).unwrap();
    let binary = dir.path().join("tune.bdz");
    save_song(&song, &binary).unwrap();
    assert_eq!(&fs::read(&binary).unwrap()[..4], b"BDZ1");

    let back = dir.path().join("again.bdt");
    save_song(&load_song(&binary).unwrap(), &back).unwrap();
    assert_eq!(load_song(&back).unwrap(), song);
}

#[test]
fn binary_lyrics_convert_to_loadable_text() {
    let dir = tempdir().unwrap();
    let mut song = ode_to_joy();
    song.add_lyric("", 30);
    song.add_lyric("la la", 31);

    let binary = dir.path().join("odd.bdz");
    let text = dir.path().join("odd.bdt");
    save_song(&song, &binary).unwrap();
    save_song(&load_song(&binary).unwrap(), &text).unwrap();
    assert_eq!(load_song(&text).unwrap(), song);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mid");
    fs::write(&path, b"MThd").unwrap();
    assert!(matches!(load_song(&path), Err(FormatError::UnsupportedFormat(ext)) if ext == "mid"));
    assert!(matches!(save_song(&ode_to_joy(), &path), Err(FormatError::UnsupportedFormat(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_song(dir.path().join("nope.bdz")).unwrap_err();
    assert!(matches!(err, FormatError::Io(_)));
}

#[test]
fn corrupt_binary_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.bdz");
    save_bdz(&ode_to_joy(), &path).unwrap();
    let mut bytes = fs::read(&path).unwrap();
    bytes.truncate(20);
    fs::write(&path, bytes).unwrap();
    assert!(load_song(&path).is_err());
}

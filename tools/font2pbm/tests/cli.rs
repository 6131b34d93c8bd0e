//! End-to-end scenarios for the `font2pbm` binary.

use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

const HEADER: &[u8] = b"P4\n# Commodore 64 font converted by font2pbm\n";

fn font2pbm() -> Command {
    Command::cargo_bin("font2pbm").expect("binary should be built")
}

#[test]
fn rom_image_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chargen.rom");
    let font: Vec<u8> = (0..64u8).flat_map(|i| [i; 8]).collect::<Vec<_>>().repeat(4);
    fs::write(&path, &font).unwrap();

    let output = font2pbm()
        .args(["-r", "2x2"])
        .arg("64")
        .arg(&path)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    // 64 characters at 16 per line fill four lines of 16 pixels.
    let header = [HEADER, b"256 64\n".as_slice()].concat();
    assert!(output.stdout.starts_with(&header));
    assert_eq!(output.stdout.len(), header.len() + 32 * 64);
}

#[test]
fn program_file_from_stdin() {
    let mut input = vec![0x00, 0x30];
    input.extend((0..256).flat_map(|i| [if i % 2 == 0 { 0xFFu8 } else { 0x00 }; 8]));

    let output = font2pbm()
        .args(["1x1", "256"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let header = [HEADER, b"256 64\n".as_slice()].concat();
    assert!(output.stdout.starts_with(&header));

    let data = &output.stdout[header.len()..];
    assert_eq!(data.len(), 32 * 64);
    for (offset, byte) in data.iter().enumerate() {
        let (row, col) = (offset / 32, offset % 32);
        let index = (row / 8) * 32 + col;
        let expected = if index % 2 == 0 { 0xFF } else { 0x00 };
        assert_eq!(*byte, expected, "byte {offset}");
    }
}

#[test]
fn short_input_emits_no_header() {
    let input = vec![0u8; 2 + 32 * 8 - 1];

    let output = font2pbm()
        .args(["1x1", "32"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid input from"));
}

#[test]
fn illegal_size_is_rejected_before_opening_the_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.prg");

    let output = font2pbm()
        .args(["3x1", "256"])
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Illegal size specification \"3x1\""), "{stderr}");
    assert!(!stderr.contains("Can't open"), "{stderr}");
}

#[test]
fn illegal_count() {
    let output = font2pbm().args(["1x1", "many"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Illegal number of chars \"many\""));
}

#[test]
fn missing_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.prg");

    let output = font2pbm()
        .args(["1x1", "256"])
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Can't open"));
}

#[test]
fn wrong_argument_count_prints_usage() {
    let cases: [&[&str]; 3] = [&[], &["1x1"], &["1x1", "256", "a", "b"]];
    for args in cases {
        let output = font2pbm().args(args).output().unwrap();

        assert!(output.status.success(), "args {args:?}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("[-r] size num [filename]"), "args {args:?}");
        assert!(stdout.contains("size:      1x1, 1x2, 2x1 or 2x2"), "args {args:?}");
    }
}

#[test]
fn empty_font() {
    let output = font2pbm()
        .args(["2x1", "0"])
        .write_stdin(Vec::<u8>::new())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, [HEADER, b"256 0\n".as_slice()].concat());
}

#[test]
fn late_rom_flag_is_a_file_name() {
    let dir = tempdir().unwrap();
    let mut font = vec![0x00u8, 0x30];
    font.extend((0..32u8).flat_map(|i| [i; 8]));
    fs::write(dir.path().join("-r"), &font).unwrap();

    let output = font2pbm()
        .current_dir(dir.path())
        .args(["1x1", "32", "-r"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    // The load address was skipped, so the first row starts with character 0.
    let header = [HEADER, b"256 8\n".as_slice()].concat();
    assert!(output.stdout.starts_with(&header));
    assert_eq!(&output.stdout[header.len()..header.len() + 4], [0, 1, 2, 3]);
}

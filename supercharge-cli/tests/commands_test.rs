use std::fs;
use supercharge_cli::commands::{convert_file, wav_path_for, ConvertOptions};
use supercharge_core::wav::{WavSpec, HEADER_LEN};
use supercharge_core::{SuperchargeError, ROM_SIZE};
use tempfile::tempdir;

fn test_rom() -> Vec<u8> {
    let mut rom: Vec<u8> = (0..ROM_SIZE).map(|i| i as u8).collect();
    rom[ROM_SIZE - 4] = 0x00;
    rom[ROM_SIZE - 3] = 0xf0;
    rom
}

#[test]
fn converts_rom_next_to_source() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("game.bin");
    fs::write(&rom_path, test_rom()).unwrap();

    let converted = convert_file(&rom_path, ConvertOptions::default()).unwrap();
    assert_eq!(converted.wav_path, dir.path().join("game.wav"));

    let wav = fs::read(&converted.wav_path).unwrap();
    let spec = WavSpec::parse(&wav).unwrap();
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.data_len as usize, converted.report.sample_count);
    assert_eq!(wav.len(), HEADER_LEN + converted.report.sample_count);
    assert_eq!(converted.report.lines().next().unwrap(), "address: f000");
}

#[test]
fn refuses_existing_output() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("game.bin");
    fs::write(&rom_path, test_rom()).unwrap();
    fs::write(wav_path_for(&rom_path), b"keep me").unwrap();

    let err = convert_file(&rom_path, ConvertOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "game.wav already exists");
    assert_eq!(fs::read(wav_path_for(&rom_path)).unwrap(), b"keep me");
}

#[test]
fn overwrite_replaces_existing_output() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("game.bin");
    fs::write(&rom_path, test_rom()).unwrap();
    fs::write(wav_path_for(&rom_path), b"stale").unwrap();

    let converted = convert_file(&rom_path, ConvertOptions { overwrite: true }).unwrap();
    let wav = fs::read(&converted.wav_path).unwrap();
    assert_eq!(&wav[0..4], b"RIFF");
}

#[test]
fn wrong_size_is_skipped() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("small.bin");
    fs::write(&rom_path, vec![0u8; 2048]).unwrap();

    let err = convert_file(&rom_path, ConvertOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "small.bin skipped");
    let cause = err.downcast_ref::<SuperchargeError>().unwrap();
    assert!(cause.is_unsupported_size());
    assert!(!wav_path_for(&rom_path).exists());
}

#[test]
fn missing_rom_is_an_error() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("absent.bin");
    assert!(convert_file(&rom_path, ConvertOptions::default()).is_err());
    assert!(!wav_path_for(&rom_path).exists());
}

#[test]
fn refuses_wav_input() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("game.wav");
    fs::write(&rom_path, test_rom()).unwrap();

    assert!(convert_file(&rom_path, ConvertOptions { overwrite: true }).is_err());
    assert_eq!(fs::read(&rom_path).unwrap(), test_rom());
}

#[test]
fn json_report_lists_events() {
    let dir = tempdir().unwrap();
    let rom_path = dir.path().join("game.bin");
    fs::write(&rom_path, test_rom()).unwrap();

    let converted = convert_file(&rom_path, ConvertOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&converted.to_json().unwrap()).unwrap();
    assert_eq!(
        value["sample_count"].as_u64().unwrap() as usize,
        converted.report.sample_count
    );
    assert_eq!(value["format"]["sample_rate"], 44100);
    let events = value["events"].as_array().unwrap();
    assert_eq!(events[0]["event"], "address");
    assert_eq!(events[0]["address"], 0xf000);
    assert_eq!(events.len(), 6 + 16);
}

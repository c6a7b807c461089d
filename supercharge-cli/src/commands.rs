// CLI command handlers
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use supercharge_core::{convert_into, Rom, TapeFormat, TapeReport};

/// Per-run options shared by every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Replace WAV files that already exist.
    pub overwrite: bool,
}

/// A ROM that was converted successfully.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub rom_path: PathBuf,
    pub wav_path: PathBuf,
    pub report: TapeReport,
}

/// JSON view of a converted file.
#[derive(Serialize)]
pub struct FileReport<'a> {
    pub rom: &'a Path,
    pub wav: &'a Path,
    pub format: &'a TapeFormat,
    #[serde(flatten)]
    pub report: &'a TapeReport,
}

impl ConvertedFile {
    pub fn to_json(&self) -> Result<String> {
        let report = FileReport {
            rom: &self.rom_path,
            wav: &self.wav_path,
            format: &TapeFormat::SUPERCHARGER,
            report: &self.report,
        };
        serde_json::to_string(&report)
            .with_context(|| format!("{}: failed to serialize report", display_name(&self.rom_path)))
    }
}

/// WAV file written for `rom_path`: same directory and stem, `.wav` extension.
pub fn wav_path_for(rom_path: &Path) -> PathBuf {
    rom_path.with_extension("wav")
}

/// File name used in messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Converts one ROM file into a WAV file next to it.
pub fn convert_file(rom_path: &Path, options: ConvertOptions) -> Result<ConvertedFile> {
    let name = display_name(rom_path);
    let wav_path = wav_path_for(rom_path);

    if wav_path == rom_path {
        bail!("{}: refusing to replace the ROM with its own WAV file", name);
    }

    if !options.overwrite {
        match fs::metadata(&wav_path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            _ => bail!("{} already exists", display_name(&wav_path)),
        }
    }

    let data = fs::read(rom_path).with_context(|| name.clone())?;
    let rom = Rom::new(data).with_context(|| format!("{} skipped", name))?;
    log::debug!("{}: start address {:04x}", name, rom.start_address());

    let file = File::create(&wav_path).with_context(|| name.clone())?;
    let report = convert_into(&rom, &TapeFormat::SUPERCHARGER, BufWriter::new(file))
        .with_context(|| name.clone())?;

    Ok(ConvertedFile {
        rom_path: rom_path.to_path_buf(),
        wav_path,
        report,
    })
}

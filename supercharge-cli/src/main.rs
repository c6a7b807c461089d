// CLI application
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use supercharge_cli::commands::{convert_file, display_name, ConvertOptions};

#[derive(Parser)]
#[command(name = "supercharge")]
#[command(about = "Convert 4K Atari 2600 ROM files to Supercharger WAV files")]
#[command(version)]
#[command(after_help = "Converted WAV files are saved in the same directory as the ROM file.")]
struct Cli {
    /// Print diagnostics for every converted file
    #[arg(short, long)]
    verbose: bool,

    /// Overwrite existing WAV files
    #[arg(short, long)]
    overwrite: bool,

    /// Print one JSON report per converted file
    #[arg(long)]
    json: bool,

    /// ROM files to convert
    roms: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // -v only adds stdout diagnostics; stderr logging is left to RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if cli.roms.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let options = ConvertOptions {
        overwrite: cli.overwrite,
    };

    let pb = if cli.verbose || cli.json || cli.roms.len() == 1 {
        ProgressBar::hidden()
    } else {
        create_progress_bar(cli.roms.len() as u64)
    };

    let mut failed = 0usize;
    for rom_path in &cli.roms {
        pb.set_message(display_name(rom_path));
        match convert_file(rom_path, options) {
            Ok(converted) if cli.json => match converted.to_json() {
                Ok(json) => println!("{}", json),
                Err(err) => {
                    failed += 1;
                    pb.suspend(|| eprintln!("{:#}", err));
                }
            },
            Ok(converted) => {
                if cli.verbose {
                    println!("{} converted", display_name(&converted.rom_path));
                    for line in converted.report.lines() {
                        println!("\t{}", line);
                    }
                }
            }
            Err(err) => {
                failed += 1;
                pb.suspend(|| eprintln!("{:#}", err));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        anyhow::bail!("{} of {} files not converted", failed, cli.roms.len());
    }

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}

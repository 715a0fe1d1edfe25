//! Square-fit CLI tool
//!
//! Command-line interface for trimming transparent borders and fitting
//! images onto fixed-size square canvases.

use super::config::CliConfigBuilder;
use crate::{
    config::OutputFormat,
    processor::SquareFitProcessor,
    services::{ImageIOService, OutputFormatHandler},
    utils::sanitize_output_name,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Square-fit CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "squarefit")]
pub struct Cli {
    /// Input image files or directories (use "-" for stdin)
    #[arg(value_name = "INPUT", required = true)]
    pub input: Vec<String>,

    /// Output file (single input) or directory (batch processing). Use "-" for stdout.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Framing mode
    #[arg(short, long, value_enum, default_value_t = CliFitMode::Contain)]
    pub mode: CliFitMode,

    /// Target canvas edge length in pixels
    #[arg(short, long, default_value_t = 600)]
    pub size: u32,

    /// Allow enlarging images smaller than the target size
    #[arg(long)]
    pub allow_upscale: bool,

    /// Padding background for contain mode (transparent, white, black, or #rrggbb[aa])
    #[arg(short, long, default_value = "transparent")]
    pub background: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Png)]
    pub format: CliOutputFormat,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = 90)]
    pub jpeg_quality: u8,

    /// WebP quality (0-100)
    #[arg(long, default_value_t = 85)]
    pub webp_quality: u8,

    /// Derive sanitized, collision-free output filenames
    #[arg(short = 'u', long)]
    pub unique_name: bool,

    /// Print processing metadata as JSON after each file
    #[arg(long)]
    pub json_summary: bool,

    /// Enable verbose logging (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Filename pattern for batch processing (e.g., "*.png")
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliFitMode {
    Contain,
    Cover,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliOutputFormat {
    Png,
    Jpeg,
    Webp,
}

/// CLI entry point
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    crate::tracing_config::init_cli_tracing(cli.verbose)
        .context("Failed to initialize tracing")?;

    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;
    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    info!("Starting square-fit CLI");
    info!("Input(s): {}", cli.input.join(", "));
    info!(
        "Mode: {}, size: {}x{}, upscale: {}, background: {}",
        config.mode, config.size, config.size, config.allow_upscale, config.background
    );

    OutputFormatHandler::validate_for_contain(config.output_format, config.background);

    let processor =
        SquareFitProcessor::new(config).context("Failed to create square-fit processor")?;

    let start_time = Instant::now();
    let (processed_count, failed_count) = process_inputs(&cli, &processor)?;

    let total_time = start_time.elapsed();
    info!(
        "Processed {} image(s) in {:.2}s",
        processed_count,
        total_time.as_secs_f64()
    );

    if failed_count > 0 {
        anyhow::bail!("{} of {} input(s) failed", failed_count, processed_count + failed_count);
    }
    Ok(())
}

/// Process all inputs, returning (processed, failed) counts
fn process_inputs(cli: &Cli, processor: &SquareFitProcessor) -> Result<(usize, usize)> {
    // Handle stdin specially (single input)
    if cli.input.len() == 1 && cli.input.first().is_some_and(|s| s == "-") {
        process_stdin(cli, processor)?;
        return Ok((1, 0));
    }

    // Collect all image files from inputs (files and directories)
    let mut all_files = Vec::new();

    for input in &cli.input {
        let path = PathBuf::from(input);

        if path.is_file() {
            if ImageIOService::is_supported_input(&path) {
                all_files.push(path);
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            let dir_files = find_image_files(&path, cli.recursive, cli.pattern.as_deref())?;
            all_files.extend(dir_files);
        } else {
            anyhow::bail!(
                "Input path does not exist or is not accessible: {}",
                path.display()
            );
        }
    }

    if all_files.is_empty() {
        warn!("No supported image files found in the provided inputs");
        return Ok((0, 0));
    }

    // Sort files alphanumerically for consistent processing order
    all_files.sort();

    info!("Found {} image file(s) to process", all_files.len());

    let file_count = all_files.len();
    let progress = if file_count > 1 {
        let pb = ProgressBar::new(file_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Validate and prepare the output directory for batch processing
    let output_dir = if file_count > 1 {
        if let Some(ref output) = cli.output {
            if output == "-" {
                anyhow::bail!("Cannot use stdout (-) as output when processing multiple files");
            }
            let output_path = PathBuf::from(output);
            if !output_path.exists() {
                std::fs::create_dir_all(&output_path).with_context(|| {
                    format!("Failed to create output directory: {}", output_path.display())
                })?;
            } else if output_path.is_file() {
                anyhow::bail!(
                    "Output path exists and is a file, not a directory: {}",
                    output_path.display()
                );
            }
            Some(output_path)
        } else {
            None
        }
    } else {
        None
    };

    let mut processed_count = 0;
    let mut failed_count = 0;
    let batch_start_time = Instant::now();

    for input_file in &all_files {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Processing {}", input_file.display()));
        }

        let output_path = if file_count == 1 {
            cli.output.clone().map(PathBuf::from)
        } else {
            Some(generate_output_path(
                input_file,
                output_dir.as_deref(),
                processor.config().output_format,
                processor.config().size,
                cli.unique_name,
            ))
        };

        match process_single_file(cli, processor, input_file, output_path) {
            Ok(()) => processed_count += 1,
            Err(e) => {
                error!("Failed to process {}: {}", input_file.display(), e);
                failed_count += 1;
            },
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message(format!(
            "Completed! Processed: {processed_count}, Failed: {failed_count}"
        ));
    }

    let batch_total_time = batch_start_time.elapsed();
    if file_count > 1 {
        info!("Batch processing summary:");
        info!("  files processed: {}", processed_count);
        info!("  files failed: {}", failed_count);
        info!("  total time: {:.2}s", batch_total_time.as_secs_f64());
    }

    Ok((processed_count, failed_count))
}

/// Process a single image file and write the result
fn process_single_file(
    cli: &Cli,
    processor: &SquareFitProcessor,
    input_file: &Path,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let mut result = processor
        .process_path(input_file)
        .with_context(|| format!("Failed to square-fit {}", input_file.display()))?;

    let config = processor.config();
    let quality = quality_for(config.output_format, config);

    let writing_to_stdout = output_path.as_deref().is_some_and(|p| p == Path::new("-"));
    if writing_to_stdout {
        let bytes = result.to_bytes(config.output_format, quality)?;
        write_stdout(&bytes)?;
        info!("Image written to stdout");
    } else {
        let target = output_path.unwrap_or_else(|| {
            generate_output_path(
                input_file,
                None,
                config.output_format,
                config.size,
                cli.unique_name,
            )
        });
        result.save(&target, config.output_format, quality)?;
        info!(
            "{} -> {} ({})",
            input_file.display(),
            target.display(),
            result.timing_summary()
        );
    }

    if cli.json_summary {
        let json = serde_json::to_string_pretty(&result.metadata)
            .context("Failed to serialize metadata")?;
        if writing_to_stdout {
            eprintln!("{json}");
        } else {
            println!("{json}");
        }
    }

    Ok(())
}

/// Process image data read from stdin
fn process_stdin(cli: &Cli, processor: &SquareFitProcessor) -> Result<()> {
    info!("Reading image from stdin");
    let image_data = read_stdin()?;

    let result = processor
        .process_bytes(&image_data)
        .context("Failed to square-fit stdin image")?;

    let config = processor.config();
    let bytes = result.to_bytes(config.output_format, quality_for(config.output_format, config))?;

    match cli.output.as_deref() {
        None | Some("-") => {
            write_stdout(&bytes)?;
            info!("Image written to stdout");
        },
        Some(path) => {
            ImageIOService::save_bytes(path, &bytes)?;
            info!("stdin -> {} ({})", path, result.timing_summary());
        },
    }

    if cli.json_summary {
        let json = serde_json::to_string_pretty(&result.metadata)
            .context("Failed to serialize metadata")?;
        eprintln!("{json}");
    }

    Ok(())
}

/// Find image files in a directory, optionally recursively and pattern-filtered
fn find_image_files(dir: &Path, recursive: bool, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if recursive {
        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let path = entry.path();
                if ImageIOService::is_supported_input(path) && matches_pattern(path, pattern) {
                    files.push(path.to_path_buf());
                }
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let path = entry.path();
                if ImageIOService::is_supported_input(&path) && matches_pattern(&path, pattern) {
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

/// Check if a file name matches the given glob pattern
fn matches_pattern(path: &Path, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pat) => path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|filename| {
                glob::Pattern::new(pat).map(|p| p.matches(filename)).unwrap_or(false)
            }),
        None => true,
    }
}

/// Build the output path for an input file
///
/// Default naming appends the target geometry to the input stem
/// (`photo_600x600.png`); `--unique-name` switches to sanitized
/// uuid-suffixed names.
fn generate_output_path(
    input_path: &Path,
    output_dir: Option<&Path>,
    format: OutputFormat,
    size: u32,
    unique_name: bool,
) -> PathBuf {
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());
    let extension = OutputFormatHandler::get_extension(format);

    let filename = if unique_name {
        let original = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // sanitize_output_name always emits .png; honor the requested format
        PathBuf::from(sanitize_output_name(&original))
            .with_extension(extension)
            .to_string_lossy()
            .into_owned()
    } else {
        let stem = input_path.file_stem().unwrap_or_default();
        format!("{}_{size}x{size}.{extension}", stem.to_string_lossy())
    };

    dir.join(filename)
}

/// Select the quality setting matching the output format
fn quality_for(format: OutputFormat, config: &crate::config::FitConfig) -> u8 {
    match format {
        OutputFormat::Jpeg => config.jpeg_quality,
        OutputFormat::WebP => config.webp_quality,
        OutputFormat::Png => 100,
    }
}

/// Read image data from stdin
fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read image data from stdin")?;
    if buffer.is_empty() {
        anyhow::bail!("No data received from stdin");
    }
    Ok(buffer)
}

/// Write image data to stdout
fn write_stdout(data: &[u8]) -> Result<()> {
    io::stdout()
        .write_all(data)
        .context("Failed to write image data to stdout")?;
    io::stdout().flush().context("Failed to flush stdout")?;
    Ok(())
}

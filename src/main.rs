use clap::{Parser, Subcommand};
use iconsmith::config::{self, IconConfig, Overrides};
use iconsmith::iconset::STANDARD_ICONS;
use iconsmith::imaging::RustBackend;
use iconsmith::{output, process};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Source image used when no INPUT is given.
const DEFAULT_INPUT: &str = "icon-source.png";

/// Transform flags shared by `generate` and `check`. Each one overrides the
/// matching `icons.toml` value when given.
#[derive(clap::Args, Clone)]
struct TransformArgs {
    /// Path to an icons.toml (default: icons.toml next to the input, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable center cropping
    #[arg(long)]
    no_crop: bool,

    /// Percentage of each dimension kept when cropping (1-100)
    #[arg(long, value_name = "PERCENT")]
    trim_percent: Option<u32>,

    /// Corner radius as a percentage of icon size for rounded variants (0-50, 0 = none)
    #[arg(long, value_name = "PERCENT")]
    radius_percent: Option<u32>,

    /// Transparent padding as a percentage of icon size (0-50)
    #[arg(long, value_name = "PERCENT")]
    padding_percent: Option<u32>,

    /// Keep the 1024px base icon unpadded (iOS App Store)
    #[arg(long, alias = "padding-ios-mode")]
    padding_excludes_largest: bool,

    /// Maximum parallel workers (default: CPU cores)
    #[arg(long, short = 'j', value_name = "N")]
    jobs: Option<usize>,
}

impl TransformArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            no_crop: self.no_crop,
            trim_percent: self.trim_percent,
            radius_percent: self.radius_percent,
            padding_percent: self.padding_percent,
            padding_excludes_largest: self.padding_excludes_largest,
            max_processes: self.jobs,
        }
    }

    /// Resolve the config for `input`: file (explicit or discovered), then flags.
    fn resolve(&self, input: &Path) -> Result<IconConfig, config::ConfigError> {
        let path = self
            .config
            .clone()
            .or_else(|| config::discover_config(input));
        config::resolve_config(path.as_deref(), &self.overrides())
    }
}

#[derive(Parser)]
#[command(name = "iconsmith")]
#[command(about = "Generate app icon PNGs from a single source image")]
#[command(long_about = "\
Generate app icon PNGs from a single source image

The source is center-cropped, then scaled to each standard macOS/iOS size
(16 to 1024 px, @1x and @2x). Every size is also written as a rounded-corner
variant unless --radius-percent=0.

Output:

  <output-dir>/
  ├── icon_16x16.png
  ├── icon_16x16_rounded.png
  ├── icon_16x16@2x.png
  ├── ...
  └── icon_1024x1024_rounded.png

Examples:

  iconsmith generate app-icon.png
  iconsmith generate --clean --trim-percent=75 source.png icons/
  iconsmith generate --no-crop logo.png
  iconsmith generate --padding-percent=15 --padding-ios-mode source.png

Run 'iconsmith gen-config' to generate a documented icons.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write every icon PNG for a source image
    Generate(GenerateArgs),
    /// Validate settings and the source image without writing anything
    Check(CheckArgs),
    /// Print a stock icons.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Source image (PNG, JPEG, TIFF or WebP)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output directory (default: the input image's directory)
    output_dir: Option<PathBuf>,

    /// Remove existing icon_*.png from the output directory first
    #[arg(long)]
    clean: bool,

    /// Also write a JSON manifest of the generated icons
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    #[command(flatten)]
    transform: TransformArgs,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Source image (PNG, JPEG, TIFF or WebP)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    #[command(flatten)]
    transform: TransformArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Generate(args) => {
            let settings = args.transform.resolve(&args.input)?;
            init_thread_pool(&settings.processing);

            let output_dir = args
                .output_dir
                .clone()
                .unwrap_or_else(|| default_output_dir(&args.input));
            let options = process::ProcessOptions {
                input: args.input.clone(),
                output_dir,
                clean: args.clean,
                pipeline: settings.pipeline_config(),
                specs: STANDARD_ICONS.to_vec(),
            };

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(&RustBackend::new(), &options, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            let manifest = result?;

            if let Some(path) = &args.manifest {
                process::write_manifest(&manifest, path)?;
            }
            output::print_summary(&manifest);
        }
        Command::Check(args) => {
            let settings = args.transform.resolve(&args.input)?;
            let report = process::check(
                &RustBackend::new(),
                &args.input,
                &settings.pipeline_config(),
                &STANDARD_ICONS,
            )?;
            output::print_check_report(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// The input image's directory, or `.` for a bare file name.
fn default_output_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

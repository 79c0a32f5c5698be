use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xenfiny::settings::{GenerationSettings, Sampler};
use xenfiny::sizing::{AspectRatio, aspect_ratio_to_size};
use xenfiny::types::Dimensions;
use xenfiny::upload::{DroppedFile, UploadRules};
use xenfiny::{config, output};

#[derive(Parser)]
#[command(name = "xenfiny")]
#[command(about = "Generation settings for the Xenfiny AI art studio")]
#[command(long_about = "\
Generation settings for the Xenfiny AI art studio

Sizes canvases to aspect ratios, builds and validates generation requests,
and checks files against the upload rules. Nothing is sent anywhere: the
request is printed, ready for a backend.

Aspect ratios are written width:height, e.g. 16:9 or 2:3. A ratio keeps one
side of the canvas and recomputes the other.

Set RUST_LOG=xenfiny=debug to trace every form change.

Run 'xenfiny gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit a height x width canvas to an aspect ratio
    Resize {
        height: u32,
        width: u32,
        /// Target ratio as width:height
        ratio: String,
    },
    /// Show every configured ratio applied to one canvas
    Ratios {
        /// Starting height (defaults to the height slider default)
        #[arg(long)]
        height: Option<u32>,
        /// Starting width (defaults to the width slider default)
        #[arg(long)]
        width: Option<u32>,
    },
    /// Build and validate a generation request
    Settings(SettingsArgs),
    /// Check files against the upload rules
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct SettingsArgs {
    #[arg(long)]
    prompt: String,
    #[arg(long)]
    negative_prompt: Option<String>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    width: Option<u32>,
    /// Aspect ratio applied after height and width
    #[arg(long)]
    ratio: Option<String>,
    #[arg(long)]
    sampler: Option<Sampler>,
    #[arg(long)]
    cfg_scale: Option<u32>,
    #[arg(long)]
    steps: Option<u32>,
    /// Number of images to generate
    #[arg(long)]
    images: Option<u32>,
    /// Keep generated images private
    #[arg(long)]
    private: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Resize {
            height,
            width,
            ratio,
        } => {
            let resized = aspect_ratio_to_size(height, width, Some(&ratio))?;
            info!(height, width, %ratio, ?resized, "resized canvas");
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&resized)?);
            } else {
                let ratio: AspectRatio = ratio.parse()?;
                output::print_resize(Dimensions::new(height, width), ratio, resized);
            }
        }
        Command::Ratios { height, width } => {
            let studio = config::load_config(&cli.config_dir)?;
            let base = Dimensions::new(
                height.unwrap_or(studio.sliders.height.default),
                width.unwrap_or(studio.sliders.width.default),
            );
            info!(
                height = base.height,
                width = base.width,
                ratios = studio.form.aspect_ratios.len(),
                "listing aspect ratios"
            );
            if cli.json {
                let table: Vec<_> = studio
                    .form
                    .aspect_ratios
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "ratio": r,
                            "size": xenfiny::sizing::fit_to_ratio(base, *r),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                output::print_ratio_table(base, &studio.form.aspect_ratios);
            }
        }
        Command::Settings(args) => {
            let studio = config::load_config(&cli.config_dir)?;
            let request = build_settings(&studio, args)?.validate()?;
            info!(
                height = request.height,
                width = request.width,
                "generation request ready"
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&request)?);
            } else {
                output::print_request(&request);
            }
        }
        Command::Upload { files } => {
            let studio = config::load_config(&cli.config_dir)?;
            let rules = UploadRules::new(&studio.upload);
            let dropped = files
                .into_iter()
                .map(|path| {
                    let size = std::fs::metadata(&path)?.len();
                    Ok(DroppedFile { path, size })
                })
                .collect::<Result<Vec<_>, std::io::Error>>()?;
            let outcome = rules.partition(dropped);
            info!(
                accepted = outcome.accepted.len(),
                rejected = outcome.rejected.len(),
                max_bytes = rules.max_bytes(),
                "checked upload"
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_drop(&outcome);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Replay CLI flags onto a fresh form, in the order a user would fill it in.
fn build_settings(
    studio: &config::StudioConfig,
    args: SettingsArgs,
) -> Result<GenerationSettings, xenfiny::settings::SettingsError> {
    let mut settings = GenerationSettings::from_config(studio);
    settings.set_prompt(args.prompt);
    if let Some(negative) = args.negative_prompt {
        settings.set_negative_prompt(negative);
    }
    if let Some(height) = args.height {
        settings.set_height(height);
    }
    if let Some(width) = args.width {
        settings.set_width(width);
    }
    if let Some(ratio) = args.ratio.as_deref() {
        settings.apply_aspect_ratio(Some(ratio))?;
    }
    if let Some(sampler) = args.sampler {
        settings.set_sampler(sampler);
    }
    if let Some(cfg_scale) = args.cfg_scale {
        settings.set_cfg_scale(cfg_scale);
    }
    if let Some(steps) = args.steps {
        settings.set_steps(steps);
    }
    if let Some(images) = args.images {
        settings.set_image_count(images);
    }
    if args.private {
        settings.set_public(false);
    }
    Ok(settings)
}

/// Log to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xenfiny=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

use crate::config::{Config, ProjectionView, load_config};
use crate::ir::Scenario;
use crate::logging::init_cli_logger;
use crate::pairing::pair_connectors_with;
use crate::pairing_dump::PairingDump;
use crate::parser::parse_scenario;
use crate::render::{render_svg, render_text, write_output_svg, write_output_text};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cpair", version, about = "Pair distribution-box outlets with grills")]
pub struct Args {
    /// Scenario file (JSON5 or line format) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout unless the format is png.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (tolerance, preview size, theme)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Preview width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Preview height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Frame axes the preview is drawn in
    #[arg(long = "view", value_enum)]
    pub view: Option<ProjectionView>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long = "log-json")]
    pub log_json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_cli_logger(args.verbose, args.log_json);

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let input = read_input(args.input.as_deref())?;
    let scenario = parse_scenario(&input)?;
    info!(
        scenario = %scenario.name,
        outlets = scenario.outlets.len(),
        targets = scenario.targets.len(),
        "loaded scenario"
    );

    let output = render_scenario(&scenario, &config, args.output_format)?;
    match (args.output_format, output) {
        (OutputFormat::Png, Rendered::Svg(svg)) => {
            let path = ensure_output(&args.output, "png")?;
            write_png(&svg, &path, &config)?;
        }
        (OutputFormat::Svg, Rendered::Svg(svg)) => write_output_svg(&svg, args.output.as_deref())?,
        (_, Rendered::Svg(text) | Rendered::Text(text)) => {
            write_output_text(&text, args.output.as_deref())?
        }
    }
    Ok(())
}

#[derive(Debug)]
enum Rendered {
    Text(String),
    Svg(String),
}

fn render_scenario(scenario: &Scenario, config: &Config, format: OutputFormat) -> Result<Rendered> {
    let inputs = scenario.engine_inputs();
    let pairing = pair_connectors_with(&inputs.frame, &inputs.outlets, &inputs.targets, &config.pairing)
        .with_context(|| format!("pairing scenario '{}'", scenario.name))?;
    let dump = PairingDump::from_pairing(scenario, &inputs, &pairing, &config.pairing);
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = dump.to_json()?;
            json.push('\n');
            Rendered::Text(json)
        }
        OutputFormat::Text => Rendered::Text(render_text(&dump)),
        OutputFormat::Svg | OutputFormat::Png => {
            Rendered::Svg(render_svg(scenario, &dump, &config.theme, &config.render))
        }
    };
    Ok(rendered)
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(view) = args.view {
        config.render.view = view;
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, path: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, path, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _path: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

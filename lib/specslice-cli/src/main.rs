#![allow(missing_docs)]
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{Level, debug, info, warn};

use specslice_core::{ExtractConfig, Extractor, SpecFormat, SpecVersion};

const HELP: &str = "\
Extract endpoints of interest from a Swagger 2.0 / OpenAPI 3.0 specification

USAGE:
  specslice --input <FILE> [OPTIONS]

OPTIONS:
  -i, --input <FILE>         Specification to read (.json, .yaml or .yml)
  -o, --output <FILE>        Where to write the result [default: <input>-output.<ext>]
  -c, --config <FILE>        JSON or YAML extraction configuration
  -e, --endpoint <PATH>      Endpoint of interest, can be repeated
  -t, --to <VERSION>         Convert the result to version 2.0 or 3.0
      --no-widen-responses   Only keep responses reachable from the endpoints
  -v, --verbose              Log debug information
  -h, --help                 Print help
";

#[allow(clippy::print_stdout)]
fn main() -> Result<()> {
    let args = AppArgs::parse(pico_args::Arguments::from_env()).context("parsing arguments")?;
    if args.help {
        print!("{HELP}");
        return Ok(());
    }

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    if !args.remaining.is_empty() {
        warn!(remaining = ?args.remaining, "Warning: unused arguments left");
    }

    run(&args)
}

fn run(args: &AppArgs) -> Result<()> {
    let input = args
        .input
        .as_deref()
        .context("missing required --input argument")?;
    let format = SpecFormat::from_path(input)?;
    let config = args.config()?;

    let text = fs::read_to_string(input)
        .with_context(|| format!("reading specification {}", input.display()))?;
    let document = format.parse(&text)?;

    let extraction = Extractor::new(config).extract(&document)?;
    if !extraction.dropped.is_empty() {
        let dropped: Vec<String> = extraction.dropped.iter().map(ToString::to_string).collect();
        warn!(?dropped, "some references could not be resolved");
    }
    let contents = format.render(&extraction.document)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, format));
    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    fs::write(&output, contents)
        .with_context(|| format!("writing result to {}", output.display()))?;

    info!(output = %output.display(), "Extraction completed");
    Ok(())
}

/// `<dir>/<stem>-output.<ext>`, next to the input file.
fn default_output_path(input: &Path, format: SpecFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}-output.{}", format.extension()))
}

#[derive(Debug, Default)]
struct AppArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    endpoints: Vec<String>,
    target_version: Option<SpecVersion>,
    no_widen_responses: bool,
    verbose: bool,
    help: bool,
    /// Left over arguments, reported once logging is set up.
    remaining: Vec<OsString>,
}

impl AppArgs {
    fn parse(mut pargs: pico_args::Arguments) -> Result<Self> {
        let help = pargs.contains(["-h", "--help"]);
        let verbose = pargs.contains(["-v", "--verbose"]);
        let no_widen_responses = pargs.contains("--no-widen-responses");

        let input = pargs
            .opt_value_from_os_str(["-i", "--input"], to_path)
            .context("parsing input argument")?;
        let output = pargs
            .opt_value_from_os_str(["-o", "--output"], to_path)
            .context("parsing output argument")?;
        let config = pargs
            .opt_value_from_os_str(["-c", "--config"], to_path)
            .context("parsing config argument")?;
        let endpoints = pargs
            .values_from_str(["-e", "--endpoint"])
            .context("parsing endpoint arguments")?;
        let target_version = pargs
            .opt_value_from_str(["-t", "--to"])
            .context("parsing target version argument")?;

        Ok(Self {
            input,
            output,
            config,
            endpoints,
            target_version,
            no_widen_responses,
            verbose,
            help,
            remaining: pargs.finish(),
        })
    }

    /// The configuration file, if any, overridden by the command line.
    fn config(&self) -> Result<ExtractConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let format = SpecFormat::from_path(path)?;
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading configuration {}", path.display()))?;
                ExtractConfig::parse(format, &text)?
            }
            None => ExtractConfig::default(),
        };

        config = config.with_endpoints(self.endpoints.iter().cloned());
        if let Some(version) = self.target_version {
            config = config.with_target_version(version);
        }
        if self.no_widen_responses {
            config = config.with_widen_responses(false);
        }
        if config.endpoints.is_empty() {
            warn!("no endpoint of interest configured, the result will have empty paths");
        }
        debug!(?config, "configuration loaded");

        Ok(config)
    }
}

fn to_path(value: &OsStr) -> Result<PathBuf, std::convert::Infallible> {
    Ok(PathBuf::from(value))
}

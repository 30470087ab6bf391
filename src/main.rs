use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use zodlens::render::text::TextOptions;
use zodlens::{Config, RawPreview, Session};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "zodlens: explain printed ZodError text",
    long_about = None
)]
struct Cli {
    /// Files holding error text, one submission each. `-` or none reads stdin.
    files: Vec<PathBuf>,

    /// Restore the submission carried by a shared address.
    #[arg(long, value_name = "URL")]
    url: Option<Url>,

    /// Print the shareable address of the last submission, based on this URL.
    #[arg(long, value_name = "BASE_URL")]
    share: Option<Url>,

    /// Print union branches expanded.
    #[arg(long)]
    expand_all: bool,

    /// Print the clipped raw input above each explanation.
    #[arg(long)]
    raw: bool,

    /// Print the whole raw input above each explanation.
    #[arg(long)]
    full_raw: bool,

    /// Deepest allowed nesting of issue groups.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Exit with status 1 if any submission fails to explain.
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::new().with_expand_all(cli.expand_all);
    if let Some(depth) = cli.max_depth {
        config = config.with_max_depth(depth);
    }

    let session = match &cli.share {
        Some(base) => Session::with_address(config, base.clone()),
        None => Session::new(config),
    };

    if let Some(url) = &cli.url {
        let restored = session
            .restore(url)
            .with_context(|| format!("failed to restore input from {url}"))?;
        info!(entries = restored, "restored shared input");
    }

    for raw in read_inputs(&cli)? {
        if !session.submit(raw) {
            debug!("skipping empty input");
        }
    }

    let rendered = session.render_all();
    let options = TextOptions {
        expand_all: config.expand_all,
    };

    let mut stdout = io::stdout().lock();
    for (index, entry) in rendered.iter().enumerate() {
        if index > 0 {
            writeln!(stdout)?;
        }
        if cli.raw || cli.full_raw {
            write_preview(&mut stdout, &entry.preview, cli.full_raw)?;
        }
        write!(stdout, "{}", entry.to_text(options))?;
    }

    if cli.share.is_some() {
        if let Some(address) = session.address().filter(|_| !session.is_empty()) {
            writeln!(stdout, "\nshare: {address}")?;
        }
    }
    stdout.flush()?;

    let failed = rendered.iter().filter(|e| !e.is_success()).count();
    info!(entries = rendered.len(), failed, "done");

    if cli.strict && failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Reads every submission named on the command line.
fn read_inputs(cli: &Cli) -> Result<Vec<String>> {
    if cli.files.is_empty() {
        if cli.url.is_some() {
            return Ok(Vec::new());
        }
        return Ok(vec![read_stdin()?]);
    }

    cli.files
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                read_stdin()
            } else {
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))
            }
        })
        .collect()
}

fn read_stdin() -> Result<String> {
    io::read_to_string(io::stdin()).context("failed to read stdin")
}

fn write_preview(out: &mut impl Write, preview: &RawPreview, full: bool) -> Result<()> {
    let mut preview = preview.clone();
    preview.set_expanded(full);
    for line in preview.text().lines() {
        writeln!(out, "> {line}")?;
    }
    if let Some(label) = preview.toggle_label() {
        writeln!(out, "> [{label} with --{}]", if full { "raw" } else { "full-raw" })?;
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ZODLENS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "zodlens=debug,info"
        } else {
            "zodlens=info,warn"
        })
    });

    let format = env::var("ZODLENS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

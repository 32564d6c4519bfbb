#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stateview_demo::{App, DemoConfig, DemoError, ScreenKind};
use stateview_runtime::tick::TickQueue;
use stateview_widgets::Key;
use tracing_subscriber::EnvFilter;

/// Drive the Developer Mode settings page from keys.
///
/// Keys are tokens such as `space`, `enter`, `tab`, `esc`, `y`, `n`;
/// `q` quits.
#[derive(Debug, Parser)]
#[command(name = "stateview-demo", version)]
struct Cli {
    /// Which implementation of the page to run.
    #[arg(long, value_enum, default_value_t = ScreenKind::Encapsulated)]
    screen: ScreenKind,

    /// TOML file overriding the page wording.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated keys to run instead of reading stdin.
    #[arg(long, value_delimiter = ',')]
    script: Option<Vec<String>>,

    /// Print only the last frame.
    #[arg(long)]
    final_only: bool,
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stateview-demo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    let ticks = TickQueue::current();
    let mut app = App::new(cli.screen.build(&config, ticks.clone()), ticks, config.width);
    tracing::info!(screen = app.screen().name(), "starting");

    let mut out = io::stdout().lock();
    if !cli.final_only {
        print_frame(&mut out, &app)?;
    }

    let tokens: Box<dyn Iterator<Item = io::Result<String>>> = match cli.script {
        Some(tokens) => Box::new(tokens.into_iter().map(Ok)),
        None => Box::new(io::stdin().lock().lines()),
    };
    for token in tokens {
        let token = token?;
        if token.trim().is_empty() {
            continue;
        }
        let key: Key = token.parse()?;
        if !app.dispatch(key) {
            break;
        }
        if !cli.final_only {
            print_frame(&mut out, &app)?;
        }
    }

    if cli.final_only {
        print_frame(&mut out, &app)?;
    }
    Ok(())
}

fn print_frame(out: &mut impl Write, app: &App) -> io::Result<()> {
    let frame = app.frame();
    writeln!(out, "{frame}")?;
    writeln!(out, "{}", "=".repeat(usize::from(frame.area().width)))?;
    out.flush()
}

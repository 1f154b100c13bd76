use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use yomu_core::state::AppState;
use yomu_core::{LanguageProcessor, LookupOutcome};
use yomu_lang_japanese::JapaneseProcessor;

mod loading;
mod output;
mod profile;

#[derive(Parser, Debug)]
#[command(name = "yomu", about = "Look up Japanese text in local dictionaries")]
struct Args {
    /// JSON config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Text to look up; reads lines from stdin when omitted
    #[arg(long, short = 't')]
    text: Option<String>,

    /// Character offset of the lookup in the text
    #[arg(long, short = 'p', default_value_t = 0)]
    position: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Look up the leading kanji only
    #[arg(long)]
    kanji: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let interactive = args.text.is_none() && atty::is(atty::Stream::Stdin);

    let mut config = profile::load_config(args.config.as_deref())?;
    if args.kanji {
        config.lookup.kanji_mode = true;
    }
    if args.text.is_none() && !interactive {
        // piped lines arrive back to back
        config.lookup.debounce_ms = 0;
    }

    let state = Arc::new(AppState::new(config));
    loading::load_all(&state).await?;

    let mut processor = JapaneseProcessor::new(&state.context().config);

    match &args.text {
        Some(text) => print_lookup(&state, &mut processor, text, args.position, args.json)?,
        None => read_stdin(&state, &mut processor, &args, interactive).await?,
    }

    Ok(())
}

async fn read_stdin(
    state: &AppState,
    processor: &mut JapaneseProcessor,
    args: &Args,
    interactive: bool,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush()?;
        }

        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                print_lookup(state, processor, &line, args.position, args.json)?;
            }
        }
    }

    Ok(())
}

fn print_lookup(
    state: &AppState,
    processor: &mut JapaneseProcessor,
    text: &str,
    position: usize,
    json: bool,
) -> anyhow::Result<()> {
    let ctx = state.context();
    let normalized = processor.normalize(text);
    tracing::debug!("Normalized: '{}'", normalized);

    match processor.lookup(&ctx, &normalized, position)? {
        LookupOutcome::Debounced => tracing::debug!("Lookup skipped, too soon after the last one"),
        LookupOutcome::Results(results) if json => println!("{}", output::render_json(&results)?),
        LookupOutcome::Results(results) => print!("{}", output::render_text(&results)),
    }
    Ok(())
}

//! `deskcard` — flashcards from an external deck generator.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use deskcard::{
    Deck, DataSourceError, FieldMap, Session,
    ctx::Ctx,
    env::Settings,
    session::{Action, View},
    template::extract_placeholders,
};
use log::info;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

#[derive(Parser)]
#[command(name = "deskcard", about = "Flashcards from an external deck generator")]
struct Cli {
    /// Configuration directory (default: $XDG_CONFIG_HOME/deskcard)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// `.env` file to read instead of <dir>/.env
    #[arg(long, global = true)]
    env: Option<PathBuf>,

    /// Log binding and loading details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print one face of one card from the last generated deck
    Show {
        /// 1-based card position
        #[arg(long, default_value_t = 1)]
        position: usize,
        /// Show the back instead of the front
        #[arg(long)]
        back: bool,
        /// Which `|` alternate of the template to show
        #[arg(long, default_value_t = 0)]
        segment: usize,
    },

    /// Print both faces of every card
    List,

    /// Run the generator, wait for it, and show the first card
    Refresh,

    /// Flip and step through cards interactively
    Study,

    /// Print the placeholder names of a template, in binding order
    Placeholders { template: String },
}

fn setup_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let ctx = Ctx::new(cli.dir).context("initialise context")?;
    let settings = Settings::load(cli.env.as_deref().unwrap_or(&ctx.env_file));
    let field_map = FieldMap::load(&ctx.schema_file);

    match cli.cmd {
        Cmd::Show {
            position,
            back,
            segment,
        } => {
            let mut session = Session::new(&settings, field_map);
            session.load(read_result(&settings));
            if !session.jump(position) {
                bail!(
                    "no card at position {position} (deck has {})",
                    session.cursor().max_position
                );
            }
            if back {
                session.flip();
            }
            session.set_segment(segment);
            print_view(&session.view());
            Ok(())
        }

        Cmd::List => cmd_list(&settings, &field_map),

        Cmd::Refresh => {
            let mut session = Session::new(&settings, field_map);
            session.start_refresh(&settings);
            session.finish_refresh();
            print_view(&session.view());
            Ok(())
        }

        Cmd::Study => cmd_study(&settings, field_map),

        Cmd::Placeholders { template } => {
            for (i, name) in extract_placeholders(&template).iter().enumerate() {
                println!("{i}\t{name}");
            }
            Ok(())
        }
    }
}

/// Read the deck the generator last wrote.
fn read_result(settings: &Settings) -> Result<Deck, DataSourceError> {
    let path = settings
        .result_path
        .as_deref()
        .ok_or(DataSourceError::NoResultPath)?;
    Deck::load(path)
}

fn cmd_list(settings: &Settings, field_map: &FieldMap) -> Result<()> {
    let deck = match read_result(settings) {
        Ok(deck) => deck,
        Err(e) => {
            // Data-source failures are shown, not propagated.
            println!("{e}");
            return Ok(());
        }
    };

    for i in 0..deck.len() {
        match deck.card(i, field_map) {
            Ok(card) => {
                println!("{}. {}", i + 1, card.front_text());
                for line in card.back_text().lines() {
                    println!("   {line}");
                }
                if !card.missing.is_empty() {
                    println!("   (no field for: {})", card.missing.join(", "));
                }
            }
            Err(e) => println!("{}. error: {e}", i + 1),
        }
    }
    Ok(())
}

const STUDY_HELP: &str = "enter/f: flip   n: next   r: refresh   q: quit";

fn cmd_study(settings: &Settings, field_map: FieldMap) -> Result<()> {
    let mut session = Session::new(settings, field_map);
    session.load(read_result(settings));

    println!("{STUDY_HELP}");
    print_view(&session.view());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("read command")?;

        let action = match line.trim() {
            "" | "f" => Action::Flip,
            "n" => Action::Next,
            "r" => {
                session.poll_refresh();
                if !session.start_refresh(settings) {
                    println!("refresh already running");
                }
                print_view(&session.view());
                continue;
            }
            "q" => break,
            "h" | "?" => {
                println!("{STUDY_HELP}");
                continue;
            }
            other => {
                println!("unknown command {other:?} ({STUDY_HELP})");
                continue;
            }
        };

        if !session.apply(action) {
            println!("deck refreshed");
        }
        print_view(&session.view());
    }

    info!("study session ended at card {}", session.cursor().position);
    Ok(())
}

fn print_view(view: &View) {
    let face = if view.flipped { "back" } else { "front" };
    let mut out = io::stdout().lock();
    // A closed stdout is not worth failing over.
    let _ = writeln!(
        out,
        "── {} ──\n{}\n[{face}] {}\n",
        view.title, view.body, view.progression
    );
}

//! adorn: query and rewrite reStructuredText heading outlines.
#![allow(clippy::multiple_crate_versions)]

use adorn::edit_plan::EditPlan;
use adorn::{config, input, Adornment, Direction, Heading, Session, Shift};
use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "adorn")]
#[command(about = "Heading outlines for reStructuredText documents", long_about = None)]
struct Args {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the headings of every document with their regions
    Outline {
        /// Files or directories to scan
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// File extensions to match
        #[arg(long, short = 'e', value_name = "EXT")]
        ext: Vec<String>,
    },
    /// Show the section containing an offset
    Locate(At),
    /// Offset of the next heading
    Next(Step),
    /// Offset of the previous heading
    Prev(Step),
    /// Body range of the section containing an offset
    Fold(At),
    /// Style used for each level
    Levels {
        /// Document to inspect
        path: PathBuf,
    },
    /// Promote or demote the section containing an offset
    Relevel {
        #[command(flatten)]
        at: At,

        /// Move one level deeper instead of one level up
        #[arg(long)]
        demote: bool,

        /// Apply the edit instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Resize the adornment of the heading at an offset to fit its title
    Normalize {
        #[command(flatten)]
        at: At,

        /// Apply the edit instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Print a heading in the given style
    Render {
        /// Heading text
        title: String,

        /// Adornment encoding: one character, or the same character twice for an overline
        #[arg(long, short, default_value = "=")]
        adornment: String,

        /// Add an overline even for a single-character encoding
        #[arg(long)]
        overline: bool,
    },
    /// Apply an edit plan printed by relevel or normalize
    Apply {
        /// Edit plan JSON file
        plan: PathBuf,
    },
}

#[derive(clap::Args)]
struct At {
    /// Document to query
    path: PathBuf,

    /// Byte offset of the cursor
    #[arg(long, short)]
    offset: usize,
}

#[derive(clap::Args)]
struct Step {
    #[command(flatten)]
    at: At,

    /// Stop at deeper headings too, not only same-or-shallower ones
    #[arg(long)]
    any_level: bool,

    /// Number of headings to move
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,
}

#[derive(Serialize)]
struct Entry<'a> {
    #[serde(flatten)]
    heading: &'a Heading,
    region: Option<Range<usize>>,
}

#[derive(Serialize)]
struct Document<'a> {
    file: String,
    headings: Vec<Entry<'a>>,
}

#[derive(Serialize)]
struct Location<'a> {
    heading: &'a Heading,
    region: Option<Range<usize>>,
    body: Option<Range<usize>>,
    ancestors: Vec<&'a str>,
    children: Vec<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    let mut cfg = config::Config::load();

    match args.command {
        Command::Outline { paths, ext } => {
            // Override config with command line args
            if !ext.is_empty() {
                cfg.file_extensions = ext;
            }
            outline(paths, &cfg)
        }
        Command::Locate(at) => locate(&at, &cfg),
        Command::Next(step) => travel(&step, Direction::Forward, &cfg),
        Command::Prev(step) => travel(&step, Direction::Backward, &cfg),
        Command::Fold(at) => {
            let mut session = open(&at.path, &cfg)?;
            emit(&session.fold_region(at.offset))
        }
        Command::Levels { path } => {
            let mut session = open(&path, &cfg)?;
            let levels: Vec<String> = session
                .outline()
                .levels()
                .iter()
                .map(ToString::to_string)
                .collect();
            emit(&levels)
        }
        Command::Relevel { at, demote, write } => {
            let shift = if demote { Shift::Demote } else { Shift::Promote };
            rewrite(&at, write, &cfg, |session, offset| {
                session.change_level(offset, shift)
            })
        }
        Command::Normalize { at, write } => rewrite(&at, write, &cfg, Session::normalize),
        Command::Render {
            title,
            adornment,
            overline,
        } => {
            if title.trim().is_empty() {
                anyhow::bail!("a heading needs a non-blank title");
            }
            let adornment: Adornment = adornment.parse()?;
            print!("{}", adorn::make_header(&title, adornment, overline));
            Ok(())
        }
        Command::Apply { plan } => {
            let edits =
                EditPlan::load(&plan).with_context(|| format!("reading {}", plan.display()))?;
            edits
                .apply()
                .with_context(|| format!("applying {}", plan.display()))?;
            Ok(())
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn open(path: &Path, cfg: &config::Config) -> anyhow::Result<Session> {
    input::open_session(path, cfg.format()).with_context(|| format!("reading {}", path.display()))
}

fn emit(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn outline(paths: Vec<PathBuf>, cfg: &config::Config) -> anyhow::Result<()> {
    let documents = input::find_documents(paths, &cfg.file_extensions)?;

    if documents.is_empty() {
        eprintln!("No matching files found");
        return Ok(());
    }

    let mut sessions = documents
        .iter()
        .map(|path| open(path, cfg))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut report = Vec::new();
    for session in &mut sessions {
        let file = session.file_path.clone();
        let outline = session.outline();
        let headings = outline
            .headings()
            .iter()
            .map(|heading| Entry {
                heading,
                region: outline.region(heading),
            })
            .collect();
        report.push(Document { file, headings });
    }

    emit(&report)
}

fn locate(at: &At, cfg: &config::Config) -> anyhow::Result<()> {
    let mut session = open(&at.path, cfg)?;
    let outline = session.outline();

    let location = outline.belong_to(at.offset).map(|heading| Location {
        heading,
        region: outline.region(heading),
        body: outline.body(heading),
        ancestors: outline
            .ancestors(heading)
            .into_iter()
            .map(|h| h.title.as_str())
            .collect(),
        children: outline
            .children(heading)
            .into_iter()
            .map(|h| h.title.as_str())
            .collect(),
    });

    emit(&location)
}

fn travel(step: &Step, direction: Direction, cfg: &config::Config) -> anyhow::Result<()> {
    let mut session = open(&step.at.path, cfg)?;
    let mut offset = Some(step.at.offset);

    for _ in 0..step.count {
        offset = offset.and_then(|from| session.move_target(from, direction, !step.any_level));
    }

    emit(&offset)
}

fn rewrite(
    at: &At,
    write: bool,
    cfg: &config::Config,
    change: impl FnOnce(&mut Session, usize) -> Option<adorn::edit_plan::Splice>,
) -> anyhow::Result<()> {
    let mut session = open(&at.path, cfg)?;
    let Some(heading) = session.heading_at(at.offset) else {
        eprintln!("No heading at offset {}", at.offset);
        return emit(&Option::<EditPlan>::None);
    };
    let Some(splice) = change(&mut session, at.offset) else {
        eprintln!("Nothing to change for {:?}", heading.title);
        return emit(&Option::<EditPlan>::None);
    };

    let plan = EditPlan {
        edits: vec![session.edit(splice, &heading.title)],
    };

    if write {
        plan.apply()
            .with_context(|| format!("writing {}", at.path.display()))?;
        eprintln!("Saved");
        Ok(())
    } else {
        emit(&plan)
    }
}

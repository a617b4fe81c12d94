//! Command-line front end: merges config and flags, gathers filenames and
//! prints the resolved mapping.

use std::collections::{BTreeMap, HashSet};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use crate::resolver::candidates::{discover, normalize};
use crate::resolver::PathResolver;
use crate::settings::{load_settings, OutputFormat, Settings};

#[derive(Parser, Debug, Default)]
#[command(
    name = "resolve-paths",
    version,
    about = "Find which candidate directory holds each coverage-reported file"
)]
pub struct Cli {
    /// Workspace root every candidate is relative to.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Candidate directory under the root; repeatable. Replaces configured candidates.
    #[arg(short = 'c', long = "candidate")]
    pub candidates: Vec<String>,

    /// Also use every directory under the root as a candidate.
    #[arg(long)]
    pub discover: bool,

    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Include dot-directories when discovering.
    #[arg(long)]
    pub include_hidden: bool,

    #[arg(long)]
    pub parallel: bool,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Settings file (defaults to the per-user config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Filenames to resolve. Read one per line from stdin when omitted.
    pub filenames: Vec<String>,
}

impl Cli {
    /// Apply command-line overrides on top of `base`.
    pub fn merge(&self, mut base: Settings) -> Settings {
        if let Some(root) = &self.root {
            base.root = root.clone();
        }
        if !self.candidates.is_empty() {
            base.candidates = self.candidates.clone();
        }
        base.discover |= self.discover;
        if let Some(depth) = self.max_depth {
            base.max_depth = depth;
        }
        base.include_hidden |= self.include_hidden;
        base.parallel |= self.parallel;
        if let Some(format) = self.format {
            base.format = format;
        }
        base
    }
}

/// Run one resolution: settings, candidates, filenames, output.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> anyhow::Result<()> {
    let settings = cli.merge(load_settings(cli.config.as_deref())?);

    let filenames = if cli.filenames.is_empty() {
        read_filenames(input).context("failed to read filenames from stdin")?
    } else {
        cli.filenames.clone()
    };

    let candidates = collect_candidates(&settings)?;
    info!(
        "resolving {} filenames against {} candidates under {}",
        filenames.len(),
        candidates.len(),
        settings.root.display()
    );

    let resolver = PathResolver::new(settings.root.clone(), candidates);
    let chosen = if settings.parallel {
        resolver.choose_parallel(&filenames)
    } else {
        resolver.choose(&filenames)
    };

    for f in filenames.iter().filter(|f| !chosen.contains_key(*f)) {
        info!("unresolved: {}", f);
    }

    write_mapping(out, &chosen, settings.format)?;
    Ok(())
}

/// Configured candidates (normalised, first occurrence kept) followed by
/// discovered ones when discovery is on.
pub fn collect_candidates(settings: &Settings) -> anyhow::Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |c: String| {
        if seen.insert(c.clone()) {
            out.push(c);
        }
    };
    for c in &settings.candidates {
        push(normalize(c));
    }
    if settings.discover {
        let found = discover(&settings.root, settings.max_depth, settings.include_hidden)
            .with_context(|| format!("discovering candidates under {}", settings.root.display()))?;
        for c in found {
            push(c);
        }
    }
    Ok(out)
}

fn read_filenames<R: BufRead>(input: R) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            names.push(trimmed.to_string());
        }
    }
    Ok(names)
}

pub fn write_mapping<W: Write>(
    out: &mut W,
    chosen: &BTreeMap<String, String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (file, dir) in chosen {
                writeln!(out, "{}\t{}", file, dir)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, chosen)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

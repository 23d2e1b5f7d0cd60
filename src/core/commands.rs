//! Filepath: src/core/commands.rs
//! CLI handlers: collect sources, call the engine, render results.
//! Engine errors travel as `CueError` inside `anyhow::Error` and are
//! mapped to exit codes in `finish_with_exit`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::{info, instrument, warn};

use crate::{
    cli::{AppContext, ConceptsArgs, CorpusArgs, RepresentativeArgs, TypicalArgs},
    core::{
        error::{CueError, check_k},
        introspector::Cue,
        region::{Location, Region},
        representative::RepresentativeSelector,
        source::{Corpus, Source},
    },
    infra::{
        config::{Config, load_config},
        io::load_source,
        line_index::NewlineIndex,
        walk::FileWalker,
    },
};

const DEFAULT_TYPICAL_K: usize = 10;
const DEFAULT_REPRESENTATIVE_K: usize = 5;

/// Assign concepts to one file (optionally scoped) or a batch of files
#[instrument(skip_all, fields(files = args.files.len()))]
pub fn concepts_run(
    args: ConceptsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    let cue = Cue::new(config.analysis)?;

    let scoped = !args
        .elements
        .is_empty()
        || args
            .lines
            .is_some();

    if scoped && args.files.len() != 1
    {
        return Err(CueError::invalid("--element and --lines need exactly one file").into());
    }

    let sources = args
        .files
        .iter()
        .map(|p| load_source(p, p.display().to_string()))
        .collect::<Result<Vec<_>>>()?;

    let concepts = match (sources.as_slice(), args.lines.as_deref())
    {
        ([source], Some(span)) =>
        {
            let region = line_region(source, span)?;
            cue.assigned_concepts_in_region(source, &region)?
        }
        ([source], None) if !args.elements.is_empty() =>
        {
            cue.assigned_concepts_in(source, &args.elements)?
        }
        ([source], None) => cue.assigned_concepts(source)?,
        _ => cue.assigned_concepts_batch(&sources)?,
    };

    info!(concepts = concepts.len(), "assigned concepts");

    if args.json
    {
        #[derive(Serialize)]
        struct Out<'a>
        {
            sources: Vec<&'a str>,
            concepts: &'a [String],
        }

        let out = Out {
            sources: sources
                .iter()
                .map(|s| {
                    s.id()
                        .as_str()
                })
                .collect(),
            concepts: &concepts,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !ctx.quiet
    {
        let heading = format!("{} concept(s) from {} file(s)", concepts.len(), sources.len());
        println!("{}", paint(ctx, &heading, |s| s.bold().to_string()));
    }
    for c in &concepts
    {
        println!("{c}");
    }

    Ok(())
}

/// Print the `k` most typical sources of a directory
#[instrument(skip_all, fields(root = %args.corpus.path.display()))]
pub fn typical_run(
    args: TypicalArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;

    let mut analysis = config
        .analysis
        .clone();
    if let Some(kernel) = args.kernel
    {
        analysis.kernel = kernel;
    }
    if let Some(distance) = args.distance
    {
        analysis.distance = distance;
    }
    let bandwidth = args
        .bandwidth
        .unwrap_or(analysis.bandwidth);

    let cue = Cue::new(analysis)?;
    let corpus = collect_corpus(&args.corpus, &config)?;

    let k = args
        .k
        .unwrap_or_else(|| DEFAULT_TYPICAL_K.min(corpus.len()));
    check_k(k, corpus.len())?;

    let ranking = cue.rank(&corpus, &args.relevant, bandwidth)?;

    let rows: Vec<Row> = ranking
        .top(k)
        .iter()
        .enumerate()
        .filter_map(|(pos, &i)| {
            corpus
                .get(i)
                .map(|s| Row {
                    rank: pos + 1,
                    score: ranking.scores()[i],
                    source: s
                        .id()
                        .to_string(),
                })
        })
        .collect();

    info!(corpus = corpus.len(), k, bandwidth, "ranked corpus");
    render(ctx, &rows, args.json, "Most typical")
}

/// Print up to `k` sources that jointly cover a directory's concepts
#[instrument(skip_all, fields(root = %args.corpus.path.display()))]
pub fn representative_run(
    args: RepresentativeArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config()?;
    let cue = Cue::new(config.analysis.clone())?;
    let corpus = collect_corpus(&args.corpus, &config)?;

    let k = args
        .k
        .unwrap_or_else(|| DEFAULT_REPRESENTATIVE_K.min(corpus.len()));

    // One ranking serves both the pick and the reported scores
    let ranking = cue.rank::<&str>(&corpus, &[], cue.settings().bandwidth)?;
    let picked = RepresentativeSelector.select(&ranking, k)?;

    let rows: Vec<Row> = picked
        .iter()
        .enumerate()
        .filter_map(|(pos, &i)| {
            corpus
                .get(i)
                .map(|s| Row {
                    rank: pos + 1,
                    score: ranking.scores()[i],
                    source: s
                        .id()
                        .to_string(),
                })
        })
        .collect();

    info!(corpus = corpus.len(), k, "picked representatives");
    render(ctx, &rows, args.json, "Representatives")
}

#[derive(Debug, Serialize)]
struct Row
{
    rank: usize,
    score: f64,
    source: String,
}

fn render(
    ctx: &AppContext,
    rows: &[Row],
    json: bool,
    title: &str,
) -> Result<()>
{
    if json
    {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    #[derive(Tabled)]
    struct Line
    {
        rank: usize,
        score: String,
        source: String,
    }

    let lines: Vec<Line> = rows
        .iter()
        .map(|r| Line {
            rank: r.rank,
            score: format!("{:.6}", r.score),
            source: r
                .source
                .clone(),
        })
        .collect();

    if !ctx.quiet
    {
        println!("{}", paint(ctx, title, |s| s.bold().to_string()));
    }
    println!("{}", Table::new(lines));
    Ok(())
}

fn paint(
    ctx: &AppContext,
    text: &str,
    style: impl Fn(&str) -> String,
) -> String
{
    if ctx.no_color { text.to_string() } else { style(text) }
}

/// Walk `args.path` and load every matching file; ids are paths
/// relative to the walk root
fn collect_corpus(
    args: &CorpusArgs,
    config: &Config,
) -> Result<Corpus>
{
    let root = &args.path;
    if !root.is_dir()
    {
        return Err(CueError::invalid(format!("{} is not a directory", root.display())).into());
    }

    let extensions = if args
        .extensions
        .is_empty()
    {
        &config.extensions
    }
    else
    {
        &args.extensions
    };

    let mut ignores = config
        .ignore_patterns
        .clone();
    ignores.extend(
        args.ignore
            .iter()
            .cloned(),
    );

    let walker = FileWalker::new(&ignores)
        .context("invalid ignore pattern")?
        .with_extensions(extensions);
    let files: Vec<PathBuf> = walker.walk_files(root);

    // Unreadable or unsupported files are skipped, not fatal
    let sources: Vec<Source> = files
        .par_iter()
        .filter_map(|path| match load_source(path, relative_id(root, path))
        {
            Ok(s) => Some(s),
            Err(err) =>
            {
                warn!(path = %path.display(), "skipping: {err:#}");
                None
            }
        })
        .collect();

    info!(files = files.len(), sources = sources.len(), "collected corpus");
    Ok(Corpus::new(sources))
}

fn relative_id(
    root: &Path,
    path: &Path,
) -> String
{
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Region of `source` covering the inclusive 1-based line span `A-B`
/// (a single number selects one line)
fn line_region(
    source: &Source,
    span: &str,
) -> Result<Region>
{
    let (start, end) = parse_line_span(span)?;

    let bytes = source
        .content()
        .as_bytes();
    let index = NewlineIndex::build(bytes);

    let (lo, hi) = index
        .byte_range_for_lines(start, end, bytes)
        .ok_or_else(|| {
            CueError::invalid(format!(
                "lines {start}-{end} are outside {} ({} lines)",
                source.id(),
                index.line_count()
            ))
        })?;

    let location = Location::new(
        source
            .id()
            .clone(),
        lo,
        hi,
    )?;
    Ok(Region::from_locations([location])?)
}

fn parse_line_span(span: &str) -> Result<(usize, usize)>
{
    let bad = || CueError::invalid(format!("malformed line span '{span}', expected A-B"));

    let (a, b) = match span.split_once('-')
    {
        Some((a, b)) => (a, b),
        None => (span, span),
    };

    let start: usize = a
        .trim()
        .parse()
        .map_err(|_| bad())?;
    let end: usize = b
        .trim()
        .parse()
        .map_err(|_| bad())?;

    if start == 0 || start > end
    {
        return Err(bad().into());
    }

    Ok((start, end))
}

/// Exit code for a failed command: engine errors get their own codes,
/// everything else (I/O, config files) is 1
pub fn exit_code_for(err: &anyhow::Error) -> i32
{
    match err.downcast_ref::<CueError>()
    {
        Some(CueError::InvalidArgument(_)) => 2,
        Some(CueError::EmptySelection(_)) => 3,
        Some(CueError::OutOfRange { .. }) => 4,
        Some(CueError::Parse { .. }) => 5,
        None => 1,
    }
}

/// Print the error (as a miette report for engine errors) and exit
pub fn finish_with_exit(result: Result<()>) -> !
{
    match result
    {
        Ok(()) => std::process::exit(0),
        Err(err) =>
        {
            let code = exit_code_for(&err);
            match err.downcast_ref::<CueError>()
            {
                Some(cue_err) =>
                {
                    eprintln!("{:?}", miette::Report::new(cue_err.clone()));
                }
                None => eprintln!("Error: {err:#}"),
            }
            std::process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::source::Lang;

    #[test]
    fn parses_line_spans()
    {
        assert_eq!(parse_line_span("3-7").unwrap(), (3, 7));
        assert_eq!(parse_line_span(" 4 - 4 ").unwrap(), (4, 4));
        assert_eq!(parse_line_span("9").unwrap(), (9, 9));
        assert!(parse_line_span("0-2").is_err());
        assert!(parse_line_span("5-2").is_err());
        assert!(parse_line_span("a-b").is_err());
    }

    #[test]
    fn line_region_maps_to_bytes()
    {
        let src = Source::from_text("A.java", Lang::Java, "class A {\n  void run() {}\n}\n");

        let region = line_region(&src, "2-2").unwrap();
        let text = region
            .extract_text(&src)
            .unwrap();
        assert_eq!(text, "  void run() {}");

        let err = line_region(&src, "9-12").unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn exit_codes_follow_error_kind()
    {
        let e: anyhow::Error = CueError::EmptySelection("first").into();
        assert_eq!(exit_code_for(&e), 3);

        let e: anyhow::Error = CueError::OutOfRange { start: 1, end: 9, len: 2 }.into();
        assert_eq!(exit_code_for(&e), 4);

        let e: anyhow::Error = CueError::Parse { source_id: "x".into(), reason: "y".into() }.into();
        assert_eq!(exit_code_for(&e), 5);

        let e = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code_for(&e), 1);

        // context keeps the engine error reachable
        let e = anyhow::Error::from(CueError::invalid("k")).context("while ranking");
        assert_eq!(exit_code_for(&e), 2);
    }

    #[test]
    fn relative_ids_use_forward_slashes()
    {
        let root = Path::new("/corpus");
        assert_eq!(relative_id(root, Path::new("/corpus/a/B.java")), "a/B.java");
    }
}

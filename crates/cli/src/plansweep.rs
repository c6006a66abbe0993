//! plansweep - run the extraction pipeline over a page dump
//!
//! Walks each requested page's operator list, dispatches every painted image
//! through the processing routine, and writes the returned artifacts (raster
//! plus optional vector overlay) to an output directory.
//!
//! The input is a JSON page dump produced by the rendering front end; the
//! built-in raster encoder stands in for the external cleanup routine.

use anyhow::Context;
use blueline_core::high_level::sweep_page;
use blueline_core::interp::WalkStats;
use blueline_core::present::ArtifactWriter;
use blueline_core::processor::ProcessorHandle;
use blueline_core::raster::RasterProcessor;
use blueline_core::session::{Session, read_selection};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Walk a page dump and write processed plan images to disk.
#[derive(Parser, Debug)]
#[command(name = "plansweep")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a page dump (exactly one)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Page index to process (0-based; all pages if omitted)
    #[arg(short = 'p', long)]
    page: Option<usize>,

    /// Directory artifacts are written to
    #[arg(short = 'O', long = "output-dir", default_value = "artifacts")]
    output_dir: PathBuf,

    /// Print the walk summary as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let data = read_selection(&args.files).context("reading input selection")?;

    let mut session = Session::new();
    let doc = session
        .load_document(&data)
        .context("parsing page dump")?;
    tracing::info!(pages = doc.num_pages(), "dump loaded");

    // The processing routine must be in place before the first dispatch.
    let mut handle = ProcessorHandle::empty();
    handle.install(Box::new(RasterProcessor::new()));
    let processor = handle.processor()?;

    let mut writer = ArtifactWriter::new(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let pages: Vec<usize> = match args.page {
        Some(index) => vec![index],
        None => (0..doc.num_pages()).collect(),
    };

    let mut total = WalkStats::default();
    for index in pages {
        let page = doc.page(index)?;
        let stats = sweep_page(page, processor, &mut writer)
            .with_context(|| format!("sweeping page {index}"))?;
        total.operations += stats.operations;
        total.path_groups += stats.path_groups;
        total.images_dispatched += stats.images_dispatched;
        total.images_failed += stats.images_failed;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&total)?);
    } else {
        println!(
            "{} operations walked, {} images processed ({} failed), artifacts in {}",
            total.operations,
            total.images_dispatched,
            total.images_failed,
            args.output_dir.display()
        );
    }

    Ok(())
}

//! dumpops - print a page dump's drawing operations
//!
//! Writes the operator list in painting order, one operation per line,
//! recursing into path-construction groups with each sub-operator paired
//! against its argument group. Useful for inspecting what a rendering front
//! end actually handed over before pointing the pipeline at it.

use anyhow::Context;
use blueline_core::interp::{OpLogger, PageWalker};
use blueline_core::session::{Session, read_selection};
use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Print the drawing operations of a page dump.
#[derive(Parser, Debug)]
#[command(name = "dumpops")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a page dump (exactly one)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Page index to dump (0-based; all pages if omitted)
    #[arg(short = 'p', long)]
    page: Option<usize>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let default = if args.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data = read_selection(&args.files).context("reading input selection")?;
    let doc = Session::new()
        .load_document(&data)
        .context("parsing page dump")?;

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("creating {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    let pages: Vec<usize> = match args.page {
        Some(index) => vec![index],
        None => (0..doc.num_pages()).collect(),
    };

    for index in pages {
        let page = doc.page(index)?;
        let list = page.operator_list()?;
        writeln!(
            output,
            "page {index}: {} operations, {} image objects, userUnit {}",
            list.len(),
            page.objects.len(),
            page.user_unit
        )?;

        let mut logger = OpLogger::new(&mut output);
        PageWalker::new(&mut logger, &page.objects).walk(&list)?;
    }

    output.flush()?;
    Ok(())
}

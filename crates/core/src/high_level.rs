//! High-level entry points for the common pipeline paths.

use crate::document::{DumpDocument, PageDump};
use crate::error::Result;
use crate::interp::{CleanupBridge, PageWalker, WalkStats};
use crate::present::Presenter;
use crate::processor::ImageProcessor;
use tracing::info;

/// Walk one page, dispatching every painted image through `processor` and
/// presenting each result on `presenter`.
pub fn sweep_page<P, S>(page: &PageDump, processor: &mut P, presenter: &mut S) -> Result<WalkStats>
where
    P: ImageProcessor + ?Sized,
    S: Presenter + ?Sized,
{
    let list = page.operator_list()?;
    let mut bridge = CleanupBridge::new(processor, presenter);
    PageWalker::new(&mut bridge, &page.objects).walk(&list)
}

/// Walk every page of a document in order, accumulating stats.
pub fn sweep_document<P, S>(
    doc: &DumpDocument,
    processor: &mut P,
    presenter: &mut S,
) -> Result<WalkStats>
where
    P: ImageProcessor + ?Sized,
    S: Presenter + ?Sized,
{
    let mut total = WalkStats::default();
    for (index, page) in doc.pages.iter().enumerate() {
        let stats = sweep_page(page, processor, presenter)?;
        info!(
            page = index,
            operations = stats.operations,
            images = stats.images_dispatched,
            failed = stats.images_failed,
            "page swept"
        );
        total.operations += stats.operations;
        total.path_groups += stats.path_groups;
        total.images_dispatched += stats.images_dispatched;
        total.images_failed += stats.images_failed;
    }
    Ok(total)
}

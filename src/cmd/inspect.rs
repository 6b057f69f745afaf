use crate::reports;
use kletype::error::KtResult;
use kletype::layout::LayoutModel;

pub fn run(layout: &LayoutModel) -> KtResult<()> {
    reports::print_metadata(&layout.meta);
    reports::print_rows(layout);
    Ok(())
}

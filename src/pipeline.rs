use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::PhotoStore,
    board::build_board,
    config::BoardConfig,
    error::GridResult,
    loader::DataSet,
    svg::render_svg,
    talks::assemble_talks,
};

/// Inputs of one board render.
#[derive(Clone, Debug)]
pub struct RenderJob {
    /// Directory holding the schedule, sessions and speakers documents.
    pub data_dir: PathBuf,
    /// Directory speaker photo paths are resolved against.
    pub assets_root: PathBuf,
    pub out: PathBuf,
    pub config: BoardConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSummary {
    pub talks: usize,
    pub photos: usize,
    pub bytes: usize,
}

/// Assemble, lay out and serialize the board for an already loaded data set.
pub fn render_board(
    data: &DataSet,
    assets_root: &Path,
    config: &BoardConfig,
) -> GridResult<(String, RenderSummary)> {
    let talks = assemble_talks(data)?;
    let photos = PhotoStore::prepare(&talks, assets_root)?;
    let root = build_board(&talks, config)?;
    let svg = render_svg(&root, &photos)?;
    let summary = RenderSummary {
        talks: talks.len(),
        photos: photos.len(),
        bytes: svg.len(),
    };
    Ok((svg, summary))
}

/// Load the data, render the board and write it to `job.out`, replacing any existing file.
///
/// Nothing is written unless the whole document rendered.
#[tracing::instrument(skip(job), fields(out = %job.out.display()))]
pub fn run(job: &RenderJob) -> GridResult<RenderSummary> {
    job.config.validate()?;
    let data = DataSet::load(&job.data_dir, &job.config.files)?;
    let (svg, summary) = render_board(&data, &job.assets_root, &job.config)?;

    if let Some(parent) = job.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&job.out, svg.as_bytes())
        .with_context(|| format!("write svg '{}'", job.out.display()))?;

    tracing::info!(
        talks = summary.talks,
        photos = summary.photos,
        bytes = summary.bytes,
        "wrote board"
    );
    Ok(summary)
}

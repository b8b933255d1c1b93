//! Foamview CLI - render a workspace note to preview HTML

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use foamview_core::{Error, RenderConfig, SectionSlicing, WorkspaceConfig, WorkspaceIndex};
use foamview_index::NoteIndex;
use foamview_render::Renderer;

/// Render a note from a knowledge-base workspace to an HTML fragment
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the notes workspace directory
    #[arg(short, long, env = "FOAM_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Note to render: a name, workspace-relative path, or title
    note: String,

    /// Write the HTML fragment to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat section range ends as inclusive when slicing transclusions
    #[arg(long, action = clap::ArgAction::SetTrue)]
    section_inclusive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    log::info!("foamview v{}", env!("CARGO_PKG_VERSION"));

    let config = WorkspaceConfig::new(&args.workspace);
    let index = NoteIndex::open(&config).with_context(|| {
        format!(
            "failed to index workspace at {}",
            args.workspace.display()
        )
    })?;
    log::info!("Indexed {} notes", index.len());

    let Some(note) = index.find(&args.note)? else {
        return Err(Error::note_not_found(args.note.as_str()).into());
    };

    let render_config = RenderConfig {
        section_slicing: if args.section_inclusive {
            SectionSlicing::EndInclusive
        } else {
            SectionSlicing::EndExclusive
        },
    };
    let renderer = Renderer::with_config(Arc::new(index), render_config);
    let html = renderer.render_note(&note);

    match &args.output {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{html}"),
    }

    Ok(())
}

use crate::codec::{Codec, Compressor};
use crate::config::Settings;
use crate::error::AppError;
use crate::ingest::{ResizeOptions, ingest_files};
use crate::session::{SetupDraft, ShareLink};
use log::info;
use std::io::Write;
use std::path::PathBuf;

/// What the organizer asked for on the setup view.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub files: Vec<PathBuf>,
    pub votes_per_person: Option<u32>,
    pub base_url: Option<String>,
}

/// Ingests the files, builds the session and prints the share link.
pub async fn handle_setup<C, W>(
    codec: &Codec<C>,
    settings: &Settings,
    request: SetupRequest,
    out: &mut W,
) -> Result<ShareLink, AppError>
where
    C: Compressor,
    W: Write,
{
    let mut draft = SetupDraft::new(settings);
    if let Some(votes) = request.votes_per_person {
        draft.set_votes_per_person(votes);
    }

    // Budget and cap are checked before any file is decoded.
    draft.check_budget()?;
    draft.check_capacity(request.files.len())?;
    let images = ingest_files(&request.files, ResizeOptions::from(settings)).await?;
    draft.add_images(images)?;

    let base_url = request.base_url.as_deref().unwrap_or(&settings.base_url);
    let share = draft.generate_link(codec, base_url)?;
    info!("Session ready with {} image(s)", draft.images().len());

    writeln!(out, "{} image(s) uploaded:", draft.images().len())?;
    for image in draft.images() {
        writeln!(out, "  {}", image.name)?;
    }
    writeln!(out, "Votes per person: {}", draft.votes_per_person())?;
    writeln!(out)?;
    writeln!(out, "Share your link:")?;
    writeln!(out, "{}", share.link)?;

    Ok(share)
}

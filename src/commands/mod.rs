use clap::{Parser, Subcommand};
use image_priority_vote::config::Settings;
use image_priority_vote::handlers::results::{collect_codes, handle_results};
use image_priority_vote::handlers::setup::{SetupRequest, handle_setup};
use image_priority_vote::handlers::vote::{open_ballot, run_ballot};
use image_priority_vote::handlers::{View, resolve_link};
use image_priority_vote::routes::Route;
use image_priority_vote::voting::Ballot;
use image_priority_vote::{AppError, Codec, Zlib};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-vote", about = "Serverless image priority voting", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload images and generate a voting link
    Setup {
        /// Number of votes for each person
        #[arg(long, short)]
        votes: Option<u32>,
        /// Origin and path the link is built on
        #[arg(long)]
        base_url: Option<String>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Vote on a shared link or raw session token
    Vote { link: String },
    /// Aggregate vote codes from files, or stdin when none are given
    Results { files: Vec<PathBuf> },
    /// Open a shared link in whichever view it points to
    Open { link: String },
}

pub async fn handle_command(settings: &Settings, command: Command) -> Result<(), AppError> {
    let codec = Codec::<Zlib>::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Setup {
            votes,
            base_url,
            files,
        } => {
            let request = SetupRequest {
                files,
                votes_per_person: votes,
                base_url,
            };
            handle_setup(&codec, settings, request, &mut out).await?;
        }
        Command::Vote { link } => {
            // Accept either a full link or the bare token.
            let token = match Route::parse(&link) {
                Route::Vote(token) => token,
                _ => link.trim().to_string(),
            };
            let mut ballot = open_ballot(&codec, &token)?;
            vote_on(&codec, &mut ballot, &mut out)?;
        }
        Command::Results { files } => {
            let pasted = if files.is_empty() {
                collect_codes([io::stdin().lock()])?
            } else {
                let sources = files
                    .iter()
                    .map(File::open)
                    .collect::<Result<Vec<_>, _>>()?;
                collect_codes(sources)?
            };
            handle_results(&codec, &pasted, &mut out)?;
        }
        Command::Open { link } => match resolve_link(&codec, &link)? {
            View::Setup => {
                writeln!(out, "Start a new voting session:")?;
                writeln!(out, "  image-vote setup --votes <N> <FILES>...")?;
            }
            View::Vote(mut ballot) => vote_on(&codec, &mut ballot, &mut out)?,
            View::Results => {
                writeln!(out, "Paste the vote codes from all participants, then end input (Ctrl-D):")?;
                out.flush()?;
                let pasted = collect_codes([io::stdin().lock()])?;
                handle_results(&codec, &pasted, &mut out)?;
            }
        },
    }

    Ok(())
}

fn vote_on<W: Write>(codec: &Codec<Zlib>, ballot: &mut Ballot, out: &mut W) -> Result<(), AppError> {
    let input = io::stdin().lock();
    if run_ballot(codec, ballot, input, out)?.is_none() {
        writeln!(out, "No vote code was produced.")?;
    }
    Ok(())
}

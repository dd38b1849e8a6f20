use crate::codec::{Codec, Compressor};
use crate::error::AppError;
use crate::voting::Ballot;
use log::{info, warn};
use std::io::{BufRead, Write};

/// One line typed at the ballot prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallotCommand {
    Cast(usize),
    Retract(usize),
    List,
    Submit,
    Quit,
    Help,
    Unknown(String),
}

impl BallotCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let lower = line.to_ascii_lowercase();

        if let Some(rest) = line.strip_prefix('+') {
            return parse_position(rest).map_or_else(|| Self::Unknown(line.to_string()), Self::Cast);
        }
        if let Some(rest) = line.strip_prefix('-') {
            return parse_position(rest)
                .map_or_else(|| Self::Unknown(line.to_string()), Self::Retract);
        }
        if let Some(position) = parse_position(line) {
            return Self::Cast(position);
        }

        match lower.as_str() {
            "list" | "ls" => Self::List,
            "submit" | "done" => Self::Submit,
            "quit" | "exit" | "q" => Self::Quit,
            "help" | "?" | "" => Self::Help,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

fn parse_position(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// Decodes the token behind a vote link and opens a shuffled ballot.
pub fn open_ballot<C: Compressor>(codec: &Codec<C>, token: &str) -> Result<Ballot, AppError> {
    let session = codec.decode_session(token).map_err(|e| {
        warn!("Rejected voting link: {}", e);
        AppError::InvalidLink(e)
    })?;
    info!(
        "Opened ballot for {} image(s) with {} vote(s)",
        session.images.len(),
        session.votes_per_person
    );
    Ok(Ballot::new(session))
}

pub fn print_ballot<W: Write>(ballot: &Ballot, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Remaining Votes: {}", ballot.remaining())?;
    for (i, image) in ballot.display_images().enumerate() {
        let tally = ballot.tally(&image.id);
        if tally > 0 {
            writeln!(out, "  {:>2}. {} [{}]", i + 1, image.name, tally)?;
        } else {
            writeln!(out, "  {:>2}. {}", i + 1, image.name)?;
        }
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "Type +N (or N) to add a vote to image N, -N to remove one, `list` to show the images, `submit` when no votes remain."
    )
}

/// Drives a ballot from line input until it is submitted or the input ends.
/// Returns the vote code on submission.
pub fn run_ballot<C, R, W>(
    codec: &Codec<C>,
    ballot: &mut Ballot,
    input: R,
    out: &mut W,
) -> Result<Option<String>, AppError>
where
    C: Compressor,
    R: BufRead,
    W: Write,
{
    print_help(out)?;
    print_ballot(ballot, out)?;

    for line in input.lines() {
        let line = line?;
        match BallotCommand::parse(&line) {
            BallotCommand::Cast(position) => match ballot.image_at(position).map(|i| i.id.clone()) {
                Some(id) => {
                    if ballot.cast(&id) {
                        writeln!(out, "Remaining Votes: {}", ballot.remaining())?;
                    } else {
                        writeln!(out, "No votes left. Remove a vote first.")?;
                    }
                }
                None => writeln!(out, "There is no image {}.", position)?,
            },
            BallotCommand::Retract(position) => match ballot.image_at(position).map(|i| i.id.clone()) {
                Some(id) => {
                    if ballot.retract(&id) {
                        writeln!(out, "Remaining Votes: {}", ballot.remaining())?;
                    } else {
                        writeln!(out, "Image {} has no votes to remove.", position)?;
                    }
                }
                None => writeln!(out, "There is no image {}.", position)?,
            },
            BallotCommand::List => print_ballot(ballot, out)?,
            BallotCommand::Submit => match ballot.submit() {
                Some(results) => {
                    let code = codec.encode_results(&results)?;
                    writeln!(out, "Vote Submitted!")?;
                    writeln!(
                        out,
                        "Send this code to the person who organized this poll:"
                    )?;
                    writeln!(out, "{}", code)?;
                    return Ok(Some(code));
                }
                None => writeln!(
                    out,
                    "You still have {} vote(s) to cast before submitting.",
                    ballot.remaining()
                )?,
            },
            BallotCommand::Quit => break,
            BallotCommand::Help => print_help(out)?,
            BallotCommand::Unknown(raw) => {
                writeln!(out, "Unknown command: {}", raw)?;
                print_help(out)?;
            }
        }
    }

    warn!("Ballot closed without submitting");
    Ok(None)
}

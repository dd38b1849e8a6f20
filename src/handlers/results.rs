use crate::codec::{Codec, Compressor};
use crate::error::AppError;
use crate::models::RankedImage;
use crate::voting::{aggregate_with, summarize};
use log::error;
use std::io::{Read, Write};

/// Concatenates every source into one paste buffer. Codes may be split
/// across files and lines freely.
pub fn collect_codes<R: Read>(sources: impl IntoIterator<Item = R>) -> std::io::Result<String> {
    let mut pasted = String::new();
    for mut source in sources {
        source.read_to_string(&mut pasted)?;
        pasted.push('\n');
    }
    Ok(pasted)
}

/// Aggregates pasted codes and prints the final ranking.
pub fn handle_results<C, W>(
    codec: &Codec<C>,
    pasted: &str,
    out: &mut W,
) -> Result<Vec<RankedImage>, AppError>
where
    C: Compressor,
    W: Write,
{
    let rankings = aggregate_with(codec, pasted).map_err(|e| {
        error!("Aggregation failed: {:?}", e);
        e
    })?;

    writeln!(out, "Final Results")?;
    write!(out, "{}", summarize(&rankings))?;
    Ok(rankings)
}

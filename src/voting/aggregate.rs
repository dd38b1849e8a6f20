use crate::codec::{Codec, Compressor, Zlib};
use crate::error::{AggregateError, ValidationError};
use crate::models::{ImageFile, RankedImage};
use log::{info, warn};
use std::collections::HashMap;

/// Sums pasted vote codes into a ranking, using the default codec.
pub fn aggregate(input: &str) -> Result<Vec<RankedImage>, AggregateError> {
    aggregate_with(&Codec::<Zlib>::default(), input)
}

/// Sums pasted vote codes into a ranking.
///
/// Codes are separated by any whitespace. The first code's image list is
/// the master list; every later code only contributes its tallies. A single
/// undecodable code aborts the whole run.
pub fn aggregate_with<C: Compressor>(
    codec: &Codec<C>,
    input: &str,
) -> Result<Vec<RankedImage>, AggregateError> {
    let codes: Vec<&str> = input.split_whitespace().collect();
    if codes.is_empty() {
        return Err(ValidationError::NoVoteCodes.into());
    }

    let mut totals: HashMap<String, u64> = HashMap::new();
    let mut master_images: Option<Vec<ImageFile>> = None;

    for (index, code) in codes.iter().enumerate() {
        let results = codec.decode_results(code).map_err(|source| {
            warn!("Vote code {} of {} failed to decode: {}", index + 1, codes.len(), source);
            AggregateError::Decode {
                position: index + 1,
                source,
            }
        })?;

        for (image_id, count) in results.user_votes {
            *totals.entry(image_id).or_insert(0) += u64::from(count);
        }

        if master_images.is_none() {
            master_images = Some(results.images);
        }
    }

    let mut rankings: Vec<RankedImage> = master_images
        .unwrap_or_default()
        .into_iter()
        .map(|image| {
            let votes = totals.get(&image.id).copied().unwrap_or(0);
            RankedImage { image, votes }
        })
        .collect();

    // Stable: equal totals keep master list order.
    rankings.sort_by(|a, b| b.votes.cmp(&a.votes));

    info!(
        "Aggregated {} vote code(s) over {} image(s)",
        codes.len(),
        rankings.len()
    );
    Ok(rankings)
}

/// Renders a ranking the way the results view lists it.
pub fn summarize(rankings: &[RankedImage]) -> String {
    if rankings.iter().all(|ranked| ranked.votes == 0) {
        return "No votes were cast in the submitted codes.\n".to_string();
    }

    let mut summary = String::new();
    for (i, ranked) in rankings.iter().enumerate() {
        let unit = if ranked.votes == 1 { "vote" } else { "votes" };
        summary.push_str(&format!(
            "{}. {}: {} {}\n",
            i + 1,
            ranked.image.name,
            ranked.votes,
            unit
        ));
    }
    summary
}

pub mod results;
pub mod setup;
pub mod vote;

use crate::codec::{Codec, Compressor};
use crate::error::AppError;
use crate::routes::Route;
use crate::voting::Ballot;
use log::{info, warn};

/// Where a link lands once its route is resolved.
#[derive(Debug)]
pub enum View {
    Setup,
    Vote(Ballot),
    Results,
}

/// Routes a shared link. Vote links are decoded up front so a corrupted
/// token is reported before any prompt is shown.
pub fn resolve_link<C: Compressor>(codec: &Codec<C>, link: &str) -> Result<View, AppError> {
    let route = Route::parse(link);
    info!("Resolved link to the {} view", route.name());
    match route {
        Route::Setup => {
            if !link.trim().is_empty() && !matches!(link.trim(), "/" | "#/") {
                warn!("Unrecognized link {:?}, falling back to setup", link);
            }
            Ok(View::Setup)
        }
        Route::Vote(token) => Ok(View::Vote(vote::open_ballot(codec, &token)?)),
        Route::Results => Ok(View::Results),
    }
}

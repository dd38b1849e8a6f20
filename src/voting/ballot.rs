use crate::models::{ImageFile, ResultsData, SessionData};
use log::{debug, info};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotState {
    Voting { remaining: u32 },
    Submitted,
}

/// One participant's votes against a decoded session.
///
/// Casting and retracting never fail: a move the budget does not allow is
/// simply ignored and reported back as `false`. At every step
/// `remaining + sum(tallies) == votes_per_person`.
#[derive(Debug, Clone)]
pub struct Ballot {
    session: SessionData,
    tallies: BTreeMap<String, u32>,
    display_order: Vec<usize>,
    state: BallotState,
}

impl Ballot {
    /// Opens a ballot with the images shuffled for display.
    pub fn new(session: SessionData) -> Self {
        let mut order: Vec<usize> = (0..session.images.len()).collect();
        order.shuffle(&mut rand::thread_rng());
        Self::with_display_order(session, order)
    }

    /// Opens a ballot with the images shown in session order.
    pub fn unshuffled(session: SessionData) -> Self {
        let order = (0..session.images.len()).collect();
        Self::with_display_order(session, order)
    }

    fn with_display_order(session: SessionData, display_order: Vec<usize>) -> Self {
        let tallies = session
            .images
            .iter()
            .map(|image| (image.id.clone(), 0))
            .collect();
        let state = BallotState::Voting {
            remaining: session.votes_per_person,
        };
        Self {
            session,
            tallies,
            display_order,
            state,
        }
    }

    pub fn session(&self) -> &SessionData {
        &self.session
    }

    pub fn state(&self) -> BallotState {
        self.state
    }

    /// Votes still to spend. Zero once submitted.
    pub fn remaining(&self) -> u32 {
        match self.state {
            BallotState::Voting { remaining } => remaining,
            BallotState::Submitted => 0,
        }
    }

    pub fn tally(&self, image_id: &str) -> u32 {
        self.tallies.get(image_id).copied().unwrap_or(0)
    }

    pub fn tallies(&self) -> &BTreeMap<String, u32> {
        &self.tallies
    }

    pub fn is_submitted(&self) -> bool {
        self.state == BallotState::Submitted
    }

    /// Images in the order this participant sees them.
    pub fn display_images(&self) -> impl Iterator<Item = &ImageFile> {
        self.display_order
            .iter()
            .filter_map(|&index| self.session.images.get(index))
    }

    /// Image at a 1-based display position.
    pub fn image_at(&self, position: usize) -> Option<&ImageFile> {
        let index = *self.display_order.get(position.checked_sub(1)?)?;
        self.session.images.get(index)
    }

    pub fn cast(&mut self, image_id: &str) -> bool {
        let BallotState::Voting { remaining } = self.state else {
            return false;
        };
        if remaining == 0 {
            return false;
        }
        let Some(tally) = self.tallies.get_mut(image_id) else {
            return false;
        };

        *tally += 1;
        self.state = BallotState::Voting {
            remaining: remaining - 1,
        };
        debug!("Cast vote on {}, {} remaining", image_id, remaining - 1);
        true
    }

    pub fn retract(&mut self, image_id: &str) -> bool {
        let BallotState::Voting { remaining } = self.state else {
            return false;
        };
        let Some(tally) = self.tallies.get_mut(image_id) else {
            return false;
        };
        if *tally == 0 {
            return false;
        }

        *tally -= 1;
        self.state = BallotState::Voting {
            remaining: remaining + 1,
        };
        debug!("Retracted vote on {}, {} remaining", image_id, remaining + 1);
        true
    }

    pub fn can_submit(&self) -> bool {
        self.state == BallotState::Voting { remaining: 0 }
    }

    /// Freezes the tallies. Returns `None` while votes are left to spend or
    /// after the ballot was already submitted.
    pub fn submit(&mut self) -> Option<ResultsData> {
        if !self.can_submit() {
            return None;
        }
        self.state = BallotState::Submitted;
        info!(
            "Ballot submitted with {} vote(s) over {} image(s)",
            self.session.votes_per_person,
            self.session.images.len()
        );
        Some(ResultsData {
            images: self.session.images.clone(),
            user_votes: self.tallies.clone(),
        })
    }
}

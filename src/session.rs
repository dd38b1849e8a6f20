use crate::codec::{Codec, Compressor};
use crate::config::{DEFAULT_VOTES_PER_PERSON, MAX_IMAGES, Settings};
use crate::error::{AppError, ValidationError};
use crate::models::{ImageFile, SessionData};
use crate::routes::share_link;
use log::info;

/// A generated session, ready to hand out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub token: String,
    pub link: String,
}

/// The organizer's session before a link exists.
#[derive(Debug, Clone)]
pub struct SetupDraft {
    images: Vec<ImageFile>,
    votes_per_person: u32,
    max_images: usize,
}

impl Default for SetupDraft {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            votes_per_person: DEFAULT_VOTES_PER_PERSON,
            max_images: MAX_IMAGES,
        }
    }
}

impl SetupDraft {
    pub fn new(settings: &Settings) -> Self {
        Self {
            images: Vec::new(),
            votes_per_person: settings.default_votes_per_person,
            max_images: settings.max_images,
        }
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    pub fn votes_per_person(&self) -> u32 {
        self.votes_per_person
    }

    /// Checks a batch against the upload cap before any of it is processed.
    pub fn check_capacity(&self, incoming: usize) -> Result<(), ValidationError> {
        if self.images.len() + incoming > self.max_images {
            return Err(ValidationError::TooManyImages {
                max: self.max_images,
            });
        }
        Ok(())
    }

    /// Rejects a non-positive budget before any file is processed.
    pub fn check_budget(&self) -> Result<(), ValidationError> {
        if self.votes_per_person == 0 {
            return Err(ValidationError::EmptySession);
        }
        Ok(())
    }

    pub fn add_images(&mut self, batch: Vec<ImageFile>) -> Result<(), ValidationError> {
        self.check_capacity(batch.len())?;
        self.images.extend(batch);
        Ok(())
    }

    pub fn remove_image(&mut self, image_id: &str) -> Option<ImageFile> {
        let index = self.images.iter().position(|image| image.id == image_id)?;
        Some(self.images.remove(index))
    }

    pub fn set_votes_per_person(&mut self, votes: u32) {
        self.votes_per_person = votes;
    }

    pub fn to_session(&self) -> Result<SessionData, ValidationError> {
        if self.images.is_empty() || self.votes_per_person == 0 {
            return Err(ValidationError::EmptySession);
        }
        Ok(SessionData::new(self.images.clone(), self.votes_per_person))
    }

    pub fn generate_link<C: Compressor>(
        &self,
        codec: &Codec<C>,
        base_url: &str,
    ) -> Result<ShareLink, AppError> {
        let session = self.to_session()?;
        let token = codec.encode_session(&session)?;
        info!(
            "Generated session link for {} image(s), {} vote(s) each, token {} bytes",
            session.images.len(),
            session.votes_per_person,
            token.len()
        );
        Ok(ShareLink {
            link: share_link(base_url, &token),
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Zlib;
    use crate::routes::Route;

    fn image(id: &str) -> ImageFile {
        ImageFile {
            id: id.to_string(),
            name: format!("{id}.jpg"),
            data_url: String::new(),
        }
    }

    #[test]
    fn defaults_to_three_votes() {
        assert_eq!(SetupDraft::default().votes_per_person(), 3);
    }

    #[test]
    fn upload_cap_counts_existing_images() {
        let settings = Settings {
            max_images: 3,
            ..Settings::default()
        };
        let mut draft = SetupDraft::new(&settings);
        draft.add_images(vec![image("a"), image("b")]).unwrap();

        let err = draft.add_images(vec![image("c"), image("d")]).unwrap_err();
        assert_eq!(err, ValidationError::TooManyImages { max: 3 });
        assert_eq!(draft.images().len(), 2);

        draft.add_images(vec![image("c")]).unwrap();
        assert_eq!(draft.images().len(), 3);
    }

    #[test]
    fn removing_keeps_the_rest_in_order() {
        let mut draft = SetupDraft::default();
        draft
            .add_images(vec![image("a"), image("b"), image("c")])
            .unwrap();

        assert_eq!(draft.remove_image("b").map(|i| i.id), Some("b".to_string()));
        assert!(draft.remove_image("b").is_none());
        let ids: Vec<&str> = draft.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn empty_draft_cannot_generate_a_link() {
        let draft = SetupDraft::default();
        let err = draft
            .generate_link(&Codec::<Zlib>::default(), "http://localhost/")
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptySession)
        ));
    }

    #[test]
    fn zero_budget_cannot_generate_a_link() {
        let mut draft = SetupDraft::default();
        draft.add_images(vec![image("a")]).unwrap();
        draft.set_votes_per_person(0);
        assert_eq!(draft.to_session(), Err(ValidationError::EmptySession));
    }

    #[test]
    fn budget_check_needs_no_images() {
        let mut draft = SetupDraft::default();
        assert_eq!(draft.check_budget(), Ok(()));
        draft.set_votes_per_person(0);
        assert_eq!(draft.check_budget(), Err(ValidationError::EmptySession));
    }

    #[test]
    fn generated_link_carries_the_session() {
        let codec = Codec::<Zlib>::default();
        let mut draft = SetupDraft::default();
        draft.add_images(vec![image("a"), image("b")]).unwrap();
        draft.set_votes_per_person(2);

        let share = draft.generate_link(&codec, "https://example.org/").unwrap();

        assert!(share.link.starts_with("https://example.org/#/vote/"));
        assert_eq!(Route::parse(&share.link), Route::Vote(share.token.clone()));
        let session = codec.decode_session(&share.token).unwrap();
        assert_eq!(session, draft.to_session().unwrap());
    }
}

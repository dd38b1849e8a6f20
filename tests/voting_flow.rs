use image::{Rgb, RgbImage};
use image_priority_vote::config::Settings;
use image_priority_vote::handlers::results::handle_results;
use image_priority_vote::handlers::setup::{SetupRequest, handle_setup};
use image_priority_vote::handlers::vote::run_ballot;
use image_priority_vote::handlers::{View, resolve_link};
use image_priority_vote::{AggregateError, AppError, Ballot, Codec, ValidationError, Zlib, aggregate};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("image_vote_flow_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("create temp dir");
    root
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32, shade: u8) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([shade, shade, 255 - shade]))
        .save(&path)
        .expect("write png");
    path
}

/// Casts votes by image name, whatever the display order.
fn vote_by_name(ballot: &mut Ballot, names: &[&str]) {
    for name in names {
        let id = ballot
            .session()
            .images
            .iter()
            .find(|image| image.name == *name)
            .map(|image| image.id.clone())
            .expect("image in session");
        assert!(ballot.cast(&id));
    }
}

#[tokio::test]
async fn organizer_to_participants_to_ranking() {
    let root = temp_root("full");
    let files = vec![
        write_png(&root, "beach.png", 900, 600, 10),
        write_png(&root, "forest.png", 300, 800, 120),
        write_png(&root, "city.png", 64, 64, 240),
    ];
    let codec = Codec::<Zlib>::default();
    let settings = Settings::default();
    let mut setup_out = Vec::new();

    let share = handle_setup(
        &codec,
        &settings,
        SetupRequest {
            files,
            votes_per_person: Some(2),
            base_url: Some("https://vote.example/app/".to_string()),
        },
        &mut setup_out,
    )
    .await
    .expect("setup");

    assert!(share.link.starts_with("https://vote.example/app/#/vote/"));
    assert!(String::from_utf8(setup_out).unwrap().contains("3 image(s) uploaded"));

    let ballots = [
        vec!["beach.png", "beach.png"],
        vec!["forest.png", "city.png"],
        vec!["city.png", "beach.png"],
    ];
    let mut codes = Vec::new();
    for picks in ballots {
        let View::Vote(mut ballot) = resolve_link(&codec, &share.link).expect("open link") else {
            panic!("share link did not open a ballot");
        };
        vote_by_name(&mut ballot, &picks);
        let results = ballot.submit().expect("budget spent");
        codes.push(codec.encode_results(&results).expect("encode"));
    }

    let pasted = format!("{}\n\n{}\t{}\n", codes[0], codes[1], codes[2]);
    let mut out = Vec::new();
    let rankings = handle_results(&codec, &pasted, &mut out).expect("aggregate");

    let names: Vec<&str> = rankings.iter().map(|r| r.image.name.as_str()).collect();
    let votes: Vec<u64> = rankings.iter().map(|r| r.votes).collect();
    assert_eq!(names, vec!["beach.png", "city.png", "forest.png"]);
    assert_eq!(votes, vec![3, 2, 1]);
    assert!(String::from_utf8(out).unwrap().contains("1. beach.png: 3 votes"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn too_many_files_are_rejected_before_processing() {
    let settings = Settings {
        max_images: 1,
        ..Settings::default()
    };
    let request = SetupRequest {
        files: vec![PathBuf::from("missing-a.png"), PathBuf::from("missing-b.png")],
        votes_per_person: None,
        base_url: None,
    };

    let err = handle_setup(&Codec::<Zlib>::default(), &settings, request, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ValidationError::TooManyImages { max: 1 })
    ));
}

#[tokio::test]
async fn zero_budget_is_rejected_before_processing() {
    let request = SetupRequest {
        files: vec![PathBuf::from("missing-a.png")],
        votes_per_person: Some(0),
        base_url: None,
    };

    let err = handle_setup(&Codec::<Zlib>::default(), &Settings::default(), request, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ValidationError::EmptySession)
    ));
}

#[tokio::test]
async fn invalid_image_fails_the_whole_setup() {
    let root = temp_root("invalid");
    let good = write_png(&root, "ok.png", 20, 20, 50);
    let bad = root.join("broken.png");
    fs::write(&bad, b"\x89PNG but not really").expect("write");

    let err = handle_setup(
        &Codec::<Zlib>::default(),
        &Settings::default(),
        SetupRequest {
            files: vec![good, bad],
            votes_per_person: None,
            base_url: None,
        },
        &mut Vec::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Processing(_)));
    assert_eq!(
        err.to_string(),
        "There was an error processing the images. Some files might not be valid images."
    );

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn interactive_ballot_produces_an_aggregatable_code() {
    let codec = Codec::<Zlib>::default();
    let session = image_priority_vote::SessionData::new(
        vec![
            image_priority_vote::ImageFile::new("one.jpg", "data:image/jpeg;base64,AA=="),
            image_priority_vote::ImageFile::new("two.jpg", "data:image/jpeg;base64,AA=="),
        ],
        3,
    );
    let mut ballot = Ballot::unshuffled(session);
    let mut out = Vec::new();

    let code = run_ballot(&codec, &mut ballot, Cursor::new("2\n2\n1\nsubmit\n"), &mut out)
        .expect("ballot")
        .expect("submitted");

    let rankings = aggregate(&code).expect("aggregate");
    assert_eq!(rankings[0].image.name, "two.jpg");
    assert_eq!(rankings[0].votes, 2);
    assert_eq!(rankings[1].votes, 1);
}

#[test]
fn a_tampered_code_spoils_the_batch() {
    let codec = Codec::<Zlib>::default();
    let mut ballot = Ballot::unshuffled(image_priority_vote::SessionData::new(
        vec![image_priority_vote::ImageFile::new("one.jpg", "data:")],
        1,
    ));
    vote_by_name(&mut ballot, &["one.jpg"]);
    let good = codec
        .encode_results(&ballot.submit().expect("submit"))
        .expect("encode");
    let mut tampered = good.clone();
    tampered.insert_str(tampered.len() / 2, "@@");

    let err = aggregate(&format!("{good} {tampered}")).unwrap_err();
    assert!(matches!(err, AggregateError::Decode { position: 2, .. }));
}

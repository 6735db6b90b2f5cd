//! End-to-end terminal sessions through the public API.

use std::time::Duration;

use folio::config::{AudioConfig, Config};
use folio::console::{
    overlay, CommandResult, Interpreter, ProcessPlayer, ResultKind, NOTHING_PLAYING_TEXT,
    PERSONA_TEXT, STOPPED_TEXT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn session(audio: AudioConfig, seed: u64) -> Interpreter {
    let config = Config::default();
    Interpreter::new(
        &config.profile,
        Interpreter::overlay_from_config(&config.console, overlay::builtin_frames()),
        Box::new(ProcessPlayer::from_config(&audio)),
        StdRng::seed_from_u64(seed),
    )
}

#[cfg(unix)]
#[test]
fn persona_plays_until_stopped() {
    // `sleep 30` plays the part of a 30 second track.
    let audio = AudioConfig {
        command: "sleep".to_string(),
        args: vec![],
        file: "30".into(),
    };
    let mut term = session(audio, 0);

    term.submit("stop");
    term.submit("Persona please");
    term.submit("stop");
    term.submit("stop");

    assert_eq!(
        term.results(),
        [
            CommandResult::text(NOTHING_PLAYING_TEXT),
            CommandResult::text(PERSONA_TEXT),
            CommandResult::text(STOPPED_TEXT),
            CommandResult::text(NOTHING_PLAYING_TEXT),
        ]
    );
}

#[test]
fn missing_player_reports_error_result() {
    let audio = AudioConfig {
        command: "folio-definitely-not-a-player".to_string(),
        ..AudioConfig::default()
    };
    let mut term = session(audio, 0);
    term.submit("persona");

    assert_eq!(term.results().len(), 1);
    assert_eq!(term.results()[0].kind, ResultKind::Error);
}

#[test]
fn same_seed_same_session() {
    let script = ["flip coin", "fortune", "flip coin", "fortune", "nonsense", "credits"];
    let run = |seed| {
        let mut term = session(AudioConfig::default(), seed);
        for line in script {
            term.submit(line);
        }
        term.results().to_vec()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn mixed_session() {
    let mut term = session(AudioConfig::default(), 3);
    term.submit("help");
    term.submit("act dance");
    term.submit("what");
    assert_eq!(term.results().len(), 2);
    assert_eq!(term.results()[1].kind, ResultKind::Gif);
    assert_eq!(term.results()[1].duration, Some(Duration::from_millis(5000)));

    term.advance(Duration::from_millis(5000));
    assert!(!term.overlay().is_visible());

    term.submit("CLEAR");
    assert!(term.results().is_empty());
    assert_eq!(
        term.history().entries(),
        ["help", "act dance", "what", "CLEAR"]
    );
}

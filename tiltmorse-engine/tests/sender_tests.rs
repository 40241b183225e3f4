//! Transmission of finalized recordings

mod common;

use common::{Call, Display, Link, LinkDown, Timeline};
use futures::executor::block_on;
use tiltmorse_engine::{
    ButtonEvent, OutboundMessage, RecordOutcome, Recorder, SendError, Sender, StateCell,
    SystemState, TiltClass,
};

fn record(state: &StateCell, tilts: &[TiltClass]) -> OutboundMessage {
    let mut recorder = Recorder::new(state);
    recorder.handle(ButtonEvent::Symbol(TiltClass::Unknown));
    for tilt in tilts {
        recorder.handle(ButtonEvent::Symbol(*tilt));
    }
    match recorder.handle(ButtonEvent::Finalize) {
        RecordOutcome::Finalized(message) => message,
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn test_transmit_writes_one_line() {
    let state = StateCell::new();
    let timeline = Timeline::default();
    let mut message = record(&state, &[TiltClass::Left, TiltClass::Right]);
    let mut sender = Sender::new(&state, Link::new(timeline.clone()), Display(timeline.clone()));

    block_on(sender.transmit(&mut message)).unwrap();

    assert_eq!(timeline.lines(), vec![".-  \n".to_owned()]);
}

#[test]
fn test_transmit_clears_confirms_and_returns_to_idle() {
    let state = StateCell::new();
    let timeline = Timeline::default();
    let mut message = record(&state, &[TiltClass::Middle]);
    let mut sender = Sender::new(&state, Link::new(timeline.clone()), Display(timeline.clone()));

    block_on(sender.transmit(&mut message)).unwrap();

    assert!(message.is_empty());
    assert_eq!(state.get(), SystemState::Idle);
    assert_eq!(
        timeline.calls(),
        vec![
            Call::Line("   \n".into()),
            Call::Clear,
            Call::Text("Msg sent!".into()),
        ]
    );
}

#[test]
fn test_transmit_failure_still_ends_sending() {
    let state = StateCell::new();
    let timeline = Timeline::default();
    let mut message = record(&state, &[TiltClass::Left]);
    let mut link = Link::new(timeline.clone());
    link.down = true;
    let mut sender = Sender::new(&state, link, Display(timeline.clone()));

    let result = block_on(sender.transmit(&mut message));

    assert_eq!(result, Err(SendError::Link(LinkDown)));
    assert!(message.is_empty());
    assert_eq!(state.get(), SystemState::Idle);
    assert!(timeline.lines().is_empty());
}

#[test]
fn test_transmit_outside_of_sending_is_refused() {
    let recorded_on = StateCell::new();
    let mut message = record(&recorded_on, &[TiltClass::Left]);
    let state = StateCell::new();
    let timeline = Timeline::default();
    let mut sender = Sender::new(&state, Link::new(timeline.clone()), Display(timeline.clone()));

    let result = block_on(sender.transmit(&mut message));

    assert_eq!(
        result,
        Err(SendError::UnexpectedState(SystemState::Idle))
    );
    assert!(timeline.calls().is_empty());
    assert_eq!(state.get(), SystemState::Idle);
}

//! End to end runs through the whole engine, from button edges to playback

mod common;

use common::{Call, Clock, Display, Link, Speaker, Timeline};
use futures::executor::block_on;
use heapless::spsc::Queue;
use tiltmorse_engine::{
    input::Instant,
    ports::TiltSensor,
    ButtonEvent, ButtonSource, InputCaptor, MotionSample, ReceiveOutcome, Receiver,
    RecordOutcome, Recorder, Renderer, Sender, StateCell, SystemState, TiltCell, TiltClass,
    TiltClassifier,
};

/// Sensor held at a settable X acceleration.
struct Hand(f32);

impl TiltSensor for &mut Hand {
    type Error = ();

    fn read(&mut self) -> Result<MotionSample, ()> {
        Ok(MotionSample {
            ax: self.0,
            ..MotionSample::default()
        })
    }
}

fn at(ms: u32) -> Instant {
    Instant::from_ticks(ms)
}

#[test]
fn test_tilt_sequence_is_recorded_and_finalized() {
    let state = StateCell::new();
    let tilt = TiltCell::new();
    let mut captor = InputCaptor::new(&tilt);
    let mut recorder: Recorder = Recorder::new(&state);
    let mut hand = Hand(0.0);

    // the opening press arms the recording, nothing is classified yet
    let event = captor.capture(ButtonSource::Symbol, at(0)).unwrap();
    assert_eq!(recorder.handle(event), RecordOutcome::Started);

    let mut now = 0;
    for ax in [-0.6, 0.0, 0.6] {
        hand.0 = ax;
        TiltClassifier::new(&mut hand, &state, &tilt).step().unwrap();
        now += 250;
        let event = captor.capture(ButtonSource::Symbol, at(now)).unwrap();
        recorder.handle(event);
    }
    assert_eq!(recorder.message().as_str(), ". -");

    let event = captor.capture(ButtonSource::Finalize, at(now + 10)).unwrap();
    let RecordOutcome::Finalized(message) = recorder.handle(event) else {
        panic!("recording should have been finalized");
    };
    assert_eq!(message.as_str(), ". -  \n");
    assert_eq!(state.get(), SystemState::Sending);
}

#[test]
fn test_bouncing_symbol_button_records_once() {
    let state = StateCell::new();
    let tilt = TiltCell::new();
    let mut captor = InputCaptor::new(&tilt);
    let mut recorder: Recorder = Recorder::new(&state);
    tilt.set(TiltClass::Left);

    for ms in [0, 3, 7, 40, 199] {
        if let Some(event) = captor.capture(ButtonSource::Symbol, at(ms)) {
            recorder.handle(event);
        }
    }

    assert_eq!(recorder.message().as_str(), ".");
}

#[test]
fn test_receiving_dot_dash_line() {
    let state = StateCell::new();
    let mut receiver: Receiver = Receiver::new(&state);
    let mut link = Link::new(Timeline::default());
    link.feed(".-\n");

    assert_eq!(receiver.poll(&mut link), ReceiveOutcome::Stored(b'.'));
    assert_eq!(state.get(), SystemState::Receiving);
    assert_eq!(receiver.poll(&mut link), ReceiveOutcome::Stored(b'-'));
    let ReceiveOutcome::Completed(message) = receiver.poll(&mut link) else {
        panic!("line should be complete");
    };

    assert_eq!(message.as_bytes(), b".-");
    assert_eq!(state.get(), SystemState::DisplayUpdate);
    assert_eq!(receiver.poll(&mut link), ReceiveOutcome::Nothing);
}

#[test]
fn test_burst_queued_between_polls_is_received_whole() {
    let state = StateCell::new();
    let mut receiver: Receiver = Receiver::new(&state);
    let mut queue: Queue<u8, 16> = Queue::new();
    let (mut producer, mut consumer) = queue.split();

    // the whole line lands before the receiver gets to run once
    for &byte in b".-  \n" {
        producer.enqueue(byte).unwrap();
    }

    let mut stored = Vec::new();
    let message = loop {
        match receiver.poll(&mut consumer) {
            ReceiveOutcome::Stored(byte) => stored.push(byte),
            ReceiveOutcome::Completed(message) => break message,
            other => panic!("unexpected outcome {other:?}"),
        }
    };

    assert_eq!(stored, b".-  ");
    assert_eq!(message.as_bytes(), b".-  ");
    assert_eq!(state.get(), SystemState::DisplayUpdate);
    assert_eq!(receiver.poll(&mut consumer), ReceiveOutcome::Nothing);
}

#[test]
fn test_sent_line_round_trips_through_a_second_device() {
    let sender_state = StateCell::new();
    let timeline = Timeline::default();
    let mut recorder: Recorder = Recorder::new(&sender_state);
    recorder.handle(ButtonEvent::Symbol(TiltClass::Left));
    recorder.handle(ButtonEvent::Symbol(TiltClass::Right));
    recorder.handle(ButtonEvent::Symbol(TiltClass::Middle));
    let RecordOutcome::Finalized(mut outbound) = recorder.handle(ButtonEvent::Finalize) else {
        panic!("recording should have been finalized");
    };
    let recorded = outbound.as_str().to_owned();
    let mut sender = Sender::new(
        &sender_state,
        Link::new(timeline.clone()),
        Display(timeline.clone()),
    );
    block_on(sender.transmit(&mut outbound)).unwrap();

    let receiver_state = StateCell::new();
    let mut receiver: Receiver = Receiver::new(&receiver_state);
    let mut wire = Link::new(Timeline::default());
    for line in timeline.lines() {
        wire.feed(&line);
    }
    let inbound = loop {
        if let ReceiveOutcome::Completed(message) = receiver.poll(&mut wire) {
            break message;
        }
    };

    assert_eq!(inbound.as_bytes(), recorded.trim_end_matches('\n').as_bytes());
    assert_eq!(inbound.as_bytes(), b".-   ");
}

#[test]
fn test_busy_receiver_drops_input_while_recording() {
    let state = StateCell::new();
    let mut recorder: Recorder = Recorder::new(&state);
    let mut receiver: Receiver = Receiver::new(&state);
    let mut link = Link::new(Timeline::default());
    recorder.handle(ButtonEvent::Symbol(TiltClass::Left));
    link.feed("-\n");

    assert_eq!(
        receiver.poll(&mut link),
        ReceiveOutcome::Busy(SystemState::Recording, b'-')
    );
    assert_eq!(
        receiver.poll(&mut link),
        ReceiveOutcome::Busy(SystemState::Recording, b'\n')
    );
    assert!(receiver.message().is_empty());
    assert_eq!(state.get(), SystemState::Recording);
}

#[test]
fn test_symbol_press_while_receiving_is_ignored() {
    let state = StateCell::new();
    let mut recorder: Recorder = Recorder::new(&state);
    let mut receiver: Receiver = Receiver::new(&state);
    receiver.accept(b'.');

    assert_eq!(
        recorder.handle(ButtonEvent::Symbol(TiltClass::Left)),
        RecordOutcome::Ignored(SystemState::Receiving)
    );
    assert_eq!(receiver.message().as_bytes(), b".");
}

#[test]
fn test_full_cycle_returns_both_devices_to_idle() {
    let timeline = Timeline::default();

    // sending device
    let state = StateCell::new();
    let mut recorder: Recorder = Recorder::new(&state);
    recorder.handle(ButtonEvent::Symbol(TiltClass::Right));
    let RecordOutcome::Finalized(mut outbound) = recorder.handle(ButtonEvent::Finalize) else {
        panic!("recording should have been finalized");
    };
    let mut sender = Sender::new(&state, Link::new(timeline.clone()), Display(timeline.clone()));
    block_on(sender.transmit(&mut outbound)).unwrap();
    assert_eq!(state.get(), SystemState::Idle);

    // receiving device
    let peer = StateCell::new();
    let mut receiver: Receiver = Receiver::new(&peer);
    let mut wire = Link::new(Timeline::default());
    wire.feed(&timeline.lines()[0]);
    let mut inbound = loop {
        if let ReceiveOutcome::Completed(message) = receiver.poll(&mut wire) {
            break message;
        }
    };
    let played = Timeline::default();
    let mut renderer = Renderer::new(
        &peer,
        Display(played.clone()),
        Speaker(played.clone()),
        Clock(played.clone()),
    );
    block_on(renderer.render(&mut inbound)).unwrap();

    assert_eq!(peer.get(), SystemState::Idle);
    assert_eq!(played.tones(), vec![300]);
    assert_eq!(played.calls()[1], Call::Text("-  ".into()));
}

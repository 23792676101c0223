//! Pointer runner integration: mock scanner in, recorded cursor out.
//!
//! Exercises the run-state machine, the fixed-cadence loop, auto-click
//! emission, and the start-up failure paths.

use sparsh_io::app::PointerRunner;
use sparsh_io::calibration::{AnchorBank, Calibration, CalibrationAnchor, CalibrationHandle};
use sparsh_io::cursor::{CursorEvent, MouseButton, RecordingCursor};
use sparsh_io::error::Error;
use sparsh_io::pipeline::ScanWindow;
use sparsh_io::scanner::{MockScanner, UrgScanner};
use sparsh_io::transport::MockTransport;
use sparsh_io::types::{BoundingRegion, ScanFrame, ScreenGeometry};
use std::f32::consts::FRAC_PI_2;
use std::thread;
use std::time::{Duration, Instant};

fn screen() -> ScreenGeometry {
    ScreenGeometry {
        width: 1024,
        height: 768,
    }
}

fn centered_calibration(buffer_count: usize, auto_click: bool) -> Calibration {
    Calibration {
        region: BoundingRegion::new(0.0, 410.0, -160.0, 160.0),
        anchors: AnchorBank::default(),
        buffer_count,
        auto_click,
    }
}

fn runner_for(calibration: Calibration) -> PointerRunner {
    PointerRunner::new(
        CalibrationHandle::new(calibration).unwrap(),
        ScanWindow::new(0, 1, FRAC_PI_2),
        screen(),
        Duration::from_millis(1),
    )
}

fn wait_for<F: Fn() -> bool>(condition: F, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn detected_target_moves_the_cursor() {
    let scanner = MockScanner::new();
    scanner.inject_frame(ScanFrame::new(vec![205]));
    let recorder = RecordingCursor::new();

    let mut runner = runner_for(centered_calibration(1, false));
    runner
        .start(Box::new(scanner.clone()), Box::new(recorder.clone()))
        .unwrap();

    assert!(wait_for(
        || !recorder.events().is_empty(),
        Duration::from_secs(2)
    ));
    let stats = runner.stop().expect("worker should report stats");

    assert_eq!(recorder.events(), vec![CursorEvent::Move { x: 512, y: 384 }]);
    assert_eq!(stats.positions, 1);
    assert!(scanner.is_disconnected());
}

#[test]
fn auto_click_emits_press_and_release() {
    let scanner = MockScanner::new();
    scanner.inject_frame(ScanFrame::new(vec![205]));
    let recorder = RecordingCursor::new();

    let mut runner = runner_for(centered_calibration(1, true));
    runner
        .start(Box::new(scanner), Box::new(recorder.clone()))
        .unwrap();

    assert!(wait_for(
        || recorder.events().len() >= 3,
        Duration::from_secs(2)
    ));
    runner.stop();

    assert_eq!(
        recorder.events(),
        vec![
            CursorEvent::Move { x: 512, y: 384 },
            CursorEvent::Press(MouseButton::Left),
            CursorEvent::Release(MouseButton::Left),
        ]
    );
}

#[test]
fn empty_frames_never_move_the_cursor() {
    let scanner = MockScanner::new();
    // Distance 0 projects to the origin, outside a region starting at y=120
    for _ in 0..5 {
        scanner.inject_frame(ScanFrame::new(vec![0]));
    }
    let recorder = RecordingCursor::new();

    let calibration = Calibration {
        region: BoundingRegion::new(0.0, 410.0, 120.0, 440.0),
        anchors: AnchorBank::default(),
        buffer_count: 1,
        auto_click: false,
    };
    let mut runner = runner_for(calibration);
    runner
        .start(Box::new(scanner), Box::new(recorder.clone()))
        .unwrap();

    thread::sleep(Duration::from_millis(100));
    let stats = runner.stop().expect("worker should report stats");

    assert!(recorder.events().is_empty());
    assert!(stats.empty_epochs >= 5);
    assert_eq!(stats.positions, 0);
}

#[test]
fn smoothing_cadence_carries_through_the_loop() {
    let scanner = MockScanner::new();
    for _ in 0..7 {
        scanner.inject_frame(ScanFrame::new(vec![205]));
    }
    let recorder = RecordingCursor::new();

    let mut runner = runner_for(centered_calibration(3, false));
    runner
        .start(Box::new(scanner), Box::new(recorder.clone()))
        .unwrap();

    assert!(wait_for(
        || recorder.events().len() >= 2,
        Duration::from_secs(2)
    ));
    // Give the loop time to prove no third flush arrives
    thread::sleep(Duration::from_millis(50));
    runner.stop();

    assert_eq!(
        recorder.events(),
        vec![
            CursorEvent::Move { x: 512, y: 384 },
            CursorEvent::Move { x: 512, y: 384 },
        ]
    );
}

#[test]
fn calibration_updates_apply_between_cycles() {
    let scanner = MockScanner::new();
    let recorder = RecordingCursor::new();
    let handle = CalibrationHandle::new(centered_calibration(1, false)).unwrap();

    let mut runner = PointerRunner::new(
        handle.clone(),
        ScanWindow::new(0, 1, FRAC_PI_2),
        screen(),
        Duration::from_millis(1),
    );
    runner
        .start(Box::new(scanner.clone()), Box::new(recorder.clone()))
        .unwrap();

    scanner.inject_frame(ScanFrame::new(vec![205]));
    assert!(wait_for(
        || recorder.events().len() == 1,
        Duration::from_secs(2)
    ));

    // Shift the anchors; let in-flight cycles drain before the next frame
    handle.set_anchors(AnchorBank::uniform(CalibrationAnchor::new(100.0, 0.0)));
    thread::sleep(Duration::from_millis(20));
    scanner.inject_frame(ScanFrame::new(vec![205]));
    assert!(wait_for(
        || recorder.events().len() == 2,
        Duration::from_secs(2)
    ));
    runner.stop();

    assert_eq!(
        recorder.events(),
        vec![
            CursorEvent::Move { x: 512, y: 384 },
            CursorEvent::Move { x: 612, y: 384 },
        ]
    );
}

#[test]
fn degenerate_region_is_rejected_before_running() {
    let calibration = Calibration {
        region: BoundingRegion::new(410.0, 410.0, 120.0, 440.0),
        anchors: AnchorBank::default(),
        buffer_count: 1,
        auto_click: false,
    };

    assert!(matches!(
        CalibrationHandle::new(calibration),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn unavailable_device_fails_before_the_loop_starts() {
    // A silent transport: the handshake deadline expires
    let connect = UrgScanner::connect(MockTransport::new(), Duration::from_millis(20));
    match connect {
        Err(Error::DeviceUnavailable(_)) => {}
        other => panic!("expected DeviceUnavailable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn start_twice_is_rejected() {
    let mut runner = runner_for(centered_calibration(1, false));
    runner
        .start(
            Box::new(MockScanner::new()),
            Box::new(RecordingCursor::new()),
        )
        .unwrap();

    let second = runner.start(
        Box::new(MockScanner::new()),
        Box::new(RecordingCursor::new()),
    );
    assert!(second.is_err());
    runner.stop();
}

#[test]
fn stop_returns_to_idle() {
    let mut runner = runner_for(centered_calibration(1, false));
    runner
        .start(
            Box::new(MockScanner::new()),
            Box::new(RecordingCursor::new()),
        )
        .unwrap();
    assert!(runner.is_running());

    assert!(runner.stop().is_some());
    assert!(!runner.is_running());

    // A second stop is a no-op
    assert!(runner.stop().is_none());
}

use std::io::empty;

use dis_core::{
    default_ring, Machine, QuietLoopConfig, StatusKind, StreamInput, StreamOutput,
};

#[test]
fn all_zero_memory_trips_the_watchdog_at_the_limit() {
    let mut m = Machine::new(
        default_ring(),
        StreamInput::new(empty()),
        StreamOutput::new(Vec::new()),
    )
    .unwrap()
    .with_watchdog(QuietLoopConfig {
        max_quiet_steps: 1000,
    });

    let status = m.run();

    assert_eq!(status, StatusKind::QuietLoop);
    assert_eq!(m.steps(), 1000);
    let report = m.watchdog_report().expect("tripped watchdog retains a report");
    assert_eq!(report.quiet_steps, 1000);
    assert_eq!(report.detected_at, 1000);
    assert_eq!(report.pc, 1000);
}

#[test]
fn io_commands_keep_the_watchdog_quiet() {
    // Reads every other step; the quiet counter never reaches the limit.
    let mut m = Machine::new(
        default_ring(),
        StreamInput::new(empty()),
        StreamOutput::new(Vec::new()),
    )
    .unwrap()
    .with_watchdog(QuietLoopConfig { max_quiet_steps: 2 });
    m.load_image_bytes(b"}_}_}_}_").unwrap();

    let status = m.run_for(8);

    assert_eq!(status, StatusKind::Running);
}

#[test]
fn without_a_watchdog_the_machine_just_keeps_running() {
    let mut m = Machine::new(
        default_ring(),
        StreamInput::new(empty()),
        StreamOutput::new(Vec::new()),
    )
    .unwrap();

    let status = m.run_for(10_000);

    assert_eq!(status, StatusKind::Running);
    assert_eq!(m.steps(), 10_000);
}

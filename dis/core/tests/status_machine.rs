use std::io::empty;

use dis_core::{default_ring, Machine, StatusKind, StreamInput, StreamOutput};

fn machine() -> Machine<u16, StreamInput<std::io::Empty>, StreamOutput<Vec<u8>>> {
    Machine::new(
        default_ring(),
        StreamInput::new(empty()),
        StreamOutput::new(Vec::new()),
    )
    .expect("canonical machine fits host memory")
}

#[test]
fn halt_terminates_in_one_step_without_touching_memory() {
    let mut m = machine();
    m.load_image_bytes(b"!").unwrap();
    let before: Vec<u16> = m.memory().words().to_vec();

    m.step();

    assert_eq!(m.status_kind(), StatusKind::Halted);
    assert_eq!(m.steps(), 1);
    assert_eq!(m.memory().words(), &before[..]);
    // The halting step does not advance the pointers.
    assert_eq!(m.c(), 0);
    assert_eq!(m.d(), 0);
}

#[test]
fn writing_the_sentinel_halts_without_emitting_a_byte() {
    let mut m = machine();
    m.load_image_bytes(b"{").unwrap();
    m.set_a(59048);

    m.step();

    assert_eq!(m.status_kind(), StatusKind::EofWrite);
    assert_eq!(m.bytes_written(), 0);
    assert!(m.output().get_ref().is_empty());
}

#[test]
fn reading_past_end_of_stream_is_not_an_error() {
    let mut m = machine();
    m.load_image_bytes(b"}").unwrap();

    m.step();

    assert_eq!(m.status_kind(), StatusKind::Running);
    assert_eq!(m.a(), 59048);
    assert_eq!(m.c(), 1);
    assert_eq!(m.d(), 1);
}

#[test]
fn terminal_machines_ignore_further_steps() {
    let mut m = machine();
    m.load_image_bytes(b"!}{>").unwrap();
    m.run_for(10);
    assert_eq!(m.status_kind(), StatusKind::Halted);
    let a = m.a();
    let c = m.c();
    let d = m.d();
    let words: Vec<u16> = m.memory().words().to_vec();
    let steps = m.steps();

    for _ in 0..5 {
        m.step();
    }

    assert_eq!(m.status_kind(), StatusKind::Halted);
    assert_eq!(m.a(), a);
    assert_eq!(m.c(), c);
    assert_eq!(m.d(), d);
    assert_eq!(m.steps(), steps);
    assert_eq!(m.memory().words(), &words[..]);
}

#[test]
fn unmapped_words_and_the_designated_noop_are_identical() {
    let mut run = |image: &[u8]| {
        let mut m = machine();
        m.load_image_bytes(image).unwrap();
        m.step();
        (m.status_kind(), m.a(), m.c(), m.d())
    };
    // '_' is the designated no-op; 'A' is unmapped; 0 is an empty cell.
    assert_eq!(run(b"_"), run(b"A"));
    assert_eq!(run(b"_"), run(&[0u8]));
}

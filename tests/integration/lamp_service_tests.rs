//! Integration tests for the LampService → render → output pipeline.
//!
//! These run on the host (x86_64) and verify that the full chain from a
//! decoded remote command down to LED channel writes works correctly
//! without any real hardware.

use crate::mock_hw::{LedCall, MockLedOutput, RecordingSink, ScriptedRemote};

use irlamp::app::commands::RemoteCommand;
use irlamp::app::events::AppEvent;
use irlamp::app::ports::RemotePort;
use irlamp::app::service::LampService;
use irlamp::config::LampConfig;
use irlamp::lamp::render::ColorChannel;
use irlamp::lamp::LampMode;

fn make_lamp() -> (LampService, MockLedOutput, RecordingSink) {
    let config = LampConfig::default();
    let mut lamp = LampService::new(config);
    let mut hw = MockLedOutput::new();
    let mut sink = RecordingSink::new();
    lamp.start(&mut hw, &mut sink);
    (lamp, hw, sink)
}

fn press(lamp: &mut LampService, hw: &mut MockLedOutput, sink: &mut RecordingSink, command: RemoteCommand, times: usize) {
    for _ in 0..times {
        lamp.handle_command(command, hw, sink);
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_forces_every_output_dark() {
    let (_lamp, hw, sink) = make_lamp();
    assert_eq!(hw.lit_whites(), 0);
    assert_eq!(hw.lit_colors(), 0);
    assert_eq!(sink.events, vec![AppEvent::Started]);
}

// ── Round trip up/down ────────────────────────────────────────

#[test]
fn four_ups_light_four_whites_at_full_duty() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 4);

    assert_eq!(lamp.state().led_state(), 4);
    assert_eq!(hw.lit_whites(), 4);
    assert_eq!(hw.lit_colors(), 0);
    for index in 0..4 {
        assert_eq!(hw.white(index), (255, true), "channel {index}");
    }
}

#[test]
fn four_downs_return_to_dark() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 4);
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeDown, 4);

    assert_eq!(lamp.state().led_state(), 0);
    assert_eq!(hw.lit_whites(), 0);
    assert_eq!(hw.lit_colors(), 0);
    assert_eq!(lamp.commands_handled(), 8);
}

// ── Brightness reduction ──────────────────────────────────────

#[test]
fn reduce_at_two_dims_only_the_second_string() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 2);
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::ReduceBrightness, 1);

    assert_eq!(hw.white(0), (255, true));
    assert_eq!(hw.white(1), (30, true));
    assert_eq!(lamp.state().brightness(1), 30);
    assert!(lamp.state().is_reduced(1));
    assert!(!lamp.state().is_reduced(0));
}

#[test]
fn reduce_with_nothing_lit_is_a_complete_noop() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    let calls_before = hw.calls.len();
    let events_before = sink.events.len();

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::ReduceBrightness, 1);

    assert_eq!(hw.calls.len(), calls_before, "no output writes");
    assert_eq!(sink.events.len(), events_before, "no events");
    assert_eq!(lamp.commands_handled(), 0);
}

// ── Color stages ──────────────────────────────────────────────

#[test]
fn stages_five_to_seven_drive_single_colors() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 5);
    assert_eq!(hw.lit_whites(), 0);
    assert!(hw.color_on(ColorChannel::Red));
    assert_eq!(hw.lit_colors(), 1);

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 1);
    assert!(hw.color_on(ColorChannel::Green));
    assert_eq!(hw.lit_colors(), 1);

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 1);
    assert!(hw.color_on(ColorChannel::Blue));
    assert_eq!(hw.lit_colors(), 1);
}

#[test]
fn volume_down_backs_out_of_color_stages_one_at_a_time() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 7);
    assert!(hw.color_on(ColorChannel::Blue));

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeDown, 1);
    assert!(hw.color_on(ColorChannel::Green));
    assert_eq!(hw.lit_colors(), 1);

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeDown, 3);
    assert_eq!(lamp.state().led_state(), 4);
    assert_eq!(hw.lit_colors(), 0);
    assert_eq!(hw.lit_whites(), 4);
}

// ── Color-cycle mode ──────────────────────────────────────────

#[test]
fn sweep_unwind_exits_only_after_loops_drain() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    // Stage 7, then six more ups: two full sweeps recorded.
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 13);
    assert_eq!(lamp.state().mode(), LampMode::ColorCycle);
    assert_eq!(lamp.state().looped(), 2);

    for step in 1..=5 {
        press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeDown, 1);
        assert_eq!(
            lamp.state().mode(),
            LampMode::ColorCycle,
            "still cycling after {step} downs"
        );
        assert_eq!(hw.lit_colors(), 1, "exactly one color after {step} downs");
    }

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeDown, 1);
    assert_eq!(lamp.state().mode(), LampMode::White);
    assert_eq!(lamp.state().looped(), 0);
    // Back in white mode at stage 7 — blue still shows.
    assert!(hw.color_on(ColorChannel::Blue));
}

#[test]
fn mode_transitions_are_announced_once_each_way() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 8); // enter cycle
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 2); // stay cycling
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeDown, 3); // unwind + exit

    assert_eq!(sink.mode_changes(), 2);
    assert!(sink.events.contains(&AppEvent::ModeChanged {
        from: LampMode::White,
        to: LampMode::ColorCycle,
    }));
    assert!(sink.events.contains(&AppEvent::ModeChanged {
        from: LampMode::ColorCycle,
        to: LampMode::White,
    }));
}

// ── Mutual exclusion ordering ─────────────────────────────────

#[test]
fn color_legs_are_cleared_before_one_is_asserted() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 5);

    let start = hw.calls.len();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 1);
    let render = &hw.calls[start..];

    let enable_at = render
        .iter()
        .position(|call| matches!(call, LedCall::Color { enabled: true, .. }))
        .expect("one color leg asserted");
    let disables_after = render[enable_at + 1..]
        .iter()
        .any(|call| matches!(call, LedCall::Color { enabled: false, .. }));
    assert!(!disables_after, "clears must precede the single assert");
}

// ── Unknown commands ──────────────────────────────────────────

#[test]
fn unknown_commands_change_nothing() {
    let (mut lamp, mut hw, mut sink) = make_lamp();
    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::VolumeUp, 2);
    let calls_before = hw.calls.len();
    let state_before = lamp.state().clone();

    press(&mut lamp, &mut hw, &mut sink, RemoteCommand::Unknown, 3);

    assert_eq!(hw.calls.len(), calls_before);
    assert_eq!(lamp.state(), &state_before);
    assert_eq!(lamp.commands_handled(), 2);
}

// ── Poll-loop boundary behaviour ──────────────────────────────

#[test]
fn scripted_remote_flow_filters_repeats_and_strangers() {
    let config = LampConfig::default();
    let mut lamp = LampService::new(config.clone());
    let mut hw = MockLedOutput::new();
    let mut sink = RecordingSink::new();
    lamp.start(&mut hw, &mut sink);

    let mut remote = ScriptedRemote::new(&[
        (0x00, 21, false), // volume up
        (0x00, 21, true),  // held-key repeat — filtered
        (0x00, 99, false), // unmapped key — ignored
        (0x00, 21, false), // volume up
        (0x00, 7, false),  // volume down
    ]);

    // The poll loop's dispatch, minus the sleeps.
    while remote.has_pending_command() {
        if remote.is_repeat() {
            let _ = remote.read_command();
            continue;
        }
        let (_address, code) = remote.read_command();
        let command = RemoteCommand::from_code(code, &config.keys);
        if command != RemoteCommand::Unknown {
            lamp.handle_command(command, &mut hw, &mut sink);
        }
    }

    assert_eq!(lamp.state().led_state(), 1);
    assert_eq!(hw.lit_whites(), 1);
    assert_eq!(sink.commands_applied(), 3);
}

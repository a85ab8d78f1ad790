mod common;

use common::{CoreCall, RecordingCore, RecordingSurface, SurfaceEvent};
use panel_core::{bit_codec, ComputeCore, Disposition, PanelController, PanelGesture, PanelSessionState};
use shared::{
    domain::{PRINTER_COLUMNS, TELEPRINTER_OFFSET},
    EncodedWord, LightBank, MomentaryControl, SingleLight, SwitchBank, TeleprinterCharacter,
};
use storage::{InMemoryStore, MemoryMirror};

type Controller = PanelController<RecordingCore, InMemoryStore, RecordingSurface>;

fn powered_panel() -> (Controller, PanelSessionState) {
    panel_with_output("")
}

/// A powered panel whose core already has `text` queued for the teleprinter.
fn panel_with_output(text: &str) -> (Controller, PanelSessionState) {
    let mut core = RecordingCore::default();
    core.output.extend(
        text.bytes()
            .map(|b| TeleprinterCharacter(b + TELEPRINTER_OFFSET)),
    );
    let mut controller = PanelController::new(
        core,
        InMemoryStore::new(),
        RecordingSurface::default(),
        MemoryMirror::default(),
    );
    let mut session = PanelSessionState::new();
    controller.power_on(&mut session);
    controller.surface_mut().clear();
    (controller, session)
}

fn toggle(
    controller: &mut Controller,
    session: &mut PanelSessionState,
    bank: SwitchBank,
    index: usize,
) {
    let outcome = controller.handle(session, PanelGesture::ToggleSwitch { bank, index });
    assert_eq!(outcome, Disposition::Applied);
}

fn tap(controller: &mut Controller, session: &mut PanelSessionState, control: MomentaryControl) {
    controller.handle(session, PanelGesture::PointerDown(control));
    controller.handle(session, PanelGesture::PointerUp(control));
}

fn key_down(key: &str, repeat: bool) -> PanelGesture {
    PanelGesture::KeyDown {
        key: key.to_string(),
        repeat,
    }
}

fn key_up(key: &str) -> PanelGesture {
    PanelGesture::KeyUp {
        key: key.to_string(),
    }
}

#[test]
fn power_on_pushes_every_bank_and_mode_light() {
    let mut controller = PanelController::new(
        RecordingCore::default(),
        InMemoryStore::new(),
        RecordingSurface::default(),
        MemoryMirror::default(),
    );
    let mut session = PanelSessionState::new();
    controller.power_on(&mut session);

    let banks: Vec<LightBank> = controller
        .surface()
        .banks()
        .into_iter()
        .map(|(bank, _)| bank)
        .collect();
    assert_eq!(banks, LightBank::ALL.to_vec());
    let events = &controller.surface().events;
    assert!(events.contains(&SurfaceEvent::Light(SingleLight::Link, false)));
    assert!(events.contains(&SurfaceEvent::Light(SingleLight::EightMode, true)));
    assert!(events.contains(&SurfaceEvent::Light(SingleLight::LincMode, false)));
    assert!(session.shown_registers().is_some());
}

#[test]
fn examine_with_left_switches_off_sends_zero() {
    let (mut controller, mut session) = powered_panel();
    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Examine));
    assert_eq!(controller.core().calls, vec![CoreCall::Examine(0, false)]);
}

#[test]
fn fill_sends_both_banks_then_saves_memory() {
    let (mut controller, mut session) = powered_panel();
    toggle(&mut controller, &mut session, SwitchBank::Left, 0);
    toggle(&mut controller, &mut session, SwitchBank::Right, 11);

    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Fill));

    assert_eq!(controller.core().calls, vec![CoreCall::Fill(2048, 1, false)]);
    assert_eq!(controller.store().len(), 1);
    let persisted = MemoryMirror::default().load(controller.store());
    assert_eq!(persisted, controller.core().current_memory());
    assert_eq!(persisted.read(EncodedWord::masked(2048)), 1);
}

#[test]
fn step_controls_set_the_step_flag() {
    let (mut controller, mut session) = powered_panel();
    tap(&mut controller, &mut session, MomentaryControl::StepExamine);
    tap(&mut controller, &mut session, MomentaryControl::FillStep);
    assert_eq!(
        controller.core().calls,
        vec![CoreCall::Examine(0, true), CoreCall::Fill(0, 0, true)]
    );
}

#[test]
fn press_then_release_is_one_dispatch_and_two_clicks() {
    let (mut controller, mut session) = powered_panel();

    let down = controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Examine));
    assert!(session.is_pressed(MomentaryControl::Examine));
    let up = controller.handle(&mut session, PanelGesture::PointerUp(MomentaryControl::Examine));
    assert!(!session.is_pressed(MomentaryControl::Examine));

    assert_eq!((down, up), (Disposition::Applied, Disposition::Applied));
    assert_eq!(controller.core().dispatches(), 1);
    assert_eq!(controller.surface().clicks(), 2);
    let positions: Vec<&SurfaceEvent> = controller
        .surface()
        .events
        .iter()
        .filter(|event| matches!(event, SurfaceEvent::Position(..)))
        .collect();
    assert_eq!(
        positions,
        vec![
            &SurfaceEvent::Position("exam".into(), true),
            &SurfaceEvent::Position("exam".into(), false)
        ]
    );
}

#[test]
fn keyboard_repeat_never_dispatches_again() {
    let (mut controller, mut session) = powered_panel();

    assert_eq!(controller.handle(&mut session, key_down("j", false)), Disposition::Applied);
    assert_eq!(
        controller.handle(&mut session, key_down("j", true)),
        Disposition::IgnoredRepeat
    );
    assert_eq!(
        controller.handle(&mut session, key_down("j", false)),
        Disposition::IgnoredRepeat
    );
    assert_eq!(controller.core().dispatches(), 1);
    assert_eq!(controller.surface().clicks(), 1);

    controller.handle(&mut session, key_up("j"));
    assert_eq!(controller.surface().clicks(), 2);
    controller.handle(&mut session, key_down("j", false));
    assert_eq!(controller.core().dispatches(), 2);
}

#[test]
fn repeated_switch_key_toggles_once() {
    let (mut controller, mut session) = powered_panel();
    controller.handle(&mut session, key_down("1", false));
    controller.handle(&mut session, key_down("1", true));
    assert!(session.is_key_held("1"));
    controller.handle(&mut session, key_up("1"));
    assert!(!session.is_key_held("1"));

    assert_eq!(session.switches(SwitchBank::Left).get(0), Some(true));
    assert_eq!(controller.surface().clicks(), 1);

    controller.handle(&mut session, key_down("1", false));
    assert_eq!(session.switches(SwitchBank::Left).get(0), Some(false));
}

#[test]
fn pointer_and_key_share_one_control_state() {
    let (mut controller, mut session) = powered_panel();
    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Examine));
    assert_eq!(
        controller.handle(&mut session, key_down("j", false)),
        Disposition::IgnoredRepeat
    );
    assert_eq!(controller.core().dispatches(), 1);

    controller.handle(&mut session, key_up("j"));
    assert!(!session.is_pressed(MomentaryControl::Examine));
    assert_eq!(
        controller.handle(&mut session, PanelGesture::PointerUp(MomentaryControl::Examine)),
        Disposition::Ignored
    );
}

#[test]
fn switches_are_sampled_at_press_time() {
    let (mut controller, mut session) = powered_panel();
    controller.handle(&mut session, key_down("2", false));
    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Examine));
    toggle(&mut controller, &mut session, SwitchBank::Left, 11);
    controller.handle(&mut session, PanelGesture::PointerUp(MomentaryControl::Examine));

    assert_eq!(controller.core().calls, vec![CoreCall::Examine(1024, false)]);
}

#[test]
fn lights_mirror_the_switch_pattern_after_examine() {
    let (mut controller, mut session) = powered_panel();
    for index in [0, 2, 4, 6, 8, 10] {
        toggle(&mut controller, &mut session, SwitchBank::Left, index);
    }
    controller.surface_mut().clear();

    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Examine));

    let banks = controller.surface().banks();
    assert_eq!(banks.len(), 1, "only the changed bank is refreshed");
    let (bank, lights) = banks[0];
    assert_eq!(bank, LightBank::MemAddr);
    assert_eq!(lights.bits(), session.switches(SwitchBank::Left).bits());
    assert_eq!(bit_codec::encode(lights.bits()).value(), 0o5252);
}

#[test]
fn do_dispatches_saves_and_prints_one_character() {
    let (mut controller, mut session) = panel_with_output("HI");
    toggle(&mut controller, &mut session, SwitchBank::Left, 0);
    toggle(&mut controller, &mut session, SwitchBank::Right, 0);

    tap(&mut controller, &mut session, MomentaryControl::Do);
    assert_eq!(controller.core().calls, vec![CoreCall::KeyDo(2048, 2048)]);
    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.surface().lines(), vec![("H".to_string(), false)]);
    assert_eq!(controller.core().output.len(), 1);

    tap(&mut controller, &mut session, MomentaryControl::Do);
    assert_eq!(session.paper().current().as_str(), "HI");

    tap(&mut controller, &mut session, MomentaryControl::Do);
    assert_eq!(controller.surface().lines().len(), 2, "empty queue prints nothing");
}

#[test]
fn do_refreshes_link_and_instruction_lights() {
    let (mut controller, mut session) = powered_panel();
    toggle(&mut controller, &mut session, SwitchBank::Left, 11);
    controller.surface_mut().clear();

    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Do));

    let events = &controller.surface().events;
    assert!(events.contains(&SurfaceEvent::Light(SingleLight::Link, true)));
    let banks = controller.surface().banks();
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].0, LightBank::InstrReg);
    assert_eq!(banks[0].1.get(11), Some(true));
}

#[test]
fn printer_wraps_after_seventy_eight_columns() {
    let text: String = std::iter::repeat('X').take(PRINTER_COLUMNS).chain(['Y']).collect();
    let (mut controller, mut session) = panel_with_output(&text);

    for _ in 0..text.len() {
        tap(&mut controller, &mut session, MomentaryControl::Do);
    }

    let lines = controller.surface().lines();
    assert_eq!(lines.len(), PRINTER_COLUMNS + 1);
    assert!(lines[..PRINTER_COLUMNS].iter().all(|(_, started)| !started));
    assert_eq!(lines[PRINTER_COLUMNS - 1].0.len(), PRINTER_COLUMNS);
    assert_eq!(lines[PRINTER_COLUMNS], ("Y".to_string(), true));
    assert_eq!(session.paper().line_count(), 2);
}

#[test]
fn modifier_latches_toggle_on_press_only() {
    let (mut controller, mut session) = powered_panel();
    let down = |id: &str| PanelGesture::TeleprinterDown(id.to_string());
    let up = |id: &str| PanelGesture::TeleprinterUp(id.to_string());

    controller.handle(&mut session, down("shift"));
    assert!(session.modifiers().shift);
    assert_eq!(controller.handle(&mut session, up("shift")), Disposition::Ignored);
    assert!(session.modifiers().shift);

    controller.handle(&mut session, down("ctrl"));
    assert!(session.modifiers().control);
    assert!(session.modifiers().shift);

    controller.handle(&mut session, down("shift"));
    assert!(!session.modifiers().shift);
    assert!(session.modifiers().control);

    let positions: Vec<SurfaceEvent> = controller
        .surface()
        .events
        .iter()
        .filter(|event| matches!(event, SurfaceEvent::Position(..)))
        .cloned()
        .collect();
    assert_eq!(
        positions,
        vec![
            SurfaceEvent::Position("shift".into(), true),
            SurfaceEvent::Position("ctrl".into(), true),
            SurfaceEvent::Position("shift".into(), false),
        ]
    );
    assert!(controller.core().calls.is_empty());
}

#[test]
fn teleprinter_letters_reach_the_keyboard_device() {
    let (mut controller, mut session) = powered_panel();
    controller.handle(&mut session, PanelGesture::TeleprinterDown("shift".into()));

    assert_eq!(
        controller.handle(&mut session, PanelGesture::TeleprinterDown("letter_a".into())),
        Disposition::Applied
    );
    assert_eq!(
        controller.handle(&mut session, PanelGesture::TeleprinterDown("letter_a".into())),
        Disposition::IgnoredRepeat
    );
    controller.handle(&mut session, PanelGesture::TeleprinterUp("letter_a".into()));
    controller.handle(&mut session, PanelGesture::TeleprinterDown("digit_5".into()));

    assert_eq!(
        controller.core().calls,
        vec![CoreCall::TypeKey(128 + 65), CoreCall::TypeKey(128 + b'5')]
    );
}

#[test]
fn other_teleprinter_keys_stay_on_the_panel() {
    let (mut controller, mut session) = powered_panel();
    controller.handle(&mut session, PanelGesture::TeleprinterDown("space".into()));
    controller.handle(&mut session, PanelGesture::TeleprinterUp("space".into()));

    assert!(controller.core().calls.is_empty());
    assert_eq!(controller.surface().clicks(), 2);
}

#[test]
fn out_of_range_switch_is_ignored() {
    let (mut controller, mut session) = powered_panel();
    let outcome = controller.handle(
        &mut session,
        PanelGesture::ToggleSwitch {
            bank: SwitchBank::Right,
            index: 12,
        },
    );
    assert_eq!(outcome, Disposition::Ignored);
    assert_eq!(controller.surface().clicks(), 0);
}

#[test]
fn held_fill_key_fills_and_saves_once() {
    let (mut controller, mut session) = powered_panel();
    controller.surface_mut().clear();

    controller.handle(&mut session, key_down("g", false));
    controller.handle(&mut session, key_down("g", true));
    controller.handle(&mut session, key_up("g"));

    assert_eq!(controller.core().calls, vec![CoreCall::Fill(0, 0, false)]);
    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.surface().clicks(), 2);
    assert_eq!(
        MemoryMirror::default().load(controller.store()),
        controller.core().current_memory()
    );
}

#[test]
fn repeated_pointer_and_teleprinter_presses_are_ignored() {
    let (mut controller, mut session) = powered_panel();

    tap(&mut controller, &mut session, MomentaryControl::Do);
    controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Fill));
    assert_eq!(
        controller.handle(&mut session, PanelGesture::PointerDown(MomentaryControl::Fill)),
        Disposition::IgnoredRepeat
    );

    controller.handle(&mut session, PanelGesture::TeleprinterDown("letter_a".into()));
    assert_eq!(
        controller.handle(&mut session, PanelGesture::TeleprinterDown("letter_a".into())),
        Disposition::IgnoredRepeat
    );
    assert_eq!(
        controller.handle(&mut session, key_up("k")),
        Disposition::Ignored
    );

    let typed = controller
        .core()
        .calls
        .iter()
        .filter(|call| matches!(call, CoreCall::TypeKey(_)))
        .count();
    let fills = controller
        .core()
        .calls
        .iter()
        .filter(|call| matches!(call, CoreCall::Fill(..)))
        .count();
    assert_eq!((typed, fills), (1, 1));
}

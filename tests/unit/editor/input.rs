use super::*;

#[test]
fn events_parse_from_tagged_json() {
    let ev: InputEvent = serde_json::from_str(r#"{"type":"click","x":10,"y":20}"#).unwrap();
    assert_eq!(
        ev,
        InputEvent::Click {
            x: 10.0,
            y: 20.0,
            button: PointerButton::Primary
        }
    );

    let ev: InputEvent =
        serde_json::from_str(r#"{"type":"pointer_down","x":1,"y":2,"button":"middle"}"#).unwrap();
    assert!(matches!(
        ev,
        InputEvent::PointerDown {
            button: PointerButton::Middle,
            ..
        }
    ));

    let ev: InputEvent = serde_json::from_str(r#"{"type":"set_mode","mode":"set_path"}"#).unwrap();
    let mode = Mode::SetPath;
    assert_eq!(ev, InputEvent::SetMode { mode });

    let ev: InputEvent = serde_json::from_str(r#"{"type":"start_animation"}"#).unwrap();
    assert_eq!(ev, InputEvent::StartAnimation);
}

#[test]
fn controls_parse_with_values() {
    let ev: InputEvent = serde_json::from_str(
        r##"{"type":"control_changed","control":{"control":"fill_color","value":"#ff0000"}}"##,
    )
    .unwrap();
    assert_eq!(
        ev,
        InputEvent::ControlChanged {
            control: Control::FillColor(Rgba8::rgb(255, 0, 0))
        }
    );

    let c: Control = serde_json::from_str(r#"{"control":"duration_s","value":2.5}"#).unwrap();
    assert_eq!(c, Control::DurationS(2.5));
}

#[test]
fn key_helpers() {
    assert!(is_space(" "));
    assert!(is_space("Space"));
    assert!(!is_space("s"));
    assert!(is_undo_chord("z", true, false));
    assert!(is_undo_chord("Z", false, true));
    assert!(!is_undo_chord("z", false, false));
}

#[test]
fn position_is_reported_for_pointer_events_only() {
    assert_eq!(
        InputEvent::Wheel {
            x: 3.0,
            y: 4.0,
            delta_y: -1.0
        }
        .position(),
        Some((3.0, 4.0))
    );
    assert_eq!(InputEvent::Undo.position(), None);
}

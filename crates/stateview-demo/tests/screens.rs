#![forbid(unsafe_code)]

//! Both settings screens driven through the app, key by key. Each scenario
//! runs against both implementations and must end the same way.

use stateview_demo::{App, DemoConfig, ScreenKind};
use stateview_runtime::tick::TickQueue;
use stateview_widgets::Key;

const KINDS: [ScreenKind; 2] = [ScreenKind::Encapsulated, ScreenKind::Manual];

/// Row of the frame holding the setting.
const SETTING_ROW: u16 = 4;

fn app(kind: ScreenKind, initial_state: bool) -> App {
    let config = DemoConfig {
        initial_state,
        ..DemoConfig::default()
    };
    let ticks = TickQueue::new();
    App::new(kind.build(&config, ticks.clone()), ticks, config.width)
}

fn keys(app: &mut App, script: &str) {
    let keys: Vec<Key> = script
        .split(',')
        .map(|token| token.parse().unwrap())
        .collect();
    app.run_keys(keys);
}

fn setting_row(app: &App) -> String {
    app.frame().row_text(SETTING_ROW)
}

#[test]
fn approving_enable_applies_it() {
    for kind in KINDS {
        let mut app = app(kind, false);
        keys(&mut app, "space");
        assert!(app.screen().is_confirming(), "{kind:?}");
        assert!(app.screen().shown_state(), "{kind:?}");
        assert!(!app.screen().actual_state(), "{kind:?}");

        keys(&mut app, "y");
        assert!(!app.screen().is_confirming(), "{kind:?}");
        assert!(app.screen().actual_state(), "{kind:?}");
        assert!(app.screen().shown_state(), "{kind:?}");
        assert!(setting_row(&app).ends_with("[ON ]"), "{kind:?}");
    }
}

#[test]
fn cancelling_disable_keeps_actual_on() {
    for kind in KINDS {
        let mut app = app(kind, true);
        keys(&mut app, "space");
        assert!(app.screen().is_confirming(), "{kind:?}");
        assert!(!app.screen().shown_state(), "{kind:?}");

        keys(&mut app, "n");
        assert!(app.screen().actual_state(), "{kind:?}");
        assert!(app.screen().shown_state(), "{kind:?}");
        assert!(setting_row(&app).ends_with("[ON ]"), "{kind:?}");
    }
}

#[test]
fn control_locked_while_request_pending() {
    for kind in KINDS {
        let mut app = app(kind, false);
        keys(&mut app, "space");
        let row = setting_row(&app);
        assert!(row.ends_with("(ON )"), "{kind:?}: {row:?}");

        // Focus moves inside the sheet; the setting does not change.
        keys(&mut app, "tab,tab,x");
        assert!(app.screen().is_confirming(), "{kind:?}");
        assert!(app.screen().shown_state(), "{kind:?}");
        assert!(!app.screen().actual_state(), "{kind:?}");

        keys(&mut app, "enter");
        assert!(app.screen().actual_state(), "{kind:?}");
    }
}

#[test]
fn dismissing_sheet_reverts() {
    for kind in KINDS {
        let mut app = app(kind, false);
        keys(&mut app, "space,esc");
        assert!(!app.screen().is_confirming(), "{kind:?}");
        assert!(!app.screen().actual_state(), "{kind:?}");
        assert!(!app.screen().shown_state(), "{kind:?}");
        assert!(setting_row(&app).ends_with("[OFF]"), "{kind:?}");
    }
}

#[test]
fn reset_does_not_reopen_sheet_but_next_flip_does() {
    for kind in KINDS {
        let mut app = app(kind, false);
        keys(&mut app, "space,n");
        assert!(!app.screen().is_confirming(), "{kind:?}");

        keys(&mut app, "space");
        assert!(app.screen().is_confirming(), "{kind:?}");
        keys(&mut app, "y");
        assert!(app.screen().actual_state(), "{kind:?}");
    }
}

#[test]
fn sheet_copy_follows_request() {
    for kind in KINDS {
        let mut app = app(kind, false);
        keys(&mut app, "space");
        let frame = app.frame().to_lines().join("\n");
        assert!(frame.contains("Developer Mode is Dangerous."), "{kind:?}");
        assert!(frame.contains("Turn on"), "{kind:?}");
        keys(&mut app, "y,space");
        let frame = app.frame().to_lines().join("\n");
        assert!(frame.contains("turn off developer mode"), "{kind:?}");
        assert!(frame.contains("Turn off"), "{kind:?}");
    }
}

#[test]
fn page_shows_actual_state() {
    for kind in KINDS {
        let mut app = app(kind, false);
        let lines = app.frame().to_lines();
        assert_eq!(lines[0], "Settings");
        assert_eq!(lines[2], "(@) Richard");
        assert!(lines.iter().any(|l| l == "FOR DEVELOPERS"));
        assert!(lines.iter().any(|l| l == "Actual State: false"));

        keys(&mut app, "space,y");
        assert!(app.frame().to_lines().iter().any(|l| l == "Actual State: true"));
    }
}

#[test]
fn quit_ignored_while_confirming() {
    for kind in KINDS {
        let mut app = app(kind, false);
        keys(&mut app, "space,q");
        assert!(app.is_running(), "{kind:?}");
        assert!(app.screen().is_confirming(), "{kind:?}");

        keys(&mut app, "esc,q");
        assert!(!app.is_running(), "{kind:?}");
        assert!(!app.dispatch(Key::Space));
        assert!(!app.screen().shown_state(), "{kind:?}");
    }
}

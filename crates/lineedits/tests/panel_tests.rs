//! Line edits panel behavior tests.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use lineedits::prelude::*;
use lineedits_core::global_registry;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("lineedits=debug,lineedits_core=info")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_construction_creates_five_controls_with_defaults() {
    init_tracing();
    let panel = LineEditsPanel::new();

    let children = panel.widget_base().children_ids();
    assert_eq!(children.len(), 5);
    for control in PanelControl::ALL {
        let edit = panel.control(control);
        assert!(global_registry().contains(edit.object_id()));
        assert_eq!(edit.placeholder(), "Placeholder Text");
    }

    assert_eq!(panel.echo().echo_mode(), EchoMode::Normal);
    assert!(!panel.validator().has_validator());
    assert_eq!(panel.alignment().alignment(), HorizontalAlignment::Left);
    assert_eq!(panel.input_mask().input_mask(), "");
    assert!(panel.access().is_enabled());
    assert!(!panel.access().is_read_only());
}

#[test]
fn test_set_echo_password_leaves_other_controls() {
    init_tracing();
    let mut panel = LineEditsPanel::new();
    let before = panel.state();

    panel.set_echo(2);

    assert_eq!(panel.echo().echo_mode(), EchoMode::Password);
    let after = panel.state();
    assert_eq!(after.validator, before.validator);
    assert_eq!(after.alignment, before.alignment);
    assert_eq!(after.input_mask, before.input_mask);
    assert_eq!(after.access, before.access);
}

#[test]
fn test_set_access_read_only_then_enabled() {
    init_tracing();
    let mut panel = LineEditsPanel::new();

    panel.set_access(1);
    assert!(panel.access().is_read_only());
    assert!(!panel.access().is_editable());
    assert_eq!(panel.state().access, AccessLevel::ReadOnly);

    panel.set_access(0);
    assert!(panel.access().is_enabled());
    assert!(panel.access().is_editable());
    assert_eq!(panel.state().access, AccessLevel::Enabled);
}

#[test]
fn test_set_input_mask_ip_address() {
    init_tracing();
    let mut panel = LineEditsPanel::new();

    panel.set_input_mask(0);
    assert_eq!(panel.input_mask().input_mask(), "000.000.000.000;_");

    panel.set_input_mask(4);
    assert_eq!(panel.input_mask().input_mask(), "");
}

#[test]
fn test_every_index_sets_documented_value() {
    init_tracing();
    let mut panel = LineEditsPanel::new();

    for (index, mode) in EchoMode::OPTIONS.iter().enumerate() {
        panel.set_echo(index as i32);
        assert_eq!(panel.state().echo_mode, *mode);
    }
    for (index, kind) in ValidatorKind::OPTIONS.iter().enumerate() {
        panel.set_validator(index as i32);
        assert_eq!(panel.state().validator, *kind);
        assert_eq!(panel.validator().has_validator(), *kind != ValidatorKind::None);
    }
    for (index, alignment) in HorizontalAlignment::OPTIONS.iter().enumerate() {
        panel.set_alignment(index as i32);
        assert_eq!(panel.state().alignment, *alignment);
    }
    for (index, preset) in MaskPreset::OPTIONS.iter().enumerate() {
        panel.set_input_mask(index as i32);
        assert_eq!(panel.state().input_mask, preset.pattern());
    }
    for (index, level) in AccessLevel::OPTIONS.iter().enumerate() {
        panel.set_access(index as i32);
        assert_eq!(panel.state().access, *level);
    }
}

#[test]
fn test_slots_are_idempotent() {
    init_tracing();
    let mut once = LineEditsPanel::new();
    let mut twice = LineEditsPanel::new();

    for control in PanelControl::ALL {
        once.dispatch(control, 1);
        twice.dispatch(control, 1);
        twice.dispatch(control, 1);
    }

    assert_eq!(once.state(), twice.state());
}

#[test]
fn test_drop_releases_panel_and_controls() {
    init_tracing();
    let panel = LineEditsPanel::new();
    let mut ids = vec![panel.object_id()];
    ids.extend(PanelControl::ALL.iter().map(|&c| panel.control(c).object_id()));

    drop(panel);

    for id in ids {
        assert!(!global_registry().contains(id));
    }
}

#[test]
fn test_selectors_drive_slots() {
    init_tracing();
    let panel = Arc::new(Mutex::new(LineEditsPanel::new()));
    let mut selectors = PanelSelectors::new();
    let connections = selectors.connect_all(&panel);
    assert_eq!(connections.len(), 5);

    selectors.selector_mut(PanelControl::Echo).set_current_index(3);
    selectors.selector_mut(PanelControl::Validator).set_current_index(3);
    selectors.selector_mut(PanelControl::Alignment).set_current_index(1);
    selectors.selector_mut(PanelControl::InputMask).set_current_index(2);
    selectors.selector_mut(PanelControl::Access).set_current_index(2);

    let state = panel.lock().state();
    assert_eq!(
        state,
        PanelState {
            echo_mode: EchoMode::PasswordEchoOnEdit,
            validator: ValidatorKind::HexColor,
            alignment: HorizontalAlignment::Center,
            input_mask: "0000-00-00".to_string(),
            access: AccessLevel::Disabled,
        }
    );
}

#[test]
fn test_selector_clearing_is_ignored() {
    init_tracing();
    let panel = Arc::new(Mutex::new(LineEditsPanel::new()));
    let mut selectors = PanelSelectors::new();
    selectors.connect_all(&panel);

    selectors.selector_mut(PanelControl::Echo).set_current_index(2);
    selectors.selector_mut(PanelControl::Echo).clear();

    let panel = panel.lock();
    assert_eq!(panel.echo().echo_mode(), EchoMode::Password);
}

#[test]
fn test_selector_outliving_panel() {
    init_tracing();
    let panel = Arc::new(Mutex::new(LineEditsPanel::new()));
    let mut selectors = PanelSelectors::new();
    selectors.connect_all(&panel);

    drop(panel);
    selectors.selector_mut(PanelControl::Access).set_current_index(1);
    assert_eq!(selectors.selector(PanelControl::Access).current_index(), 1);
}

#[test]
fn test_typing_into_masked_control() {
    init_tracing();
    let mut panel = LineEditsPanel::new();
    panel.set_input_mask(0);

    let edit = panel.control_mut(PanelControl::InputMask);
    edit.focus_in();
    assert!(edit.insert("10.0.0.1"));
    assert_eq!(edit.text(), "10.0.0.1");
    assert_eq!(edit.displayed_text(), "10_.0__.0__.1__");
}

#[test]
fn test_password_echo_on_edit_follows_focus() {
    init_tracing();
    let mut panel = LineEditsPanel::new();
    panel.set_echo(3);

    let edit = panel.control_mut(PanelControl::Echo);
    edit.focus_in();
    edit.insert("hunter2");
    assert_eq!(edit.displayed_text(), "hunter2");

    edit.focus_out();
    assert_eq!(edit.displayed_text(), "•••••••");
}

#[test]
fn test_read_only_access_blocks_typing() {
    init_tracing();
    let mut panel = LineEditsPanel::new();
    panel.control_mut(PanelControl::Access).set_text("fixed");
    panel.set_access(1);

    assert!(!panel.control_mut(PanelControl::Access).insert("x"));
    assert_eq!(panel.access().text(), "fixed");

    panel.set_access(0);
    assert!(panel.control_mut(PanelControl::Access).insert("!"));
    assert_eq!(panel.access().text(), "fixed!");
}

#[test]
fn test_panel_from_config_file() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
placeholder = "Try me"

[integer]
minimum = 0
maximum = 255
"#
    )
    .unwrap();

    let config = PanelConfig::load(file.path()).unwrap();
    let mut panel = LineEditsPanel::with_config(config);
    assert_eq!(panel.echo().placeholder(), "Try me");

    panel.set_validator(1);
    let edit = panel.control_mut(PanelControl::Validator);
    assert!(edit.insert("25"));
    assert!(edit.insert("5"));
    assert!(!edit.insert("0"));
    assert_eq!(edit.text(), "255");
    assert!(!edit.insert("-"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[double]\nminimum = 5.0\nmaximum = 1.0\n").unwrap();

    let err = PanelConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange { section: "double", .. }));
}

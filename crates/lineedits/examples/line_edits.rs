//! Line Edits Console Demo
//!
//! Drives a `LineEditsPanel` through its selectors the way a host window
//! would, printing what each control shows after every change.
//!
//! Run with: cargo run -p lineedits --example line_edits [config.toml]
//!
//! Set `RUST_LOG=lineedits=trace` for detailed logs.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use lineedits::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lineedits=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };

    let panel = Arc::new(Mutex::new(LineEditsPanel::with_config(config)));
    let mut selectors = PanelSelectors::new();
    selectors.connect_all(&panel);

    println!("{}", panel.lock().dump_tree()?);

    for control in PanelControl::ALL {
        println!("== {} ==", control.title());
        for (index, label) in control.option_labels().into_iter().enumerate() {
            selectors.selector_mut(control).set_current_index(index as i32);

            let mut guard = panel.lock();
            let edit = guard.control_mut(control);
            edit.focus_in();
            edit.insert("192.168.1.20");
            edit.focus_out();

            println!(
                "  {label:<20} text={:?} shown={:?} state={} editable={}",
                edit.text(),
                edit.displayed_text(),
                edit.validation_state(),
                edit.is_editable(),
            );
            edit.clear();
        }
        selectors
            .selector_mut(control)
            .set_current_index(control.default_index());
    }

    Ok(())
}

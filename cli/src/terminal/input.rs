use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};

/// Blocks until the operator presses space, 'q' or ctrl-c. Key echo is
/// suppressed while waiting. Degrades to an immediate return when the
/// terminal refuses raw mode (e.g. output is piped).
pub fn wait_for_exit_key() {
    if enable_raw_mode().is_err() {
        return;
    }

    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let is_space = key.code == KeyCode::Char(' ');
                let is_q = key.code == KeyCode::Char('q');
                let is_ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);

                if is_space || is_q || is_ctrl_c {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    let _ = disable_raw_mode();
}

use crossterm::event::{KeyCode, KeyEvent};

pub(crate) fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}

pub(crate) fn is_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub(crate) fn is_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub(crate) fn is_expand(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Right | KeyCode::Char('l'))
}

pub(crate) fn is_collapse(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Left | KeyCode::Char('h'))
}

pub(crate) fn is_toggle(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(' '))
}

pub(crate) fn is_focus_switch(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab)
}

pub(crate) fn is_clear(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c'))
}

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_keys_match_arrows_and_vim() {
        assert!(is_up(key(KeyCode::Up)));
        assert!(is_up(key(KeyCode::Char('k'))));
        assert!(is_down(key(KeyCode::Down)));
        assert!(is_down(key(KeyCode::Char('j'))));
        assert!(is_expand(key(KeyCode::Right)));
        assert!(is_expand(key(KeyCode::Char('l'))));
        assert!(is_collapse(key(KeyCode::Left)));
        assert!(is_collapse(key(KeyCode::Char('h'))));
        assert!(!is_up(key(KeyCode::Char('j'))));
    }

    #[test]
    fn action_keys_match_contract() {
        assert!(is_confirm(key(KeyCode::Enter)));
        assert!(is_back(key(KeyCode::Esc)));
        assert!(is_toggle(key(KeyCode::Char(' '))));
        assert!(is_focus_switch(key(KeyCode::Tab)));
        assert!(is_clear(key(KeyCode::Char('c'))));
        assert!(is_quit(key(KeyCode::Char('q'))));
        assert!(!is_back(key(KeyCode::Enter)));
    }
}

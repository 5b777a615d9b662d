use calcpad::session::{HISTORY_KEY, MEMORY_KEY};
use calcpad::{
    CalculatorSession, FileStore, HistoryEntry, KeyValueStore, MemoryStore, evaluate, parse_keys,
};
use calcpad::calculator::{format_number, sanitize};
use tempfile::TempDir;

fn press_all<S: KeyValueStore>(session: &mut CalculatorSession<S>, line: &str) {
    for key in parse_keys(line).unwrap() {
        session.press(key);
    }
}

#[test]
fn test_preview_follows_evaluator() {
    let mut s = CalculatorSession::new(MemoryStore::new());
    let mut previous = s.live_preview().to_string();

    for token in ["1", "2", "+", "3", "*", "(", "4", "-", "1", ")", "/", "2"] {
        s.append_token(token);
        let expected = match evaluate(&sanitize(s.expression())) {
            Ok(value) => format_number(value),
            Err(_) => previous.clone(),
        };
        assert_eq!(s.live_preview(), expected, "after {}", s.expression());
        previous = s.live_preview().to_string();
    }
    assert_eq!(s.expression(), "12+3*(4-1)/2");
    assert_eq!(s.live_preview(), "16.5");
}

#[test]
fn test_commit_then_fresh_start() {
    let mut s = CalculatorSession::new(MemoryStore::new());
    press_all(&mut s, "5+3=");
    assert_eq!(s.expression(), "8");
    assert!(s.is_after_equals());
    assert_eq!(s.history(), &[HistoryEntry::new("5+3", "8")]);

    press_all(&mut s, "2");
    assert_eq!(s.expression(), "2");
    assert!(!s.is_after_equals());
}

#[test]
fn test_failed_commit_leaves_everything() {
    let mut s = CalculatorSession::new(MemoryStore::new());
    press_all(&mut s, "5/0=");
    assert_eq!(s.expression(), "5/0");
    assert!(!s.is_after_equals());
    assert!(s.history().is_empty());
}

#[test]
fn test_memory_sequence() {
    let mut s = CalculatorSession::new(MemoryStore::new());
    press_all(&mut s, "4 M+ CE 10 M-");
    assert_eq!(s.memory(), Some(-6.0));

    press_all(&mut s, "MC MR");
    assert_eq!(s.expression(), "10");
    assert_eq!(s.memory(), None);
}

#[test]
fn test_history_clear_removes_key() {
    let mut s = CalculatorSession::new(MemoryStore::new());
    press_all(&mut s, "1+1=");
    assert!(s.store().get(HISTORY_KEY).unwrap().is_some());

    s.history_clear();
    assert!(s.history().is_empty());
    assert_eq!(s.store().get(HISTORY_KEY).unwrap(), None);
}

#[test]
fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let (history, memory) = {
        let mut s = CalculatorSession::new(FileStore::open(&path).unwrap());
        press_all(&mut s, "5+3= 8*2= MS");
        press_all(&mut s, "0.1+0.2= M+");
        (s.history().to_vec(), s.memory())
    };
    assert_eq!(history.len(), 3);
    assert_eq!(history[1], HistoryEntry::new("8*2", "16"));
    assert_eq!(memory, Some(16.0 + (0.1 + 0.2)));

    let s = CalculatorSession::new(FileStore::open(&path).unwrap());
    assert_eq!(s.history(), history.as_slice());
    assert_eq!(s.memory(), memory);
    assert_eq!(s.expression(), "0");
}

#[test]
fn test_memory_clear_removes_key_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut s = CalculatorSession::new(FileStore::open(&path).unwrap());
    press_all(&mut s, "7 MS");
    assert_eq!(s.store().get(MEMORY_KEY).unwrap().as_deref(), Some("7"));
    s.memory_clear();
    drop(s);

    let s = CalculatorSession::new(FileStore::open(&path).unwrap());
    assert_eq!(s.memory(), None);
}

use super::*;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn test_strips_move_counters() {
    let key = PositionKey::from_position(STARTPOS);
    assert_eq!(key.as_str(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
}

#[test]
fn test_counter_fields_do_not_distinguish_positions() {
    let early = PositionKey::from_position(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    );
    let later = PositionKey::from_position(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 7 42",
    );
    assert_eq!(early, later);
}

#[test]
fn test_side_to_move_distinguishes_positions() {
    let white = PositionKey::from_position("8/8/8/4k3/8/8/4K3/8 w - - 0 1");
    let black = PositionKey::from_position("8/8/8/4k3/8/8/4K3/8 b - - 0 1");
    assert_ne!(white, black);
}

#[test]
fn test_short_serializations_kept_as_is() {
    let key = PositionKey::from_position("8/8/8/4k3/8/8/4K3/8 w");
    assert_eq!(key.as_str(), "8/8/8/4k3/8/8/4K3/8 w");
}

#[test]
fn test_extra_whitespace_is_normalized() {
    let a = PositionKey::from_position("8/8/8/4k3/8/8/4K3/8  w  -  - 0 1");
    let b = PositionKey::from_position("8/8/8/4k3/8/8/4K3/8 w - - 0 1");
    assert_eq!(a, b);
}

#[test]
fn test_piece_placement_field() {
    let key = PositionKey::from_position(STARTPOS);
    assert_eq!(
        key.piece_placement(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    );
}

#[test]
fn test_serializes_as_plain_string() {
    let key = PositionKey::from_position("8/8/8/4k3/8/8/4K3/8 w - - 0 1");
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"8/8/8/4k3/8/8/4K3/8 w - -\"");

    let back: PositionKey = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);
}

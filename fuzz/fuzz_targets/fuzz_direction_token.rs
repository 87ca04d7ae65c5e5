#![no_main]

use grip_core::{Direction, Edges};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    if let Some(direction) = Direction::from_token(&text) {
        assert!(direction.is_resolved(), "decoded direction has no axis");
        let token = direction.token();
        assert!(token.len() <= 2, "token {token:?} too long");
        assert_eq!(
            Direction::from_token(&token),
            Some(direction),
            "token {token:?} does not round trip"
        );
    }

    // Edge lists accept anything; unknown names are dropped.
    let edges = Edges::parse_list(&text);
    assert!(Edges::all().contains(edges));
});

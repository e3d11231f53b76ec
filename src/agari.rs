//! Winning-hand decomposition.
//!
//! Enumerates every way a concealed tile collection can be partitioned into
//! melds plus one pair, and detects the two special shapes (seven pairs,
//! thirteen orphans). The search works on `[u8; 34]` count vectors passed by
//! value, so abandoning a branch is just dropping its local copy.

use crate::tile::{NUM_TILE_TYPES, YAOCHUU};
use crate::types::Hand;

/// Defensive recursion cap. A 14-tile hand never nests deeper than
/// 6 groups; anything past this indicates malformed input.
const MAX_SEARCH_DEPTH: usize = 16;

/// One group inside a standard division, identified by its lowest tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mentsu {
    /// Triplet.
    Koutsu(u8),
    /// Quad. Tried during the search for completeness, but a concealed quad
    /// can never balance the 3n+2 tile arithmetic, so accepted divisions
    /// only ever carry quads through declared melds.
    Kantsu(u8),
    /// Sequence starting at the given tile.
    Shuntsu(u8),
}

/// A standard division: the pair plus the concealed meld groups.
/// Declared melds are combined with this by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub head: u8,
    pub body: Vec<Mentsu>,
}

/// One candidate interpretation of a winning hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    Standard(Division),
    /// Seven distinct pairs, listed in ordinal order.
    SevenPairs([u8; 7]),
    /// Thirteen orphans; `pair` is the doubled tile type.
    ThirteenOrphans { pair: u8 },
}

/// Enumerates all decompositions of a concealed tile collection (winning
/// tile included). The two special shapes are checked once up front and
/// appended as standalone candidates; they only exist for a full 14-tile
/// concealed hand, so any declared meld rules them out.
pub fn decompose(hand: &Hand) -> Vec<Decomposition> {
    let mut out = Vec::new();

    if hand.total() == 14 {
        if let Some(pair) = thirteen_orphans(hand) {
            out.push(Decomposition::ThirteenOrphans { pair });
        }
        if let Some(pairs) = seven_pairs(hand) {
            out.push(Decomposition::SevenPairs(pairs));
        }
    }

    let mut body = Vec::new();
    search(hand.counts, 0, None, 0, &mut body, &mut out);
    out
}

/// Recursive search over the count vector. At the lowest occupied ordinal,
/// tries quad, triplet, sequence, then pair (at most one pair per division).
fn search(
    counts: [u8; NUM_TILE_TYPES],
    start: usize,
    head: Option<u8>,
    depth: usize,
    body: &mut Vec<Mentsu>,
    out: &mut Vec<Decomposition>,
) {
    if depth > MAX_SEARCH_DEPTH {
        return;
    }

    let mut i = start;
    while i < NUM_TILE_TYPES && counts[i] == 0 {
        i += 1;
    }

    if i == NUM_TILE_TYPES {
        if let Some(h) = head {
            out.push(Decomposition::Standard(Division {
                head: h,
                body: body.clone(),
            }));
        }
        return;
    }

    // Quad
    if counts[i] >= 4 {
        let mut c = counts;
        c[i] -= 4;
        body.push(Mentsu::Kantsu(i as u8));
        search(c, i, head, depth + 1, body, out);
        body.pop();
    }

    // Triplet
    if counts[i] >= 3 {
        let mut c = counts;
        c[i] -= 3;
        body.push(Mentsu::Koutsu(i as u8));
        search(c, i, head, depth + 1, body, out);
        body.pop();
    }

    // Sequence (numbered suits only, never crossing a suit boundary)
    if i < 27 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
        let mut c = counts;
        c[i] -= 1;
        c[i + 1] -= 1;
        c[i + 2] -= 1;
        body.push(Mentsu::Shuntsu(i as u8));
        search(c, i, head, depth + 1, body, out);
        body.pop();
    }

    // Pair
    if head.is_none() && counts[i] >= 2 {
        let mut c = counts;
        c[i] -= 2;
        search(c, i, Some(i as u8), depth + 1, body, out);
    }
}

/// Seven distinct pairs, or `None`. Four of a kind does not count as two
/// pairs.
pub fn seven_pairs(hand: &Hand) -> Option<[u8; 7]> {
    let mut pairs = [0u8; 7];
    let mut n = 0;
    for (i, &c) in hand.counts.iter().enumerate() {
        match c {
            0 => {}
            2 => {
                if n == 7 {
                    return None;
                }
                pairs[n] = i as u8;
                n += 1;
            }
            _ => return None,
        }
    }
    (n == 7).then_some(pairs)
}

/// The thirteen-orphans shape: every terminal/honor type present, exactly
/// one doubled. Returns the doubled tile type.
pub fn thirteen_orphans(hand: &Hand) -> Option<u8> {
    let mut pair = None;
    for &t in &YAOCHUU {
        match hand.counts[t as usize] {
            1 => {}
            2 => {
                if pair.is_some() {
                    return None;
                }
                pair = Some(t);
            }
            _ => return None,
        }
    }
    // Any simple tile breaks the shape.
    for (i, &c) in hand.counts.iter().enumerate() {
        if c > 0 && !YAOCHUU.contains(&(i as u8)) {
            return None;
        }
    }
    pair
}

/// Fast completeness test, without enumerating divisions.
pub fn is_complete(hand: &Hand) -> bool {
    if hand.total() == 14 && (thirteen_orphans(hand).is_some() || seven_pairs(hand).is_some()) {
        return true;
    }
    standard_complete(hand.counts, 0, false)
}

fn standard_complete(counts: [u8; NUM_TILE_TYPES], start: usize, has_head: bool) -> bool {
    let mut i = start;
    while i < NUM_TILE_TYPES && counts[i] == 0 {
        i += 1;
    }
    if i == NUM_TILE_TYPES {
        return has_head;
    }

    if counts[i] >= 3 {
        let mut c = counts;
        c[i] -= 3;
        if standard_complete(c, i, has_head) {
            return true;
        }
    }
    if i < 27 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
        let mut c = counts;
        c[i] -= 1;
        c[i + 1] -= 1;
        c[i + 2] -= 1;
        if standard_complete(c, i, has_head) {
            return true;
        }
    }
    if !has_head && counts[i] >= 2 {
        let mut c = counts;
        c[i] -= 2;
        if standard_complete(c, i, true) {
            return true;
        }
    }
    false
}

/// True if adding one more tile can complete the hand.
pub fn is_tenpai(hand: &Hand) -> bool {
    !waits(hand).is_empty()
}

/// The tile types that would complete a 13-tile (mod 3 == 1) hand.
pub fn waits(hand: &Hand) -> Vec<u8> {
    let mut result = Vec::new();
    let mut probe = hand.clone();
    for i in 0..NUM_TILE_TYPES as u8 {
        if probe.counts[i as usize] < 4 {
            probe.add(i);
            if is_complete(&probe) {
                result.push(i);
            }
            probe.remove(i);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(types: &[u8]) -> Hand {
        Hand::from_types(types)
    }

    #[test]
    fn standard_division_found() {
        // 123m 456m 789m 123p 1s1s
        let h = hand(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 18]);
        let decos = decompose(&h);
        assert_eq!(decos.len(), 1);
        match &decos[0] {
            Decomposition::Standard(div) => {
                assert_eq!(div.head, 18);
                assert_eq!(div.body.len(), 4);
            }
            other => panic!("unexpected decomposition {other:?}"),
        }
    }

    #[test]
    fn triplet_vs_sequence_ambiguity() {
        // 222333444m 567m 11p: triplets or three identical sequences
        let h = hand(&[1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 5, 6, 9, 9]);
        let decos = decompose(&h);
        let standard = decos
            .iter()
            .filter(|d| matches!(d, Decomposition::Standard(_)))
            .count();
        assert!(standard >= 2, "expected both readings, got {decos:?}");
    }

    #[test]
    fn flush_hand_is_highly_ambiguous() {
        // 22334455667788s: three distinct pair choices lead to standard
        // divisions, and the whole hand also reads as seven pairs.
        let h = hand(&[19, 19, 20, 20, 21, 21, 22, 22, 23, 23, 24, 24, 25, 25]);
        let decos = decompose(&h);
        let standard = decos
            .iter()
            .filter(|d| matches!(d, Decomposition::Standard(_)))
            .count();
        assert_eq!(standard, 3, "unexpected divisions: {decos:?}");
        assert!(decos
            .iter()
            .any(|d| matches!(d, Decomposition::SevenPairs(_))));
    }

    #[test]
    fn nine_gates_decomposes() {
        // 1112345678999m + 5m
        let h = hand(&[0, 0, 0, 1, 2, 3, 4, 4, 5, 6, 7, 8, 8, 8]);
        let decos = decompose(&h);
        assert!(!decos.is_empty());
        assert!(decos
            .iter()
            .all(|d| matches!(d, Decomposition::Standard(_))));
    }

    #[test]
    fn seven_pairs_detected_alongside_ryanpeikou() {
        // 112233m 445566p 77s reads as seven pairs and as two double sequences
        let h = hand(&[0, 0, 1, 1, 2, 2, 12, 12, 13, 13, 14, 14, 24, 24]);
        let decos = decompose(&h);
        assert!(decos
            .iter()
            .any(|d| matches!(d, Decomposition::SevenPairs(_))));
        assert!(decos
            .iter()
            .any(|d| matches!(d, Decomposition::Standard(_))));
    }

    #[test]
    fn four_of_a_kind_is_not_two_pairs() {
        let h = hand(&[0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
        assert!(seven_pairs(&h).is_none());
    }

    #[test]
    fn thirteen_orphans_pair_identified() {
        let mut h = hand(&YAOCHUU);
        h.add(33);
        assert_eq!(thirteen_orphans(&h), Some(33));
        let decos = decompose(&h);
        assert!(matches!(
            decos.as_slice(),
            [Decomposition::ThirteenOrphans { pair: 33 }]
        ));
    }

    #[test]
    fn incomplete_hand_has_no_decomposition() {
        // 13 random-ish tiles plus an isolated honor
        let h = hand(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 27, 31]);
        assert!(decompose(&h).is_empty());
        assert!(!is_complete(&h));
    }

    #[test]
    fn honors_never_form_sequences() {
        // EEE SSS WWW NNN + PP would need honor runs if triplets were split
        let h = hand(&[27, 27, 28, 28, 29, 29, 30, 30, 31, 31, 32, 32, 33, 33]);
        // This is seven pairs of honors, not any standard division
        let decos = decompose(&h);
        assert!(decos
            .iter()
            .all(|d| matches!(d, Decomposition::SevenPairs(_))));
    }

    #[test]
    fn waits_on_ryanmen() {
        // 123m 456m 789m 23p 11s waits on 1p/4p
        let h = hand(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 18, 18]);
        assert_eq!(waits(&h), vec![9, 12]);
        assert!(is_tenpai(&h));
    }

    #[test]
    fn thirteen_wait_kokushi() {
        let h = hand(&YAOCHUU);
        assert_eq!(waits(&h), YAOCHUU.to_vec());
    }

    #[test]
    fn partial_hand_with_meld_declared() {
        // 11 concealed tiles (one meld declared): 123m 456m 789m 11p
        let h = hand(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9]);
        let decos = decompose(&h);
        assert_eq!(decos.len(), 1);
        match &decos[0] {
            Decomposition::Standard(div) => assert_eq!(div.body.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }
}

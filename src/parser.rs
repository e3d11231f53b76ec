//! Text notation for hands and tiles.
//!
//! Digits followed by a suit letter, `0` for a red five: `"123m055p77z"`.
//! Declared melds sit in parentheses: `(123m)` chi, `(p1z)` pon, `(k5s)`
//! ankan, `(k5s1)` daiminkan (trailing digit marks the claimed position),
//! `(s5s)` kakan.

use crate::errors::{ScoreError, ScoreResult};
use crate::tile::NUM_TILE_TYPES;
use crate::types::{Meld, MeldType};

/// Hands out distinct 136-format ids so a parsed hand never duplicates a
/// physical tile. Copy 0 of each five is the red one and is only taken when
/// asked for (`0` digit) or when the ordinary copies run out.
struct TileBag {
    used: [[bool; 4]; NUM_TILE_TYPES],
}

impl TileBag {
    fn new() -> Self {
        Self {
            used: [[false; 4]; NUM_TILE_TYPES],
        }
    }

    fn take(&mut self, tile_type: usize, red: bool) -> Result<u8, String> {
        if tile_type >= NUM_TILE_TYPES {
            return Err(format!("invalid tile type {tile_type}"));
        }
        let is_five = matches!(tile_type, 4 | 13 | 22);
        let order: &[usize] = match (is_five, red) {
            (true, true) => &[0],
            (true, false) => &[1, 2, 3, 0],
            (false, _) => &[0, 1, 2, 3],
        };
        let copy = order
            .iter()
            .find(|&&c| !self.used[tile_type][c])
            .copied()
            .ok_or_else(|| format!("no more copies of tile type {tile_type}"))?;
        self.used[tile_type][copy] = true;
        Ok((tile_type * 4 + copy) as u8)
    }
}

fn suit_offset(c: char) -> Option<usize> {
    match c {
        'm' => Some(0),
        'p' => Some(9),
        's' => Some(18),
        'z' => Some(27),
        _ => None,
    }
}

fn parse_err(input: &str, message: impl Into<String>) -> ScoreError {
    ScoreError::Parse {
        input: input.to_string(),
        message: message.into(),
    }
}

/// Parses a full hand: concealed 136-format tiles plus declared melds.
pub fn parse_hand(text: &str) -> ScoreResult<(Vec<u8>, Vec<Meld>)> {
    let mut bag = TileBag::new();
    let mut tiles = Vec::new();
    let mut melds = Vec::new();
    let mut digits: Vec<u32> = Vec::new();

    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c == '(' {
            chars.next();
            let mut body = String::new();
            for inner in chars.by_ref() {
                if inner == ')' {
                    break;
                }
                body.push(inner);
            }
            melds.push(parse_meld(&body, &mut bag).map_err(|m| parse_err(text, m))?);
        } else if let Some(d) = c.to_digit(10) {
            chars.next();
            digits.push(d);
        } else if let Some(offset) = suit_offset(c) {
            chars.next();
            for &d in &digits {
                let (tile_type, red) = digit_to_type(d, offset);
                tiles.push(bag.take(tile_type, red).map_err(|m| parse_err(text, m))?);
            }
            digits.clear();
        } else if c.is_whitespace() {
            chars.next();
        } else {
            return Err(parse_err(text, format!("unexpected character '{c}'")));
        }
    }

    if !digits.is_empty() {
        return Err(parse_err(text, "digits without a suit letter"));
    }
    Ok((tiles, melds))
}

/// Parses exactly one tile, e.g. `"5m"` or `"0p"` for the red five.
pub fn parse_tile(text: &str) -> ScoreResult<u8> {
    let (tiles, melds) = parse_hand(text)?;
    if !melds.is_empty() {
        return Err(parse_err(text, "expected a single tile, found a meld"));
    }
    match tiles.as_slice() {
        [t] => Ok(*t),
        [] => Err(parse_err(text, "no tile in string")),
        more => Err(parse_err(text, format!("expected one tile, found {}", more.len()))),
    }
}

fn digit_to_type(digit: u32, offset: usize) -> (usize, bool) {
    if digit == 0 {
        (offset + 4, true) // red five
    } else {
        (offset + digit as usize - 1, false)
    }
}

fn parse_meld(body: &str, bag: &mut TileBag) -> Result<Meld, String> {
    let (kind, rest) = match body.chars().next() {
        Some(k @ ('p' | 'k' | 's')) => (k, &body[1..]),
        _ => (' ', body),
    };

    let mut digits: Vec<u32> = Vec::new();
    let mut chars = rest.chars();
    let mut suit = None;
    for c in chars.by_ref() {
        if let Some(d) = c.to_digit(10) {
            digits.push(d);
        } else {
            suit = suit_offset(c);
            break;
        }
    }
    let offset = suit.ok_or_else(|| format!("meld '{body}' has no suit"))?;
    // A trailing digit after the suit marks a claimed tile (daiminkan).
    let claimed = chars.next().is_some_and(|c| c.is_ascii_digit());

    if kind == ' ' {
        if digits.len() != 3 {
            return Err(format!("chi meld '{body}' needs three digits"));
        }
        let mut tiles = Vec::with_capacity(3);
        for &d in &digits {
            let (t, red) = digit_to_type(d, offset);
            tiles.push(bag.take(t, red)?);
        }
        tiles.sort_unstable();
        return Ok(Meld::new(MeldType::Chi, tiles, true));
    }

    let first = *digits
        .first()
        .ok_or_else(|| format!("meld '{body}' has no tile digit"))?;
    let (tile_type, red) = digit_to_type(first, offset);
    let count = if kind == 'p' { 3 } else { 4 };

    let mut tiles = Vec::with_capacity(count);
    let mut red_taken = false;
    if red {
        tiles.push(bag.take(tile_type, true)?);
        red_taken = true;
    }
    while tiles.len() < count {
        match bag.take(tile_type, false) {
            Ok(t) => tiles.push(t),
            Err(_) if !red_taken => {
                tiles.push(bag.take(tile_type, true)?);
                red_taken = true;
            }
            Err(e) => return Err(e),
        }
    }
    tiles.sort_unstable();

    let meld_type = match kind {
        'p' => MeldType::Pon,
        'k' if claimed => MeldType::Daiminkan,
        'k' => MeldType::Ankan,
        _ => MeldType::Kakan,
    };
    let opened = meld_type != MeldType::Ankan;
    Ok(Meld::new(meld_type, tiles, opened))
}

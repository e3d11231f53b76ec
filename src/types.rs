use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ScoreError;
use crate::tile::{self, EAST, NUM_TILE_TYPES};

/// A hand representation using a histogram of tile types (0-33).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub counts: [u8; NUM_TILE_TYPES],
}

impl Hand {
    /// Builds a count vector from a list of tile types (0-33).
    pub fn from_types(tiles: &[u8]) -> Self {
        let mut h = Hand::default();
        for &t in tiles {
            h.add(t);
        }
        h
    }

    /// Builds a count vector from a list of 136-format tile ids.
    pub fn from_tiles136(tiles: &[u8]) -> Self {
        let mut h = Hand::default();
        for &t in tiles {
            h.add(tile::tile136_to_type(t));
        }
        h
    }

    pub fn add(&mut self, t: u8) {
        if (t as usize) < NUM_TILE_TYPES {
            self.counts[t as usize] += 1;
        }
    }

    pub fn remove(&mut self, t: u8) {
        if (t as usize) < NUM_TILE_TYPES && self.counts[t as usize] > 0 {
            self.counts[t as usize] -= 1;
        }
    }

    /// Total number of tiles counted.
    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand {
            counts: [0; NUM_TILE_TYPES],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi = 0,
    Pon = 1,
    Daiminkan = 2,
    Ankan = 3,
    Kakan = 4,
}

impl MeldType {
    /// True for the three quad variants.
    #[inline]
    pub fn is_kan(self) -> bool {
        matches!(self, MeldType::Daiminkan | MeldType::Ankan | MeldType::Kakan)
    }
}

/// A declared meld. `tiles` are 136-format ids; `opened` is false only for
/// ankan. A kakan keeps the concealment history of the pon it extends, which
/// for a called pon means `opened = true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<u8>,
    pub opened: bool,
}

impl Meld {
    pub fn new(meld_type: MeldType, tiles: Vec<u8>, opened: bool) -> Self {
        Self {
            meld_type,
            tiles,
            opened,
        }
    }

    /// Tile type of the lowest tile in the meld.
    pub fn tile_type(&self) -> u8 {
        self.tiles
            .iter()
            .map(|&t| tile::tile136_to_type(t))
            .min()
            .unwrap_or(0)
    }

    /// Number of tiles this meld contributes to the 14-tile hand structure.
    /// A quad still stands for one group of three in the count arithmetic.
    pub fn effective_size(&self) -> usize {
        3
    }
}

/// Represents wind directions, used for player seats and the round wind.
///
/// East is the dealer seat. Wind values participate in scoring through
/// yakuhai triplets and the value-tile pair fu bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Wind {
    #[default]
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    /// The tile type (27-30) carrying this wind.
    #[inline]
    pub fn tile(self) -> u8 {
        EAST + self as u8
    }
}

impl From<u8> for Wind {
    fn from(val: u8) -> Self {
        match val % 4 {
            0 => Wind::East,
            1 => Wind::South,
            2 => Wind::West,
            3 => Wind::North,
            _ => unreachable!(),
        }
    }
}

/// How the winning tile arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinType {
    /// Win by claiming another player's discard.
    #[default]
    Ron,
    /// Win by self-draw.
    Tsumo,
}

impl FromStr for WinType {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ron" => Ok(WinType::Ron),
            "tsumo" => Ok(WinType::Tsumo),
            other => Err(ScoreError::InvalidWinType {
                input: other.to_string(),
            }),
        }
    }
}

/// Situational context for one scoring call, populated by the caller (turn
/// state machine plus wall) before the engine is invoked. The engine itself
/// never reaches back into the wall or the game state.
#[derive(Debug, Clone)]
pub struct Conditions {
    pub win_type: WinType,
    /// The tile that completed the hand, 136-format. Must also be present in
    /// the concealed tile list handed to the engine.
    pub win_tile: u8,
    pub riichi: bool,
    pub double_riichi: bool,
    pub ippatsu: bool,
    /// Last live-wall tile drawn (self-draw wins).
    pub haitei: bool,
    /// Last discard of the hand claimed (discard wins).
    pub houtei: bool,
    /// Replacement-tile draw after a kan.
    pub rinshan: bool,
    /// Win declared on a tile added to another player's pon.
    pub chankan: bool,
    /// Win within the first uninterrupted go-around.
    pub first_turn: bool,
    /// All discards are terminals/honors and none were claimed.
    pub nagashi_mangan: bool,
    pub round_wind: Wind,
    pub seat_wind: Wind,
    pub honba: u32,
    /// Revealed dora indicators, 136-format.
    pub dora_indicators: Vec<u8>,
    /// Hidden dora indicators, 136-format. Ignored unless riichi was declared.
    pub ura_indicators: Vec<u8>,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            win_type: WinType::Ron,
            win_tile: 0,
            riichi: false,
            double_riichi: false,
            ippatsu: false,
            haitei: false,
            houtei: false,
            rinshan: false,
            chankan: false,
            first_turn: false,
            nagashi_mangan: false,
            round_wind: Wind::East,
            seat_wind: Wind::East,
            honba: 0,
            dora_indicators: Vec::new(),
            ura_indicators: Vec::new(),
        }
    }
}

impl Conditions {
    /// The dealer is whoever holds the East seat.
    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == Wind::East
    }
}

/// The scored outcome of a winning hand: matched patterns, han/fu, and the
/// resulting point transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub yakuman: bool,
    pub han: u32,
    pub fu: u32,
    /// Matched pattern names, in evaluation order. Dora entries repeat once
    /// per han they contribute.
    pub yaku: Vec<String>,
    pub score: crate::score::Score,
}

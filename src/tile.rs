//! Tile representation for the scoring engine.
//!
//! Provides the 34-tile type system, aka-dora handling, 136-format
//! conversion, and the dora successor cycle used when counting bonus tiles.

use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct tile types (0-33).
pub const NUM_TILE_TYPES: usize = 34;

/// Number of tiles per suited category (1-9).
pub const NUM_SUIT_TILES: usize = 9;

/// Total physical tiles in a standard mahjong set.
pub const NUM_TILES_136: usize = 136;

// Suit range starts (tile type indices).
pub const MANZU_START: u8 = 0;
pub const PINZU_START: u8 = 9;
pub const SOUZU_START: u8 = 18;
pub const JIHAI_START: u8 = 27;

// Named honor tile indices for readability.
pub const EAST: u8 = 27;
pub const SOUTH: u8 = 28;
pub const WEST: u8 = 29;
pub const NORTH: u8 = 30;
pub const HAKU: u8 = 31;
pub const HATSU: u8 = 32;
pub const CHUN: u8 = 33;

/// The thirteen terminal/honor tile types, in ordinal order.
/// This is both the thirteen-orphans tile set and the tanyao exclusion set.
pub const YAOCHUU: [u8; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Tile types that qualify for the all-green hand: 2s 3s 4s 6s 8s and hatsu.
pub const GREEN_TILES: [u8; 6] = [19, 20, 21, 23, 25, HATSU];

// ---------------------------------------------------------------------------
// Aka-dora constants (136-format indices for red fives)
// ---------------------------------------------------------------------------

/// Red 5m in 136-format. The 0th copy of tile type 4 (5m) is red.
pub const AKA_MANZU_136: u8 = 16;
/// Red 5p in 136-format. The 0th copy of tile type 13 (5p) is red.
pub const AKA_PINZU_136: u8 = 52;
/// Red 5s in 136-format. The 0th copy of tile type 22 (5s) is red.
pub const AKA_SOUZU_136: u8 = 88;

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// The four tile categories in Riichi Mahjong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Manzu = 0,
    Pinzu = 1,
    Souzu = 2,
    Jihai = 3,
}

impl Suit {
    /// Returns the starting tile type index for this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        match self {
            Suit::Manzu => MANZU_START,
            Suit::Pinzu => PINZU_START,
            Suit::Souzu => SOUZU_START,
            Suit::Jihai => JIHAI_START,
        }
    }
}

// ---------------------------------------------------------------------------
// TileType newtype
// ---------------------------------------------------------------------------

/// A tile type in the range 0-33. Wraps a `u8` for type safety.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileType(u8);

impl TileType {
    /// Creates a `TileType` if `id` is in range 0..34.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id < NUM_TILE_TYPES as u8 {
            Some(TileType(id))
        } else {
            None
        }
    }

    /// Raw numeric id (0-33).
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Which suit this tile belongs to.
    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 {
            0..9 => Suit::Manzu,
            9..18 => Suit::Pinzu,
            18..27 => Suit::Souzu,
            _ => Suit::Jihai,
        }
    }

    /// 1-based number within the suit (1-9), or `None` for honor tiles.
    #[inline]
    pub const fn number(self) -> Option<u8> {
        if self.0 < JIHAI_START {
            Some((self.0 % NUM_SUIT_TILES as u8) + 1)
        } else {
            None
        }
    }

    /// True for 1 or 9 of any suit.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        if self.0 >= JIHAI_START {
            return false;
        }
        let num = self.0 % NUM_SUIT_TILES as u8;
        num == 0 || num == 8
    }

    /// True for wind or dragon tiles (indices 27-33).
    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 >= JIHAI_START
    }

    /// True for terminals or honors (yaochuuhai).
    #[inline]
    pub const fn is_terminal_or_honor(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// True for manzu, pinzu, or souzu (not jihai).
    #[inline]
    pub const fn is_suited(self) -> bool {
        self.0 < JIHAI_START
    }

    /// True for tiles that may appear in the all-green hand.
    #[inline]
    pub fn is_green(self) -> bool {
        GREEN_TILES.contains(&self.0)
    }
}

impl fmt::Debug for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileType({}={})", self.0, tile_type_to_string(self.0))
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tile_type_to_string(self.0))
    }
}

// ---------------------------------------------------------------------------
// Free-function classification helpers
//
// The decomposition and yaku code works on raw u8 tile types inside count
// vectors; these mirror the `TileType` methods for that representation.
// ---------------------------------------------------------------------------

#[inline]
pub const fn is_honor(tile: u8) -> bool {
    tile >= JIHAI_START
}

/// True for 1/9 of a numbered suit (honors excluded).
#[inline]
pub const fn is_number_terminal(tile: u8) -> bool {
    tile < JIHAI_START && (tile % 9 == 0 || tile % 9 == 8)
}

/// True for terminals or honors.
#[inline]
pub const fn is_terminal_or_honor(tile: u8) -> bool {
    tile >= JIHAI_START || tile % 9 == 0 || tile % 9 == 8
}

/// True for dragon tiles.
#[inline]
pub const fn is_dragon(tile: u8) -> bool {
    tile >= HAKU && tile <= CHUN
}

// ---------------------------------------------------------------------------
// 136-format conversion and aka-dora
// ---------------------------------------------------------------------------

/// Converts a 136-format tile id (0-135) to its tile type (0-33).
#[inline]
pub const fn tile136_to_type(tile136: u8) -> u8 {
    // Each tile type has 4 copies: type = tile136 / 4
    tile136 / 4
}

/// Returns `true` if the 136-format tile is a red five (aka-dora).
///
/// Convention: index 16 = red 5m, 52 = red 5p, 88 = red 5s.
#[inline]
pub const fn tile136_is_aka(tile136: u8) -> bool {
    matches!(tile136, AKA_MANZU_136 | AKA_PINZU_136 | AKA_SOUZU_136)
}

// ---------------------------------------------------------------------------
// Dora successor cycle
// ---------------------------------------------------------------------------

/// Maps a dora indicator tile type to the active dora tile type.
///
/// Each numbered suit wraps within itself (9 -> 1), winds cycle E-S-W-N-E,
/// and dragons cycle haku-hatsu-chun-haku.
#[inline]
pub const fn next_dora_tile(tile: u8) -> u8 {
    match tile {
        0..=8 => (tile + 1) % 9,
        9..=17 => 9 + (tile - 9 + 1) % 9,
        18..=26 => 18 + (tile - 18 + 1) % 9,
        27..=30 => 27 + (tile - 27 + 1) % 4,
        31..=33 => 31 + (tile - 31 + 1) % 3,
        _ => tile,
    }
}

// ---------------------------------------------------------------------------
// Display / debug helpers
// ---------------------------------------------------------------------------

/// String names for tile types.
const TILE_NAMES: [&str; NUM_TILE_TYPES] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "1p", "2p", "3p", "4p", "5p", "6p", "7p",
    "8p", "9p", "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", "E", "S", "W", "N", "P", "F",
    "C",
];

/// Returns the display name for a tile type (0-33).
/// Out-of-range values return "??".
#[inline]
pub fn tile_type_to_string(tile_type: u8) -> &'static str {
    TILE_NAMES.get(tile_type as usize).copied().unwrap_or("??")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_type_new_valid() {
        for i in 0..34u8 {
            assert!(
                TileType::new(i).is_some(),
                "TileType::new({i}) should be Some"
            );
        }
        assert!(TileType::new(34).is_none());
        assert!(TileType::new(255).is_none());
    }

    #[test]
    fn suit_classification() {
        for i in 0..9u8 {
            let t = TileType::new(i).unwrap();
            assert_eq!(t.suit(), Suit::Manzu, "tile {i} should be Manzu");
            assert!(t.is_suited());
            assert!(!t.is_honor());
        }
        for i in 9..18u8 {
            assert_eq!(TileType::new(i).unwrap().suit(), Suit::Pinzu);
        }
        for i in 18..27u8 {
            assert_eq!(TileType::new(i).unwrap().suit(), Suit::Souzu);
        }
        for i in 27..34u8 {
            let t = TileType::new(i).unwrap();
            assert_eq!(t.suit(), Suit::Jihai, "tile {i} should be Jihai");
            assert!(t.is_honor());
            assert!(!t.is_suited());
        }
    }

    #[test]
    fn terminal_detection() {
        let terminals = [0, 8, 9, 17, 18, 26]; // 1m,9m,1p,9p,1s,9s
        for &i in &terminals {
            let t = TileType::new(i).unwrap();
            assert!(t.is_terminal(), "tile {i} should be terminal");
            assert!(t.is_terminal_or_honor());
            assert!(is_number_terminal(i));
        }
        let middles = [1, 4, 10, 14, 19, 23];
        for &i in &middles {
            assert!(!TileType::new(i).unwrap().is_terminal());
            assert!(!is_terminal_or_honor(i));
        }
        // Honors are not terminal but are terminal_or_honor
        for i in 27..34u8 {
            let t = TileType::new(i).unwrap();
            assert!(!t.is_terminal());
            assert!(t.is_terminal_or_honor());
            assert!(!is_number_terminal(i));
        }
    }

    #[test]
    fn yaochuu_matches_classification() {
        for i in 0..34u8 {
            assert_eq!(YAOCHUU.contains(&i), is_terminal_or_honor(i));
        }
    }

    #[test]
    fn green_tiles() {
        assert!(TileType::new(19).unwrap().is_green()); // 2s
        assert!(TileType::new(HATSU).unwrap().is_green());
        assert!(!TileType::new(18).unwrap().is_green()); // 1s
        assert!(!TileType::new(22).unwrap().is_green()); // 5s
        assert!(!TileType::new(24).unwrap().is_green()); // 7s
    }

    #[test]
    fn tile136_to_type_correct() {
        for t in 0..34u8 {
            for copy in 0..4u8 {
                assert_eq!(tile136_to_type(t * 4 + copy), t);
            }
        }
    }

    #[test]
    fn aka_detection_136() {
        assert!(tile136_is_aka(16)); // red 5m
        assert!(tile136_is_aka(52)); // red 5p
        assert!(tile136_is_aka(88)); // red 5s
        assert!(!tile136_is_aka(17)); // normal 5m
        assert!(!tile136_is_aka(53)); // normal 5p
        assert!(!tile136_is_aka(0)); // 1m
                                     // Red fives are rank-equal to the ordinary five
        assert_eq!(tile136_to_type(AKA_MANZU_136), 4);
        assert_eq!(tile136_to_type(AKA_PINZU_136), 13);
        assert_eq!(tile136_to_type(AKA_SOUZU_136), 22);
    }

    #[test]
    fn dora_successor_wraps_within_suit() {
        assert_eq!(next_dora_tile(0), 1); // 1m -> 2m
        assert_eq!(next_dora_tile(8), 0); // 9m -> 1m
        assert_eq!(next_dora_tile(17), 9); // 9p -> 1p
        assert_eq!(next_dora_tile(26), 18); // 9s -> 1s
        assert_eq!(next_dora_tile(NORTH), EAST); // N -> E
        assert_eq!(next_dora_tile(EAST), SOUTH);
        assert_eq!(next_dora_tile(CHUN), HAKU); // C -> P
        assert_eq!(next_dora_tile(HAKU), HATSU);
    }

    #[test]
    fn tile_type_display() {
        assert_eq!(format!("{}", TileType::new(0).unwrap()), "1m");
        assert_eq!(format!("{}", TileType::new(8).unwrap()), "9m");
        assert_eq!(format!("{}", TileType::new(27).unwrap()), "E");
        assert_eq!(format!("{}", TileType::new(33).unwrap()), "C");
        assert_eq!(tile_type_to_string(99), "??");
    }
}

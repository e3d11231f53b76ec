//! Tile wall and dead wall.
//!
//! Supplies the inputs the scoring engine consumes: drawn tiles, the
//! revealed dora indicators, the hidden ura indicators, and the count of
//! live tiles remaining (the caller turns that into the last-tile bonus
//! flags). Turn flow and dealing choreography live with the caller.

use rand::prelude::*;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

use crate::tile::NUM_TILES_136;

/// Dead wall size: four replacement tiles plus five dora stacks of two.
const DEAD_WALL: usize = 14;

/// Up to four quads can be declared per hand.
const MAX_RINSHAN: u8 = 4;

#[derive(Debug, Clone)]
pub struct Wall {
    /// Shuffled tiles; positions 0-13 form the dead wall.
    tiles: Vec<u8>,
    /// Next live draw position.
    draw_pos: usize,
    rinshan_draws: u8,
    /// Number of revealed dora indicators (1-5).
    dora_level: u8,
    /// Pre-extracted indicator tiles in order D1..D5.
    dora_indicator_tiles: [u8; 5],
    /// Pre-extracted ura indicator tiles in order U1..U5.
    ura_indicator_tiles: [u8; 5],
    pub wall_digest: String,
    salt: String,
    seed: Option<u64>,
    hand_index: u64,
}

impl Wall {
    pub fn new(seed: Option<u64>) -> Self {
        let mut wall = Self {
            tiles: Vec::new(),
            draw_pos: DEAD_WALL,
            rinshan_draws: 0,
            dora_level: 1,
            dora_indicator_tiles: [0; 5],
            ura_indicator_tiles: [0; 5],
            wall_digest: String::new(),
            salt: String::new(),
            seed,
            hand_index: 0,
        };
        wall.shuffle();
        wall
    }

    /// Shuffles a fresh 136-tile wall. With a seed, each hand derives its
    /// own sub-seed so successive hands differ while staying reproducible.
    pub fn shuffle(&mut self) {
        let mut w: Vec<u8> = (0..NUM_TILES_136 as u8).collect();

        let mut rng = if let Some(episode_seed) = self.seed {
            let hand_seed = splitmix64(episode_seed.wrapping_add(self.hand_index));
            StdRng::seed_from_u64(hand_seed)
        } else {
            StdRng::from_entropy()
        };
        self.hand_index = self.hand_index.wrapping_add(1);

        w.shuffle(&mut rng);
        self.salt = format!("{:016x}", rng.next_u64());

        // Commitment digest over salt + tile order, so a dealt wall can be
        // audited after the hand.
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        for &t in &w {
            hasher.update([t]);
        }
        self.wall_digest = format!("{:x}", hasher.finalize());

        self.tiles = w;

        // Dead wall layout: replacement draws at 0-3, dora stacks after.
        // Stack i holds the omote indicator at 4+2i and its ura at 5+2i.
        for i in 0..5 {
            self.dora_indicator_tiles[i] = self.tiles[4 + 2 * i];
            self.ura_indicator_tiles[i] = self.tiles[5 + 2 * i];
        }

        self.draw_pos = DEAD_WALL;
        self.rinshan_draws = 0;
        self.dora_level = 1;
    }

    /// Live tiles left to draw. Every replacement draw shortens the live
    /// wall by one from the tail.
    pub fn remaining(&self) -> usize {
        self.tiles.len() - self.draw_pos - self.rinshan_draws as usize
    }

    /// Draws the next live tile, or `None` when the wall is exhausted.
    pub fn draw(&mut self) -> Option<u8> {
        if self.remaining() == 0 {
            return None;
        }
        let t = self.tiles[self.draw_pos];
        self.draw_pos += 1;
        Some(t)
    }

    /// Replacement draw after a kan. Reveals the next dora indicator and
    /// refuses a fifth quad.
    pub fn rinshan_draw(&mut self) -> Option<u8> {
        if self.rinshan_draws >= MAX_RINSHAN || self.remaining() == 0 {
            return None;
        }
        let t = self.tiles[self.rinshan_draws as usize];
        self.rinshan_draws += 1;
        if self.dora_level < 5 {
            self.dora_level += 1;
        }
        Some(t)
    }

    /// Revealed dora indicator tiles, in reveal order.
    pub fn dora_indicators(&self) -> &[u8] {
        &self.dora_indicator_tiles[..self.dora_level as usize]
    }

    /// Ura indicators under the revealed stacks. Only surfaced to a winner
    /// who declared riichi; handing the slice out is the caller's call.
    pub fn ura_indicators(&self) -> &[u8] {
        &self.ura_indicator_tiles[..self.dora_level as usize]
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

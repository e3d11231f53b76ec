//! Input validation, candidate enumeration, and best-score selection.
//!
//! This is the public face of the engine: callers hand over the concealed
//! tiles (winning tile included), the declared melds, and the situational
//! `Conditions`; the engine is a pure function of those inputs.

use crate::agari::{self, Decomposition, Division, Mentsu};
use crate::errors::{ScoreError, ScoreResult};
use crate::rule::ScoringRule;
use crate::score;
use crate::tile::{self, is_terminal_or_honor, next_dora_tile, NUM_TILE_TYPES};
use crate::types::{Conditions, Hand, Meld, MeldType, WinResult, WinType};
use crate::yaku::{self, YakuContext, YakuEval};

/// Scores a hand under the default rule set. See [`score_hand_with_rule`].
pub fn score_hand(
    concealed_tiles: &[u8],
    melds: &[Meld],
    conditions: &Conditions,
) -> ScoreResult<WinResult> {
    score_hand_with_rule(concealed_tiles, melds, conditions, ScoringRule::default())
}

/// Convenience alias for [`score_hand`]: runs decomposition, scores every
/// candidate interpretation, and returns the maximum.
pub fn best_score(
    hand: &[u8],
    melds: &[Meld],
    conditions: &Conditions,
) -> ScoreResult<WinResult> {
    score_hand(hand, melds, conditions)
}

/// Parses a hand in text notation and scores it. The winning tile in
/// `conditions` refers to a tile already present in the concealed part.
pub fn score_hand_text(text: &str, conditions: &Conditions) -> ScoreResult<WinResult> {
    let (tiles, melds) = crate::parser::parse_hand(text)?;
    score_hand(&tiles, &melds, conditions)
}

/// Scores a hand: validates the input, enumerates every decomposition of
/// the concealed tiles, combines each with the declared melds, evaluates
/// yaku and points per candidate, and returns the highest-scoring one.
///
/// `concealed_tiles` are 136-format ids and include the winning tile.
pub fn score_hand_with_rule(
    concealed_tiles: &[u8],
    melds: &[Meld],
    conditions: &Conditions,
    rule: ScoringRule,
) -> ScoreResult<WinResult> {
    validate_input(concealed_tiles, melds, conditions)?;

    let is_dealer = conditions.is_dealer();

    // Nagashi mangan ignores the hand entirely: fixed mangan paid as a
    // self-draw.
    if conditions.nagashi_mangan {
        let score = score::calculate_points(5, 20, is_dealer, WinType::Tsumo, conditions.honba);
        return Ok(WinResult {
            yakuman: false,
            han: 5,
            fu: 20,
            yaku: vec!["nagashi mangan".to_string()],
            score,
        });
    }

    let concealed = Hand::from_tiles136(concealed_tiles);
    let win_tile = tile::tile136_to_type(conditions.win_tile);
    let ctx = build_context(concealed_tiles, melds, conditions, rule, &concealed);

    let decompositions = agari::decompose(&concealed);
    if decompositions.is_empty() {
        return Err(ScoreError::NotAWinningHand);
    }

    let mut best: Option<WinResult> = None;
    for deco in &decompositions {
        match deco {
            Decomposition::Standard(div) => {
                for wg in winning_groups(div, win_tile) {
                    let eval = yaku::evaluate_standard(div, melds, &concealed, &ctx, win_tile, wg);
                    consider(&mut best, eval, conditions, is_dealer);
                }
            }
            Decomposition::SevenPairs(_) => {
                let eval = yaku::evaluate_seven_pairs(&concealed, &ctx);
                consider(&mut best, eval, conditions, is_dealer);
            }
            Decomposition::ThirteenOrphans { pair } => {
                let eval = Some(yaku::evaluate_thirteen_orphans(*pair, win_tile, &ctx));
                consider(&mut best, eval, conditions, is_dealer);
            }
        }
    }

    best.ok_or(ScoreError::NoWinningInterpretation)
}

/// True when a player's discard row qualifies for nagashi mangan: every
/// discard a terminal or honor, and none claimed by another player.
pub fn nagashi_eligible(discards: &[u8], none_claimed: bool) -> bool {
    none_claimed
        && !discards.is_empty()
        && discards
            .iter()
            .all(|&t| is_terminal_or_honor(tile::tile136_to_type(t)))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Every group of the division the winning tile can sit in; `None` is the
/// pair. Evaluating each placement separately lets wait fu and concealed
/// triplet counts settle on the best reading.
fn winning_groups(div: &Division, win_tile: u8) -> Vec<Option<usize>> {
    let mut out = Vec::new();
    if div.head == win_tile {
        out.push(None);
    }
    for (idx, m) in div.body.iter().enumerate() {
        let contains = match *m {
            Mentsu::Koutsu(t) | Mentsu::Kantsu(t) => t == win_tile,
            Mentsu::Shuntsu(t) => win_tile >= t && win_tile <= t + 2,
        };
        if contains {
            out.push(Some(idx));
        }
    }
    out
}

fn consider(
    best: &mut Option<WinResult>,
    eval: Option<YakuEval>,
    conditions: &Conditions,
    is_dealer: bool,
) {
    let Some(eval) = eval else {
        return; // NoYaku: excluded from the candidate set
    };
    let score = score::calculate_points(
        eval.han,
        eval.fu,
        is_dealer,
        conditions.win_type,
        conditions.honba,
    );
    let replace = match best {
        Some(current) => score.primary() > current.score.primary(),
        None => true,
    };
    if replace {
        *best = Some(WinResult {
            yakuman: eval.yakuman,
            han: eval.han as u32,
            fu: eval.fu as u32,
            yaku: eval.yaku,
            score,
        });
    }
}

fn build_context(
    concealed_tiles: &[u8],
    melds: &[Meld],
    conditions: &Conditions,
    rule: ScoringRule,
    concealed: &Hand,
) -> YakuContext {
    // Dora are counted over the full hand, declared melds included (a quad
    // contributes all four copies).
    let mut full = concealed.clone();
    for m in melds {
        for &t in &m.tiles {
            full.add(tile::tile136_to_type(t));
        }
    }

    let count_matches = |indicators: &[u8]| -> u8 {
        indicators
            .iter()
            .map(|&ind| full.counts[next_dora_tile(tile::tile136_to_type(ind)) as usize])
            .sum()
    };

    let dora_count = count_matches(&conditions.dora_indicators);
    // Hidden indicators only come alive under riichi.
    let ura_dora_count = if conditions.riichi {
        count_matches(&conditions.ura_indicators)
    } else {
        0
    };
    let aka_dora_count = concealed_tiles
        .iter()
        .chain(melds.iter().flat_map(|m| m.tiles.iter()))
        .filter(|&&t| tile::tile136_is_aka(t))
        .count() as u8;

    YakuContext {
        win_type: conditions.win_type,
        is_menzen: melds.iter().all(|m| !m.opened),
        riichi: conditions.riichi,
        double_riichi: conditions.double_riichi,
        ippatsu: conditions.ippatsu,
        haitei: conditions.haitei,
        houtei: conditions.houtei,
        rinshan: conditions.rinshan,
        chankan: conditions.chankan,
        first_turn: conditions.first_turn,
        round_wind: conditions.round_wind.tile(),
        seat_wind: conditions.seat_wind.tile(),
        dora_count,
        ura_dora_count,
        aka_dora_count,
        rule,
    }
}

fn validate_input(
    concealed_tiles: &[u8],
    melds: &[Meld],
    conditions: &Conditions,
) -> ScoreResult<()> {
    for m in melds {
        validate_meld(m)?;
    }

    let effective: usize =
        concealed_tiles.len() + melds.iter().map(|m| m.effective_size()).sum::<usize>();
    if effective != 14 {
        return Err(ScoreError::InvalidInput {
            message: format!(
                "hand must resolve to 14 tiles, got {} concealed + {} melds",
                concealed_tiles.len(),
                melds.len()
            ),
        });
    }

    // Physical availability: at most four copies of any tile type across
    // the concealed part and the melds.
    let mut counts = [0u8; NUM_TILE_TYPES];
    let all = concealed_tiles
        .iter()
        .chain(melds.iter().flat_map(|m| m.tiles.iter()));
    for &t in all {
        if t as usize >= tile::NUM_TILES_136 {
            return Err(ScoreError::InvalidInput {
                message: format!("tile id {t} out of range"),
            });
        }
        let ty = tile::tile136_to_type(t) as usize;
        counts[ty] += 1;
        if counts[ty] > 4 {
            return Err(ScoreError::InvalidInput {
                message: format!(
                    "more than four copies of {}",
                    tile::tile_type_to_string(ty as u8)
                ),
            });
        }
    }

    let win_type_tile = tile::tile136_to_type(conditions.win_tile);
    if !concealed_tiles
        .iter()
        .any(|&t| tile::tile136_to_type(t) == win_type_tile)
    {
        return Err(ScoreError::InvalidInput {
            message: format!(
                "winning tile {} is not in the concealed hand",
                tile::tile_type_to_string(win_type_tile)
            ),
        });
    }
    Ok(())
}

fn validate_meld(m: &Meld) -> ScoreResult<()> {
    let mut types: Vec<u8> = m.tiles.iter().map(|&t| tile::tile136_to_type(t)).collect();
    types.sort_unstable();
    let ok = match m.meld_type {
        MeldType::Chi => {
            types.len() == 3
                && types[2] < 27
                && types[0] + 1 == types[1]
                && types[1] + 1 == types[2]
                && types[0] / 9 == types[2] / 9
        }
        MeldType::Pon => types.len() == 3 && types[0] == types[2],
        MeldType::Daiminkan | MeldType::Ankan | MeldType::Kakan => {
            types.len() == 4 && types[0] == types[3]
        }
    };
    if ok {
        Ok(())
    } else {
        Err(ScoreError::InvalidInput {
            message: format!("malformed {:?} meld {:?}", m.meld_type, m.tiles),
        })
    }
}

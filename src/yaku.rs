//! Yaku evaluation and fu computation for one candidate decomposition.
//!
//! Evaluation order: blessings short-circuit everything, the standalone
//! yakuman are tried in a fixed order and the first match wins, and only
//! then are the regular yaku accumulated additively. A candidate that ends
//! the regular pass with zero han is rejected before dora are counted, so
//! dora alone never qualify a hand.

use crate::agari::{Division, Mentsu};
use crate::rule::ScoringRule;
use crate::tile::{
    self, is_dragon, is_honor, is_number_terminal, is_terminal_or_honor, CHUN, EAST, HAKU, HATSU,
    NORTH,
};
use crate::types::{Hand, Meld, MeldType, WinType};

/// Situational inputs for one evaluation, derived from `Conditions` by the
/// hand evaluator. Winds are tile types (27-30); dora counts are already
/// tallied over the full hand, with ura gated on riichi.
#[derive(Debug, Clone)]
pub struct YakuContext {
    pub win_type: WinType,
    pub is_menzen: bool,
    pub riichi: bool,
    pub double_riichi: bool,
    pub ippatsu: bool,
    pub haitei: bool,
    pub houtei: bool,
    pub rinshan: bool,
    pub chankan: bool,
    pub first_turn: bool,
    pub round_wind: u8,
    pub seat_wind: u8,
    pub dora_count: u8,
    pub ura_dora_count: u8,
    pub aka_dora_count: u8,
    pub rule: ScoringRule,
}

impl YakuContext {
    #[inline]
    fn is_tsumo(&self) -> bool {
        self.win_type == WinType::Tsumo
    }
}

/// Han/fu outcome of one candidate, before point conversion.
#[derive(Debug, Clone)]
pub struct YakuEval {
    pub han: u8,
    pub fu: u8,
    pub yakuman: bool,
    pub yaku: Vec<String>,
}

impl YakuEval {
    fn yakuman(name: &str, han: u8) -> Self {
        Self {
            han,
            fu: 20,
            yakuman: true,
            yaku: vec![name.to_string()],
        }
    }
}

/// Index of the group completed by the winning tile: `None` for the pair,
/// `Some(i)` for `body[i]`.
pub type WinGroup = Option<usize>;

// ---------------------------------------------------------------------------
// Entry points, one per decomposition shape
// ---------------------------------------------------------------------------

/// Evaluates a standard division combined with the declared melds.
/// `hand` holds the concealed tiles including the winning tile; `win_tile`
/// is a tile type. Returns `None` when no yaku qualifies the candidate.
pub fn evaluate_standard(
    div: &Division,
    melds: &[Meld],
    hand: &Hand,
    ctx: &YakuContext,
    win_tile: u8,
    wg: WinGroup,
) -> Option<YakuEval> {
    if let Some(name) = blessing(ctx) {
        return Some(YakuEval::yakuman(name, 13));
    }
    if let Some(eval) = check_yakuman(div, melds, hand, ctx, win_tile, wg) {
        return Some(eval);
    }

    let mut han: u8 = 0;
    let mut yaku: Vec<String> = Vec::new();
    fn push(yaku: &mut Vec<String>, han: &mut u8, name: &str, value: u8) {
        *han += value;
        yaku.push(name.to_string());
    }

    apply_static_yaku(ctx, &mut han, &mut yaku);

    // Flushes
    if is_chinitsu(hand, melds) {
        let v = if ctx.is_menzen { 6 } else { 5 };
        push(&mut yaku, &mut han, "chinitsu", v);
    } else if is_honitsu(hand, melds) {
        push(&mut yaku, &mut han, "honitsu", 2);
    }

    // Terminal-heavy family, mutually exclusive
    if is_honroutou(hand, melds) {
        push(&mut yaku, &mut han, "honroutou", 2);
    } else if is_junchan(div, melds) {
        let v = if ctx.is_menzen { 3 } else { 2 };
        push(&mut yaku, &mut han, "junchan taiyai", v);
    } else if is_chanta(div, melds) {
        let v = if ctx.is_menzen { 2 } else { 1 };
        push(&mut yaku, &mut han, "chanta", v);
    }

    // Little three dragons
    let dragon_triplets = [HAKU, HATSU, CHUN]
        .iter()
        .filter(|&&d| has_triplet(div, melds, d))
        .count();
    if dragon_triplets == 2 && is_dragon(div.head) {
        push(&mut yaku, &mut han, "shou sangen", 2);
    }

    // All triplets
    let triplet_total = triplet_types(div, melds).count();
    if triplet_total == 4 {
        push(&mut yaku, &mut han, "toitoi hou", 2);
    }

    // Three quads
    if melds.iter().filter(|m| m.meld_type.is_kan()).count() == 3 {
        push(&mut yaku, &mut han, "san kan tsu", 2);
    }

    // Three concealed triplets
    if concealed_triplet_count(div, melds, ctx, wg) == 3 {
        push(&mut yaku, &mut han, "san ankou", 2);
    }

    // Triple triplet across the three suits
    if is_sanshoku_doukou(div, melds) {
        push(&mut yaku, &mut han, "san shoku dokuu", 2);
    }

    // Value-tile triplets: one han per dragon/round-wind/seat-wind triplet.
    // Round and seat wind are checked separately, so a double wind counts
    // twice.
    for t in [HAKU, HATSU, CHUN, ctx.round_wind, ctx.seat_wind] {
        if has_triplet(div, melds, t) {
            push(&mut yaku, &mut han, "fanpai", 1);
        }
    }

    // Pure straight
    if is_ittsu(div, melds) {
        let v = if ctx.is_menzen { 2 } else { 1 };
        push(&mut yaku, &mut han, "itsu", v);
    }

    // Mixed triple sequence
    if is_sanshoku_doujun(div, melds) {
        let v = if ctx.is_menzen { 2 } else { 1 };
        push(&mut yaku, &mut han, "san shoku doujun", v);
    }

    // Pure double sequences (concealed only)
    if ctx.is_menzen {
        match identical_sequence_pairs(div) {
            1 => push(&mut yaku, &mut han, "iipeikou", 1),
            2 => push(&mut yaku, &mut han, "ryan peikou", 3),
            _ => {}
        }
    }

    let pinfu = is_pinfu(div, melds, ctx, win_tile, wg);
    if pinfu {
        push(&mut yaku, &mut han, "pinfu", 1);
    }

    // All simples
    if all_tiles(hand, melds, |t| !is_terminal_or_honor(t)) {
        push(&mut yaku, &mut han, "tanyao chuu", 1);
    }

    if ctx.is_menzen && ctx.is_tsumo() {
        push(&mut yaku, &mut han, "menzen tsumo", 1);
    }

    // A formally complete but yaku-less hand is not a win; dora never
    // rescue it.
    if han == 0 {
        return None;
    }

    let fu = if pinfu {
        if ctx.is_tsumo() {
            20
        } else {
            30
        }
    } else {
        calculate_fu(div, melds, ctx, win_tile, wg)
    };

    apply_dora(ctx, &mut han, &mut yaku);

    Some(YakuEval {
        han,
        fu,
        yakuman: false,
        yaku,
    })
}

/// Evaluates the seven-pairs shape (always concealed, fu fixed at 25).
pub fn evaluate_seven_pairs(hand: &Hand, ctx: &YakuContext) -> Option<YakuEval> {
    if let Some(name) = blessing(ctx) {
        return Some(YakuEval::yakuman(name, 13));
    }
    // Seven pairs of honors is the all-honors yakuman; the other tile-set
    // yakuman need more than the six terminal / green types and can never
    // take this shape.
    if all_tiles(hand, &[], is_honor) {
        return Some(YakuEval::yakuman("tsuu iisou", 13));
    }

    let mut han: u8 = 2;
    let mut yaku = Vec::new();

    apply_static_yaku(ctx, &mut han, &mut yaku);
    if is_chinitsu(hand, &[]) {
        han += 6;
        yaku.push("chinitsu".to_string());
    } else if is_honitsu(hand, &[]) {
        han += 2;
        yaku.push("honitsu".to_string());
    }
    if all_tiles(hand, &[], is_terminal_or_honor) {
        han += 2;
        yaku.push("honroutou".to_string());
    }
    yaku.push("chii toitsu".to_string());
    if all_tiles(hand, &[], |t| !is_terminal_or_honor(t)) {
        han += 1;
        yaku.push("tanyao chuu".to_string());
    }
    if ctx.is_tsumo() {
        han += 1;
        yaku.push("menzen tsumo".to_string());
    }

    apply_dora(ctx, &mut han, &mut yaku);

    Some(YakuEval {
        han,
        fu: 25,
        yakuman: false,
        yaku,
    })
}

/// Evaluates the thirteen-orphans shape. `pair` is the doubled tile type;
/// completing the hand on the pair tile is the thirteen-sided wait.
pub fn evaluate_thirteen_orphans(pair: u8, win_tile: u8, ctx: &YakuContext) -> YakuEval {
    if let Some(name) = blessing(ctx) {
        return YakuEval::yakuman(name, 13);
    }
    let double = pair == win_tile && ctx.rule.is_kokushi_13_wait_double;
    YakuEval::yakuman("kokushi musou", if double { 26 } else { 13 })
}

// ---------------------------------------------------------------------------
// Blessings and yakuman
// ---------------------------------------------------------------------------

/// Win on the very first uninterrupted turn: heavenly (dealer self-draw),
/// earthly (non-dealer self-draw), or human (discard).
fn blessing(ctx: &YakuContext) -> Option<&'static str> {
    if !ctx.first_turn {
        return None;
    }
    Some(match ctx.win_type {
        WinType::Tsumo if ctx.seat_wind == EAST => "tenhou",
        WinType::Tsumo => "chihou",
        WinType::Ron => "renhou",
    })
}

/// The standalone yakuman, tried in a fixed order; the first match wins
/// rather than the largest or the sum.
fn check_yakuman(
    div: &Division,
    melds: &[Meld],
    hand: &Hand,
    ctx: &YakuContext,
    win_tile: u8,
    wg: WinGroup,
) -> Option<YakuEval> {
    // Big four winds
    let wind_triplets = (EAST..=NORTH).filter(|&w| has_triplet(div, melds, w)).count();
    if wind_triplets == 4 {
        let han = if ctx.rule.is_daisuushii_double { 26 } else { 13 };
        return Some(YakuEval::yakuman("dai suushii", han));
    }
    // Little four winds
    if wind_triplets == 3 && (EAST..=NORTH).contains(&div.head) {
        return Some(YakuEval::yakuman("shou suushii", 13));
    }
    // Big three dragons
    if [HAKU, HATSU, CHUN]
        .iter()
        .all(|&d| has_triplet(div, melds, d))
    {
        return Some(YakuEval::yakuman("dai sangen", 13));
    }
    // All honors
    if all_tiles(hand, melds, is_honor) {
        return Some(YakuEval::yakuman("tsuu iisou", 13));
    }
    // All terminals
    if all_tiles(hand, melds, is_number_terminal) {
        return Some(YakuEval::yakuman("chinrouto", 13));
    }
    // All green
    if all_tiles(hand, melds, |t| tile::GREEN_TILES.contains(&t)) {
        return Some(YakuEval::yakuman("ryuu iisou", 13));
    }
    // Four quads
    if melds.iter().filter(|m| m.meld_type.is_kan()).count() == 4 {
        return Some(YakuEval::yakuman("suu kan tsu", 13));
    }
    // Four concealed triplets, double when won on the pair wait
    if concealed_triplet_count(div, melds, ctx, wg) == 4 {
        let double = wg.is_none() && ctx.rule.is_suuankou_tanki_double;
        return Some(YakuEval::yakuman("suu ankou", if double { 26 } else { 13 }));
    }
    // Nine gates, double on the pure nine-sided wait
    if ctx.is_menzen && melds.is_empty() && is_chuuren(hand) {
        let double = is_chuuren_9_wait(hand, win_tile) && ctx.rule.is_junsei_chuuren_double;
        return Some(YakuEval::yakuman(
            "chuuren pooto",
            if double { 26 } else { 13 },
        ));
    }
    None
}

// ---------------------------------------------------------------------------
// Regular yaku helpers
// ---------------------------------------------------------------------------

fn apply_static_yaku(ctx: &YakuContext, han: &mut u8, yaku: &mut Vec<String>) {
    let mut add = |name: &str, v: u8| {
        *han += v;
        yaku.push(name.to_string());
    };
    if ctx.riichi {
        add("riichi", 1);
    }
    if ctx.ippatsu {
        add("ippatsu", 1);
    }
    // Stacks on top of the riichi han for a total of two.
    if ctx.double_riichi {
        add("daburu riichi", 1);
    }
    if ctx.rinshan && ctx.is_tsumo() {
        add("rinchan kaihou", 1);
    }
    if ctx.chankan && !ctx.is_tsumo() {
        add("chan kan", 1);
    }
    if ctx.haitei && ctx.is_tsumo() {
        add("haitei", 1);
    }
    if ctx.houtei && !ctx.is_tsumo() {
        add("houtei", 1);
    }
}

fn apply_dora(ctx: &YakuContext, han: &mut u8, yaku: &mut Vec<String>) {
    for _ in 0..ctx.dora_count {
        *han += 1;
        yaku.push("dora".to_string());
    }
    for _ in 0..ctx.ura_dora_count {
        *han += 1;
        yaku.push("ura dora".to_string());
    }
    for _ in 0..ctx.aka_dora_count {
        *han += 1;
        yaku.push("aka dora".to_string());
    }
}

/// True when every tile of the scored hand (concealed counts plus melds)
/// satisfies the predicate.
fn all_tiles(hand: &Hand, melds: &[Meld], pred: impl Fn(u8) -> bool) -> bool {
    hand.counts
        .iter()
        .enumerate()
        .all(|(i, &c)| c == 0 || pred(i as u8))
        && melds
            .iter()
            .all(|m| m.tiles.iter().all(|&t| pred(tile::tile136_to_type(t))))
}

/// Tile types of every triplet-like group: division triplets/quads plus
/// declared pon/kan melds.
fn triplet_types<'a>(div: &'a Division, melds: &'a [Meld]) -> impl Iterator<Item = u8> + 'a {
    div.body
        .iter()
        .filter_map(|m| match m {
            Mentsu::Koutsu(t) | Mentsu::Kantsu(t) => Some(*t),
            Mentsu::Shuntsu(_) => None,
        })
        .chain(
            melds
                .iter()
                .filter(|m| m.meld_type != MeldType::Chi)
                .map(|m| m.tile_type()),
        )
}

fn has_triplet(div: &Division, melds: &[Meld], t: u8) -> bool {
    triplet_types(div, melds).any(|x| x == t)
}

/// Sequence start types from the division and the declared chi melds.
fn sequence_types<'a>(div: &'a Division, melds: &'a [Meld]) -> impl Iterator<Item = u8> + 'a {
    div.body
        .iter()
        .filter_map(|m| match m {
            Mentsu::Shuntsu(t) => Some(*t),
            _ => None,
        })
        .chain(
            melds
                .iter()
                .filter(|m| m.meld_type == MeldType::Chi)
                .map(|m| m.tile_type()),
        )
}

/// Concealed triplets: division triplets (a triplet finished by discard is
/// open) plus ankan melds.
fn concealed_triplet_count(div: &Division, melds: &[Meld], ctx: &YakuContext, wg: WinGroup) -> usize {
    let mut count = 0;
    for (idx, m) in div.body.iter().enumerate() {
        if matches!(m, Mentsu::Koutsu(_) | Mentsu::Kantsu(_)) {
            if !ctx.is_tsumo() && wg == Some(idx) {
                continue;
            }
            count += 1;
        }
    }
    count + melds.iter().filter(|m| m.meld_type == MeldType::Ankan).count()
}

fn is_chinitsu(hand: &Hand, melds: &[Meld]) -> bool {
    let mut suits = [false; 3];
    let mut mark = |t: u8| -> bool {
        if is_honor(t) {
            return false;
        }
        suits[(t / 9) as usize] = true;
        true
    };
    for (i, &c) in hand.counts.iter().enumerate() {
        if c > 0 && !mark(i as u8) {
            return false;
        }
    }
    for m in melds {
        for &t in &m.tiles {
            if !mark(tile::tile136_to_type(t)) {
                return false;
            }
        }
    }
    suits.iter().filter(|&&b| b).count() == 1
}

fn is_honitsu(hand: &Hand, melds: &[Meld]) -> bool {
    let mut suits = [false; 3];
    let mut has_honor = false;
    let mut mark = |t: u8| {
        if is_honor(t) {
            has_honor = true;
        } else {
            suits[(t / 9) as usize] = true;
        }
    };
    for (i, &c) in hand.counts.iter().enumerate() {
        if c > 0 {
            mark(i as u8);
        }
    }
    for m in melds {
        for &t in &m.tiles {
            mark(tile::tile136_to_type(t));
        }
    }
    suits.iter().filter(|&&b| b).count() == 1 && has_honor
}

fn is_honroutou(hand: &Hand, melds: &[Meld]) -> bool {
    all_tiles(hand, melds, is_terminal_or_honor)
}

/// Every group, the pair included, contains a number terminal; honors break
/// it.
fn is_junchan(div: &Division, melds: &[Meld]) -> bool {
    if !is_number_terminal(div.head) {
        return false;
    }
    for m in &div.body {
        let ok = match *m {
            Mentsu::Koutsu(t) | Mentsu::Kantsu(t) => is_number_terminal(t),
            Mentsu::Shuntsu(t) => is_number_terminal(t) || is_number_terminal(t + 2),
        };
        if !ok {
            return false;
        }
    }
    melds.iter().all(|m| {
        m.tiles
            .iter()
            .any(|&t| is_number_terminal(tile::tile136_to_type(t)))
            && m.tiles.iter().all(|&t| !is_honor(tile::tile136_to_type(t)))
    })
}

/// Every group contains a terminal or honor, with at least one honor
/// present (otherwise it grades up to junchan).
fn is_chanta(div: &Division, melds: &[Meld]) -> bool {
    if !is_terminal_or_honor(div.head) {
        return false;
    }
    let mut has_honor = is_honor(div.head);
    for m in &div.body {
        let ok = match *m {
            Mentsu::Koutsu(t) | Mentsu::Kantsu(t) => {
                if is_honor(t) {
                    has_honor = true;
                }
                is_terminal_or_honor(t)
            }
            Mentsu::Shuntsu(t) => is_number_terminal(t) || is_number_terminal(t + 2),
        };
        if !ok {
            return false;
        }
    }
    for m in melds {
        let types: Vec<u8> = m.tiles.iter().map(|&t| tile::tile136_to_type(t)).collect();
        if !types.iter().any(|&t| is_terminal_or_honor(t)) {
            return false;
        }
        if types.iter().any(|&t| is_honor(t)) {
            has_honor = true;
        }
    }
    has_honor
}

fn is_ittsu(div: &Division, melds: &[Meld]) -> bool {
    for suit_start in [0u8, 9, 18] {
        let mut thirds = [false; 3];
        for t in sequence_types(div, melds) {
            if t >= suit_start && t <= suit_start + 6 && (t - suit_start) % 3 == 0 {
                thirds[((t - suit_start) / 3) as usize] = true;
            }
        }
        if thirds.iter().all(|&b| b) {
            return true;
        }
    }
    false
}

fn is_sanshoku_doujun(div: &Division, melds: &[Meld]) -> bool {
    for n in 0..7u8 {
        let mut suits = [false; 3];
        for t in sequence_types(div, melds) {
            if t % 9 == n && t < 27 {
                suits[(t / 9) as usize] = true;
            }
        }
        if suits.iter().all(|&b| b) {
            return true;
        }
    }
    false
}

fn is_sanshoku_doukou(div: &Division, melds: &[Meld]) -> bool {
    for n in 0..9u8 {
        let mut suits = [false; 3];
        for t in triplet_types(div, melds) {
            if t < 27 && t % 9 == n {
                suits[(t / 9) as usize] = true;
            }
        }
        if suits.iter().all(|&b| b) {
            return true;
        }
    }
    false
}

/// Number of identical sequence pairs in the division (1 = iipeikou,
/// 2 = ryanpeikou).
fn identical_sequence_pairs(div: &Division) -> usize {
    let mut starts: Vec<u8> = div
        .body
        .iter()
        .filter_map(|m| match m {
            Mentsu::Shuntsu(t) => Some(*t),
            _ => None,
        })
        .collect();
    starts.sort_unstable();
    let mut pairs = 0;
    let mut i = 0;
    while i + 1 < starts.len() {
        if starts[i] == starts[i + 1] {
            pairs += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

fn is_value_tile(t: u8, ctx: &YakuContext) -> bool {
    is_dragon(t) || t == ctx.round_wind || t == ctx.seat_wind
}

/// Concealed hand of four sequences with a valueless pair, won on a
/// two-sided wait.
fn is_pinfu(div: &Division, melds: &[Meld], ctx: &YakuContext, win_tile: u8, wg: WinGroup) -> bool {
    if !ctx.is_menzen || !melds.is_empty() {
        return false;
    }
    if div
        .body
        .iter()
        .any(|m| !matches!(m, Mentsu::Shuntsu(_)))
    {
        return false;
    }
    if is_value_tile(div.head, ctx) {
        return false;
    }
    let Some(idx) = wg else {
        return false; // pair wait
    };
    let Mentsu::Shuntsu(t) = div.body[idx] else {
        return false;
    };
    // Two-sided: the winning tile sits at either end and the wait is not an
    // edge wait on 1-2-3 / 7-8-9.
    (win_tile == t && t % 9 != 6) || (win_tile == t + 2 && t % 9 != 0)
}

/// Nine gates: one suit only, 1112345678999 plus one extra of the suit.
fn is_chuuren(hand: &Hand) -> bool {
    let mut suit = None;
    let mut counts = [0u8; 9];
    for (i, &c) in hand.counts.iter().enumerate() {
        if c == 0 {
            continue;
        }
        let t = i as u8;
        if is_honor(t) {
            return false;
        }
        match suit {
            Some(s) if s != t / 9 => return false,
            None => suit = Some(t / 9),
            _ => {}
        }
        counts[(t % 9) as usize] = c;
    }
    counts[0] >= 3 && counts[8] >= 3 && !counts[1..8].contains(&0)
}

/// Pure nine-sided wait: before the winning tile, the hand was exactly
/// 1112345678999.
fn is_chuuren_9_wait(hand: &Hand, win_tile: u8) -> bool {
    if is_honor(win_tile) {
        return false;
    }
    let n = (win_tile % 9) as usize;
    let expected = if n == 0 || n == 8 { 4 } else { 2 };
    hand.counts[win_tile as usize] == expected
}

// ---------------------------------------------------------------------------
// Fu
// ---------------------------------------------------------------------------

/// Fu for a non-pinfu standard division. Seven pairs never reach this; the
/// caller fixes those at 25.
fn calculate_fu(div: &Division, melds: &[Meld], ctx: &YakuContext, win_tile: u8, wg: WinGroup) -> u8 {
    let mut fu: u8 = 20;
    if ctx.is_menzen && !ctx.is_tsumo() {
        fu += 10;
    }

    for (idx, m) in div.body.iter().enumerate() {
        let base = match m {
            // A triplet finished by discard counts as open.
            Mentsu::Koutsu(t) => {
                let open = !ctx.is_tsumo() && wg == Some(idx);
                let b = if open { 2 } else { 4 };
                if is_terminal_or_honor(*t) {
                    b * 2
                } else {
                    b
                }
            }
            Mentsu::Kantsu(t) => {
                if is_terminal_or_honor(*t) {
                    32
                } else {
                    16
                }
            }
            Mentsu::Shuntsu(_) => 0,
        };
        fu += base;
    }
    for m in melds {
        let base: u8 = match m.meld_type {
            MeldType::Chi => 0,
            MeldType::Pon => 2,
            MeldType::Daiminkan | MeldType::Kakan => 8,
            MeldType::Ankan => 16,
        };
        if base > 0 {
            let t = m.tile_type();
            fu += if is_terminal_or_honor(t) { base * 2 } else { base };
        }
    }

    if is_value_tile(div.head, ctx) {
        fu += 2;
    }

    if ctx.is_tsumo() {
        fu += 2;
    }
    // An open hand still at the 20-fu floor gets the open-pinfu bump.
    if !ctx.is_menzen && fu == 20 {
        fu += 2;
    }

    fu += wait_fu(div, ctx, win_tile, wg);

    fu.div_ceil(10) * 10
}

/// +2 for a single-sided wait: an edge or closed wait on a sequence, or a
/// pair/triplet completed by the discard itself.
fn wait_fu(div: &Division, ctx: &YakuContext, win_tile: u8, wg: WinGroup) -> u8 {
    match wg {
        None => {
            if !ctx.is_tsumo() {
                2
            } else {
                0
            }
        }
        Some(idx) => match div.body[idx] {
            Mentsu::Shuntsu(t) => {
                let kanchan = win_tile == t + 1;
                let penchan = (win_tile == t + 2 && t % 9 == 0) || (win_tile == t && t % 9 == 6);
                if kanchan || penchan {
                    2
                } else {
                    0
                }
            }
            Mentsu::Koutsu(_) | Mentsu::Kantsu(_) => {
                if !ctx.is_tsumo() {
                    2
                } else {
                    0
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agari;

    fn ctx() -> YakuContext {
        YakuContext {
            win_type: WinType::Ron,
            is_menzen: true,
            riichi: false,
            double_riichi: false,
            ippatsu: false,
            haitei: false,
            houtei: false,
            rinshan: false,
            chankan: false,
            first_turn: false,
            round_wind: EAST,
            seat_wind: EAST,
            dora_count: 0,
            ura_dora_count: 0,
            aka_dora_count: 0,
            rule: ScoringRule::default(),
        }
    }

    fn division_of(types: &[u8]) -> (Division, Hand) {
        let hand = Hand::from_types(types);
        let decos = agari::decompose(&hand);
        for d in decos {
            if let agari::Decomposition::Standard(div) = d {
                return (div, hand);
            }
        }
        panic!("no standard division for {types:?}");
    }

    #[test]
    fn pinfu_requires_two_sided_wait() {
        // 234m 345p 567s 678s 99p, winning 2m (edge of 234m = two-sided)
        let (div, _) = division_of(&[1, 2, 3, 11, 12, 13, 22, 23, 24, 23, 24, 25, 16, 16]);
        let wg = div
            .body
            .iter()
            .position(|m| matches!(m, Mentsu::Shuntsu(1)));
        assert!(is_pinfu(&div, &[], &ctx(), 1, wg));
        // Closed wait on the middle tile is not pinfu
        assert!(!is_pinfu(&div, &[], &ctx(), 2, wg));
    }

    #[test]
    fn pinfu_rejects_value_pair() {
        // 234m 345p 567s 678s EE
        let (div, _) = division_of(&[1, 2, 3, 11, 12, 13, 22, 23, 24, 23, 24, 25, 27, 27]);
        let wg = div
            .body
            .iter()
            .position(|m| matches!(m, Mentsu::Shuntsu(1)));
        assert!(!is_pinfu(&div, &[], &ctx(), 1, wg));
    }

    #[test]
    fn fu_closed_ron_with_kanchan() {
        // 123m 456m 789m 135p? -- use 123m 456m 789m 24p+3p kanchan, 11s pair
        let (div, _) = division_of(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 12, 18, 18]);
        // win on 3p (tile 11) as the middle of 234p
        let wg = div
            .body
            .iter()
            .position(|m| matches!(m, Mentsu::Shuntsu(10)));
        let fu = calculate_fu(&div, &[], &ctx(), 11, wg);
        // 20 base + 10 menzen ron + 2 kanchan = 32 -> 40
        assert_eq!(fu, 40);
    }

    #[test]
    fn fu_concealed_honor_triplet() {
        // 111z triplet: concealed honor triplet is 8 fu
        let (div, _) = division_of(&[0, 1, 2, 3, 4, 5, 9, 10, 11, 27, 27, 27, 18, 18]);
        let mut c = ctx();
        c.win_type = WinType::Tsumo;
        // win on 1m inside 123m
        let wg = div
            .body
            .iter()
            .position(|m| matches!(m, Mentsu::Shuntsu(0)));
        let fu = calculate_fu(&div, &[], &c, 0, wg);
        // 20 + 8 (concealed honor triplet) + 2 tsumo = 30
        assert_eq!(fu, 30);
    }

    #[test]
    fn ron_into_triplet_counts_open() {
        let (div, _) = division_of(&[0, 1, 2, 3, 4, 5, 9, 10, 11, 20, 20, 20, 18, 18]);
        let wg = div
            .body
            .iter()
            .position(|m| matches!(m, Mentsu::Koutsu(20)));
        assert_eq!(concealed_triplet_count(&div, &[], &ctx(), wg), 0);
        let mut c = ctx();
        c.win_type = WinType::Tsumo;
        assert_eq!(concealed_triplet_count(&div, &[], &c, wg), 1);
    }

    #[test]
    fn ittsu_detected_across_division_and_melds() {
        // 123m 456m 789m concealed + pair + one chi meld of another suit
        let (div, _) = division_of(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9]);
        let meld = Meld::new(MeldType::Chi, vec![9 * 4, 10 * 4, 11 * 4], true);
        assert!(is_ittsu(&div, &[meld]));
    }

    #[test]
    fn chuuren_shape() {
        let h = Hand::from_types(&[0, 0, 0, 1, 2, 3, 4, 4, 5, 6, 7, 8, 8, 8]);
        assert!(is_chuuren(&h));
        // 9-wait: winning tile 5m means the hand held exactly two 5m after
        // the win, so it was the pure shape before
        assert!(is_chuuren_9_wait(&h, 4));
        assert!(!is_chuuren_9_wait(&h, 0));
        // mixed suit breaks it
        let h2 = Hand::from_types(&[0, 0, 0, 1, 2, 3, 4, 4, 5, 6, 7, 8, 8, 9]);
        assert!(!is_chuuren(&h2));
    }

    #[test]
    fn sanshoku_doujun() {
        // 234m 234p 234s + 99m pair + 567m
        let (div, _) = division_of(&[1, 2, 3, 4, 5, 6, 10, 11, 12, 19, 20, 21, 8, 8]);
        assert!(is_sanshoku_doujun(&div, &[]));
    }

    #[test]
    fn identical_pairs_counting() {
        let (div, _) = division_of(&[0, 0, 1, 1, 2, 2, 12, 12, 13, 13, 14, 14, 24, 24]);
        assert_eq!(identical_sequence_pairs(&div), 2);
    }
}

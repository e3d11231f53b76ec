//! Fu/han to point-transfer conversion.

use serde::{Deserialize, Serialize};

use crate::types::WinType;

/// Point transfer for one win. For discard wins the whole amount is
/// `pay_ron`; for self-draw wins the per-opponent amounts are split into the
/// dealer share and the non-dealer share (a dealer win leaves `pay_tsumo_oya`
/// at zero and collects `pay_tsumo_ko` from each of the three opponents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub total: u32,
    pub pay_ron: u32,
    pub pay_tsumo_oya: u32,
    pub pay_tsumo_ko: u32,
}

impl Score {
    /// The figure used to rank candidate interpretations: the ron payment,
    /// or the per-non-dealer payment for self-draw wins.
    pub fn primary(&self) -> u32 {
        match self.pay_ron {
            0 => self.pay_tsumo_ko,
            ron => ron,
        }
    }
}

/// Converts a (fu, han) pair into the final point transfer.
///
/// Fixed bases bypass the fu formula from mangan upward; below that the base
/// is `fu * 2^(2 + han)` with fu first rounded up to the next multiple of 10
/// (25 fu for seven pairs is exempt). There is deliberately no mangan cap on
/// the exponential formula, so 4 han 40 fu stays at a 2560 base. Double
/// yakuman arrives here as an already-doubled han value of 26 or more.
pub fn calculate_points(han: u8, fu: u8, is_dealer: bool, win_type: WinType, honba: u32) -> Score {
    let base: u32 = match han {
        26.. => 16000,
        13..=25 => 12000,
        11 | 12 => 6000,
        8..=10 => 4000,
        6 | 7 => 3000,
        5 => 2000,
        _ => (round_up_fu(fu) as u32) * 2u32.pow(2 + han as u32),
    };

    match win_type {
        WinType::Ron => {
            let multiplier = if is_dealer { 6 } else { 4 };
            let total = ceil_100(base * multiplier) + honba * 300;
            Score {
                total,
                pay_ron: total,
                pay_tsumo_oya: 0,
                pay_tsumo_ko: 0,
            }
        }
        WinType::Tsumo => {
            if is_dealer {
                let each = ceil_100(base * 2) + honba * 100;
                Score {
                    total: each * 3,
                    pay_ron: 0,
                    pay_tsumo_oya: 0,
                    pay_tsumo_ko: each,
                }
            } else {
                let oya = ceil_100(base * 2) + honba * 100;
                let ko = ceil_100(base) + honba * 100;
                Score {
                    total: oya + ko * 2,
                    pay_ron: 0,
                    pay_tsumo_oya: oya,
                    pay_tsumo_ko: ko,
                }
            }
        }
    }
}

/// Rounds fu up to the next multiple of 10. The fixed 25 fu of seven pairs
/// is never rounded.
pub fn round_up_fu(fu: u8) -> u8 {
    if fu == 25 {
        return 25;
    }
    fu.div_ceil(10) * 10
}

fn ceil_100(val: u32) -> u32 {
    val.div_ceil(100) * 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangan_threshold_is_exact() {
        // 5 han is mangan regardless of fu
        let s = calculate_points(5, 70, false, WinType::Ron, 0);
        assert_eq!(s.pay_ron, 8000);
        let s = calculate_points(5, 20, true, WinType::Ron, 0);
        assert_eq!(s.pay_ron, 12000);
    }

    #[test]
    fn four_han_forty_fu_uses_formula() {
        // 40 * 2^6 = 2560 base; no mangan rounding
        let s = calculate_points(4, 40, false, WinType::Ron, 0);
        assert_eq!(s.pay_ron, 10300);
        let s = calculate_points(4, 40, false, WinType::Tsumo, 0);
        assert_eq!(s.pay_tsumo_oya, 5200);
        assert_eq!(s.pay_tsumo_ko, 2600);
    }

    #[test]
    fn fu_rounding() {
        assert_eq!(round_up_fu(22), 30);
        assert_eq!(round_up_fu(30), 30);
        assert_eq!(round_up_fu(25), 25);
        assert_eq!(round_up_fu(32), 40);
    }

    #[test]
    fn thirty_fu_two_han_ron() {
        // 30 * 2^4 = 480; non-dealer ron 1920 -> 2000
        let s = calculate_points(2, 30, false, WinType::Ron, 0);
        assert_eq!(s.pay_ron, 2000);
        // dealer ron 2880 -> 2900
        let s = calculate_points(2, 30, true, WinType::Ron, 0);
        assert_eq!(s.pay_ron, 2900);
    }

    #[test]
    fn non_dealer_tsumo_split() {
        // 2000 base mangan: dealer pays 4000, others 2000 each
        let s = calculate_points(5, 30, false, WinType::Tsumo, 0);
        assert_eq!(s.pay_tsumo_oya, 4000);
        assert_eq!(s.pay_tsumo_ko, 2000);
        assert_eq!(s.total, 8000);
        assert_eq!(s.primary(), 2000);
    }

    #[test]
    fn honba_bonus() {
        let s = calculate_points(1, 30, false, WinType::Ron, 2);
        assert_eq!(s.pay_ron, 1000 + 600);
        let s = calculate_points(1, 30, false, WinType::Tsumo, 2);
        assert_eq!(s.pay_tsumo_oya, 500 + 200);
        assert_eq!(s.pay_tsumo_ko, 300 + 200);
    }

    #[test]
    fn yakuman_tiers() {
        assert_eq!(calculate_points(13, 20, false, WinType::Ron, 0).pay_ron, 48000);
        assert_eq!(calculate_points(26, 20, false, WinType::Ron, 0).pay_ron, 64000);
        assert_eq!(calculate_points(26, 20, true, WinType::Ron, 0).pay_ron, 96000);
        // sanbaiman / baiman / haneman
        assert_eq!(calculate_points(11, 20, false, WinType::Ron, 0).pay_ron, 24000);
        assert_eq!(calculate_points(8, 20, false, WinType::Ron, 0).pay_ron, 16000);
        assert_eq!(calculate_points(6, 20, false, WinType::Ron, 0).pay_ron, 12000);
    }

    #[test]
    fn seven_pairs_fu_not_rounded() {
        // 25 * 2^4 = 400; non-dealer ron 1600
        let s = calculate_points(2, 25, false, WinType::Ron, 0);
        assert_eq!(s.pay_ron, 1600);
    }
}

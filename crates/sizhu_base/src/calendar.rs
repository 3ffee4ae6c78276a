//! Sexagenary rules for month, day and hour pillars.
//!
//! These are the pure table lookups; deciding *which* month ordinal or civil
//! date applies to an instant is the boundary engine's job.

use crate::sexagenary::{Branch, Stem, StemBranch, stem_branch_from_index};

/// Julian Day Number whose day pillar is 甲子 (index 0).
///
/// Calibrated so that JDN 2451545 (2000-01-01) is 戊午 (index 54) and
/// JDN 2433191 (1949-10-01) is 甲子.
pub const DAY_CYCLE_REFERENCE_JDN: i64 = 2_451_491;

/// Day pillar of a civil date given its Julian Day Number.
pub fn day_stem_branch_from_jdn(jdn: i64) -> StemBranch {
    stem_branch_from_index((jdn - DAY_CYCLE_REFERENCE_JDN).rem_euclid(60) as u8)
}

/// Stem of the first (寅) month for a pillar year's stem.
///
/// 甲己 → 丙, 乙庚 → 戊, 丙辛 → 庚, 丁壬 → 壬, 戊癸 → 甲.
pub const fn first_month_stem(year_stem: Stem) -> Stem {
    match year_stem {
        Stem::Jia | Stem::Ji => Stem::Bing,
        Stem::Yi | Stem::Geng => Stem::Wu,
        Stem::Bing | Stem::Xin => Stem::Geng,
        Stem::Ding | Stem::Ren => Stem::Ren,
        Stem::Wu | Stem::Gui => Stem::Jia,
    }
}

/// Branch of the month at `ordinal` (0 = 寅 month starting at Lichun,
/// 11 = 丑 month starting at Xiaohan).
pub const fn month_branch(ordinal: u8) -> Branch {
    Branch::Yin.offset(ordinal as i32 % 12)
}

/// Month pillar from the pillar year's stem and the month ordinal.
pub const fn month_stem_branch(year_stem: Stem, ordinal: u8) -> StemBranch {
    let ordinal = ordinal % 12;
    StemBranch {
        stem: first_month_stem(year_stem).offset(ordinal as i32),
        branch: month_branch(ordinal),
    }
}

/// Stem of the 子 hour for a day's stem.
///
/// 甲己 → 甲, 乙庚 → 丙, 丙辛 → 戊, 丁壬 → 庚, 戊癸 → 壬.
pub const fn first_hour_stem(day_stem: Stem) -> Stem {
    match day_stem {
        Stem::Jia | Stem::Ji => Stem::Jia,
        Stem::Yi | Stem::Geng => Stem::Bing,
        Stem::Bing | Stem::Xin => Stem::Wu,
        Stem::Ding | Stem::Ren => Stem::Geng,
        Stem::Wu | Stem::Gui => Stem::Ren,
    }
}

/// Branch of the two-hour slot containing a local hour (23:00–00:59 = 子).
pub const fn hour_branch(hour: u32) -> Branch {
    Branch::from_index((((hour + 1) / 2) % 12) as u8)
}

/// Hour pillar from the day stem and the local hour.
pub const fn hour_stem_branch(day_stem: Stem, hour: u32) -> StemBranch {
    let branch = hour_branch(hour);
    StemBranch {
        stem: first_hour_stem(day_stem).offset(branch.index() as i32),
        branch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_2000_01_01_is_wuwu() {
        let sb = day_stem_branch_from_jdn(2_451_545);
        assert_eq!((sb.stem, sb.branch), (Stem::Wu, Branch::Wu));
    }

    #[test]
    fn day_1949_10_01_is_jiazi() {
        assert_eq!(day_stem_branch_from_jdn(2_433_191).index(), 0);
    }

    #[test]
    fn consecutive_days_advance_by_one() {
        let a = day_stem_branch_from_jdn(2_460_000);
        let b = day_stem_branch_from_jdn(2_460_001);
        assert_eq!(a.offset(1), b);
    }

    #[test]
    fn month_table_jia_year() {
        // 甲 year: 丙寅, 丁卯, ..., 丁丑
        let first = month_stem_branch(Stem::Jia, 0);
        assert_eq!((first.stem, first.branch), (Stem::Bing, Branch::Yin));
        let last = month_stem_branch(Stem::Jia, 11);
        assert_eq!((last.stem, last.branch), (Stem::Ding, Branch::Chou));
    }

    #[test]
    fn month_table_continues_into_next_year() {
        // 甲 year's 丑 month is followed by 乙 year's 寅 month: 戊寅
        let last = month_stem_branch(Stem::Jia, 11);
        let next = month_stem_branch(Stem::Yi, 0);
        assert_eq!(last.offset(1), next);
    }

    #[test]
    fn month_pairs_are_valid_cycle_terms() {
        for y in 0..10 {
            for o in 0..12 {
                let sb = month_stem_branch(Stem::from_index(y), o);
                assert!(StemBranch::new(sb.stem, sb.branch).is_some());
            }
        }
    }

    #[test]
    fn hour_branch_slots() {
        assert_eq!(hour_branch(23), Branch::Zi);
        assert_eq!(hour_branch(0), Branch::Zi);
        assert_eq!(hour_branch(1), Branch::Chou);
        assert_eq!(hour_branch(11), Branch::Wu);
        assert_eq!(hour_branch(12), Branch::Wu);
        assert_eq!(hour_branch(22), Branch::Hai);
    }

    #[test]
    fn hour_table_jia_day() {
        let zi = hour_stem_branch(Stem::Jia, 0);
        assert_eq!((zi.stem, zi.branch), (Stem::Jia, Branch::Zi));
        let wu = hour_stem_branch(Stem::Jia, 12);
        assert_eq!((wu.stem, wu.branch), (Stem::Geng, Branch::Wu));
    }

    #[test]
    fn hour_table_wu_day_starts_ren() {
        let zi = hour_stem_branch(Stem::Wu, 23);
        assert_eq!((zi.stem, zi.branch), (Stem::Ren, Branch::Zi));
    }
}

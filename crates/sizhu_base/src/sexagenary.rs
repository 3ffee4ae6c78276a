//! The sexagenary (60-term) stem–branch cycle.
//!
//! Ten heavenly stems and twelve earthly branches advance together; since
//! gcd(10, 12) = 2 only 60 of the 120 pairs occur, always pairing stems and
//! branches of the same polarity. Index 0 is 甲子.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cycle order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

const STEM_HANZI: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `i mod 10`.
    pub const fn from_index(i: u8) -> Self {
        ALL_STEMS[(i % 10) as usize]
    }

    pub fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    pub fn hanzi(self) -> &'static str {
        STEM_HANZI[self.index() as usize]
    }

    /// Stem `k` steps later in the cycle (negative `k` steps back).
    pub const fn offset(self, k: i32) -> Self {
        ALL_STEMS[(self.index() as i32 + k).rem_euclid(10) as usize]
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cycle order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

const BRANCH_HANZI: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_ANIMALS: [&str; 12] = [
    "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster",
    "Dog", "Pig",
];

impl Branch {
    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `i mod 12`.
    pub const fn from_index(i: u8) -> Self {
        ALL_BRANCHES[(i % 12) as usize]
    }

    pub fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    pub fn hanzi(self) -> &'static str {
        BRANCH_HANZI[self.index() as usize]
    }

    /// Zodiac animal traditionally paired with the branch.
    pub fn animal(self) -> &'static str {
        BRANCH_ANIMALS[self.index() as usize]
    }

    /// Branch `k` steps later in the cycle (negative `k` steps back).
    pub const fn offset(self, k: i32) -> Self {
        ALL_BRANCHES[(self.index() as i32 + k).rem_euclid(12) as usize]
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

/// One term of the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

/// Number of terms in the cycle.
pub const CYCLE_LEN: u8 = 60;

/// `(STEMS[i mod 10], BRANCHES[i mod 12])` for `i mod 60`.
pub const fn stem_branch_from_index(i: u8) -> StemBranch {
    let i = i % CYCLE_LEN;
    StemBranch {
        stem: Stem::from_index(i % 10),
        branch: Branch::from_index(i % 12),
    }
}

impl StemBranch {
    /// Pair a stem with a branch; `None` when their polarities differ, since
    /// such a pair never occurs in the cycle.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// The unique `i` in [0, 60) with `i ≡ stem (mod 10)` and
    /// `i ≡ branch (mod 12)`.
    pub const fn index(self) -> u8 {
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        // i = s + 10k with (s + 10k) ≡ b (mod 12); 10k ≡ b − s (mod 12),
        // and 5·(b−s)/2 solves for k mod 6 because 5·5 ≡ 1 (mod 6).
        let k = (5 * ((b - s).rem_euclid(12) / 2)).rem_euclid(6);
        (s + 10 * k) as u8
    }

    /// The term `k` steps later in the cycle, wrapping mod 60.
    pub const fn offset(self, k: i32) -> Self {
        stem_branch_from_index((self.index() as i32 + k).rem_euclid(CYCLE_LEN as i32) as u8)
    }

    /// Hanzi rendering, e.g. "甲子".
    pub fn hanzi(self) -> String {
        format!("{}{}", self.stem.hanzi(), self.branch.hanzi())
    }

    /// Romanised rendering, e.g. "Jia-Zi".
    pub fn name(self) -> String {
        format!("{}-{}", self.stem.name(), self.branch.name())
    }
}

impl Display for StemBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Reference epoch: CE 4 = 甲子 (index 0).
pub const YEAR_CYCLE_EPOCH: i32 = 4;

/// Stem–branch of a pillar year (already adjusted for the year boundary).
pub fn year_stem_branch(pillar_year: i32) -> StemBranch {
    stem_branch_from_index((pillar_year - YEAR_CYCLE_EPOCH).rem_euclid(60) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip_all_60() {
        for i in 0..60u8 {
            assert_eq!(stem_branch_from_index(i).index(), i);
        }
    }

    #[test]
    fn index_wraps() {
        assert_eq!(stem_branch_from_index(60), stem_branch_from_index(0));
        assert_eq!(stem_branch_from_index(125), stem_branch_from_index(5));
    }

    #[test]
    fn known_indices() {
        let jiazi = StemBranch::new(Stem::Jia, Branch::Zi).unwrap();
        assert_eq!(jiazi.index(), 0);
        let wuwu = StemBranch::new(Stem::Wu, Branch::Wu).unwrap();
        assert_eq!(wuwu.index(), 54);
        let guihai = StemBranch::new(Stem::Gui, Branch::Hai).unwrap();
        assert_eq!(guihai.index(), 59);
    }

    #[test]
    fn mismatched_polarity_rejected() {
        assert!(StemBranch::new(Stem::Jia, Branch::Chou).is_none());
        assert!(StemBranch::new(Stem::Yi, Branch::Zi).is_none());
    }

    #[test]
    fn offset_wraps_both_ways() {
        let jiazi = stem_branch_from_index(0);
        assert_eq!(jiazi.offset(-1).index(), 59);
        assert_eq!(jiazi.offset(61).index(), 1);
        assert_eq!(jiazi.offset(-121).index(), 59);
    }

    #[test]
    fn stem_and_branch_offsets() {
        assert_eq!(Stem::Gui.offset(1), Stem::Jia);
        assert_eq!(Stem::Jia.offset(-1), Stem::Gui);
        assert_eq!(Branch::Hai.offset(1), Branch::Zi);
        assert_eq!(Branch::Zi.offset(-13), Branch::Hai);
    }

    #[test]
    fn year_1984_is_jiazi() {
        assert_eq!(year_stem_branch(1984).index(), 0);
    }

    #[test]
    fn year_2024_is_jiachen() {
        let sb = year_stem_branch(2024);
        assert_eq!((sb.stem, sb.branch), (Stem::Jia, Branch::Chen));
        assert_eq!(sb.branch.animal(), "Dragon");
    }

    #[test]
    fn year_before_epoch() {
        // 3 CE is one before 甲子 → 癸亥
        assert_eq!(year_stem_branch(3).index(), 59);
    }

    #[test]
    fn display_hanzi() {
        assert_eq!(stem_branch_from_index(0).to_string(), "甲子");
        assert_eq!(stem_branch_from_index(59).hanzi(), "癸亥");
        assert_eq!(stem_branch_from_index(1).name(), "Yi-Chou");
    }
}

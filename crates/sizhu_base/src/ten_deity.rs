//! Ten-deity (shishen) classification of a stem relative to the day stem.
//!
//! The relation is the element relation (same, day generates other, day
//! dominates other, other dominates day, other generates day) crossed with
//! same or opposite polarity.

use serde::{Deserialize, Serialize};

use crate::sexagenary::Stem;

/// The ten relational categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenDeity {
    /// Same element, same polarity (比肩).
    Companion,
    /// Same element, opposite polarity (劫財).
    RobWealth,
    /// Day generates, same polarity (食神).
    EatingGod,
    /// Day generates, opposite polarity (傷官).
    HurtingOfficer,
    /// Day dominates, same polarity (偏財).
    IndirectWealth,
    /// Day dominates, opposite polarity (正財).
    DirectWealth,
    /// Dominates day, same polarity (七殺).
    SevenKillings,
    /// Dominates day, opposite polarity (正官).
    DirectOfficer,
    /// Generates day, same polarity (偏印).
    IndirectResource,
    /// Generates day, opposite polarity (正印).
    DirectResource,
}

pub const ALL_TEN_DEITIES: [TenDeity; 10] = [
    TenDeity::Companion,
    TenDeity::RobWealth,
    TenDeity::EatingGod,
    TenDeity::HurtingOfficer,
    TenDeity::IndirectWealth,
    TenDeity::DirectWealth,
    TenDeity::SevenKillings,
    TenDeity::DirectOfficer,
    TenDeity::IndirectResource,
    TenDeity::DirectResource,
];

impl TenDeity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "Companion",
            Self::RobWealth => "Rob Wealth",
            Self::EatingGod => "Eating God",
            Self::HurtingOfficer => "Hurting Officer",
            Self::IndirectWealth => "Indirect Wealth",
            Self::DirectWealth => "Direct Wealth",
            Self::SevenKillings => "Seven Killings",
            Self::DirectOfficer => "Direct Officer",
            Self::IndirectResource => "Indirect Resource",
            Self::DirectResource => "Direct Resource",
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫財",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "傷官",
            Self::IndirectWealth => "偏財",
            Self::DirectWealth => "正財",
            Self::SevenKillings => "七殺",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }
}

/// Classify `other` relative to the day stem. Total over all 100 pairs.
pub fn ten_deity(day_stem: Stem, other: Stem) -> TenDeity {
    let day = day_stem.element();
    let oth = other.element();
    let same_polarity = day_stem.polarity() == other.polarity();

    let (same, opposite) = if oth == day {
        (TenDeity::Companion, TenDeity::RobWealth)
    } else if day.generates() == oth {
        (TenDeity::EatingGod, TenDeity::HurtingOfficer)
    } else if day.dominates() == oth {
        (TenDeity::IndirectWealth, TenDeity::DirectWealth)
    } else if oth.dominates() == day {
        (TenDeity::SevenKillings, TenDeity::DirectOfficer)
    } else {
        // the only remaining relation: other generates day
        (TenDeity::IndirectResource, TenDeity::DirectResource)
    };

    if same_polarity { same } else { opposite }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexagenary::ALL_STEMS;

    #[test]
    fn self_is_companion() {
        for s in ALL_STEMS {
            assert_eq!(ten_deity(s, s), TenDeity::Companion);
        }
    }

    #[test]
    fn jia_day_master_row() {
        use Stem::*;
        let expected = [
            (Jia, TenDeity::Companion),
            (Yi, TenDeity::RobWealth),
            (Bing, TenDeity::EatingGod),
            (Ding, TenDeity::HurtingOfficer),
            (Wu, TenDeity::IndirectWealth),
            (Ji, TenDeity::DirectWealth),
            (Geng, TenDeity::SevenKillings),
            (Xin, TenDeity::DirectOfficer),
            (Ren, TenDeity::IndirectResource),
            (Gui, TenDeity::DirectResource),
        ];
        for (other, deity) in expected {
            assert_eq!(ten_deity(Jia, other), deity, "甲 vs {other:?}");
        }
    }

    #[test]
    fn each_row_hits_every_category_once() {
        for day in ALL_STEMS {
            let mut seen = [false; 10];
            for other in ALL_STEMS {
                let d = ten_deity(day, other);
                let idx = ALL_TEN_DEITIES.iter().position(|x| *x == d).unwrap();
                assert!(!seen[idx], "{day:?} repeats {d:?}");
                seen[idx] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn gui_day_master_samples() {
        assert_eq!(ten_deity(Stem::Gui, Stem::Wu), TenDeity::DirectOfficer);
        assert_eq!(ten_deity(Stem::Gui, Stem::Ji), TenDeity::SevenKillings);
        assert_eq!(ten_deity(Stem::Gui, Stem::Bing), TenDeity::DirectWealth);
        assert_eq!(ten_deity(Stem::Gui, Stem::Geng), TenDeity::DirectResource);
    }
}

//! Five elements, polarity, and the generation/domination cycles.
//!
//! Generation: wood → fire → earth → metal → water → wood.
//! Domination: wood → earth → water → fire → metal → wood.

use serde::{Deserialize, Serialize};

use crate::hidden_stems::hidden_stems;
use crate::sexagenary::{Branch, Stem};

/// The five elements (wuxing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generation order.
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based index in generation order (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// The element this one generates (feeds).
    pub const fn generates(self) -> Self {
        ALL_ELEMENTS[((self.index() + 1) % 5) as usize]
    }

    /// The element that generates this one.
    pub const fn generated_by(self) -> Self {
        ALL_ELEMENTS[((self.index() + 4) % 5) as usize]
    }

    /// The element this one dominates (controls).
    pub const fn dominates(self) -> Self {
        ALL_ELEMENTS[((self.index() + 2) % 5) as usize]
    }

    /// The element that dominates this one.
    pub const fn dominated_by(self) -> Self {
        ALL_ELEMENTS[((self.index() + 3) % 5) as usize]
    }
}

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Stem {
    pub const fn element(self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

impl Branch {
    pub const fn element(self) -> Element {
        match self {
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Chen | Branch::Xu | Branch::Chou | Branch::Wei => Element::Earth,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Hai | Branch::Zi => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

/// Element occurrence counts over a chart's stems and hidden stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FiveElementTally {
    pub wood: u8,
    pub fire: u8,
    pub earth: u8,
    pub metal: u8,
    pub water: u8,
}

impl FiveElementTally {
    /// Count every visible stem plus every hidden stem of every occupied
    /// branch. Branches contribute only through their hidden stems.
    pub fn from_pillars(stems: &[Stem], branches: &[Branch]) -> Self {
        let mut tally = Self::default();
        for s in stems {
            tally.add(s.element());
        }
        for b in branches {
            for h in hidden_stems(*b) {
                tally.add(h.element());
            }
        }
        tally
    }

    fn add(&mut self, e: Element) {
        match e {
            Element::Wood => self.wood += 1,
            Element::Fire => self.fire += 1,
            Element::Earth => self.earth += 1,
            Element::Metal => self.metal += 1,
            Element::Water => self.water += 1,
        }
    }

    pub const fn count(&self, e: Element) -> u8 {
        match e {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub const fn total(&self) -> u32 {
        self.wood as u32 + self.fire as u32 + self.earth as u32 + self.metal as u32
            + self.water as u32
    }

    /// Elements with zero occurrences.
    pub fn missing(&self) -> Vec<Element> {
        ALL_ELEMENTS
            .into_iter()
            .filter(|e| self.count(*e) == 0)
            .collect()
    }

    /// Element(s) with the highest count, in generation order.
    pub fn dominant(&self) -> Vec<Element> {
        let max = ALL_ELEMENTS.iter().map(|e| self.count(*e)).max().unwrap_or(0);
        ALL_ELEMENTS
            .into_iter()
            .filter(|e| self.count(*e) == max)
            .collect()
    }
}

//! Types for solar-term search.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use sizhu_time::jd_ut_local_ticks;

/// The 24 solar terms, in traditional order starting at Lichun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SolarTerm {
    Lichun,
    Yushui,
    Jingzhe,
    Chunfen,
    Qingming,
    Guyu,
    Lixia,
    Xiaoman,
    Mangzhong,
    Xiazhi,
    Xiaoshu,
    Dashu,
    Liqiu,
    Chushu,
    Bailu,
    Qiufen,
    Hanlu,
    Shuangjiang,
    Lidong,
    Xiaoxue,
    Daxue,
    Dongzhi,
    Xiaohan,
    Dahan,
}

/// All 24 terms in traditional order (index 0 = Lichun at 315°).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Lichun,
    SolarTerm::Yushui,
    SolarTerm::Jingzhe,
    SolarTerm::Chunfen,
    SolarTerm::Qingming,
    SolarTerm::Guyu,
    SolarTerm::Lixia,
    SolarTerm::Xiaoman,
    SolarTerm::Mangzhong,
    SolarTerm::Xiazhi,
    SolarTerm::Xiaoshu,
    SolarTerm::Dashu,
    SolarTerm::Liqiu,
    SolarTerm::Chushu,
    SolarTerm::Bailu,
    SolarTerm::Qiufen,
    SolarTerm::Hanlu,
    SolarTerm::Shuangjiang,
    SolarTerm::Lidong,
    SolarTerm::Xiaoxue,
    SolarTerm::Daxue,
    SolarTerm::Dongzhi,
    SolarTerm::Xiaohan,
    SolarTerm::Dahan,
];

/// The 12 sectional terms (jie) that open each sexagenary month.
pub const SECTIONAL_TERMS: [SolarTerm; 12] = [
    SolarTerm::Lichun,
    SolarTerm::Jingzhe,
    SolarTerm::Qingming,
    SolarTerm::Lixia,
    SolarTerm::Mangzhong,
    SolarTerm::Xiaoshu,
    SolarTerm::Liqiu,
    SolarTerm::Bailu,
    SolarTerm::Hanlu,
    SolarTerm::Lidong,
    SolarTerm::Daxue,
    SolarTerm::Xiaohan,
];

const TERM_NAMES: [&str; 24] = [
    "Lichun",
    "Yushui",
    "Jingzhe",
    "Chunfen",
    "Qingming",
    "Guyu",
    "Lixia",
    "Xiaoman",
    "Mangzhong",
    "Xiazhi",
    "Xiaoshu",
    "Dashu",
    "Liqiu",
    "Chushu",
    "Bailu",
    "Qiufen",
    "Hanlu",
    "Shuangjiang",
    "Lidong",
    "Xiaoxue",
    "Daxue",
    "Dongzhi",
    "Xiaohan",
    "Dahan",
];

const TERM_HANZI: [&str; 24] = [
    "立春", "雨水", "驚蟄", "春分", "清明", "穀雨", "立夏", "小滿", "芒種", "夏至", "小暑", "大暑",
    "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒",
];

impl SolarTerm {
    /// 0-based index (Lichun=0 .. Dahan=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(i: u8) -> Self {
        ALL_SOLAR_TERMS[(i % 24) as usize]
    }

    pub fn name(self) -> &'static str {
        TERM_NAMES[self.index() as usize]
    }

    pub fn hanzi(self) -> &'static str {
        TERM_HANZI[self.index() as usize]
    }

    /// Apparent solar longitude of the term, in degrees [0, 360).
    pub const fn longitude_deg(self) -> u16 {
        (315 + 15 * self.index() as u16) % 360
    }

    /// Term at an exact multiple of 15°, if any.
    pub fn from_longitude_deg(deg: u16) -> Option<Self> {
        if deg >= 360 || deg % 15 != 0 {
            return None;
        }
        let idx = ((deg + 360 - 315) % 360) / 15;
        Some(Self::from_index(idx as u8))
    }

    /// Sectional terms open a month; midpoint terms (qi) do not.
    pub const fn is_sectional(self) -> bool {
        self.index() % 2 == 0
    }

    /// Month ordinal opened by a sectional term (0 = 寅 at Lichun).
    pub const fn month_ordinal(self) -> Option<u8> {
        if self.is_sectional() {
            Some(self.index() / 2)
        } else {
            None
        }
    }

    /// Degrees past the March equinox, with the winter terms of the civil
    /// year (Xiaohan onward, before the equinox) negative.
    pub const fn equinox_offset_deg(self) -> i32 {
        let a = self.longitude_deg() as i32;
        if a >= 285 { a - 360 } else { a }
    }
}

impl Display for SolarTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which terms a per-year build includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TermSet {
    /// The 12 month-opening terms.
    #[default]
    Sectional,
    /// All 24 terms.
    All,
}

impl TermSet {
    pub fn terms(self) -> &'static [SolarTerm] {
        match self {
            Self::Sectional => &SECTIONAL_TERMS,
            Self::All => &ALL_SOLAR_TERMS,
        }
    }
}

/// A solved solar-term crossing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarTermEvent {
    pub term: SolarTerm,
    /// Civil (Gregorian) year the term was solved for.
    pub year: i32,
    /// Target apparent longitude in degrees.
    pub longitude_deg: f64,
    /// Crossing instant as Julian Date (UT).
    pub jd_ut: f64,
    /// No bracket was found and `jd_ut` is the initial estimate.
    pub degraded: bool,
}

impl SolarTermEvent {
    /// Local clock ticks of the crossing at a UTC offset.
    pub fn local_ticks(&self, utc_offset_minutes: i32, unit_seconds: i64) -> i64 {
        jd_ut_local_ticks(self.jd_ut, utc_offset_minutes, unit_seconds)
    }
}

/// Result of a single root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Crossing instant as Julian Date (UT).
    pub jd_ut: f64,
    /// Sun longitude evaluations spent.
    pub evaluations: u32,
    pub degraded: bool,
}

/// Search budgets for the solar-term solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarTermConfig {
    /// Initial half-width of the bracket around the estimate (default 8).
    pub bracket_days: f64,
    /// Widest half-width reached by doubling (default 64).
    pub max_bracket_days: f64,
    /// Fallback scan step in hours (default 6).
    pub scan_step_hours: f64,
    /// Fallback scan half-width in days (default 200).
    pub scan_window_days: f64,
    /// Bisection iteration cap (default 64).
    pub max_iterations: u32,
}

impl Default for SolarTermConfig {
    fn default() -> Self {
        Self {
            bracket_days: 8.0,
            max_bracket_days: 64.0,
            scan_step_hours: 6.0,
            scan_window_days: 200.0,
            max_iterations: 64,
        }
    }
}

/// Widest accepted bracket half-width. The Sun moves at most ~1.02°/day, so
/// a bracket this wide spans under 180° of longitude: the residual cannot
/// wrap and the only crossing inside is the requested year's.
pub const MAX_BRACKET_HALF_WIDTH_DAYS: f64 = 80.0;
/// Widest accepted scan half-width; the same angle recurs ~365 days away.
pub const MAX_SCAN_WINDOW_DAYS: f64 = 200.0;
/// Coarsest accepted scan step.
pub const MAX_SCAN_STEP_HOURS: f64 = 48.0;

impl SolarTermConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.bracket_days.is_finite() && self.bracket_days > 0.0) {
            return Err("bracket_days must be finite and positive");
        }
        if !self.max_bracket_days.is_finite() || self.max_bracket_days < self.bracket_days {
            return Err("max_bracket_days must be finite and >= bracket_days");
        }
        if self.max_bracket_days > MAX_BRACKET_HALF_WIDTH_DAYS {
            return Err("max_bracket_days must not exceed 80 days");
        }
        if !(self.scan_step_hours > 0.0 && self.scan_step_hours <= MAX_SCAN_STEP_HOURS) {
            return Err("scan_step_hours must be in (0, 48]");
        }
        if !(self.scan_window_days >= 0.0 && self.scan_window_days <= MAX_SCAN_WINDOW_DAYS) {
            return Err("scan_window_days must be in [0, 200]");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        Ok(())
    }
}

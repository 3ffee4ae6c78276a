//! Pure sexagenary and elemental calculations for the sizhu engine.
//!
//! This crate provides:
//! - The 60-term stem–branch cycle and its epochs
//! - Month/day/hour starting-stem tables
//! - Five elements, hidden stems, ten-deity relations and element tallies
//! - Void branches and luck-cycle sequence math
//!
//! Nothing here touches time scales or astronomy; every function is total.

pub mod calendar;
pub mod element;
pub mod hidden_stems;
pub mod luck;
pub mod sexagenary;
pub mod ten_deity;
pub mod void;

pub use calendar::{
    DAY_CYCLE_REFERENCE_JDN, day_stem_branch_from_jdn, first_hour_stem, first_month_stem,
    hour_branch, hour_stem_branch, month_branch, month_stem_branch,
};
pub use element::{ALL_ELEMENTS, Element, FiveElementTally, Polarity};
pub use hidden_stems::{hidden_stems, main_hidden_stem};
pub use luck::{
    AnnualLuck, DAYS_PER_LUCK_YEAR, DECADE_COUNT, DECADE_SPAN_YEARS, DecadeLuck, LuckDirection,
    LuckStartAge, Sex, annual_cycle, decade_cycle, find_annual, find_decade, luck_direction,
    luck_start_age, reckoning_age,
};
pub use sexagenary::{
    ALL_BRANCHES, ALL_STEMS, Branch, CYCLE_LEN, Stem, StemBranch, YEAR_CYCLE_EPOCH,
    stem_branch_from_index, year_stem_branch,
};
pub use ten_deity::{ALL_TEN_DEITIES, TenDeity, ten_deity};
pub use void::{is_void, void_branches};

//! Hidden stems (canggan) of the twelve branches.
//!
//! Listed main qi first, then middle and residual qi.

use crate::sexagenary::{ALL_BRANCHES, Branch, Stem};

/// Hidden stems of a branch, 1–3 entries, main qi first.
pub const fn hidden_stems(branch: Branch) -> &'static [Stem] {
    match branch {
        Branch::Zi => &[Stem::Gui],
        Branch::Chou => &[Stem::Ji, Stem::Gui, Stem::Xin],
        Branch::Yin => &[Stem::Jia, Stem::Bing, Stem::Wu],
        Branch::Mao => &[Stem::Yi],
        Branch::Chen => &[Stem::Wu, Stem::Yi, Stem::Gui],
        Branch::Si => &[Stem::Bing, Stem::Geng, Stem::Wu],
        Branch::Wu => &[Stem::Ding, Stem::Ji],
        Branch::Wei => &[Stem::Ji, Stem::Ding, Stem::Yi],
        Branch::Shen => &[Stem::Geng, Stem::Ren, Stem::Wu],
        Branch::You => &[Stem::Xin],
        Branch::Xu => &[Stem::Wu, Stem::Xin, Stem::Ding],
        Branch::Hai => &[Stem::Ren, Stem::Jia],
    }
}

/// Main-qi hidden stem of a branch.
pub const fn main_hidden_stem(branch: Branch) -> Stem {
    hidden_stems(branch)[0]
}

/// Total hidden-stem entries across all twelve branches.
pub fn hidden_stem_total() -> usize {
    ALL_BRANCHES.iter().map(|b| hidden_stems(*b).len()).sum()
}

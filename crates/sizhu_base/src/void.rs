//! Void branches (kongwang) of a decade group.
//!
//! Each run of ten cycle terms starting at a 甲 stem (a "xun") pairs ten
//! stems with ten branches; the two branches left over are void.

use crate::sexagenary::{Branch, StemBranch};

/// The two branches excluded by the decade group containing `sb`.
pub const fn void_branches(sb: StemBranch) -> [Branch; 2] {
    let xun_start = sb.index() - sb.index() % 10;
    let first = Branch::from_index(xun_start % 12);
    [first.offset(10), first.offset(11)]
}

/// Whether `branch` is void for the decade group containing `sb`.
pub fn is_void(sb: StemBranch, branch: Branch) -> bool {
    void_branches(sb).contains(&branch)
}

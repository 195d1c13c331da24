//! Shared numeric helpers.
//!
//! All cycle arithmetic uses floor-based modulo so negative inputs land in
//! the expected non-negative residue class.

/// Floor-mod into the 10-stem cycle.
pub const fn mod10(v: i64) -> u8 {
    v.rem_euclid(10) as u8
}

/// Floor-mod into the 12-branch cycle.
pub const fn mod12(v: i64) -> u8 {
    v.rem_euclid(12) as u8
}

/// Floor-mod into the 60-pair cycle.
pub const fn mod60(v: i64) -> u8 {
    v.rem_euclid(60) as u8
}

/// Clamp to [0, 1].
pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Clamp to [0, 100].
pub fn clamp0_100(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Deduplicate and sort node-id references ascending.
pub fn collect_refs(ids: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut out: Vec<u32> = ids.into_iter().collect();
    out.sort_unstable();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod10_negative() {
        assert_eq!(mod10(-1), 9);
        assert_eq!(mod10(-11), 9);
    }

    #[test]
    fn mod12_negative() {
        assert_eq!(mod12(-3), 9);
    }

    #[test]
    fn mod60_wraps() {
        assert_eq!(mod60(61), 1);
        assert_eq!(mod60(-60), 0);
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
    }

    #[test]
    fn collect_refs_dedupes_and_sorts() {
        assert_eq!(collect_refs([5, 1, 5, 3, 1]), vec![1, 3, 5]);
        assert_eq!(collect_refs([]), Vec::<u32>::new());
    }
}

//! Student's-t quantiles for the lower confidence bound.
//!
//! One-sided 95% quantiles: exact table for small degrees of freedom,
//! Cornish-Fisher expansion around the normal quantile beyond it. The
//! LCB calls this once per candidate with `df = visits - 1`.

/// One-sided 95% normal quantile.
const NORMAL_Z: f64 = 1.644_853_6;

/// t-quantiles for df = 1..=30.
const T_TABLE: [f32; 30] = [
    6.314, 2.920, 2.353, 2.132, 2.015, 1.943, 1.895, 1.860, 1.833, 1.812, //
    1.796, 1.782, 1.771, 1.761, 1.753, 1.746, 1.740, 1.734, 1.729, 1.725, //
    1.721, 1.717, 1.714, 1.711, 1.708, 1.706, 1.703, 1.701, 1.699, 1.697,
];

/// One-sided 95% Student's-t quantile for `df` degrees of freedom.
pub fn t_quantile(df: u32) -> f32 {
    debug_assert!(df >= 1);
    if df == 0 {
        return NORMAL_Z as f32;
    }
    if (df as usize) <= T_TABLE.len() {
        return T_TABLE[df as usize - 1];
    }
    let d = f64::from(df);
    let z = NORMAL_Z;
    let z3 = z.powi(3);
    let z5 = z.powi(5);
    let expansion =
        z + (z3 + z) / (4.0 * d) + (5.0 * z5 + 16.0 * z3 + 3.0 * z) / (96.0 * d * d);
    expansion as f32
}

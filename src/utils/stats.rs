/// Median of `values`.
///
/// Even-length input averages the two central values after sorting, so a
/// half-filled window still gives a deterministic answer. NaNs sort last
/// (`f32::total_cmp`). Returns `None` for empty input.
///
/// # Example
/// ```
/// use staffline::utils::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f32]) -> Option<f32> {
    let mut sorted = values.to_vec();
    median_in_place(&mut sorted)
}

/// Same as [`median`], but sorts `values` in place instead of copying.
pub fn median_in_place(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

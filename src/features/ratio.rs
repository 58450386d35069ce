/// `numerator / max(1, denominator)`. Every ratio in the extractor goes
/// through here so an empty sample can never divide by zero.
pub fn guarded_ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator.max(1) as f64
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

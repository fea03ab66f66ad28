/// Sign-prefixed change percentage with one decimal, e.g. `+10.5%`.
pub fn format_change_pct(pct: f64) -> String {
    let sign = if pct >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, pct)
}

/// KRW amount rounded to the nearest 10M, shown in 억 at or above one 억
/// in magnitude and in 천만 below.
pub fn format_krw(value: f64) -> String {
    let rounded = (value / 10_000_000.0).round() * 10_000_000.0;
    let in_hundred_million = rounded / 100_000_000.0;
    if in_hundred_million >= 1.0 || in_hundred_million <= -1.0 {
        format!("₩{:.1}억", in_hundred_million)
    } else {
        format!("₩{}천만", rounded / 10_000_000.0)
    }
}

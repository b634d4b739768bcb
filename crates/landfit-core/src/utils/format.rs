/// Format an area in square kilometres with thousands separators.
/// Whole numbers print without decimals; anything else keeps two.
pub fn format_area(area: f64) -> String {
    if !area.is_finite() {
        return area.to_string();
    }

    let sign = if area < 0.0 { "-" } else { "" };
    let rounded = (area.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, fraction)
    }
}

/// Join names with ", ", or return `empty` when there are none
pub fn format_list<'a, I>(names: I, empty: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = names.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        empty.to_string()
    } else {
        joined
    }
}

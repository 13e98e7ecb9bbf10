// Utility functions for job-recommender

/// Min-max scale a column to [0, 1].
///
/// The scaler is fit on the whole column, so every value shares the same
/// `min`/`max`. A constant column scales to all zeros.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|&v| {
            if !range.is_finite() || range.abs() < f64::EPSILON {
                0.0
            } else {
                ((v - min) / range).clamp(0.0, 1.0)
            }
        })
        .collect()
}

/// Upper-case the first character and lower-case the rest (`"rABAT"` -> `"Rabat"`).
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Parse a list literal such as `['Python', "SQL"]`.
///
/// Anything that is not a flat list of quoted strings yields an empty list.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    try_parse_skill_list(raw.trim()).unwrap_or_default()
}

fn try_parse_skill_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return None,
        };

        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => item.push(chars.next()?),
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}

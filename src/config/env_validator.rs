//! Environment variable validation with helpful messages
//!
//! Invalid `SPECBUILD_*` values never abort a build: the caller keeps the
//! configured value and logs the returned warning, which names the valid
//! values and, for near misses, the likely intended one.

use std::str::FromStr;

/// Parse an environment value, or explain why it was rejected.
pub fn parse_env_value<T: FromStr>(
    var_name: &str,
    raw: &str,
    valid_values: &[&str],
) -> Result<T, String> {
    raw.trim().parse::<T>().map_err(|_| {
        let hint = closest(raw, valid_values)
            .map(|s| format!(". Did you mean '{}'?", s))
            .unwrap_or_default();
        format!(
            "invalid {} value '{}'{} (valid values: {})",
            var_name,
            raw,
            hint,
            valid_values.join(", ")
        )
    })
}

/// Parse a positive integer environment value.
pub fn parse_env_u64(var_name: &str, raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!(
            "invalid {} value '{}' (expected a positive whole number)",
            var_name, raw
        )),
    }
}

/// Closest candidate within two edits, ignoring exact matches.
pub fn closest<'a>(value: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input = value.trim().to_lowercase();
    candidates
        .iter()
        .map(|c| (*c, levenshtein(&input, c)))
        .filter(|(_, dist)| *dist > 0 && *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(c, _)| c)
}

/// Edit distance over bytes, single-row formulation
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b = b.as_bytes();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ac) in a.bytes().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ac == *bc {
                diag
            } else {
                1 + diag.min(above).min(row[j])
            };
            diag = above;
        }
    }

    row[b.len()]
}

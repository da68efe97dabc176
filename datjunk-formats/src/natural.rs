//! Numeric-aware string ordering, so `game2` sorts before `game10`.

use std::cmp::Ordering;

/// Split into maximal runs of ASCII digits and non-digits.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Compare digit runs by value and text runs case-insensitively. Strings
/// that compare equal that way fall back to plain byte order, so this is a
/// total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        let ord = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let x_digit = x.starts_with(|c: char| c.is_ascii_digit());
                let y_digit = y.starts_with(|c: char| c.is_ascii_digit());
                match (x_digit, y_digit) {
                    (true, true) => compare_digits(x, y),
                    (false, false) => compare_text(x, y),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                }
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(natural_cmp("game2", "game10"), Ordering::Less);
        assert_eq!(natural_cmp("game010", "game9"), Ordering::Greater);
    }

    #[test]
    fn text_ignores_case() {
        assert_eq!(natural_cmp("alpha", "Beta"), Ordering::Less);
        assert_eq!(natural_cmp("ABC", "abc"), Ordering::Less);
    }

    #[test]
    fn sorting_keys() {
        let mut keys = vec!["x-10", "x-9", "X-1", "x", "x-01"];
        keys.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(keys, ["x", "X-1", "x-01", "x-9", "x-10"]);
    }
}

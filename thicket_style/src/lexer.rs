// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small scanners shared by the value grammars.

/// Scans a number at the start of `s`.
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// exponent only when `e`/`E` is followed by a digit (so `1em` scans as `1`).
/// Returns the value and the number of bytes consumed.
pub(crate) fn scan_number(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut digits = 0;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac = end + 1;
        while bytes.get(frac).is_some_and(u8::is_ascii_digit) {
            frac += 1;
            digits += 1;
        }
        end = frac;
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                exp += 1;
            }
            end = exp;
        }
    }
    s[..end].parse().ok().map(|v| (v, end))
}

/// Splits `s` into a number and its unit suffix, e.g. `"10px"` into `(10.0, "px")`.
pub(crate) fn split_unit(s: &str) -> Option<(f64, &str)> {
    let s = s.trim();
    let (value, len) = scan_number(s)?;
    Some((value, s[len..].trim()))
}

/// Returns `true` for characters that separate list items.
pub(crate) fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Splits `s` at separators that are not nested inside parentheses.
pub(crate) fn split_top_level(s: &str, separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && separator(c) => {
                if start < i {
                    items.push(&s[start..i]);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if start < s.len() {
        items.push(&s[start..]);
    }
    items
}

/// Splits a chain of function calls like `translate(10) rotate(45deg)`.
///
/// Returns `(name, arguments)` pairs, or `None` if the text is not a
/// well-formed chain.
pub(crate) fn functions(s: &str) -> Option<Vec<(&str, &str)>> {
    let mut out = Vec::new();
    let mut rest = s.trim_start_matches(is_separator);
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let name = rest[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
            return None;
        }
        let mut depth = 0_usize;
        let mut close = None;
        for (i, c) in rest[open..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(open + i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let close = close?;
        out.push((name, rest[open + 1..close].trim()));
        rest = rest[close + 1..].trim_start_matches(is_separator);
    }
    Some(out)
}

/// Parses `url(#id)` (quotes and `#` optional) into the referenced id.
pub(crate) fn url_reference(s: &str) -> Option<&str> {
    let inner = s.trim().strip_prefix("url(")?.strip_suffix(')')?.trim();
    let inner = inner
        .strip_prefix(['"', '\''])
        .and_then(|i| i.strip_suffix(['"', '\'']))
        .unwrap_or(inner);
    let id = inner.strip_prefix('#').unwrap_or(inner);
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_numbers() {
        assert_eq!(scan_number("10px"), Some((10.0, 2)));
        assert_eq!(scan_number("-.5,"), Some((-0.5, 3)));
        assert_eq!(scan_number("1e3 "), Some((1000.0, 3)));
        assert_eq!(scan_number("2em"), Some((2.0, 1)));
        assert_eq!(scan_number("0.5.5"), Some((0.5, 3)));
        assert_eq!(scan_number("px"), None);
        assert_eq!(scan_number("-"), None);
    }

    #[test]
    fn splits_units() {
        assert_eq!(split_unit(" 50% "), Some((50.0, "%")));
        assert_eq!(split_unit("3"), Some((3.0, "")));
        assert_eq!(split_unit("abc"), None);
    }

    #[test]
    fn splits_function_chains() {
        assert_eq!(
            functions("translate(10, 20) rotate(45deg)"),
            Some(vec![("translate", "10, 20"), ("rotate", "45deg")])
        );
        assert_eq!(
            functions("drop-shadow(1px 2px rgba(0,0,0,0.5))"),
            Some(vec![("drop-shadow", "1px 2px rgba(0,0,0,0.5)")])
        );
        assert_eq!(functions("translate(10"), None);
        assert_eq!(functions("10px"), None);
        assert_eq!(functions(""), Some(vec![]));
    }

    #[test]
    fn top_level_split_respects_parens() {
        assert_eq!(
            split_top_level("1px rgb(0, 0, 0) 2px", char::is_whitespace),
            vec!["1px", "rgb(0, 0, 0)", "2px"]
        );
    }

    #[test]
    fn parses_url_references() {
        assert_eq!(url_reference("url(#grad)"), Some("grad"));
        assert_eq!(url_reference("url('#clip')"), Some("clip"));
        assert_eq!(url_reference("url()"), None);
        assert_eq!(url_reference("red"), None);
    }
}

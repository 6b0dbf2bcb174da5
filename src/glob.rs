//! Glob-style pattern matching as used by KEYS, SCAN MATCH and pattern subscriptions.
//!
//! Supported syntax: `*` (any run of bytes, including none), `?` (exactly one byte),
//! `[abc]`, `[^abc]`, `[a-z]` (byte classes) and `\x` (literal `x`). Matching is over raw
//! bytes, so `*` also crosses `/` and `.`.

pub fn matches(pattern: &[u8], input: &[u8]) -> bool {
    let (mut pi, mut ii) = (0, 0);
    // Last `*` seen and the input position it was tried at.
    let mut star: Option<(usize, usize)> = None;

    while ii < input.len() {
        if let Some(consumed) = match_one(&pattern[pi..], input[ii]) {
            pi += consumed;
            ii += 1;
            continue;
        }

        if pi < pattern.len() && pattern[pi] == b'*' {
            star = Some((pi, ii));
            pi += 1;
            continue;
        }

        match star {
            Some((star_pi, star_ii)) => {
                pi = star_pi + 1;
                ii = star_ii + 1;
                star = Some((star_pi, star_ii + 1));
            }
            None => return false,
        }
    }

    pattern[pi..].iter().all(|b| *b == b'*')
}

/// Tries to match a single input byte against the token at the start of `pattern`. Returns the
/// number of pattern bytes the token spans when it matches.
fn match_one(pattern: &[u8], byte: u8) -> Option<usize> {
    match pattern.first()? {
        b'*' => None,
        b'?' => Some(1),
        b'\\' if pattern.len() > 1 => (pattern[1] == byte).then_some(2),
        b'[' => match match_class(pattern, byte) {
            Some((true, consumed)) => Some(consumed),
            Some((false, _)) => None,
            // An unterminated class is a literal `[`.
            None => (byte == b'[').then_some(1),
        },
        literal => (*literal == byte).then_some(1),
    }
}

/// Matches a `[...]` class. Returns whether it matched and how many pattern bytes it spans, or
/// `None` when the class is never closed.
fn match_class(pattern: &[u8], byte: u8) -> Option<(bool, usize)> {
    let mut i = 1;
    let negate = pattern.get(i) == Some(&b'^');
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < pattern.len() && pattern[i] != b']' {
        if pattern[i] == b'\\' && i + 1 < pattern.len() {
            matched |= pattern[i + 1] == byte;
            i += 2;
        } else if i + 2 < pattern.len() && pattern[i + 1] == b'-' && pattern[i + 2] != b']' {
            let (lo, hi) = if pattern[i] <= pattern[i + 2] {
                (pattern[i], pattern[i + 2])
            } else {
                (pattern[i + 2], pattern[i])
            };
            matched |= (lo..=hi).contains(&byte);
            i += 3;
        } else {
            matched |= pattern[i] == byte;
            i += 1;
        }
    }

    (i < pattern.len()).then_some((matched != negate, i + 1))
}

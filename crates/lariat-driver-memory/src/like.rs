//! LIKE pattern matching with `%`/`_` wildcards and backslash escapes.

enum Tok {
    Literal(char),
    One,
    Many,
}

/// Returns whether `text` matches the LIKE `pattern`.
pub(crate) fn matches(pattern: &str, text: &str) -> bool {
    let toks = tokenize(pattern);
    let chars: Vec<char> = text.chars().collect();
    match_at(&toks, &chars)
}

fn tokenize(pattern: &str) -> Vec<Tok> {
    let mut toks = vec![];
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        toks.push(match ch {
            '%' => Tok::Many,
            '_' => Tok::One,
            // A trailing backslash matches itself
            '\\' => Tok::Literal(chars.next().unwrap_or('\\')),
            ch => Tok::Literal(ch),
        });
    }
    toks
}

fn match_at(toks: &[Tok], text: &[char]) -> bool {
    match toks.split_first() {
        None => text.is_empty(),
        Some((Tok::Literal(ch), rest)) => {
            text.first() == Some(ch) && match_at(rest, &text[1..])
        }
        Some((Tok::One, rest)) => !text.is_empty() && match_at(rest, &text[1..]),
        Some((Tok::Many, rest)) => (0..=text.len()).any(|skip| match_at(rest, &text[skip..])),
    }
}

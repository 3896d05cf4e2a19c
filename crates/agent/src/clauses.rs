//! Slot extraction rules over free text.
//!
//! Each slot type has one small rule (name span, email token, numeric token,
//! identifier token) shared between mining a fresh command and reading the
//! answer to a clarifying question. Matching is case-insensitive; extracted
//! values keep the casing the user typed.

/// Split text into tokens, keeping the characters that occur inside emails,
/// prices, and identifiers.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(text.len());
    for character in text.chars() {
        if character.is_ascii_alphanumeric()
            || matches!(character, '@' | '.' | '-' | '_' | '+' | '%' | '$')
        {
            sanitized.push(character);
        } else {
            sanitized.push(' ');
        }
    }
    sanitized.split_whitespace().map(|token| token.to_string()).collect()
}

/// A token with sentence punctuation stripped from its edges.
pub fn word(token: &str) -> &str {
    token.trim_matches(|ch| matches!(ch, '.' | ',' | '!' | '?'))
}

/// Lowercased, punctuation-trimmed words for keyword matching.
pub fn words(text: &str) -> Vec<String> {
    tokenize(text)
        .iter()
        .map(|token| word(token).to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// The span following a lead-in word sequence, up to the first comma or
/// period. `["name", "is"]` applied to "the name is John Doe, email is x"
/// yields "John Doe".
pub fn phrase_after(text: &str, lead_in: &[&str]) -> Option<String> {
    let start = lead_in_ends(text, lead_in).into_iter().next()?;
    let rest = &text[start..];
    let end = rest.find([',', '.']).unwrap_or(rest.len());
    let span = rest[..end].trim().trim_end_matches(['!', '?']).trim_end();
    (!span.is_empty()).then(|| span.to_string())
}

/// Price directly following a lead-in. Every occurrence of the lead-in is
/// tried, so "I want to raise stock to 75" still finds the number after
/// the second "to".
pub fn price_after(text: &str, lead_in: &[&str]) -> Option<f64> {
    for start in lead_in_ends(text, lead_in) {
        if let Some(token) = text[start..].split_whitespace().next() {
            if let Some(price) = parse_price(token) {
                return Some(price);
            }
        }
    }
    None
}

/// Whole number directly following a lead-in.
pub fn integer_after(text: &str, lead_in: &[&str]) -> Option<u32> {
    for start in lead_in_ends(text, lead_in) {
        if let Some(token) = text[start..].split_whitespace().next() {
            if let Some(quantity) = parse_quantity(token) {
                return Some(quantity);
            }
        }
    }
    None
}

/// First price-shaped token anywhere in the text.
pub fn price_token(text: &str) -> Option<f64> {
    tokenize(text).iter().find_map(|token| parse_price(token))
}

/// First whole-number token anywhere in the text.
pub fn integer_token(text: &str) -> Option<u32> {
    tokenize(text).iter().find_map(|token| parse_quantity(token))
}

/// First email-shaped token anywhere in the text.
pub fn email_token(text: &str) -> Option<String> {
    tokenize(text).iter().find_map(|token| {
        let cleaned = word(token);
        is_email(cleaned).then(|| cleaned.to_string())
    })
}

/// Identifier following any of the lead-in words. Scans forward past filler
/// ("the seller id is 3" resolves to "3"); candidates must carry a digit so
/// plain prose is never mistaken for an id.
pub fn identifier_after(text: &str, lead_ins: &[&str]) -> Option<String> {
    let tokens = tokenize(text);
    for (index, token) in tokens.iter().enumerate() {
        if !lead_ins.contains(&word(token).to_ascii_lowercase().as_str()) {
            continue;
        }
        for candidate in &tokens[index + 1..] {
            let cleaned = word(candidate);
            if is_identifier(cleaned) && cleaned.bytes().any(|byte| byte.is_ascii_digit()) {
                return Some(cleaned.to_string());
            }
        }
    }
    None
}

/// The whole trimmed text, when it is nothing but a single identifier token.
pub fn bare_identifier(text: &str) -> Option<String> {
    let tokens = tokenize(text);
    if let [token] = tokens.as_slice() {
        let cleaned = word(token);
        if is_identifier(cleaned) {
            return Some(cleaned.to_string());
        }
    }
    None
}

/// Free-text answer to a clarifying question: the optional "the <noun> is"
/// lead-in is stripped, the rest is kept verbatim minus edge punctuation.
pub fn answer_text(text: &str, noun: &str) -> Option<String> {
    let trimmed = text.trim();
    let lowered = trimmed.to_ascii_lowercase();

    let with_article = ["the", noun, "is"];
    let without_article = [noun, "is"];
    let start = match_words_from(lowered.as_bytes(), 0, &with_article)
        .or_else(|| match_words_from(lowered.as_bytes(), 0, &without_article))
        .unwrap_or(0);

    let span = trimmed[start..].trim().trim_end_matches(['.', ',', '!', '?']).trim_end();
    (!span.is_empty()).then(|| span.to_string())
}

/// Byte offsets just past every occurrence of the lead-in word sequence.
/// ASCII lowercasing is length-preserving, so offsets found in the lowered
/// copy index the original text directly.
fn lead_in_ends(text: &str, lead_in: &[&str]) -> Vec<usize> {
    let first = match lead_in.first() {
        Some(first) => *first,
        None => return Vec::new(),
    };

    let lowered = text.to_ascii_lowercase();
    let bytes = lowered.as_bytes();
    let mut ends = Vec::new();

    for (index, _) in lowered.match_indices(first) {
        if index > 0 && is_word_byte(bytes[index - 1]) {
            continue;
        }
        if let Some(end) = match_words_from(bytes, index, lead_in) {
            ends.push(end);
        }
    }
    ends
}

/// Match a whitespace-separated word sequence starting at `cursor`, each
/// word ending on a word boundary. Returns the offset past the sequence and
/// any trailing whitespace.
fn match_words_from(bytes: &[u8], mut cursor: usize, sequence: &[&str]) -> Option<usize> {
    for (position, expected) in sequence.iter().enumerate() {
        if position > 0 {
            let mut seen_space = false;
            while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
                cursor += 1;
                seen_space = true;
            }
            if !seen_space {
                return None;
            }
        }

        let expected_bytes = expected.as_bytes();
        if bytes.len() < cursor + expected_bytes.len()
            || &bytes[cursor..cursor + expected_bytes.len()] != expected_bytes
        {
            return None;
        }
        cursor += expected_bytes.len();
        if bytes.get(cursor).is_some_and(|byte| is_word_byte(*byte)) {
            return None;
        }
    }

    while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
        cursor += 1;
    }
    Some(cursor)
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn parse_price(token: &str) -> Option<f64> {
    let cleaned = word(token).trim_start_matches('$');
    if !cleaned.bytes().next().is_some_and(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let value = cleaned.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn parse_quantity(token: &str) -> Option<u32> {
    let cleaned = word(token);
    if !cleaned.bytes().next().is_some_and(|byte| byte.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<u32>().ok()
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty()
        && token.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
}

fn is_email(token: &str) -> bool {
    let Some((local, domain)) = token.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.bytes().all(|byte| byte.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_after_keeps_casing_and_stops_at_punctuation() {
        struct Case {
            text: &'static str,
            lead_in: &'static [&'static str],
            expected: Option<&'static str>,
        }

        let cases = vec![
            Case {
                text: "Add product name is Gaming Mouse",
                lead_in: &["name", "is"],
                expected: Some("Gaming Mouse"),
            },
            Case {
                text: "the name is John Doe, email is john@example.com",
                lead_in: &["name", "is"],
                expected: Some("John Doe"),
            },
            Case {
                text: "update stock of product Wireless Keyboard to 30",
                lead_in: &["product"],
                expected: Some("Wireless Keyboard to 30"),
            },
            Case { text: "my username is bob", lead_in: &["name", "is"], expected: None },
            Case { text: "the name is", lead_in: &["name", "is"], expected: None },
            Case { text: "no clause here", lead_in: &["name", "is"], expected: None },
        ];

        for (index, case) in cases.iter().enumerate() {
            let actual = phrase_after(case.text, case.lead_in);
            assert_eq!(
                actual.as_deref(),
                case.expected,
                "case {index} failed for: {}",
                case.text
            );
        }
    }

    #[test]
    fn numeric_clauses_parse_prices_and_quantities() {
        assert_eq!(price_after("the price is 49.99", &["price", "is"]), Some(49.99));
        assert_eq!(price_after("price is $15", &["price", "is"]), Some(15.0));
        assert_eq!(price_after("the price is abc", &["price", "is"]), None);
        assert_eq!(integer_after("set stock to 75 units", &["to"]), Some(75));
        assert_eq!(integer_after("I want to raise stock to 75", &["to"]), Some(75));
        assert_eq!(integer_after("stock is 50", &["stock", "is"]), Some(50));
        assert_eq!(integer_after("stock is full", &["stock", "is"]), None);
    }

    #[test]
    fn bare_numeric_tokens_are_found_anywhere() {
        assert_eq!(price_token("The price is 49.99"), Some(49.99));
        assert_eq!(price_token("49.99"), Some(49.99));
        assert_eq!(price_token("The price is abc"), None);
        assert_eq!(integer_token("The stock is 50."), Some(50));
        assert_eq!(integer_token("fifty"), None);
    }

    #[test]
    fn email_tokens_survive_dots_and_trailing_punctuation() {
        assert_eq!(
            email_token("The email is john.doe@example.com."),
            Some("john.doe@example.com".to_string())
        );
        assert_eq!(email_token("reach me at a+b@mail.co"), Some("a+b@mail.co".to_string()));
        assert_eq!(email_token("no email here"), None);
        assert_eq!(email_token("broken@@example.com"), None);
        assert_eq!(email_token("user@nodomain"), None);
    }

    #[test]
    fn identifiers_require_a_digit_unless_the_answer_is_bare() {
        assert_eq!(
            identifier_after("Select seller seller-1", &["seller", "id"]),
            Some("seller-1".to_string())
        );
        assert_eq!(identifier_after("the seller id is 3", &["seller", "id"]), Some("3".to_string()));
        assert_eq!(
            identifier_after("use seller 7f3d2c1a-9b21-4f6e-8a3d-2f1e0c9b8a7d", &["seller", "id"]),
            Some("7f3d2c1a-9b21-4f6e-8a3d-2f1e0c9b8a7d".to_string())
        );
        assert_eq!(identifier_after("which seller should I pick", &["seller", "id"]), None);
        assert_eq!(bare_identifier("seller-1"), Some("seller-1".to_string()));
        assert_eq!(bare_identifier("3"), Some("3".to_string()));
        assert_eq!(bare_identifier("two words"), None);
    }

    #[test]
    fn answers_strip_the_lead_in_but_keep_the_value_verbatim() {
        assert_eq!(answer_text("The name is John Doe", "name"), Some("John Doe".to_string()));
        assert_eq!(answer_text("name is Gaming Mouse", "name"), Some("Gaming Mouse".to_string()));
        assert_eq!(answer_text("Gaming Mouse.", "name"), Some("Gaming Mouse".to_string()));
        assert_eq!(answer_text("   ", "name"), None);
        assert_eq!(answer_text("The name is", "name"), None);
        assert_eq!(
            answer_text("I think the name is Bob", "name"),
            Some("I think the name is Bob".to_string())
        );
    }
}

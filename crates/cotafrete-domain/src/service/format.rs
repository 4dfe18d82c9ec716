//! Display masks for Brazilian document and contact fields

/// Progressive CNPJ mask: `00.000.000/0000-00`. Non-digits are stripped;
/// partial input keeps as much of the mask as it fills.
pub fn format_cnpj(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(14).collect();
    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("{}.{}", &digits[..2], &digits[2..]),
        6..=8 => format!("{}.{}.{}", &digits[..2], &digits[2..5], &digits[5..]),
        9..=12 => format!(
            "{}.{}.{}/{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..]
        ),
        _ => format!(
            "{}.{}.{}/{}-{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..]
        ),
    }
}

/// Progressive phone mask: `(00) 00000-0000` (or 8-digit `0000-0000` lines)
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(11).collect();
    match digits.len() {
        0..=2 => digits,
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Basic e-mail shape check: `local@domain.tld` with a 2+ letter TLD
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"._%+-".contains(&b))
        && !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b".-".contains(&b))
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Percent rendered with a decimal comma, e.g. `12,34%`
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%").replace('.', ",")
}

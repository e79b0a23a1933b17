// ABOUTME: Brazilian currency formatting for commercial values
// ABOUTME: Unparseable input is returned unchanged

const MAX_AMOUNT: u64 = 1_000_000_000_000_000;

/// Formats an amount as `R$ 1.234,50`.
///
/// Accepts plain decimals ("1234.5"), Brazilian notation ("1.234,50") and an
/// optional "R$" prefix. A lone dot followed by exactly three digits after a
/// short leading group ("1.500") is a thousands separator. Anything else is
/// returned as given.
pub fn format_currency(raw: &str) -> String {
    match parse_cents(raw) {
        Some(cents) => format_cents(cents),
        None => raw.to_string(),
    }
}

fn parse_cents(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let amount = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    let (negative, amount) = match amount.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, amount),
    };
    if !amount.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let (whole, fraction) = split_amount(amount)?;
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let reais: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    if reais >= MAX_AMOUNT {
        return None;
    }

    let mut digits = fraction.bytes().map(|b| u64::from(b - b'0'));
    let mut cents = digits.next().unwrap_or(0) * 10 + digits.next().unwrap_or(0);
    if digits.next().is_some_and(|d| d >= 5) {
        cents += 1;
    }

    let total = i64::try_from(reais * 100 + cents).ok()?;
    Some(if negative { -total } else { total })
}

/// Splits into whole-real digits and fraction digits, separators removed
fn split_amount(amount: &str) -> Option<(String, &str)> {
    if let Some((whole, fraction)) = amount.split_once(',') {
        if fraction.contains([',', '.']) {
            return None;
        }
        return Some((whole.replace('.', ""), fraction));
    }

    match amount.matches('.').count() {
        0 => Some((amount.to_string(), "")),
        1 => {
            let (whole, fraction) = amount.split_once('.')?;
            let grouped = fraction.len() == 3
                && (1..=3).contains(&whole.len())
                && !whole.starts_with('0');
            if grouped {
                Some((format!("{}{}", whole, fraction), ""))
            } else {
                Some((whole.to_string(), fraction))
            }
        }
        _ => Some((amount.replace('.', ""), "")),
    }
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("R$ {}{},{:02}", sign, grouped, cents % 100)
}

//! Display helpers for App Mart listings.

/// `0`, NaN or a non-finite price renders as "Free".
pub fn format_price(price: f64) -> String {
    if !price.is_finite() || price == 0.0 {
        return "Free".to_string();
    }
    format!("${:.2}", price)
}

/// 字串版本，取開頭的數字部分（"9.99 USD" -> 9.99），無法解析時視為免費
pub fn format_price_str(raw: &str) -> String {
    leading_float(raw).map_or_else(|| "Free".to_string(), format_price)
}

pub fn format_review_count(count: u64) -> String {
    if count >= 1_000_000 {
        with_suffix(count as f64 / 1_000_000.0, 'M')
    } else if count >= 1_000 {
        with_suffix(count as f64 / 1_000.0, 'K')
    } else {
        count.to_string()
    }
}

/// Absent or unparseable counts render as "0".
pub fn format_review_count_str(raw: Option<&str>) -> String {
    raw.and_then(leading_integer)
        .map(format_review_count)
        .unwrap_or_else(|| "0".to_string())
}

fn with_suffix(value: f64, suffix: char) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}{}", value, suffix)
    } else {
        format!("{:.1}{}", value, suffix)
    }
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(|c: char| c == '-' || c == '+'))
}

/// 取字串開頭的整數部分，例如 "1500 reviews" -> 1500；負數視為無效
fn leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let sign = sign_len(trimmed);
    let digits = count_digits(&trimmed[sign..]);
    if digits == 0 {
        return None;
    }
    trimmed[..sign + digits].parse().ok()
}

/// 取字串開頭的小數部分，例如 "9.99 USD" -> 9.99
fn leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let sign = sign_len(trimmed);
    let int_digits = count_digits(&trimmed[sign..]);
    let mut end = sign + int_digits;
    let mut frac_digits = 0;

    if trimmed[end..].starts_with('.') {
        frac_digits = count_digits(&trimmed[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}

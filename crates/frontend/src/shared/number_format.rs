//! Форматирование чисел и денежных сумм для таблиц и карточек

/// Разделение разрядов неразрывным пробелом: 1234567 -> "1 234 567"
pub fn format_thousands(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Сумма в реалах: "R$ 1 899,90"
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}R$ {},{:02}", sign, format_thousands(cents / 100), cents % 100)
}

pub fn format_money_opt(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1234567), "1\u{a0}234\u{a0}567");
        assert_eq!(format_thousands(-1500), "-1\u{a0}500");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1899.9), "R$ 1\u{a0}899,90");
        assert_eq!(format_money(0.5), "R$ 0,50");
        assert_eq!(format_money(-12.0), "-R$ 12,00");
        assert_eq!(format_money_opt(None), "-");
    }
}

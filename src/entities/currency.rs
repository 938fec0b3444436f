/// Formats a value the way pt-BR browsers render BRL: `R$ 1.234,56`.
///
/// The separator after the symbol is a non-breaking space, matching what
/// `Intl.NumberFormat` produces for the same locale.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let reais = cents / 100;
    let centavos = cents % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{}R$\u{a0}{},{:02}", sign, grouped, centavos)
}

#[test]
fn formats_zero() {
    assert_eq!(format_brl(0.0), "R$\u{a0}0,00");
}

#[test]
fn formats_cents_and_thousands() {
    assert_eq!(format_brl(250.0), "R$\u{a0}250,00");
    assert_eq!(format_brl(22.5), "R$\u{a0}22,50");
    assert_eq!(format_brl(1234.567), "R$\u{a0}1.234,57");
    assert_eq!(format_brl(1234567.0), "R$\u{a0}1.234.567,00");
}

#[test]
fn formats_negative_values() {
    assert_eq!(format_brl(-5.0), "-R$\u{a0}5,00");
}

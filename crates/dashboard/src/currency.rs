/// Format an amount in rupees with Indian digit grouping: the last three
/// digits form one group, every pair after that its own (₹12,34,567).
pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        let remaining = len - i;
        if i > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_inr(44), "₹44");
        assert_eq!(format_inr(125), "₹125");
        assert_eq!(format_inr(0), "₹0");
    }

    #[test]
    fn thousands_group_western_style() {
        assert_eq!(format_inr(1_000), "₹1,000");
        assert_eq!(format_inr(55_345), "₹55,345");
        assert_eq!(format_inr(45_220), "₹45,220");
    }

    #[test]
    fn lakhs_and_crores_group_in_pairs() {
        assert_eq!(format_inr(123_456), "₹1,23,456");
        assert_eq!(format_inr(1_234_567), "₹12,34,567");
        assert_eq!(format_inr(12_345_678), "₹1,23,45,678");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_inr(-45_220), "-₹45,220");
    }
}

use lazy_static::lazy_static;
use regex::Regex;

/// Field values extracted from one alert message body. A field the rules
/// cannot find is None, not an error.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Extraction {
    pub(crate) card: Option<String>,
    pub(crate) amount: Option<f32>,
    pub(crate) narration: Option<String>,
}

// Per field, most specific pattern first. The first pattern that matches
// anywhere in the text wins and the rest are not tried.
const CARD_PATTERNS: [&str; 4] = [
    r"(?:your\s+)?(\w+\s+Credit\s+Card).*?ending\s+(\d{4})",
    r"(?:your\s+)?(\w+\s+Bank\s+Credit\s+Card).*?XX(\d{4})",
    r"(?:your\s+)?(\w+\s+Bank\s+Credit\s+Card).*?(\d{4})",
    r"(?:your\s+)?(\w+\s+Credit\s+Card).*?(\d{4})",
];

const AMOUNT_PATTERNS: [&str; 3] = [
    r"(?:transaction|spent|charge|payment|debited)\s+(?:of\s+)?(?:Rs\.|INR)\s*(\d+(?:,\d+)*(?:\.\d{2})?)",
    r"(?:Rs\.|INR)\s*(\d+(?:,\d+)*(?:\.\d{2})?)\s+(?:spent|debited|transaction|has been done)",
    r"(?:Rs\.|INR)\s*(\d+(?:,\d+)*(?:\.\d{2})?)",
];

const NARRATION_PATTERNS: [&str; 2] = [
    r"at\s+([^.]+?)\s+on\s+\d",
    r"Info:\s+([^.]+)",
];

lazy_static! {
    static ref CARD_REGEXES: Vec<Regex> = compile(&CARD_PATTERNS);
    static ref AMOUNT_REGEXES: Vec<Regex> = compile(&AMOUNT_PATTERNS);
    static ref NARRATION_REGEXES: Vec<Regex> = compile(&NARRATION_PATTERNS);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(&("(?i)".to_string() + p)).unwrap()).collect()
}

/// Extract card, amount and narration from one alert message body. The three
/// fields are independent, a miss on one does not affect the others.
pub(crate) fn extract(message: &str) -> Extraction {
    let mut fields = Extraction { card: None, amount: None, narration: None };

    for regex in CARD_REGEXES.iter() {
        if let Some(captures) = regex.captures(message) {
            fields.card = Some(format!("{} - {}", captures[1].trim(), &captures[2]));
            break;
        }
    }

    for regex in AMOUNT_REGEXES.iter() {
        if let Some(captures) = regex.captures(message) {
            fields.amount = captures[1].replace(',', "").parse::<f32>().ok();
            break;
        }
    }

    for regex in NARRATION_REGEXES.iter() {
        if let Some(captures) = regex.captures(message) {
            fields.narration = Some(captures[1].trim().to_string());
            break;
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use crate::extract::extract;

    #[test]
    fn test_masked_card_alert() {
        let result = extract("Your HDFC Bank Credit Card XX1234 was used for a transaction of Rs. 2,500.00 at Amazon on 01-10-24. Info: Online purchase.");
        assert_eq!(result.card, Some("HDFC Bank Credit Card - 1234".to_string()));
        assert_eq!(result.amount, Some(2500.0));
        assert_eq!(result.narration, Some("Amazon".to_string()));
    }

    #[test]
    fn test_amount_before_keyword() {
        let result = extract("Rs. 500 spent on your SBI Credit Card 4321.");
        assert_eq!(result.card, Some("SBI Credit Card - 4321".to_string()));
        assert_eq!(result.amount, Some(500.0));
        assert_eq!(result.narration, None);
    }

    #[test]
    fn test_no_recognizable_fields() {
        let result = extract("Your statement for October is now available.");
        assert_eq!(result.card, None);
        assert_eq!(result.amount, None);
        assert_eq!(result.narration, None);
    }

    #[test]
    fn test_card_rule_priority() {
        // The masked XX form is listed before the loose 4-digit form, so the
        // masked digits win over the earlier unmasked sequence.
        let result = extract("Your AXIS Bank Credit Card 1111 XX2222 was used.");
        assert_eq!(result.card, Some("AXIS Bank Credit Card - 2222".to_string()));
    }

    #[test]
    fn test_card_ending_keyword() {
        let result = extract("Your ICICI Credit Card ending 5678 has been charged.");
        assert_eq!(result.card, Some("ICICI Credit Card - 5678".to_string()));
    }

    #[test]
    fn test_amount_rule_priority() {
        // The keyword-qualified tier is tried before the bare currency-number
        // tier, even though the bare tier would match earlier in the text.
        let result = extract("Ref Rs. 99, a transaction of Rs. 2,500.00 was made.");
        assert_eq!(result.amount, Some(2500.0));
    }

    #[test]
    fn test_amount_thousands_separators() {
        let with_commas = extract("A transaction of Rs. 1,234.50 was made.");
        let without_commas = extract("A transaction of Rs. 1234.50 was made.");
        assert_eq!(with_commas.amount, Some(1234.5));
        assert_eq!(without_commas.amount, Some(1234.5));
    }

    #[test]
    fn test_amount_inr_marker() {
        let result = extract("INR 750.00 debited from your account.");
        assert_eq!(result.amount, Some(750.0));
    }

    #[test]
    fn test_no_currency_marker() {
        let result = extract("Your UPI payment of 300 is pending.");
        assert_eq!(result.amount, None);
    }

    #[test]
    fn test_narration_info_fallback() {
        let result = extract("Payment received. Info: Fuel surcharge reversal");
        assert_eq!(result.narration, Some("Fuel surcharge reversal".to_string()));
    }
}

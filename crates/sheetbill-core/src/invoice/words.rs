//! Amounts in words, Indian numbering system.
//!
//! Groups are hundreds, thousands and lakhs (1,00,000). Amounts of one crore
//! (1,00,00,000) and above are not spelled out.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::config::WordsConfig;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Returned for amounts of one crore and above.
pub const AMOUNT_TOO_LARGE: &str = "Amount too large";

const ONE_CRORE: u64 = 10_000_000;

/// Words for `n < 1000`, every word followed by a space.
fn hundreds(mut n: u64) -> String {
    let mut words = String::new();

    if n >= 100 {
        words.push_str(ONES[(n / 100) as usize]);
        words.push_str(" Hundred ");
        n %= 100;
    }

    if n >= 20 {
        words.push_str(TENS[(n / 10) as usize]);
        words.push(' ');
        n %= 10;
    } else if n >= 10 {
        words.push_str(TEENS[(n - 10) as usize]);
        words.push(' ');
        n = 0;
    }

    if n > 0 {
        words.push_str(ONES[n as usize]);
        words.push(' ');
    }

    words
}

/// Spell out a whole number using Indian grouping.
///
/// Below one thousand the result is trimmed; from one thousand up each group
/// keeps its trailing space, so `1000` reads `"One Thousand "`. An empty
/// thousands group inside a lakh amount is left out entirely.
pub fn number_to_words_indian(num: u64) -> String {
    match num {
        0 => "Zero".to_string(),
        1..=999 => hundreds(num).trim().to_string(),
        1_000..=99_999 => format!("{}Thousand {}", hundreds(num / 1000), hundreds(num % 1000)),
        100_000..ONE_CRORE => {
            let mut words = format!("{}Lakh ", hundreds(num / 100_000));
            let thousands = (num % 100_000) / 1000;
            // A zero thousands group prints nothing, so 100000 reads "One Lakh"
            // and not "One Lakh Thousand".
            if thousands > 0 {
                words.push_str(&hundreds(thousands));
                words.push_str("Thousand ");
            }
            words.push_str(&hundreds(num % 1000));
            words
        }
        _ => AMOUNT_TOO_LARGE.to_string(),
    }
}

/// Render a monetary amount as a currency phrase, e.g.
/// `"Indian Rupee Two Hundred Eighty Eight Only"`.
///
/// The fractional part is dropped. Negative amounts read `"Minus ..."`.
pub fn amount_in_words(amount: Decimal, config: &WordsConfig) -> String {
    let whole = amount.trunc();
    let sign = if whole < Decimal::ZERO { "Minus " } else { "" };
    let words = whole
        .abs()
        .to_u64()
        .map(number_to_words_indian)
        .unwrap_or_else(|| AMOUNT_TOO_LARGE.to_string());

    format!("{} {}{} {}", config.currency, sign, words.trim(), config.suffix)
}

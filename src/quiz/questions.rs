use super::Question;

pub const QUIZ_TITLE: &str = "Leyline Pop Quiz";

/// The fixed question list shown to every player.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "What does 'diversification' primarily aim to do in an investment portfolio?",
            &[
                ("a", "Maximize risk for higher returns"),
                ("b", "Concentrate investments in a single asset"),
                ("c", "Reduce overall risk by spreading investments"),
                ("d", "Guarantee profits"),
            ],
            "c",
        ),
        Question::new(
            "What is a 'bull market' generally characterized by?",
            &[
                ("a", "Falling stock prices and investor pessimism"),
                ("b", "Rising stock prices and investor optimism"),
                ("c", "Stagnant stock prices and investor uncertainty"),
                ("d", "High volatility with no clear direction"),
            ],
            "b",
        ),
        Question::new(
            "What does the acronym 'IPO' stand for in finance?",
            &[
                ("a", "Internal Profit Organization"),
                ("b", "Initial Public Offering"),
                ("c", "Investment Portfolio Optimization"),
                ("d", "Immediate Payout Obligation"),
            ],
            "b",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_keys_are_among_options() {
        for question in default_questions() {
            assert!(question.has_option(&question.correct_option_key));
        }
    }
}

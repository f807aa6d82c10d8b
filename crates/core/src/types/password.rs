//! Password strength scoring for the registration form.

/// Strength of a candidate password on a 0-6 scale.
///
/// One point each for: at least 8 characters, at least 12 characters, a
/// lowercase letter, an uppercase letter, a digit, and any other character.
/// Character classes are ASCII.
///
/// ```
/// use bazaar_core::PasswordStrength;
///
/// assert_eq!(PasswordStrength::evaluate("").score(), 0);
/// assert_eq!(PasswordStrength::evaluate("Abc12345!xyz").label(), "Very Strong");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

const LABELS: [&str; 6] = ["Very Weak", "Weak", "Fair", "Good", "Strong", "Very Strong"];
const COLORS: [&str; 6] = [
    "#ff4d4d", "#ff751a", "#ffb84d", "#ffe066", "#a3d977", "#4caf50",
];
const UNSCORED_COLOR: &str = "#ccc";

impl PasswordStrength {
    /// Highest achievable score.
    pub const MAX_SCORE: u8 = 6;

    /// Score a password.
    ///
    /// Length counts twice (at 8 and at 12 characters), so a password under
    /// 12 characters tops out at 5 even with every character class.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        if password.is_empty() {
            return Self(0);
        }

        let length = password.chars().count();
        let criteria = [
            length >= 8,
            length >= 12,
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];

        #[allow(clippy::cast_possible_truncation)] // at most 6
        let score = criteria.iter().filter(|met| **met).count() as u8;
        Self(score)
    }

    /// The raw score, 0 through [`Self::MAX_SCORE`].
    #[must_use]
    pub const fn score(self) -> u8 {
        self.0
    }

    /// Human-readable label. Scores 0 and 1 are both "Very Weak".
    #[must_use]
    pub fn label(self) -> &'static str {
        self.tier()
            .and_then(|i| LABELS.get(i))
            .copied()
            .unwrap_or("Very Weak")
    }

    /// Meter colour as a CSS hex string.
    #[must_use]
    pub fn color(self) -> &'static str {
        self.tier()
            .and_then(|i| COLORS.get(i))
            .copied()
            .unwrap_or(UNSCORED_COLOR)
    }

    /// Meter fill as a whole percentage.
    #[must_use]
    pub fn percent(self) -> u8 {
        // at most 600 / 6
        #[allow(clippy::cast_possible_truncation)]
        let percent = (u16::from(self.0) * 100 / u16::from(Self::MAX_SCORE)) as u8;
        percent
    }

    /// Index into the label and colour tables, `None` for a zero score.
    fn tier(self) -> Option<usize> {
        usize::from(self.0).checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scores_zero() {
        let strength = PasswordStrength::evaluate("");
        assert_eq!(strength.score(), 0);
        assert_eq!(strength.label(), "Very Weak");
        assert_eq!(strength.color(), "#ccc");
        assert_eq!(strength.percent(), 0);
    }

    #[test]
    fn test_nine_chars_all_classes() {
        // length >= 8, lower, upper, digit, symbol; not >= 12
        let strength = PasswordStrength::evaluate("Abc12345!");
        assert_eq!(strength.score(), 5);
        assert_eq!(strength.label(), "Strong");
        assert_eq!(strength.color(), "#a3d977");
    }

    #[test]
    fn test_max_score() {
        let strength = PasswordStrength::evaluate("Abc12345!xyz");
        assert_eq!(strength.score(), PasswordStrength::MAX_SCORE);
        assert_eq!(strength.label(), "Very Strong");
        assert_eq!(strength.color(), "#4caf50");
        assert_eq!(strength.percent(), 100);
    }

    #[test]
    fn test_single_class() {
        let strength = PasswordStrength::evaluate("abc");
        assert_eq!(strength.score(), 1);
        assert_eq!(strength.label(), "Very Weak");
        assert_eq!(strength.color(), "#ff4d4d");
        assert_eq!(strength.percent(), 16);
    }

    #[test]
    fn test_long_lowercase() {
        // both length criteria plus lowercase
        let strength = PasswordStrength::evaluate("abcdefghijkl");
        assert_eq!(strength.score(), 3);
        assert_eq!(strength.label(), "Fair");
    }

    #[test]
    fn test_non_ascii_counts_as_symbol() {
        let strength = PasswordStrength::evaluate("é");
        assert_eq!(strength.score(), 1);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 4 chars, 8 bytes: no length point
        let strength = PasswordStrength::evaluate("éééé");
        assert_eq!(strength.score(), 1);
    }

    #[test]
    fn test_ordering() {
        assert!(PasswordStrength::evaluate("abc") < PasswordStrength::evaluate("Abc12345!"));
    }
}

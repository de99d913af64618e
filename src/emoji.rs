pub const MISSING_TEXT: &str = "❓";
pub const NO_KEYWORD: &str = "📝";

/// Keyword to emoji pairs. Earlier entries win when several keywords appear.
#[derive(Debug, Clone)]
pub struct EmojiTable {
    entries: Vec<(String, String)>,
}

impl EmojiTable {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(keyword, emoji)| (keyword.to_lowercase(), emoji))
            .collect();
        Self { entries }
    }

    /// Only empty text gets the placeholder; whitespace is an ordinary unmatched task.
    pub fn emoji_for(&self, text: &str) -> &str {
        if text.is_empty() {
            return MISSING_TEXT;
        }

        let lower = text.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| lower.contains(keyword.as_str()))
            .map(|(_, emoji)| emoji.as_str())
            .unwrap_or(NO_KEYWORD)
    }
}

impl Default for EmojiTable {
    fn default() -> Self {
        const DEFAULTS: &[(&str, &str)] = &[
            ("gym", "🏋️"),
            ("workout", "💪"),
            ("exercise", "🏃"),
            ("code", "💻"),
            ("programming", "🖥️"),
            ("study", "📚"),
            ("read", "📖"),
            ("groceries", "🛒"),
            ("shop", "🛍️"),
            ("meeting", "🤝"),
            ("work", "🏢"),
            ("email", "📧"),
            ("clean", "🧼"),
            ("dishes", "🍽️"),
            ("laundry", "🧺"),
            ("cook", "🍳"),
            ("eat", "🍔"),
            ("doctor", "🩺"),
            ("appointment", "🗓️"),
            ("call", "📞"),
            ("pay bills", "💸"),
            ("relax", "🧘"),
            ("movie", "🎬"),
            ("music", "🎧"),
            ("travel", "✈️"),
            ("garden", "🌳"),
            ("walk", "🚶"),
            ("run", "🏃"),
            ("sleep", "😴"),
            ("birthday", "🎂"),
            ("party", "🎉"),
        ];

        Self::new(
            DEFAULTS
                .iter()
                .map(|(keyword, emoji)| (keyword.to_string(), emoji.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_keyword_anywhere_in_text() {
        let table = EmojiTable::default();
        assert_eq!(table.emoji_for("Go to the GYM"), "🏋️");
        assert_eq!(table.emoji_for("buy groceries"), "🛒");
    }

    #[test]
    fn earlier_keyword_wins() {
        let table = EmojiTable::default();
        // "workout" precedes "work" in the table.
        assert_eq!(table.emoji_for("morning workout"), "💪");
        // "study" precedes "read".
        assert_eq!(table.emoji_for("study then read"), "📚");
    }

    #[test]
    fn fallbacks() {
        let table = EmojiTable::default();
        assert_eq!(table.emoji_for(""), MISSING_TEXT);
        assert_eq!(table.emoji_for("   "), NO_KEYWORD);
        assert_eq!(table.emoji_for("file taxes"), NO_KEYWORD);
    }

    #[test]
    fn custom_table_is_case_folded() {
        let table = EmojiTable::new(vec![("Piano".to_string(), "🎹".to_string())]);
        assert_eq!(table.emoji_for("piano practice"), "🎹");
        assert_eq!(table.emoji_for("gym"), NO_KEYWORD);
    }
}

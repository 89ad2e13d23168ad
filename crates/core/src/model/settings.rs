use thiserror::Error;

/// Countdown length for one attempt.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

/// Key the progress snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "quizState";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("time limit must be > 0")]
    InvalidTimeLimit,

    #[error("storage key cannot be empty")]
    EmptyStorageKey,
}

/// Knobs for a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit_secs: u32,
    storage_key: String,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `QuizSettingsError` if the time limit is zero or the key is blank.
    pub fn new(time_limit_secs: u32, storage_key: impl Into<String>) -> Result<Self, QuizSettingsError> {
        let storage_key = storage_key.into().trim().to_string();
        if time_limit_secs == 0 {
            return Err(QuizSettingsError::InvalidTimeLimit);
        }
        if storage_key.is_empty() {
            return Err(QuizSettingsError::EmptyStorageKey);
        }
        Ok(Self {
            time_limit_secs,
            storage_key,
        })
    }

    /// Same defaults with a different time limit.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidTimeLimit` for zero.
    pub fn with_time_limit(self, time_limit_secs: u32) -> Result<Self, QuizSettingsError> {
        Self::new(time_limit_secs, self.storage_key)
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quiz_rules() {
        let settings = QuizSettings::default();
        assert_eq!(settings.time_limit_secs(), 60);
        assert_eq!(settings.storage_key(), "quizState");
    }

    #[test]
    fn rejects_zero_limit_and_blank_key() {
        assert_eq!(
            QuizSettings::new(0, "k"),
            Err(QuizSettingsError::InvalidTimeLimit)
        );
        assert_eq!(
            QuizSettings::new(10, "  "),
            Err(QuizSettingsError::EmptyStorageKey)
        );
        let custom = QuizSettings::default().with_time_limit(5).unwrap();
        assert_eq!(custom.time_limit_secs(), 5);
        assert_eq!(custom.storage_key(), DEFAULT_STORAGE_KEY);
    }
}

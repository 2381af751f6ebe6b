//! Boolean option tokens.
//!
//! Manifest flags such as `private` and `https` accept either a TOML boolean or one
//! of a small set of words (`yes`, `off`, `1`, ...). Anything outside that set is
//! reported as [`Token::Unrecognized`] and treated as false by [`Flag::enabled`].

use serde::Deserialize;

use crate::ui;

/// Tri-state classification of a boolean token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    True,
    False,
    Unrecognized,
}

impl Token {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Token::True => Some(true),
            Token::False => Some(false),
            Token::Unrecognized => None,
        }
    }
}

/// Classify a string against the truthy/falsy vocabulary, ignoring case.
pub fn classify(input: &str) -> Token {
    match input.to_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "on" | "1" => Token::True,
        "f" | "false" | "n" | "no" | "off" | "0" => Token::False,
        _ => Token::Unrecognized,
    }
}

/// A flag value as written in the manifest.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    pub fn token(&self) -> Token {
        match self {
            Flag::Bool(true) => Token::True,
            Flag::Bool(false) => Token::False,
            Flag::Text(s) => classify(s),
        }
    }

    /// Resolve the flag, warning when the token is not part of the vocabulary.
    /// `key` names the option in the warning.
    pub fn enabled(&self, key: &str) -> bool {
        match self.token().as_bool() {
            Some(b) => b,
            None => {
                if let Flag::Text(s) = self {
                    ui::warn(&format!(
                        "unrecognized value {:?} for '{}', treating it as false",
                        s, key
                    ));
                }
                false
            }
        }
    }
}

/// Shorthand for optional flags: an absent flag is false.
pub fn is_set(flag: Option<&Flag>, key: &str) -> bool {
    flag.is_some_and(|f| f.enabled(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_tokens() {
        for s in ["t", "true", "y", "yes", "on", "1", "TRUE", "Yes", "ON"] {
            assert_eq!(classify(s), Token::True, "{s}");
        }
    }

    #[test]
    fn test_falsy_tokens() {
        for s in ["f", "false", "n", "no", "off", "0", "False", "NO"] {
            assert_eq!(classify(s), Token::False, "{s}");
        }
    }

    #[test]
    fn test_unrecognized_token_is_false() {
        assert_eq!(classify("maybe"), Token::Unrecognized);
        assert_eq!(classify(""), Token::Unrecognized);
        assert!(!Flag::Text("enabled".to_string()).enabled("private"));
    }

    #[test]
    fn test_toml_booleans() {
        assert!(Flag::Bool(true).enabled("https"));
        assert!(!Flag::Bool(false).enabled("https"));
        assert!(!is_set(None, "https"));
        assert!(is_set(Some(&Flag::Text("on".to_string())), "https"));
    }
}

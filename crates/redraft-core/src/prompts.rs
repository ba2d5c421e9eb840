//! Style-to-prompt registry.
//!
//! Maps a rewrite style to its instruction pair through an immutable lookup
//! table, keeping the registry open for extension and trivially testable.

use serde::{Deserialize, Serialize};

/// Tone selectable for a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteStyle {
    /// Default style when none is selected: generally improve the text.
    Improve,
    Professional,
    Casual,
    Formal,
    Friendly,
    Academic,
    Simple,
}

impl RewriteStyle {
    /// All styles offered to the user.
    pub const ALL: [RewriteStyle; 7] = [
        RewriteStyle::Improve,
        RewriteStyle::Professional,
        RewriteStyle::Casual,
        RewriteStyle::Formal,
        RewriteStyle::Friendly,
        RewriteStyle::Academic,
        RewriteStyle::Simple,
    ];
}

impl std::fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RewriteStyle::Improve => "improve",
            RewriteStyle::Professional => "professional",
            RewriteStyle::Casual => "casual",
            RewriteStyle::Formal => "formal",
            RewriteStyle::Friendly => "friendly",
            RewriteStyle::Academic => "academic",
            RewriteStyle::Simple => "simple",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for RewriteStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "improve" => Ok(RewriteStyle::Improve),
            "professional" => Ok(RewriteStyle::Professional),
            "casual" => Ok(RewriteStyle::Casual),
            "formal" => Ok(RewriteStyle::Formal),
            "friendly" => Ok(RewriteStyle::Friendly),
            "academic" => Ok(RewriteStyle::Academic),
            "simple" => Ok(RewriteStyle::Simple),
            other => Err(format!("unknown rewrite style: {}", other)),
        }
    }
}

/// Immutable instruction pair for one style.
///
/// `user_template` contains `{n}` and `{text}` placeholders filled in by
/// [`StylePrompt::user_instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePrompt {
    pub style: RewriteStyle,
    pub system_instruction: &'static str,
    pub user_template: &'static str,
}

impl StylePrompt {
    /// Render the user instruction for a given suggestion count and input text.
    pub fn user_instruction(&self, count: usize, text: &str) -> String {
        self.user_template
            .replace("{n}", &count.to_string())
            .replace("{text}", text)
    }
}

const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// The registry. Every style offered to the user resolves to exactly one
/// entry here.
static STYLE_PROMPTS: [StylePrompt; 7] = [
    StylePrompt {
        style: RewriteStyle::Improve,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text: \"{text}\"",
    },
    StylePrompt {
        style: RewriteStyle::Professional,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text in a professional tone: \"{text}\"",
    },
    StylePrompt {
        style: RewriteStyle::Casual,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text in a casual tone: \"{text}\"",
    },
    StylePrompt {
        style: RewriteStyle::Formal,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text in a formal tone: \"{text}\"",
    },
    StylePrompt {
        style: RewriteStyle::Friendly,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text in a friendly tone: \"{text}\"",
    },
    StylePrompt {
        style: RewriteStyle::Academic,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text in an academic tone: \"{text}\"",
    },
    StylePrompt {
        style: RewriteStyle::Simple,
        system_instruction: SYSTEM_INSTRUCTION,
        user_template:
            "Please provide {n} separate suggestions for rewriting the following text in simple, plain language: \"{text}\"",
    },
];

/// Look up the instruction pair for a style.
pub fn style_prompt(style: RewriteStyle) -> &'static StylePrompt {
    STYLE_PROMPTS
        .iter()
        .find(|p| p.style == style)
        .expect("every RewriteStyle has a registry entry")
}

/// System instruction for the grammar/spelling correction request.
pub const CORRECTION_SYSTEM_INSTRUCTION: &str = SYSTEM_INSTRUCTION;

/// Build the user instruction for a correction check.
///
/// The instruction requests only grammar/spelling correction and states the
/// explicit contract that mistake-free input must be returned unchanged. The
/// backend is responsible for honoring it; the session does not second-guess
/// the result.
pub fn correction_instruction(text: &str) -> String {
    format!(
        "Please rewrite the following text with corrections if it has grammar or spelling mistakes. \
         If there are no mistakes, return the text unchanged: \"{}\".",
        text
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_every_style_resolves_to_exactly_one_entry() {
        for style in RewriteStyle::ALL {
            let matches: Vec<_> = STYLE_PROMPTS.iter().filter(|p| p.style == style).collect();
            assert_eq!(matches.len(), 1, "style {} must have one entry", style);
        }
    }

    #[test]
    fn test_registry_covers_all_styles() {
        let covered: HashSet<_> = STYLE_PROMPTS.iter().map(|p| p.style).collect();
        assert_eq!(covered.len(), RewriteStyle::ALL.len());
    }

    #[test]
    fn test_style_prompt_lookup() {
        let prompt = style_prompt(RewriteStyle::Casual);
        assert_eq!(prompt.style, RewriteStyle::Casual);
        assert!(prompt.user_template.contains("casual"));
    }

    #[test]
    fn test_user_instruction_substitution() {
        let prompt = style_prompt(RewriteStyle::Simple);
        let instruction = prompt.user_instruction(2, "We require additional resources.");
        assert!(instruction.contains("2 separate suggestions"));
        assert!(instruction.contains("\"We require additional resources.\""));
        assert!(!instruction.contains("{n}"));
        assert!(!instruction.contains("{text}"));
    }

    #[test]
    fn test_improve_template_has_no_tone_clause() {
        let prompt = style_prompt(RewriteStyle::Improve);
        assert!(!prompt.user_template.contains("tone"));
    }

    #[test]
    fn test_correction_instruction_states_contract() {
        let instruction = correction_instruction("I has a apple.");
        assert!(instruction.contains("\"I has a apple.\""));
        assert!(instruction.contains("return the text unchanged"));
    }

    #[test]
    fn test_style_display_round_trips_from_str() {
        for style in RewriteStyle::ALL {
            let parsed = RewriteStyle::from_str(&style.to_string()).unwrap();
            assert_eq!(parsed, style);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            RewriteStyle::from_str("Professional").unwrap(),
            RewriteStyle::Professional
        );
        assert_eq!(
            RewriteStyle::from_str("ACADEMIC").unwrap(),
            RewriteStyle::Academic
        );
    }

    #[test]
    fn test_from_str_unknown_style() {
        assert!(RewriteStyle::from_str("sarcastic").is_err());
    }

    #[test]
    fn test_all_templates_contain_placeholders() {
        for prompt in &STYLE_PROMPTS {
            assert!(prompt.user_template.contains("{n}"), "{}", prompt.style);
            assert!(prompt.user_template.contains("{text}"), "{}", prompt.style);
        }
    }
}

//! Prompt builder for advisor replies.

use crate::advisor::core::product::Suggestion;

/// Standing instructions for the advisor persona.
pub const INSTRUCTIONS: &str = "Você é um consultor de perfumes de uma loja online. \
Responda em português, em no máximo quatro frases, com tom acolhedor. \
Recomende apenas perfumes da lista de sugestões e cite-os pelo nome. \
Nunca invente produtos, preços ou notas.";

/// Build a deterministic prompt block for one chat turn.
///
/// The summary section is omitted when `summary` is empty.
#[must_use]
pub fn build_chat_prompt(summary: &str, suggestions: &[Suggestion], user_message: &str) -> String {
    let mut out = String::with_capacity(INSTRUCTIONS.len() + user_message.len() + 256);

    out.push_str("[INSTRUCTIONS]\n");
    out.push_str(INSTRUCTIONS);
    out.push('\n');

    if !summary.is_empty() {
        out.push_str("[PROFILE_SUMMARY]\n");
        out.push_str(summary);
        out.push('\n');
    }

    out.push_str("[SUGGESTIONS]\n");
    if suggestions.is_empty() {
        out.push_str("- none\n");
    }
    for suggestion in suggestions {
        render_suggestion(&mut out, suggestion);
    }

    out.push_str("[USER_MESSAGE]\n");
    out.push_str(user_message);
    out.push('\n');

    out
}

fn render_suggestion(out: &mut String, suggestion: &Suggestion) {
    out.push_str("- ");
    out.push_str(&suggestion.name);
    out.push_str(" (");
    out.push_str(&suggestion.brand);
    out.push_str(") [price: ");
    out.push_str(&format!("{:.2}", suggestion.price));
    out.push_str("] [reason: ");
    out.push_str(&suggestion.reason);
    out.push_str("]\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion() -> Suggestion {
        Suggestion {
            id: 1,
            name: "Jardim".to_string(),
            brand: "Casa".to_string(),
            slug: "jardim".to_string(),
            thumbnail_url: String::new(),
            price: 199.9,
            reason: "general profile match".to_string(),
        }
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = build_chat_prompt("Accords=Floral", &[suggestion()], "algo floral");
        let instructions = prompt.find("[INSTRUCTIONS]").unwrap();
        let summary = prompt.find("[PROFILE_SUMMARY]").unwrap();
        let suggestions = prompt.find("[SUGGESTIONS]").unwrap();
        let message = prompt.find("[USER_MESSAGE]").unwrap();
        assert!(instructions < summary && summary < suggestions && suggestions < message);
        assert!(prompt.contains("- Jardim (Casa) [price: 199.90] [reason: general profile match]"));
        assert!(prompt.ends_with("algo floral\n"));
    }

    #[test]
    fn test_summary_omitted_when_empty() {
        let prompt = build_chat_prompt("", &[], "oi");
        assert!(!prompt.contains("[PROFILE_SUMMARY]"));
        assert!(prompt.contains("[SUGGESTIONS]\n- none\n"));
    }
}

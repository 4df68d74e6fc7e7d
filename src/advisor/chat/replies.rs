//! Canned replies and the message gates that select them.
//!
//! Detection is Portuguese-only and works on a normalized form of the message:
//! lowercased, punctuation dropped, whitespace collapsed.

use crate::advisor::core::product::Suggestion;

/// Reply to a message made only of pleasantries.
pub const GREETING_REPLY: &str = "Olá! Sou seu consultor de perfumes. Me conte para qual \
ocasião você procura uma fragrância e quais aromas você curte que eu separo algumas opções.";

/// Reply to a leave-taking message.
pub const FAREWELL_REPLY: &str =
    "Foi um prazer ajudar! Quando quiser outra sugestão de perfume é só chamar. Até mais!";

/// Reply when the message is off-topic and nothing is known about the user yet.
pub const CLARIFY_REPLY: &str = "Posso te ajudar a encontrar o perfume ideal! \
Me conte um pouco do que você procura.";

/// Fallback reply when generation fails and there is nothing to suggest.
pub const EMPTY_FALLBACK_REPLY: &str = "Ainda não encontrei opções para o seu perfil. \
Me conte mais sobre o que você procura para eu refinar a busca.";

const GREETINGS: &[&str] = &[
    "oi", "ola", "olá", "oie", "opa", "eai", "e ai", "e aí", "bom dia", "boa tarde",
    "boa noite", "tudo bem", "oi tudo bem", "olá tudo bem", "hey", "hello", "hi",
];

const FAREWELLS: &[&str] = &[
    "tchau", "até logo", "ate logo", "até mais", "ate mais", "adeus", "valeu", "falou",
    "obrigad", "brigad",
];

const DOMAIN_KEYWORDS: &[&str] = &[
    "perfume", "fragrância", "fragrancia", "cheiro", "aroma", "colônia", "colonia",
    "essência", "essencia", "recomend", "sugest", "presente", "notas", "eau de",
];

fn normalize(message: &str) -> String {
    message
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the message is only a greeting.
#[must_use]
pub fn is_greeting(message: &str) -> bool {
    let normalized = normalize(message);
    GREETINGS.contains(&normalized.as_str())
}

/// Whether the message opens with a leave-taking token.
#[must_use]
pub fn is_farewell(message: &str) -> bool {
    let normalized = normalize(message);
    FAREWELLS.iter().any(|token| normalized.starts_with(token))
}

/// Whether the message mentions the perfume domain.
#[must_use]
pub fn mentions_domain(message: &str) -> bool {
    let lowered = message.to_lowercase();
    DOMAIN_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Deterministic reply naming up to `limit` suggestions.
#[must_use]
pub fn fallback_reply(suggestions: &[Suggestion], limit: usize) -> String {
    let names: Vec<String> = suggestions
        .iter()
        .take(limit)
        .map(|s| s.name.clone())
        .collect();
    if names.is_empty() {
        return EMPTY_FALLBACK_REPLY.to_string();
    }
    format!(
        "Separei algumas opções que combinam com você: {}. Quer saber mais sobre alguma delas?",
        join_list(&names)
    )
}

/// Whether the reply names any suggestion, case-insensitively.
#[must_use]
pub fn mentions_any(reply: &str, suggestions: &[Suggestion]) -> bool {
    let lowered = reply.to_lowercase();
    suggestions
        .iter()
        .any(|s| lowered.contains(&s.name.to_lowercase()))
}

/// Append a tail naming up to `limit` suggestions with brands when the reply names none.
#[must_use]
pub fn with_tail(reply: String, suggestions: &[Suggestion], limit: usize) -> String {
    if limit == 0 || suggestions.is_empty() || mentions_any(&reply, suggestions) {
        return reply;
    }

    let named: Vec<String> = suggestions
        .iter()
        .take(limit)
        .map(|s| format!("{} ({})", s.name, s.brand))
        .collect();
    format!("{reply}\n\nVale conferir: {}.", join_list(&named))
}

fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} e {last}", head.join(", ")),
    }
}

//! Curated keyword table for preference extraction.
//!
//! Each row is `(category, pattern, canonical label)`. Patterns are regex
//! fragments matched as whole words against the lowercased message.

use serde::{Deserialize, Serialize};

use crate::advisor::core::slots::SlotCategory;
use crate::advisor::core::slots::SlotCategory::{
    Accords, Budget, Climate, Gender, Intensity, Longevity, Notes, Occasions, Seasons,
};

/// One extraction rule: a pattern that, when found, yields a canonical label.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Category the label belongs to.
    pub category: SlotCategory,
    /// Regex fragment matched as a whole word (or phrase).
    pub pattern: String,
    /// Canonical display label stored in the slots.
    pub label: String,
}

impl KeywordRule {
    /// Build a rule.
    #[must_use]
    pub fn new(
        category: SlotCategory,
        pattern: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category,
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

/// The default Portuguese keyword table, converted to owned rules.
#[must_use]
pub fn default_rules() -> Vec<KeywordRule> {
    DEFAULT_KEYWORDS
        .iter()
        .map(|(category, pattern, label)| KeywordRule::new(*category, *pattern, *label))
        .collect()
}

#[rustfmt::skip]
const DEFAULT_KEYWORDS: &[(SlotCategory, &str, &str)] = &[
    // Occasions
    (Occasions, r"trabalh(?:o|ar)|escrit[oó]rio|reuni(?:[aã]o|[oõ]es)|corporativ[oa]", "Trabalho"),
    (Occasions, r"dia a dia|dia-a-dia|cotidiano|rotina|todo dia", "Dia a dia"),
    (Occasions, r"festas?|comemora[cç][aã]o", "Festa"),
    (Occasions, r"baladas?|noitadas?|night", "Balada"),
    (Occasions, r"encontros?|date|namoro|namorar|jantar rom[aâ]ntico", "Encontro"),
    (Occasions, r"casamentos?|formatura|cerim[oô]nia|evento formal|black tie", "Eventos formais"),
    (Occasions, r"academia|treinos?|esportes?", "Esporte"),
    (Occasions, r"viage(?:m|ns)|viajar|f[eé]rias", "Viagem"),
    // Climate
    (Climate, r"calor|quente|tropical|abafado", "Quente"),
    (Climate, r"frio|gelado|friozinho", "Frio"),
    (Climate, r"ameno|temperado|meia[- ]esta[cç][aã]o", "Ameno"),
    (Climate, r"[uú]mido|umidade|chuvoso", "Úmido"),
    (Climate, r"seco", "Seco"),
    // Seasons
    (Seasons, r"ver[aã]o", "Verão"),
    (Seasons, r"inverno", "Inverno"),
    (Seasons, r"primavera", "Primavera"),
    (Seasons, r"outono", "Outono"),
    (Seasons, r"o ano todo|ano inteiro|qualquer esta[cç][aã]o|todas as esta[cç][oõ]es", "Ano todo"),
    // Intensity
    (Intensity, r"suaves?|leves?|discret[oa]s?|sut(?:il|is)|delicad[oa]s?", "Suave"),
    (Intensity, r"moderad[oa]s?|equilibrad[oa]s?|m[eé]dia intensidade", "Moderada"),
    (Intensity, r"intens[oa]s?|fortes?|marcantes?|potentes?|chamativ[oa]s?", "Intensa"),
    // Accords
    (Accords, r"florais|floral|flores|florad[oa]s?", "Floral"),
    (Accords, r"amadeirad[oa]s?|madeiras?|woody", "Amadeirado"),
    (Accords, r"c[ií]tric[oa]s?|citrus", "Cítrico"),
    (Accords, r"doces?|adocicad[oa]s?", "Doce"),
    (Accords, r"gourmands?", "Gourmand"),
    (Accords, r"orienta(?:l|is)|ambarad[oa]s?|[aâ]mbar", "Oriental"),
    (Accords, r"aqu[aá]tic[oa]s?|marinh[oa]s?|oce[aâ]nic[oa]s?", "Aquático"),
    (Accords, r"fresc[oa]s?|refrescantes?", "Fresco"),
    (Accords, r"frutad[oa]s?|frutas?", "Frutado"),
    (Accords, r"especiad[oa]s?|picantes?|apimentad[oa]s?", "Especiado"),
    (Accords, r"arom[aá]tic[oa]s?|herba(?:l|is)|ervas", "Aromático"),
    (Accords, r"almiscarad[oa]s?|alm[ií]scar|musk", "Almiscarado"),
    (Accords, r"couro|leather", "Couro"),
    (Accords, r"verdes?", "Verde"),
    (Accords, r"chipres?|chypre", "Chipre"),
    (Accords, r"foug[eè]re", "Fougère"),
    // Budget
    (Budget, r"barat[oa]s?|econ[oô]mic[oa]s?|em conta|acess[ií]ve(?:l|is)|pouco dinheiro", "Econômico"),
    (Budget, r"m[eé]dio|intermedi[aá]rio|custo[- ]benef[ií]cio|razo[aá]vel", "Médio"),
    (Budget, r"car[oa]s? demais|mais car[oa]s?|caros?|premium|luxo|luxuos[oa]s?|sem limite|importad[oa]s?", "Premium"),
    // Longevity
    (Longevity, r"alta fixa[cç][aã]o|fixa[cç][aã]o alta|boa fixa[cç][aã]o|longa dura[cç][aã]o|duradour[oa]s?|dure o dia|o dia todo|fixa muito", "Alta"),
    (Longevity, r"fixa[cç][aã]o m[eé]dia|fixa[cç][aã]o moderada|m[eé]dia fixa[cç][aã]o", "Moderada"),
    (Longevity, r"baixa fixa[cç][aã]o|pouca fixa[cç][aã]o|curta dura[cç][aã]o|fixa pouco", "Baixa"),
    // Gender
    (Gender, r"masculin[oa]s?|home(?:m|ns)|para ele|marido|namorado|pai", "Masculino"),
    (Gender, r"feminin[oa]s?|mulher(?:es)?|para ela|esposa|namorada|m[aã]e", "Feminino"),
    (Gender, r"unissex|unisex|compartilh[aá]vel|neutro|sem g[eê]nero", "Unissex"),
    // Notes
    (Notes, r"baunilha|vanilla", "Baunilha"),
    (Notes, r"rosas?", "Rosa"),
    (Notes, r"jasmim", "Jasmim"),
    (Notes, r"lavanda", "Lavanda"),
    (Notes, r"s[aâ]ndalo", "Sândalo"),
    (Notes, r"cedro", "Cedro"),
    (Notes, r"patch(?:o)?uli", "Patchouli"),
    (Notes, r"bergamota", "Bergamota"),
    (Notes, r"caf[eé]", "Café"),
    (Notes, r"chocolate|cacau", "Chocolate"),
    (Notes, r"[oó]ud|agarwood", "Oud"),
    (Notes, r"vetiver", "Vetiver"),
    (Notes, r"tonka", "Tonka"),
    (Notes, r"canela", "Canela"),
    (Notes, r"lim[aã]o", "Limão"),
    (Notes, r"coco", "Coco"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_cover_every_category() {
        let rules = default_rules();
        for category in SlotCategory::ALL {
            assert!(
                rules.iter().any(|rule| rule.category == category),
                "no keyword for {category}"
            );
        }
    }

    #[test]
    fn test_default_rules_are_grouped_in_canonical_order() {
        let rules = default_rules();
        let position = |category: SlotCategory| {
            SlotCategory::ALL
                .iter()
                .position(|c| *c == category)
                .unwrap_or(usize::MAX)
        };
        assert!(rules
            .windows(2)
            .all(|pair| position(pair[0].category) <= position(pair[1].category)));
    }
}

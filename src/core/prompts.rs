//! Prompt template for plot analysis.
//!
//! The instruction is static: the plot is embedded verbatim between a fixed
//! prefix and a fixed postfix that spells out the JSON schema and the
//! world-cinema coverage the answer must have.

/// Text placed before the user's plot.
pub const ANALYSIS_PREFIX_TEMPLATE: &str = r#"Analyze this plot/storyline and find similar films from cinema history worldwide. Focus on plot structure, themes, character archetypes, and narrative elements.

Plot to analyze:
""#;

/// Text placed after the user's plot.
pub const ANALYSIS_POSTFIX_TEMPLATE: &str = r#""

IMPORTANT: You MUST include films from ALL languages and countries - Bollywood, Tollywood, Korean cinema, Japanese anime/films, French cinema, Italian cinema, Russian films, Chinese cinema, Thai films, Iranian cinema, Mexican films, Brazilian cinema, African cinema, and ALL other world cinema. Do NOT focus only on Hollywood films.

Respond ONLY with a valid JSON object in this exact format (no markdown, no backticks, no extra text):
{
  "plotAnalysis": {
    "mainThemes": ["theme1", "theme2", "theme3"],
    "plotStructure": "description of the narrative structure",
    "characterArchetypes": ["archetype1", "archetype2"],
    "genre": "primary genre",
    "mood": "overall mood/tone",
    "conflictType": "type of central conflict"
  },
  "similarFilms": [
    {
      "title": "Film Title (Original Title if different)",
      "year": 2020,
      "director": "Director Name",
      "genre": "Genre",
      "language": "Original Language",
      "similarityScore": 85,
      "matchingElements": ["element1", "element2", "element3"],
      "plotSummary": "Brief plot summary",
      "whySimilar": "Detailed explanation of similarities",
      "country": "Country of origin",
      "rating": "IMDb/RT rating if known",
      "internationalTitle": "English title if different from original"
    }
  ]
}

Find at least 8-12 similar films with DIVERSE representation from:
- Indian cinema (Bollywood, Tollywood, Kollywood, Mollywood)
- East Asian cinema (Korea, Japan, China, Thailand)
- European cinema (France, Italy, Germany, Russia, UK)
- Latin American cinema (Mexico, Brazil, Argentina)
- Middle Eastern and African cinema
- Other regional cinemas

Prioritize including films from AT LEAST 6 different countries/languages. Make similarity scores realistic (60-95%). Focus on genuine plot and thematic similarities across ALL world cinema, not just Hollywood."#;

/// Wraps a plot in the analysis instruction.
#[must_use]
pub fn wrap_for_analysis(plot: &str) -> String {
    let mut prompt = String::with_capacity(
        ANALYSIS_PREFIX_TEMPLATE.len() + plot.len() + ANALYSIS_POSTFIX_TEMPLATE.len(),
    );
    prompt.push_str(ANALYSIS_PREFIX_TEMPLATE);
    prompt.push_str(plot);
    prompt.push_str(ANALYSIS_POSTFIX_TEMPLATE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_plot_verbatim_in_quotes() {
        let plot = "A retired thief is pulled into \"one last job\" in Mumbai.";
        let prompt = wrap_for_analysis(plot);
        assert!(prompt.contains(&format!("Plot to analyze:\n\"{plot}\"")));
    }

    #[test]
    fn asks_for_diverse_world_cinema() {
        let prompt = wrap_for_analysis("plot");
        assert!(prompt.contains("AT LEAST 6 different countries/languages"));
        assert!(prompt.contains("8-12 similar films"));
        assert!(prompt.contains("(60-95%)"));
        assert!(prompt.contains("Do NOT focus only on Hollywood films."));
    }

    #[test]
    fn names_every_schema_field() {
        let prompt = wrap_for_analysis("plot");
        for field in [
            "plotAnalysis",
            "mainThemes",
            "plotStructure",
            "characterArchetypes",
            "conflictType",
            "similarFilms",
            "similarityScore",
            "matchingElements",
            "whySimilar",
            "internationalTitle",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }
}

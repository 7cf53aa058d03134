//! Analysis result types as returned by the inference service.
//!
//! Field names follow the camelCase JSON schema requested in the prompt.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Thematic breakdown of the submitted plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotAnalysisSummary {
    /// Main themes, most prominent first.
    pub main_themes: Vec<String>,
    /// Description of the narrative structure.
    pub plot_structure: String,
    /// Character archetypes present in the plot.
    pub character_archetypes: Vec<String>,
    /// Primary genre.
    pub genre: String,
    /// Overall mood or tone.
    pub mood: String,
    /// Type of the central conflict.
    pub conflict_type: String,
}

/// A film the service considers similar to the submitted plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarFilm {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub genre: String,
    pub language: String,
    /// Similarity to the submitted plot, 0-100.
    pub similarity_score: u8,
    pub matching_elements: Vec<String>,
    pub plot_summary: String,
    pub why_similar: String,
    pub country: String,
    /// Free-form display text, so a number such as `8.1` is accepted too.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub international_title: Option<String>,
}

/// Reads an optional display field as text.
///
/// Strings pass through and numbers are rendered as text. Anything else
/// (null, booleans, lists, objects) becomes `None` instead of failing the
/// whole film.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl SimilarFilm {
    /// Returns the colour tier for this film's score.
    #[must_use]
    pub const fn tier(&self) -> SimilarityTier {
        SimilarityTier::from_score(self.similarity_score)
    }
}

/// A validated analysis.
///
/// `similar_films` is sorted by descending similarity score. Films with equal
/// scores keep the order the service returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub plot_analysis: PlotAnalysisSummary,
    pub similar_films: Vec<SimilarFilm>,
}

impl AnalysisResult {
    /// Builds a result, ordering films by descending score.
    #[must_use]
    pub fn new(plot_analysis: PlotAnalysisSummary, mut similar_films: Vec<SimilarFilm>) -> Self {
        sort_by_similarity(&mut similar_films);
        Self {
            plot_analysis,
            similar_films,
        }
    }
}

/// Sorts films by descending similarity score.
///
/// `sort_by` is stable, so ties keep their original relative order.
pub fn sort_by_similarity(films: &mut [SimilarFilm]) {
    films.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));
}

/// Colour band for a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityTier {
    /// 90 and above.
    Exceptional,
    /// 80-89.
    Strong,
    /// 70-79.
    Notable,
    /// 60-69.
    Moderate,
    /// Below 60.
    Loose,
}

impl SimilarityTier {
    /// Maps a score to its tier.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Exceptional,
            80..=89 => Self::Strong,
            70..=79 => Self::Notable,
            60..=69 => Self::Moderate,
            _ => Self::Loose,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{film, summary};
    use super::*;

    #[test]
    fn optional_display_fields_accept_any_scalar() {
        let mut value = serde_json::to_value(film("Drishyam", 88)).unwrap();
        value["rating"] = serde_json::json!(true);
        value["internationalTitle"] = serde_json::json!(1917);
        let parsed: SimilarFilm = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.rating, None);
        assert_eq!(parsed.international_title.as_deref(), Some("1917"));
    }

    #[test]
    fn missing_display_fields_default_to_none() {
        let mut value = serde_json::to_value(film("Drishyam", 88)).unwrap();
        let fields = value.as_object_mut().unwrap();
        fields.remove("rating");
        fields.remove("internationalTitle");
        let parsed: SimilarFilm = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.rating, None);
        assert_eq!(parsed.international_title, None);
    }

    #[test]
    fn sort_orders_by_descending_score() {
        let result = AnalysisResult::new(
            summary(),
            vec![film("A", 72), film("B", 95), film("C", 81)],
        );
        let scores: Vec<u8> = result
            .similar_films
            .iter()
            .map(|f| f.similarity_score)
            .collect();
        assert_eq!(scores, vec![95, 81, 72]);
    }

    #[test]
    fn sort_keeps_ties_in_original_order() {
        let mut films = vec![
            film("first", 80),
            film("top", 90),
            film("second", 80),
            film("third", 80),
        ];
        sort_by_similarity(&mut films);
        let titles: Vec<&str> = films.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn deserializes_camel_case_with_optional_fields_missing() {
        let json = r#"{
            "title": "Oldboy",
            "year": 2003,
            "director": "Park Chan-wook",
            "genre": "Thriller",
            "language": "Korean",
            "similarityScore": 88,
            "matchingElements": ["revenge"],
            "plotSummary": "Imprisoned man seeks answers.",
            "whySimilar": "Revenge arc.",
            "country": "South Korea"
        }"#;
        let parsed: SimilarFilm = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.similarity_score, 88);
        assert!(parsed.rating.is_none());
        assert!(parsed.international_title.is_none());
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(SimilarityTier::from_score(100), SimilarityTier::Exceptional);
        assert_eq!(SimilarityTier::from_score(90), SimilarityTier::Exceptional);
        assert_eq!(SimilarityTier::from_score(89), SimilarityTier::Strong);
        assert_eq!(SimilarityTier::from_score(80), SimilarityTier::Strong);
        assert_eq!(SimilarityTier::from_score(79), SimilarityTier::Notable);
        assert_eq!(SimilarityTier::from_score(70), SimilarityTier::Notable);
        assert_eq!(SimilarityTier::from_score(69), SimilarityTier::Moderate);
        assert_eq!(SimilarityTier::from_score(60), SimilarityTier::Moderate);
        assert_eq!(SimilarityTier::from_score(59), SimilarityTier::Loose);
        assert_eq!(SimilarityTier::from_score(0), SimilarityTier::Loose);
    }
}

//! Turns a raw Messages API response into a validated [`AnalysisResult`].
//!
//! The model is asked for bare JSON but may still wrap it in code fences or
//! add commentary around it, so the embedded text is cleaned up before
//! parsing.

use serde_json::Value;

use crate::core::client::RawResponse;
use crate::core::error::AnalysisError;
use crate::core::model::{AnalysisResult, PlotAnalysisSummary, SimilarFilm};

/// Runs every post-response step: status check, envelope extraction,
/// cleanup, parsing, validation and sorting.
///
/// # Errors
///
/// Returns the [`AnalysisError`] for the first step that fails.
pub fn analysis_from_response(response: &RawResponse) -> Result<AnalysisResult, AnalysisError> {
    check_status(response)?;
    let text = extract_envelope_text(&response.body)?;
    let json = locate_json_object(&strip_code_fences(&text)).to_string();
    let value = parse_embedded_json(&json)?;
    validate_result(value)
}

/// Rejects non-2xx responses.
///
/// # Errors
///
/// Returns [`AnalysisError::Transport`] with the status code.
pub fn check_status(response: &RawResponse) -> Result<(), AnalysisError> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(AnalysisError::Transport {
            status: response.status,
        })
    }
}

/// Pulls `content[0].text` out of the response envelope.
///
/// # Errors
///
/// Returns [`AnalysisError::ResponseShape`] if the body is not JSON or the
/// field is missing or empty.
pub fn extract_envelope_text(body: &str) -> Result<String, AnalysisError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::ResponseShape(format!("envelope is not JSON: {e}")))?;

    envelope
        .get("content")
        .and_then(Value::as_array)
        .and_then(|content| content.first())
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AnalysisError::ResponseShape("missing content[0].text".to_string()))
}

/// Removes ```` ```json ```` and ```` ``` ```` markers (with an optional
/// trailing newline each) and trims the result.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Returns the span from the first `{` to the last `}`, or the whole text
/// when there is no such span.
#[must_use]
pub fn locate_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parses the cleaned-up embedded text.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] if the text is not valid JSON.
pub fn parse_embedded_json(text: &str) -> Result<Value, AnalysisError> {
    serde_json::from_str(text).map_err(|e| AnalysisError::Parse(e.to_string()))
}

/// Checks the parsed JSON against the result schema and builds the sorted
/// result.
///
/// `plotAnalysis` must be an object and `similarFilms` an array. Every
/// field is then type-checked during deserialization, and scores above 100
/// are rejected.
///
/// # Errors
///
/// Returns [`AnalysisError::Schema`] describing the first violation.
pub fn validate_result(value: Value) -> Result<AnalysisResult, AnalysisError> {
    let Value::Object(mut root) = value else {
        return Err(AnalysisError::Schema("top level is not an object".to_string()));
    };

    let plot_analysis = match root.remove("plotAnalysis") {
        Some(v @ Value::Object(_)) => v,
        Some(_) => {
            return Err(AnalysisError::Schema(
                "plotAnalysis is not an object".to_string(),
            ));
        }
        None => return Err(AnalysisError::Schema("missing plotAnalysis".to_string())),
    };
    let films = match root.remove("similarFilms") {
        Some(Value::Array(films)) => films,
        Some(_) => {
            return Err(AnalysisError::Schema(
                "similarFilms is not a list".to_string(),
            ));
        }
        None => return Err(AnalysisError::Schema("missing similarFilms".to_string())),
    };

    let plot_analysis: PlotAnalysisSummary = serde_json::from_value(plot_analysis)
        .map_err(|e| AnalysisError::Schema(format!("plotAnalysis: {e}")))?;

    let similar_films = films
        .into_iter()
        .enumerate()
        .map(|(index, film)| {
            let film: SimilarFilm = serde_json::from_value(film)
                .map_err(|e| AnalysisError::Schema(format!("similarFilms[{index}]: {e}")))?;
            if film.similarity_score > 100 {
                return Err(AnalysisError::Schema(format!(
                    "similarFilms[{index}]: similarityScore {} is above 100",
                    film.similarity_score
                )));
            }
            Ok(film)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisResult::new(plot_analysis, similar_films))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    /// A schema-conforming analysis with films scored 72, 95 and 81, in that order.
    pub fn analysis_json() -> serde_json::Value {
        json!({
            "plotAnalysis": {
                "mainThemes": ["revenge", "memory"],
                "plotStructure": "Non-linear, told in flashbacks",
                "characterArchetypes": ["avenger", "trickster"],
                "genre": "Thriller",
                "mood": "Bleak",
                "conflictType": "Person vs self"
            },
            "similarFilms": [
                film("Memento", 72, "USA"),
                film("Oldboy", 95, "South Korea"),
                film("Ghajini", 81, "India"),
            ]
        })
    }

    pub fn film(title: &str, score: u8, country: &str) -> serde_json::Value {
        json!({
            "title": title,
            "year": 2005,
            "director": "Someone",
            "genre": "Thriller",
            "language": "Various",
            "similarityScore": score,
            "matchingElements": ["memory loss", "revenge"],
            "plotSummary": "A man hunts the people who wronged him.",
            "whySimilar": "Shares the amnesiac avenger premise.",
            "country": country,
            "rating": "8.1"
        })
    }

    /// Wraps `text` in a Messages API response envelope.
    pub fn envelope(text: &str) -> String {
        json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": text }]
        })
        .to_string()
    }
}

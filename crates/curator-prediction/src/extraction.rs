//! Turn the spans an engine wrote into a workspace into suggestions.

use curator_core::constants::NO_SCORE;
use curator_core::models::{AnnotationState, Offset, Recommender, Suggestion};
use curator_core::traits::IRecommendationEngine;
use tracing::{debug, warn};

/// Build one [`Suggestion`] per span of the engine's output type.
///
/// Span boundaries are widened to the tokens they cover. Spans covering no
/// token cannot be displayed and are dropped. Ids are sequential from 0
/// within one call.
pub fn extract_suggestions(
    workspace: &AnnotationState,
    document_name: &str,
    recommender: &Recommender,
    engine: &dyn IRecommendationEngine,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut id = 0;

    for span in workspace.predictions_of(engine.predicted_layer(), engine.predicted_feature()) {
        let tokens = workspace.tokens_covered_by(span.offset);
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            warn!(
                recommender = %recommender.name,
                document = %document_name,
                offset = %span.offset,
                "predicted span covers no token, dropping it"
            );
            continue;
        };
        let offset = Offset::new(first.begin, last.end);
        let Ok(covered_text) = workspace.covered_text(offset) else {
            continue;
        };
        let score = if engine.produces_scores() {
            span.score.unwrap_or(NO_SCORE)
        } else {
            NO_SCORE
        };

        suggestions.push(Suggestion::new(
            id,
            recommender.id,
            recommender.name.clone(),
            recommender.layer_id,
            recommender.feature.clone(),
            document_name,
            offset,
            covered_text,
            span.label.clone(),
            score,
        ));
        id += 1;
    }

    debug!(
        recommender = %recommender.name,
        document = %document_name,
        count = suggestions.len(),
        "extracted suggestions"
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::context::RecommenderContext;
    use curator_core::errors::CuratorResult;
    use curator_core::models::PredictedSpan;
    use curator_core::traits::IDataSplitter;
    use test_fixtures::{segment, string_matcher, NAMED_ENTITY, VALUE};

    struct Fixed {
        scores: bool,
    }

    impl IRecommendationEngine for Fixed {
        fn predicted_layer(&self) -> &str {
            NAMED_ENTITY
        }
        fn predicted_feature(&self) -> &str {
            VALUE
        }
        fn produces_scores(&self) -> bool {
            self.scores
        }
        fn train(&self, _: &mut RecommenderContext, _: &[AnnotationState]) -> CuratorResult<()> {
            Ok(())
        }
        fn predict(&self, _: &RecommenderContext, _: &mut AnnotationState) -> CuratorResult<()> {
            Ok(())
        }
        fn evaluate(&self, _: &[AnnotationState], _: &mut dyn IDataSplitter) -> CuratorResult<f64> {
            Ok(0.0)
        }
    }

    fn span(begin: usize, end: usize, label: Option<&str>, score: Option<f64>) -> PredictedSpan {
        PredictedSpan {
            layer: NAMED_ENTITY.into(),
            feature: VALUE.into(),
            offset: Offset::new(begin, end),
            label: label.map(str::to_string),
            score,
        }
    }

    #[test]
    fn builds_sequential_suggestions() {
        // "Hello big world."
        let mut ws = segment("Hello big world.");
        ws.predictions.push(span(0, 5, Some("A"), Some(0.4)));
        ws.predictions.push(span(6, 15, Some("B"), None));
        let out = extract_suggestions(&ws, "d.txt", &string_matcher(3, 1), &Fixed { scores: true });

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 0);
        assert_eq!(out[1].id, 1);
        assert_eq!(out[0].covered_text, "Hello");
        assert_eq!(out[0].score, 0.4);
        assert_eq!(out[1].score, NO_SCORE);
        assert_eq!(out[1].covered_text, "big world");
        assert_eq!(out[0].recommender_id, 3);
        assert_eq!(out[0].document_name, "d.txt");
        assert_eq!(out[0].ui_label.as_deref(), Some("A"));
    }

    #[test]
    fn drops_spans_without_tokens_and_other_types() {
        let mut ws = segment("Hello world.");
        // Starts mid-token, so it covers no whole token.
        ws.predictions.push(span(1, 4, Some("A"), Some(1.0)));
        let mut other = span(0, 5, Some("A"), Some(1.0));
        other.layer = "Other".into();
        ws.predictions.push(other);
        let out = extract_suggestions(&ws, "d.txt", &string_matcher(1, 1), &Fixed { scores: true });
        assert!(out.is_empty());
    }

    #[test]
    fn scoreless_engines_get_default_score() {
        let mut ws = segment("Hello world.");
        ws.predictions.push(span(0, 5, None, Some(0.9)));
        let out = extract_suggestions(&ws, "d.txt", &string_matcher(1, 1), &Fixed { scores: false });
        assert_eq!(out[0].score, NO_SCORE);
        assert_eq!(out[0].label, None);
    }
}

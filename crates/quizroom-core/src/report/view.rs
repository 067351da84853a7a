use serde::{Deserialize, Serialize};

use super::payload::{ResultPayload, ResultSchema};

/// A titled block of descriptive text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Presentation-facing flattening of any accepted result schema.
///
/// Renderers only ever see this type, so a new backend schema needs a new
/// `From` arm here and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub schema: ResultSchema,
    pub headline: String,
    pub subtitle: Option<String>,
    /// Radar axes in the order the service sent them.
    pub trait_scores: Vec<(String, f64)>,
    pub sections: Vec<Section>,
    pub strengths: Vec<String>,
}

impl ProfileView {
    /// Highest-scoring traits first, at most `n`.
    pub fn top_traits(&self, n: usize) -> Vec<(&str, f64)> {
        let mut traits: Vec<(&str, f64)> = self
            .trait_scores
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        traits.sort_by(|a, b| b.1.total_cmp(&a.1));
        traits.truncate(n);
        traits
    }
}

fn push_section(sections: &mut Vec<Section>, title: &str, body: &str) {
    if !body.trim().is_empty() {
        sections.push(Section {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

impl From<&ResultPayload> for ProfileView {
    fn from(payload: &ResultPayload) -> Self {
        let mut sections = Vec::new();
        match payload {
            ResultPayload::Creator(p) => {
                push_section(&mut sections, "Where you shine", &p.suited_for);
                push_section(&mut sections, "Where you struggle", &p.not_suited_for);
                push_section(&mut sections, "Synthesis", &p.synthesis);
                if let Some(analysis) = &p.data_analysis {
                    if let Some(comment) = &analysis.extremeness_comment {
                        let title = match analysis.extremeness_score {
                            Some(score) => format!("Profile sharpness ({score:.1})"),
                            None => "Profile sharpness".to_string(),
                        };
                        push_section(&mut sections, &title, comment);
                    }
                    if let Some(comment) = &analysis.uniqueness_comment {
                        let title = match &analysis.most_unique_trait {
                            Some(t) => format!("Most distinctive trait: {t}"),
                            None => "Most distinctive trait".to_string(),
                        };
                        push_section(&mut sections, &title, comment);
                    }
                }
                ProfileView {
                    schema: ResultSchema::Creator,
                    headline: p.main_core_name.clone(),
                    subtitle: (!p.sub_core_title.is_empty()).then(|| p.sub_core_title.clone()),
                    trait_scores: p
                        .radar_scores
                        .iter()
                        .map(|(k, v)| (k.clone(), *v))
                        .collect(),
                    sections,
                    strengths: Vec::new(),
                }
            }
            ResultPayload::Domain(p) => {
                for score in p.scores.domain_scores.values() {
                    let title = format!("{} ({:.2})", score.name, score.weighted_score);
                    push_section(&mut sections, &title, &score.description);
                }
                let mut ranked: Vec<_> = p.scores.domain_scores.values().collect();
                ranked.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
                let headline = ranked
                    .first()
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "Your strengths".to_string());
                ProfileView {
                    schema: ResultSchema::Domain,
                    headline,
                    subtitle: p
                        .scores
                        .total_responses
                        .map(|n| format!("Based on {n} answers")),
                    trait_scores: p
                        .scores
                        .category_scores
                        .iter()
                        .map(|(k, v)| (k.clone(), *v))
                        .collect(),
                    sections,
                    strengths: ranked.iter().take(3).map(|s| s.name.clone()).collect(),
                }
            }
            ResultPayload::Mbti(p) => {
                push_section(&mut sections, "About your type", &p.animal_description);
                if let Some(strategy) = &p.youtube_strategy {
                    push_section(&mut sections, "Suggested genres", &strategy.genre);
                    push_section(&mut sections, "Direction", &strategy.direction);
                    push_section(&mut sections, "Tips", &strategy.success_tips);
                }
                let headline = if p.animal_name.is_empty() {
                    p.mbti_type.clone()
                } else {
                    format!("{} {}", p.mbti_type, p.animal_name)
                };
                ProfileView {
                    schema: ResultSchema::Mbti,
                    headline,
                    subtitle: (!p.animal_icon.is_empty()).then(|| p.animal_icon.clone()),
                    trait_scores: p.scores.iter().map(|(k, v)| (k.clone(), *v)).collect(),
                    sections,
                    strengths: p.top_strengths.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_view_keeps_radar_and_skips_empty_sections() {
        let payload = ResultPayload::from_slice(
            br#"{"main_core_name": "Explorer", "suited_for": "Solo projects",
                "radar_scores": {"Curiosity": 9, "Patience": 4},
                "data_analysis": {"most_unique_trait": "Curiosity", "uniqueness_comment": "Rare mix"}}"#,
        )
        .unwrap();
        let view = ProfileView::from(&payload);
        assert_eq!(view.headline, "Explorer");
        assert_eq!(view.subtitle, None);
        assert_eq!(view.trait_scores[0], ("Curiosity".to_string(), 9.0));
        let titles: Vec<_> = view.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Where you shine", "Most distinctive trait: Curiosity"]);
    }

    #[test]
    fn domain_view_headlines_top_weighted_domain() {
        let payload = ResultPayload::from_slice(
            br#"{"scores": {"domain_scores": {
                    "a": {"name": "Relating", "raw_score": 3.0, "weighted_score": 3.0},
                    "b": {"name": "Executing", "raw_score": 4.0, "weighted_score": 4.8}
                 }, "category_scores": {"grit": 4.5}, "total_responses": 20}}"#,
        )
        .unwrap();
        let view = ProfileView::from(&payload);
        assert_eq!(view.headline, "Executing");
        assert_eq!(view.strengths, ["Executing", "Relating"]);
        assert_eq!(view.subtitle.as_deref(), Some("Based on 20 answers"));
    }

    #[test]
    fn top_traits_sorts_descending() {
        let view = ProfileView {
            schema: ResultSchema::Creator,
            headline: String::new(),
            subtitle: None,
            trait_scores: vec![("a".into(), 1.0), ("b".into(), 8.0), ("c".into(), 5.0)],
            sections: Vec::new(),
            strengths: Vec::new(),
        };
        assert_eq!(view.top_traits(2), vec![("b", 8.0), ("c", 5.0)]);
    }
}

//! Plain-text rendering for the terminal.

use quizroom_core::storage::DisplayConfig;
use quizroom_core::{AnswerVector, ProfileView, Question, Rating};

const FULL: char = '█';
const EMPTY: char = '░';

/// Horizontal bar `width` cells wide, `fraction` of it filled.
pub fn bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat(FULL).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(width - filled));
    out
}

/// Header line plus statement for the question on screen.
pub fn question(index: usize, progress_pct: f64, answers: &AnswerVector, q: &Question) -> String {
    let mut out = format!(
        "\n[{}/{}] {} {:.0}%  ({} answered)\n\n  {}\n",
        index + 1,
        answers.len(),
        bar(progress_pct / 100.0, 20),
        progress_pct,
        answers.answered_count(),
        q.text
    );
    if let Some(r) = answers.get(index) {
        out.push_str(&format!("  (current answer: {} {})\n", r.value(), r.label()));
    }
    out.push('\n');
    for r in Rating::SCALE {
        out.push_str(&format!("  {}  {}\n", r.value(), r.label()));
    }
    out
}

pub fn profile(view: &ProfileView, display: &DisplayConfig) -> String {
    let mut out = format!("\n=== {} ===\n", view.headline);
    if let Some(subtitle) = &view.subtitle {
        out.push_str(&format!("{subtitle}\n"));
    }

    if !view.trait_scores.is_empty() {
        out.push('\n');
        let label_width = view
            .trait_scores
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        let width = display.bar_width as usize;
        for (name, score) in &view.trait_scores {
            let fraction = if display.radar_max > 0.0 {
                score / display.radar_max
            } else {
                0.0
            };
            out.push_str(&format!(
                "  {name:<label_width$}  {}  {score:.1}\n",
                bar(fraction, width)
            ));
        }

        let top: Vec<&str> = view.top_traits(3).into_iter().map(|(name, _)| name).collect();
        out.push_str(&format!("\nTop traits: {}\n", top.join(", ")));
    }

    if !view.strengths.is_empty() {
        out.push_str("\nStrengths:\n");
        for s in &view.strengths {
            out.push_str(&format!("  - {s}\n"));
        }
    }

    for section in &view.sections {
        out.push_str(&format!("\n{}\n  {}\n", section.title, section.body));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizroom_core::{ResultPayload, ResultSchema};

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(0.0, 3), "░░░");
        assert_eq!(bar(2.0, 3), "███");
        assert_eq!(bar(f64::NAN, 2), "░░");
    }

    #[test]
    fn question_lists_scale_from_strong_agreement() {
        let mut answers = AnswerVector::zeroed(4);
        answers.set(0, Rating::new(4).unwrap()).unwrap();
        let text = question(1, 50.0, &answers, &Question::new("I like puzzles."));
        assert!(text.contains("[2/4]"));
        assert!(text.contains("(1 answered)"));
        assert!(text.contains("I like puzzles."));
        assert!(!text.contains("current answer"));
        let five = text.find("5  Strongly agree").unwrap();
        let one = text.find("1  Strongly disagree").unwrap();
        assert!(five < one);
    }

    #[test]
    fn profile_scales_bars_by_radar_max() {
        let payload = ResultPayload::from_slice(
            br#"{"main_core_name": "Builder", "sub_core_title": "Steady maker",
                 "radar_scores": {"Focus": 10.0, "Play": 5.0}}"#,
        )
        .unwrap();
        let view = ProfileView::from(&payload);
        assert_eq!(view.schema, ResultSchema::Creator);
        let display = DisplayConfig {
            radar_max: 10.0,
            bar_width: 4,
        };
        let text = profile(&view, &display);
        assert!(text.contains("=== Builder ==="));
        assert!(text.contains("Steady maker"));
        assert!(text.contains("Focus  ████  10.0"));
        assert!(text.contains("Play   ██░░  5.0"));
    }

    #[test]
    fn profile_names_top_traits_highest_first() {
        let payload = ResultPayload::from_slice(
            br#"{"main_core_name": "Builder", "sub_core_title": "Steady maker",
                 "radar_scores": {"Play": 3.0, "Focus": 9.0, "Care": 6.5, "Rigor": 1.0}}"#,
        )
        .unwrap();
        let text = profile(&ProfileView::from(&payload), &DisplayConfig::default());
        assert!(text.contains("Top traits: Focus, Care, Play\n"));
        assert!(!text.contains("Rigor,"));
    }
}

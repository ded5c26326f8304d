//! Property-style checks for the deterministic fallbacks and the derived
//! sentiment fields, exercised through the public API only.

use tourwise::fallback::{phrasebook_translate, template_itinerary};
use tourwise::types::{ItineraryRequest, SentimentLabel, SentimentScore};

fn request(days: u32, budget: f64, interests: &[&str]) -> ItineraryRequest {
    ItineraryRequest {
        destination: "Lombok".to_string(),
        duration_days: days,
        interests: interests.iter().map(|s| (*s).to_string()).collect(),
        budget,
        group_size: 2,
        arrival_date: None,
        extra_preferences: serde_json::Map::new(),
    }
}

#[test]
fn test_template_day_count_matches_for_any_duration() {
    for days in 1..=14 {
        let plan = template_itinerary(&request(days, 500.0, &[]));
        assert_eq!(plan.days.len(), days as usize);
        assert_eq!(plan.duration_days, days);
        for (i, day) in plan.days.iter().enumerate() {
            assert_eq!(day.day, i as u32 + 1);
        }
    }
}

#[test]
fn test_template_day_one_is_always_arrival() {
    for days in 1..=5 {
        let plan = template_itinerary(&request(days, 500.0, &["culture"]));
        assert_eq!(plan.days[0].theme, "Arrival & Orientation");
    }
}

#[test]
fn test_template_day_two_depends_solely_on_culture_interest() {
    let with = template_itinerary(&request(3, 500.0, &["food", "culture"]));
    let without = template_itinerary(&request(3, 500.0, &["food", "hiking"]));
    assert_eq!(with.days[1].theme, "Cultural Immersion");
    assert_eq!(without.days[1].theme, "Adventure Day");
}

#[test]
fn test_template_cost_ratios_are_fixed() {
    let budget = 1000.0;
    let plan = template_itinerary(&request(5, budget, &[]));
    assert!((plan.days[0].estimated_cost - 150.0).abs() < f64::EPSILON);
    assert!((plan.days[1].estimated_cost - 200.0).abs() < f64::EPSILON);
    for day in &plan.days[2..] {
        assert!((day.estimated_cost - 100.0).abs() < f64::EPSILON);
    }
    // The reported total is always 0.8x budget, independent of length.
    assert!((plan.total_estimated_cost - 800.0).abs() < f64::EPSILON);
    let short = template_itinerary(&request(1, budget, &[]));
    assert!((short.total_estimated_cost - 800.0).abs() < f64::EPSILON);
}

#[test]
fn test_phrasebook_hit_is_case_insensitive() {
    let result = phrasebook_translate("  TERIMA KASIH ", "id", "en");
    assert_eq!(result.translated_text, "thank you");
    assert_eq!(result.provider, "phrasebook");
    assert!(result.confidence.is_none());
}

#[test]
fn test_phrasebook_miss_returns_input_unchanged() {
    let result = phrasebook_translate("kalimat yang tidak ada di tabel", "id", "en");
    assert_eq!(result.translated_text, "kalimat yang tidak ada di tabel");
}

#[test]
fn test_phrasebook_reverse_direction() {
    let result = phrasebook_translate("Good Morning", "en", "id");
    assert_eq!(result.translated_text, "selamat pagi");
    assert_eq!(result.target_language, "id");
}

#[test]
fn test_sentiment_worked_examples() {
    let positive = SentimentScore::from_raw(0.5, 1.0);
    assert_eq!(positive.label, SentimentLabel::Positive);
    assert!(positive.is_appropriate);

    let harsh = SentimentScore::from_raw(-0.9, 1.0);
    assert_eq!(harsh.label, SentimentLabel::Negative);
    assert!(!harsh.is_appropriate);
}

#[test]
fn test_sentiment_boundary_values() {
    assert_eq!(SentimentScore::from_raw(0.1, 0.0).label, SentimentLabel::Neutral);
    assert_eq!(SentimentScore::from_raw(-0.1, 0.0).label, SentimentLabel::Neutral);
    // -0.7 exactly is not appropriate (threshold is strict)
    assert!(!SentimentScore::from_raw(-0.7, 0.0).is_appropriate);
    assert!(SentimentScore::from_raw(-0.69, 0.0).is_appropriate);
    assert!(!SentimentScore::from_raw(0.0, 3.0).is_appropriate);
}

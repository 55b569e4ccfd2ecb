//! Property tests for ranking, filtering and display helpers.

use matcher::{truncate, Recipe, RecipeMatcher, Threshold, TRUNCATION_MARKER};
use proptest::prelude::*;

const PANTRY: &[&str] = &[
    "pasta", "tomato", "basil", "rice", "beans", "garlic", "olive", "oil", "onion", "chicken",
    "butter", "flour", "egg", "milk", "sugar", "lemon", "cumin", "chili", "ginger", "potato",
];

fn arb_ingredients() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(PANTRY), 1..6).prop_map(|words| words.join(" "))
}

fn arb_recipe() -> impl Strategy<Value = Recipe> {
    ("[A-Za-z]{3,10}( [A-Za-z]{3,10})?", arb_ingredients())
        .prop_map(|(name, ingredients)| Recipe::new(name, ingredients, "https://img/x.jpg"))
}

fn arb_corpus() -> impl Strategy<Value = Vec<Recipe>> {
    proptest::collection::vec(arb_recipe(), 1..25)
}

fn arb_query() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(PANTRY), 0..4).prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn scores_lie_in_unit_interval(corpus in arb_corpus(), query in arb_query()) {
        let matcher = RecipeMatcher::new(corpus).unwrap();
        for m in matcher.recommend(&query, Threshold::new(0.0).unwrap()) {
            prop_assert!((0.0..=1.0).contains(&m.similarity));
        }
    }

    #[test]
    fn results_are_sorted_descending(corpus in arb_corpus(), query in arb_query(), t in 0.0f32..=1.0) {
        let matcher = RecipeMatcher::new(corpus).unwrap();
        let hits = matcher.recommend(&query, Threshold::new(t).unwrap());
        for pair in hits.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
            if pair[0].similarity == pair[1].similarity {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
        for m in &hits {
            prop_assert!(m.similarity >= t);
        }
    }

    #[test]
    fn lower_threshold_returns_a_superset(
        corpus in arb_corpus(),
        query in arb_query(),
        a in 0.0f32..=1.0,
        b in 0.0f32..=1.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let matcher = RecipeMatcher::new(corpus).unwrap();
        let wide: Vec<u32> = matcher.recommend(&query, Threshold::new(low).unwrap()).iter().map(|m| m.id).collect();
        for m in matcher.recommend(&query, Threshold::new(high).unwrap()) {
            prop_assert!(wide.contains(&m.id));
        }
    }

    #[test]
    fn zero_threshold_returns_every_recipe(corpus in arb_corpus(), query in arb_query()) {
        let len = corpus.len();
        let matcher = RecipeMatcher::new(corpus).unwrap();
        prop_assert_eq!(matcher.recommend(&query, Threshold::new(0.0).unwrap()).len(), len);
    }

    #[test]
    fn empty_query_never_matches_positive_threshold(corpus in arb_corpus(), t in 0.001f32..=1.0) {
        let matcher = RecipeMatcher::new(corpus).unwrap();
        prop_assert!(matcher.recommend("", Threshold::new(t).unwrap()).is_empty());
    }

    #[test]
    fn search_ignores_case(corpus in arb_corpus(), needle in "[A-Za-z]{0,3}") {
        let matcher = RecipeMatcher::new(corpus).unwrap();
        let upper = matcher.search(&needle.to_uppercase());
        let lower = matcher.search(&needle.to_lowercase());
        prop_assert_eq!(upper, lower);
    }

    #[test]
    fn truncate_respects_length(text in "\\PC{0,200}", n in 0usize..180) {
        let out = truncate(&text, n);
        let len = text.chars().count();
        if len <= n {
            prop_assert_eq!(&*out, text.as_str());
        } else {
            prop_assert_eq!(out.chars().count(), n + TRUNCATION_MARKER.chars().count());
            prop_assert!(out.ends_with(TRUNCATION_MARKER));
            let kept: String = text.chars().take(n).collect();
            prop_assert!(out.starts_with(&kept));
        }
    }
}

#[test]
fn worked_example_ranks_tomato_pasta_first() {
    let matcher = RecipeMatcher::new(vec![
        Recipe::new("Tomato Pasta", "pasta tomato basil", ""),
        Recipe::new("Rice Bowl", "rice beans", ""),
        Recipe::new("Garlic Pasta", "pasta garlic olive oil", ""),
    ])
    .unwrap();

    let hits = matcher.recommend("pasta tomato", Threshold::default());
    assert_eq!(hits.first().map(|m| m.id), Some(0));
    assert!(hits.iter().all(|m| m.id != 1));

    let names: Vec<&str> = matcher.search("Pasta").iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Tomato Pasta", "Garlic Pasta"]);
}

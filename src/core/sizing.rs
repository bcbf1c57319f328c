use crate::models::{SizeCategory, SizeRule, SizeSuggestion};

/// Men's chart. Bands overlap (e.g. M and L both cover 80 kg / 175 cm);
/// declaration order decides, so keep the rows sorted small to large.
pub const MEN_CHART: &[SizeRule] = &[
    SizeRule::new("S", (60.0, 75.0), (160.0, 175.0)),
    SizeRule::new("M", (75.0, 85.0), (165.0, 180.0)),
    SizeRule::new("L", (80.0, 95.0), (170.0, 185.0)),
    SizeRule::new("XL", (90.0, 105.0), (175.0, 190.0)),
];

/// Women's chart, same precedence rule as [`MEN_CHART`]
pub const WOMEN_CHART: &[SizeRule] = &[
    SizeRule::new("S", (50.0, 60.0), (145.0, 165.0)),
    SizeRule::new("M", (60.0, 75.0), (150.0, 170.0)),
    SizeRule::new("L", (70.0, 85.0), (155.0, 175.0)),
    SizeRule::new("XL", (80.0, 95.0), (160.0, 180.0)),
];

/// Rules for a free-form category string; unknown categories get an empty chart
pub fn chart_for(category: &str) -> &'static [SizeRule] {
    match SizeCategory::parse(category) {
        Some(SizeCategory::Men) => MEN_CHART,
        Some(SizeCategory::Women) => WOMEN_CHART,
        None => &[],
    }
}

/// Suggest a size for the given category, weight (kg) and height (cm)
///
/// Returns the label of the first rule whose weight and height bands both
/// contain the inputs, or [`SizeSuggestion::Guidance`] when none does.
/// `category` matches `men`/`women` ignoring ASCII case and surrounding whitespace.
#[inline]
pub fn classify(category: &str, weight: f64, height: f64) -> SizeSuggestion {
    chart_for(category)
        .iter()
        .find(|rule| rule.matches(weight, height))
        .map_or(SizeSuggestion::Guidance, |rule| SizeSuggestion::Label(rule.label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_centers_resolve_to_their_label() {
        assert_eq!(classify("men", 68.0, 162.0), SizeSuggestion::Label("S"));
        assert_eq!(classify("men", 100.0, 188.0), SizeSuggestion::Label("XL"));
        assert_eq!(classify("women", 55.0, 150.0), SizeSuggestion::Label("S"));
        assert_eq!(classify("women", 90.0, 178.0), SizeSuggestion::Label("XL"));
    }

    #[test]
    fn test_first_declared_rule_wins_on_overlap() {
        // Both M and L cover this point
        assert!(MEN_CHART[2].matches(80.0, 175.0));
        assert_eq!(classify("men", 80.0, 175.0), SizeSuggestion::Label("M"));
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        assert_eq!(classify("men", 60.0, 160.0), SizeSuggestion::Label("S"));
        assert_eq!(classify("men", 105.0, 190.0), SizeSuggestion::Label("XL"));
    }

    #[test]
    fn test_outside_every_band() {
        assert_eq!(classify("men", 120.0, 175.0), SizeSuggestion::Guidance);
        assert_eq!(classify("women", 55.0, 190.0), SizeSuggestion::Guidance);
        assert_eq!(classify("men", f64::NAN, 170.0), SizeSuggestion::Guidance);
    }

    #[test]
    fn test_category_ignores_case_and_padding() {
        assert_eq!(classify(" Men ", 80.0, 175.0), SizeSuggestion::Label("M"));
        assert_eq!(classify("WOMEN", 55.0, 150.0), SizeSuggestion::Label("S"));
        assert_eq!(classify("m en", 80.0, 175.0), SizeSuggestion::Guidance);
    }

    #[test]
    fn test_unknown_category_is_empty_chart() {
        assert!(chart_for("kids").is_empty());
        assert_eq!(classify("kids", 80.0, 175.0), SizeSuggestion::Guidance);
    }
}

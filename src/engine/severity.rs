/// Four score tiers plus the no-data case. Every place a score is shown
/// (gauge, history rows, result card) classifies through here so the
/// label, icon, and color can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Excellent,
    Good,
    Average,
    Critical,
    NoData,
}

impl Severity {
    /// Tier boundaries are inclusive on the lower bound: 85, 70, 50.
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            None => Severity::NoData,
            Some(s) if s >= 85.0 => Severity::Excellent,
            Some(s) if s >= 70.0 => Severity::Good,
            Some(s) if s >= 50.0 => Severity::Average,
            Some(_) => Severity::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Excellent => "Excellent",
            Severity::Good => "Good",
            Severity::Average => "Average",
            Severity::Critical => "Critical",
            Severity::NoData => "No prediction yet",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Excellent => "★",
            Severity::Good => "▲",
            Severity::Average => "◆",
            Severity::Critical => "!",
            Severity::NoData => "-",
        }
    }

    /// Local guidance text shown next to the remote recommendation.
    pub fn guidance(self) -> &'static str {
        match self {
            Severity::Excellent => "Excellent! Keep up the great work and help others.",
            Severity::Good => "Good job! Focus on your weaker areas for even better results.",
            Severity::Average => {
                "You can improve! Try more practice and consider a test prep course."
            }
            Severity::Critical => {
                "Don't be discouraged. Seek help from teachers and practice regularly!"
            }
            Severity::NoData => "No prediction yet. Please use the predictor first!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries_inclusive() {
        assert_eq!(Severity::classify(Some(85.0)), Severity::Excellent);
        assert_eq!(Severity::classify(Some(84.9)), Severity::Good);
        assert_eq!(Severity::classify(Some(70.0)), Severity::Good);
        assert_eq!(Severity::classify(Some(69.9)), Severity::Average);
        assert_eq!(Severity::classify(Some(50.0)), Severity::Average);
        assert_eq!(Severity::classify(Some(49.9)), Severity::Critical);
    }

    #[test]
    fn test_classify_none_is_no_data() {
        assert_eq!(Severity::classify(None), Severity::NoData);
    }

    #[test]
    fn test_classify_is_order_consistent() {
        // A lower score never lands in a better tier. Severity derives Ord
        // with Excellent first, so tier rank must not decrease as the
        // score drops across every boundary.
        let scores = [100.0, 85.0, 84.9, 70.0, 69.9, 50.0, 49.9, 0.0];
        for pair in scores.windows(2) {
            let higher = Severity::classify(Some(pair[0]));
            let lower = Severity::classify(Some(pair[1]));
            assert!(lower >= higher, "severity regressed between {pair:?}");
        }
    }
}

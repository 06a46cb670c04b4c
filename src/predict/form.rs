use serde::{Deserialize, Serialize};

pub const GENDER_OPTIONS: &[&str] = &["male", "female"];
pub const RACE_OPTIONS: &[&str] = &["group A", "group B", "group C", "group D", "group E"];
pub const PARENTAL_EDUCATION_OPTIONS: &[&str] = &[
    "some high school",
    "high school",
    "some college",
    "associate's degree",
    "bachelor's degree",
    "master's degree",
];
pub const LUNCH_OPTIONS: &[&str] = &["standard", "free/reduced"];
pub const TEST_PREP_OPTIONS: &[&str] = &["none", "completed"];

const REQUIRED: &str = "Required";
const SCORE_RANGE: &str = "Enter a number 0-100";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldId {
    Gender,
    RaceEthnicity,
    ParentalEducation,
    Lunch,
    TestPrep,
    MathScore,
    ReadingScore,
    WritingScore,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::Gender,
        FieldId::RaceEthnicity,
        FieldId::ParentalEducation,
        FieldId::Lunch,
        FieldId::TestPrep,
        FieldId::MathScore,
        FieldId::ReadingScore,
        FieldId::WritingScore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Gender => "Gender",
            FieldId::RaceEthnicity => "Race/Ethnicity",
            FieldId::ParentalEducation => "Parental Education",
            FieldId::Lunch => "Lunch",
            FieldId::TestPrep => "Test Preparation",
            FieldId::MathScore => "Math Score",
            FieldId::ReadingScore => "Reading Score",
            FieldId::WritingScore => "Writing Score",
        }
    }

    pub fn is_score(self) -> bool {
        matches!(
            self,
            FieldId::MathScore | FieldId::ReadingScore | FieldId::WritingScore
        )
    }

    fn options(self) -> Option<&'static [&'static str]> {
        match self {
            FieldId::Gender => Some(GENDER_OPTIONS),
            FieldId::RaceEthnicity => Some(RACE_OPTIONS),
            FieldId::ParentalEducation => Some(PARENTAL_EDUCATION_OPTIONS),
            FieldId::Lunch => Some(LUNCH_OPTIONS),
            FieldId::TestPrep => Some(TEST_PREP_OPTIONS),
            _ => None,
        }
    }
}

/// The validated form as sent to `/predict` and stored in each history
/// record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub gender: String,
    pub race_ethnicity: String,
    pub parental_level_of_education: String,
    pub lunch: String,
    pub test_preparation_course: String,
    pub math_score: f64,
    pub reading_score: f64,
    pub writing_score: f64,
}

/// In-progress form: categorical fields cycle through fixed option lists,
/// score fields take typed digits. Errors are reported inline per field and
/// block submission until corrected.
pub struct PredictForm {
    pub selected: usize,
    choices: [Option<usize>; 5],
    scores: [String; 3],
    pub errors: [Option<&'static str>; 8],
}

impl PredictForm {
    pub fn new() -> Self {
        Self {
            selected: 0,
            choices: [None; 5],
            scores: [String::new(), String::new(), String::new()],
            errors: [None; 8],
        }
    }

    pub fn selected_field(&self) -> FieldId {
        FieldId::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FieldId::ALL.len();
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = FieldId::ALL.len() - 1;
        }
    }

    /// Display value for a field; empty string when unset.
    pub fn value(&self, field: FieldId) -> &str {
        if let Some(options) = field.options() {
            let idx = FieldId::ALL.iter().position(|f| *f == field).unwrap_or(0);
            self.choices[idx].map(|i| options[i]).unwrap_or("")
        } else {
            &self.scores[self.score_index(field)]
        }
    }

    pub fn error(&self, field: FieldId) -> Option<&'static str> {
        let idx = FieldId::ALL.iter().position(|f| *f == field).unwrap_or(0);
        self.errors[idx]
    }

    pub fn cycle_forward(&mut self) {
        self.cycle(1);
    }

    pub fn cycle_backward(&mut self) {
        self.cycle(-1);
    }

    fn cycle(&mut self, step: isize) {
        let field = self.selected_field();
        let Some(options) = field.options() else {
            return;
        };
        let len = options.len() as isize;
        let current = self.choices[self.selected];
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(len) as usize,
            None => {
                if step > 0 {
                    0
                } else {
                    options.len() - 1
                }
            }
        };
        self.choices[self.selected] = Some(next);
        self.validate_field(self.selected);
    }

    pub fn type_char(&mut self, ch: char) {
        let field = self.selected_field();
        if !field.is_score() || !ch.is_ascii_digit() {
            return;
        }
        let idx = self.score_index(field);
        if self.scores[idx].len() < 3 {
            self.scores[idx].push(ch);
        }
        self.validate_field(self.selected);
    }

    pub fn backspace(&mut self) {
        let field = self.selected_field();
        if !field.is_score() {
            return;
        }
        let idx = self.score_index(field);
        self.scores[idx].pop();
        self.validate_field(self.selected);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn score_index(&self, field: FieldId) -> usize {
        match field {
            FieldId::MathScore => 0,
            FieldId::ReadingScore => 1,
            FieldId::WritingScore => 2,
            _ => 0,
        }
    }

    fn validate_field(&mut self, idx: usize) {
        let field = FieldId::ALL[idx];
        self.errors[idx] = if field.is_score() {
            let raw = &self.scores[self.score_index(field)];
            if raw.is_empty() {
                Some(REQUIRED)
            } else {
                match raw.parse::<f64>() {
                    Ok(n) if (0.0..=100.0).contains(&n) => None,
                    _ => Some(SCORE_RANGE),
                }
            }
        } else if self.choices[idx].is_none() {
            Some(REQUIRED)
        } else {
            None
        };
    }

    /// Validate every field; on success return the snapshot, otherwise set
    /// inline errors and return None.
    pub fn validate_all(&mut self) -> Option<FormSnapshot> {
        for idx in 0..FieldId::ALL.len() {
            self.validate_field(idx);
        }
        if self.errors.iter().any(|e| e.is_some()) {
            return None;
        }
        Some(FormSnapshot {
            gender: self.value(FieldId::Gender).to_string(),
            race_ethnicity: self.value(FieldId::RaceEthnicity).to_string(),
            parental_level_of_education: self.value(FieldId::ParentalEducation).to_string(),
            lunch: self.value(FieldId::Lunch).to_string(),
            test_preparation_course: self.value(FieldId::TestPrep).to_string(),
            math_score: self.scores[0].parse().unwrap_or(0.0),
            reading_score: self.scores[1].parse().unwrap_or(0.0),
            writing_score: self.scores[2].parse().unwrap_or(0.0),
        })
    }
}

impl Default for PredictForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> PredictForm {
        let mut form = PredictForm::new();
        for _ in 0..5 {
            form.cycle_forward();
            form.select_next();
        }
        for digits in ["72", "68", "80"] {
            for ch in digits.chars() {
                form.type_char(ch);
            }
            form.select_next();
        }
        form
    }

    #[test]
    fn test_empty_form_blocks_submission() {
        let mut form = PredictForm::new();
        assert!(form.validate_all().is_none());
        assert!(form.errors.iter().all(|e| e == &Some(REQUIRED)));
    }

    #[test]
    fn test_filled_form_produces_snapshot() {
        let mut form = filled_form();
        let snapshot = form.validate_all().expect("form should validate");
        assert_eq!(snapshot.gender, "male");
        assert_eq!(snapshot.race_ethnicity, "group A");
        assert_eq!(snapshot.math_score, 72.0);
        assert_eq!(snapshot.writing_score, 80.0);
    }

    #[test]
    fn test_score_over_100_is_rejected() {
        let mut form = filled_form();
        // select math score field and overwrite with 999
        form.selected = 5;
        form.backspace();
        form.backspace();
        for ch in "999".chars() {
            form.type_char(ch);
        }
        assert!(form.validate_all().is_none());
        assert_eq!(form.error(FieldId::MathScore), Some(SCORE_RANGE));
    }

    #[test]
    fn test_non_digit_input_is_ignored() {
        let mut form = PredictForm::new();
        form.selected = 5;
        form.type_char('x');
        form.type_char('-');
        assert_eq!(form.value(FieldId::MathScore), "");
    }

    #[test]
    fn test_cycle_wraps_both_directions() {
        let mut form = PredictForm::new();
        form.cycle_backward();
        assert_eq!(form.value(FieldId::Gender), "female");
        form.cycle_forward();
        assert_eq!(form.value(FieldId::Gender), "male");
    }

    #[test]
    fn test_correcting_a_field_clears_its_error() {
        let mut form = PredictForm::new();
        form.validate_all();
        assert!(form.error(FieldId::Gender).is_some());
        form.cycle_forward();
        assert!(form.error(FieldId::Gender).is_none());
    }
}

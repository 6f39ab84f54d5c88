use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty label derived from past performance, used for presentation
/// and session ordering hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "easy" => Some(Self::Easy),
      "medium" => Some(Self::Medium),
      "hard" => Some(Self::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Easy => "easy",
      Self::Medium => "medium",
      Self::Hard => "hard",
    }
  }

  /// Label a question from its mastery score: struggling questions read as
  /// hard, solid ones as easy.
  pub fn from_mastery(mastery: f64) -> Self {
    if mastery < 0.4 {
      Self::Hard
    } else if mastery < 0.7 {
      Self::Medium
    } else {
      Self::Easy
    }
  }
}

/// A multiple-choice question belonging to a document.
///
/// Questions always carry exactly four options; `correct_option_index` is
/// the 0-based index into `options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
  pub id: i64,
  pub document_id: i64,
  pub prompt: String,
  pub options: Vec<String>,
  pub correct_option_index: i64,
  pub hint: Option<String>,
  pub explanation: Option<String>,
  pub difficulty: Difficulty,
  /// Fraction of correct attempts for this question, in [0,1]
  pub mastery_score: f64,
  pub created_at: DateTime<Utc>,
}

impl Question {
  pub fn new(
    document_id: i64,
    prompt: String,
    options: Vec<String>,
    correct_option_index: i64,
  ) -> Self {
    Self {
      id: 0,
      document_id,
      prompt,
      options,
      correct_option_index,
      hint: None,
      explanation: None,
      difficulty: Difficulty::Medium,
      mastery_score: 0.0,
      created_at: Utc::now(),
    }
  }

  pub fn is_correct_choice(&self, selected_option_index: i64) -> bool {
    selected_option_index == self.correct_option_index
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_difficulty_from_str() {
    assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Medium));
    assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
    assert_eq!(Difficulty::from_str("HARD"), None);
    assert_eq!(Difficulty::from_str(""), None);
  }

  #[test]
  fn test_difficulty_roundtrip() {
    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
      assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
    }
  }

  #[test]
  fn test_difficulty_from_mastery_bands() {
    assert_eq!(Difficulty::from_mastery(0.0), Difficulty::Hard);
    assert_eq!(Difficulty::from_mastery(0.39), Difficulty::Hard);
    assert_eq!(Difficulty::from_mastery(0.4), Difficulty::Medium);
    assert_eq!(Difficulty::from_mastery(0.69), Difficulty::Medium);
    assert_eq!(Difficulty::from_mastery(0.7), Difficulty::Easy);
    assert_eq!(Difficulty::from_mastery(1.0), Difficulty::Easy);
  }

  #[test]
  fn test_question_new_defaults() {
    let q = Question::new(
      7,
      "What is the powerhouse of the cell?".to_string(),
      vec![
        "Nucleus".to_string(),
        "Mitochondria".to_string(),
        "Ribosome".to_string(),
        "Golgi apparatus".to_string(),
      ],
      1,
    );

    assert_eq!(q.id, 0);
    assert_eq!(q.document_id, 7);
    assert_eq!(q.options.len(), 4);
    assert_eq!(q.difficulty, Difficulty::Medium);
    assert_eq!(q.mastery_score, 0.0);
    assert!(q.hint.is_none());
    assert!(q.explanation.is_none());
  }

  #[test]
  fn test_is_correct_choice() {
    let q = Question::new(
      1,
      "2 + 2?".to_string(),
      vec!["3".into(), "4".into(), "5".into(), "22".into()],
      1,
    );

    assert!(q.is_correct_choice(1));
    assert!(!q.is_correct_choice(0));
    assert!(!q.is_correct_choice(3));
  }
}

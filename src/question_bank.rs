//! Question records and the bank they are sampled from.
//!
//! The source is a UTF-8 text file with one record per line:
//!
//! ```text
//! question|optionA|optionB|optionC|optionD|correctLetter
//! ```
//!
//! Blank lines are skipped. Any other line must split into exactly six
//! fields or the whole load fails.

use std::{fmt, fs, io, path::Path, path::PathBuf, str::FromStr};

use bevy::prelude::Resource;
use rand::{seq::index, Rng};
use thiserror::Error;

const FIELD_SEPARATOR: char = '|';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read question source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected 6 `|`-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: correct answer must be one of A, B, C, D (found {found:?})")]
    AnswerLetter { line: usize, found: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("question bank holds {available} questions, {requested} needed")]
pub struct InsufficientQuestions {
    pub available: usize,
    pub requested: usize,
}

/// One of the four answer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not one of A, B, C, D")]
pub struct ParseLetterError(pub String);

impl FromStr for OptionLetter {
    type Err = ParseLetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            other => Err(ParseLetterError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: [String; 4],
    pub correct: OptionLetter,
}

impl Question {
    pub fn option(&self, letter: OptionLetter) -> &str {
        &self.options[letter.index()]
    }

    pub fn is_correct(&self, letter: OptionLetter) -> bool {
        self.correct == letter
    }

    fn parse_record(line_no: usize, record: &str) -> Result<Self, LoadError> {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).map(str::trim).collect();
        let [text, a, b, c, d, letter] = fields.as_slice() else {
            return Err(LoadError::FieldCount {
                line: line_no,
                found: fields.len(),
            });
        };

        let correct = letter
            .parse::<OptionLetter>()
            .map_err(|ParseLetterError(found)| LoadError::AnswerLetter {
                line: line_no,
                found,
            })?;

        Ok(Self {
            text: (*text).to_string(),
            options: [a, b, c, d].map(|o| o.to_string()),
            correct,
        })
    }
}

/// Every question loaded at startup. Never mutated afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let questions = source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Question::parse_record(i + 1, line.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Draws `n` questions uniformly without replacement, in random order.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, InsufficientQuestions> {
        if self.questions.len() < n {
            return Err(InsufficientQuestions {
                available: self.questions.len(),
                requested: n,
            });
        }

        Ok(index::sample(rng, self.questions.len(), n)
            .into_iter()
            .map(|i| self.questions[i].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, io::Write};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn source(n: usize) -> String {
        (0..n)
            .map(|i| format!("Question {i}?|a{i}|b{i}|c{i}|d{i}|{}\n", OptionLetter::ALL[i % 4]))
            .collect()
    }

    #[test]
    fn parses_records_and_skips_blank_lines() {
        let bank = QuestionBank::parse(
            "What is 2+2?|3|4|5|6|B\n\n   \nCapital of India?|Mumbai|Delhi|Pune|Agra|b\n",
        )
        .unwrap();

        assert_eq!(bank.len(), 2);
        let q = &bank.questions()[0];
        assert_eq!(q.text, "What is 2+2?");
        assert_eq!(q.option(OptionLetter::B), "4");
        assert!(q.is_correct(OptionLetter::B));
        assert!(!q.is_correct(OptionLetter::A));
        assert_eq!(bank.questions()[1].correct, OptionLetter::B);
    }

    #[test]
    fn malformed_record_fails_whole_load() {
        let mut text = source(20);
        text.push_str("Too short|a|b|c|A\n");
        text.push_str(&source(3));

        match QuestionBank::parse(&text) {
            Err(LoadError::FieldCount { line, found }) => {
                assert_eq!(line, 21);
                assert_eq!(found, 5);
            }
            other => panic!("expected a field count error, got {other:?}"),
        }
    }

    #[test]
    fn extra_separator_is_malformed() {
        let err = QuestionBank::parse("Q|a|b|c|d|A|extra").unwrap_err();
        assert!(matches!(err, LoadError::FieldCount { line: 1, found: 7 }));
    }

    #[test]
    fn unknown_answer_letter_is_rejected() {
        let err = QuestionBank::parse("Q|a|b|c|d|E").unwrap_err();
        assert!(matches!(err, LoadError::AnswerLetter { line: 1, ref found } if found == "E"));
    }

    #[test]
    fn option_letters_parse_case_insensitively() {
        assert_eq!(" c ".parse::<OptionLetter>(), Ok(OptionLetter::C));
        assert_eq!("d".parse::<OptionLetter>(), Ok(OptionLetter::D));

        let err = "AB".parse::<OptionLetter>().unwrap_err();
        assert_eq!(err, ParseLetterError("AB".into()));
        assert_eq!(err.to_string(), "\"AB\" is not one of A, B, C, D");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuestionBank::load(dir.path().join("questions.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("questions.txt"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(source(15).as_bytes()).unwrap();

        let bank = QuestionBank::load(file.path()).unwrap();
        assert_eq!(bank.len(), 15);
    }

    #[test]
    fn sample_draws_distinct_questions_from_the_bank() {
        let bank = QuestionBank::parse(&source(40)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = bank.sample(15, &mut rng).unwrap();
        assert_eq!(picked.len(), 15);

        let texts: HashSet<_> = picked.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts.len(), 15);
        assert!(picked.iter().all(|q| bank.questions().contains(q)));
    }

    #[test]
    fn sample_of_whole_bank_is_a_permutation() {
        let bank = QuestionBank::parse(&source(15)).unwrap();
        let picked = bank.sample(15, &mut StdRng::seed_from_u64(1)).unwrap();

        let mut texts: Vec<_> = picked.iter().map(|q| q.text.clone()).collect();
        texts.sort();
        let mut expected: Vec<_> = bank.questions().iter().map(|q| q.text.clone()).collect();
        expected.sort();
        assert_eq!(texts, expected);
    }

    #[test]
    fn sample_rejects_small_bank() {
        let bank = QuestionBank::parse(&source(14)).unwrap();
        let err = bank.sample(15, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(
            err,
            InsufficientQuestions {
                available: 14,
                requested: 15
            }
        );
    }
}

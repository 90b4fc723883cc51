use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::answers::{AnswerError, AnswerSet};
use super::bank::QuestionBank;
use super::domain::ItemId;

/// Failure while reading an `item_id,value` answer sheet.
#[derive(Debug, thiserror::Error)]
pub enum AnswerImportError {
    #[error("failed to read answer sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer sheet CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// Loads answer sheets exported as CSV with `item_id` and `value` columns.
///
/// Rows with a blank value are left unanswered.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        bank: &QuestionBank,
    ) -> Result<AnswerSet, AnswerImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, bank)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        bank: &QuestionBank,
    ) -> Result<AnswerSet, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut answers = AnswerSet::new();

        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            if let Some(value) = row.value {
                answers.record(bank, ItemId(row.item_id), value)?;
            }
        }

        Ok(answers)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    item_id: u16,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<i64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::domain::Likert;
    use std::io::Cursor;

    #[test]
    fn imports_rows_and_skips_blank_values() {
        let bank = QuestionBank::standard();
        let sheet = "item_id,value\n1,5\n2,\n7, 1 \n";
        let answers =
            AnswerSheetImporter::from_reader(Cursor::new(sheet), &bank).expect("sheet imports");
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get(ItemId(1)).map(Likert::value), Some(5));
        assert_eq!(answers.get(ItemId(2)), None);
        assert_eq!(answers.get(ItemId(7)).map(Likert::value), Some(1));
    }

    #[test]
    fn rejects_unknown_items() {
        let bank = QuestionBank::standard();
        let sheet = "item_id,value\n42,3\n";
        match AnswerSheetImporter::from_reader(Cursor::new(sheet), &bank) {
            Err(AnswerImportError::Answer(AnswerError::UnknownItem(ItemId(42)))) => {}
            other => panic!("expected unknown item error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_values() {
        let bank = QuestionBank::standard();
        let sheet = "item_id,value\n3,often\n";
        assert!(matches!(
            AnswerSheetImporter::from_reader(Cursor::new(sheet), &bank),
            Err(AnswerImportError::Csv(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let bank = QuestionBank::standard();
        assert!(matches!(
            AnswerSheetImporter::from_path("/nonexistent/answers.csv", &bank),
            Err(AnswerImportError::Io(_))
        ));
    }
}

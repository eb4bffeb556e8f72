use std::path::Path;

use csv::WriterBuilder;

use crate::error::ScanError;
use crate::model::MatchRecord;

const SUMMARY_HEADER: [&str; 2] = ["filename", "match"];

/// Overwrites any existing summary; quoting follows standard CSV rules.
pub(crate) fn write_summary(
    path: &Path,
    records: &[MatchRecord],
    delimiter: u8,
) -> Result<(), ScanError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    writer.write_record(SUMMARY_HEADER)?;
    for record in records {
        writer.write_record([record.filename.as_str(), record.text.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_summary;
    use crate::model::MatchRecord;

    #[test]
    fn quotes_fields_containing_the_delimiter() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("summary.csv");

        let records = vec![MatchRecord {
            filename: "a.pdf".to_string(),
            text: "total, due".to_string(),
        }];
        write_summary(&path, &records, b',').expect("summary should be written");

        let csv = std::fs::read_to_string(&path).expect("CSV should be readable");
        assert_eq!(csv, "filename,match\na.pdf,\"total, due\"\n");
    }

    #[test]
    fn writes_header_only_when_there_are_no_records() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("summary.csv");

        write_summary(&path, &[], b',').expect("summary should be written");

        let csv = std::fs::read_to_string(&path).expect("CSV should be readable");
        assert_eq!(csv, "filename,match\n");
    }
}

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use super::row::{parse_row, PlayerRow, RejectedRow, RowRejection};
use crate::errors::{IngestError, IngestResult};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Valid(PlayerRow),
    Rejected(RejectedRow),
}

/// Streams the data rows of a CSV upload, discarding the header line.
///
/// Blank lines count as rows with no columns. The csv reader skips them, so
/// they are recovered from the byte offsets between records.
pub struct CsvRowReader<'a> {
    input: &'a [u8],
    records: StringRecordsIntoIter<&'a [u8]>,
    /// Offset just past the last record handed out by the csv reader
    consumed: usize,
    blank_lines: usize,
    pending: Option<(Result<StringRecord, csv::Error>, String)>,
    row: usize,
}

impl<'a> CsvRowReader<'a> {
    /// Returns `None` when the input has no header line at all.
    pub fn open(input: &'a [u8]) -> IngestResult<Option<Self>> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        // Raw bytes: the header is thrown away, so its encoding does not matter
        if reader.byte_headers()?.is_empty() {
            return Ok(None);
        }
        let consumed = offset(reader.position());

        Ok(Some(Self {
            input,
            records: reader.into_records(),
            consumed,
            blank_lines: 0,
            pending: None,
            row: 0,
        }))
    }

    /// Reads the next record and the blank lines in front of it.
    fn fill(&mut self) -> bool {
        let (blanks, start) = skip_blank_lines(self.input, self.consumed);
        self.blank_lines = blanks;

        match self.records.next() {
            Some(result) => {
                let end = offset(self.records.reader().position()).min(self.input.len());
                let raw = raw_span(&self.input[start.min(end)..end]);
                self.consumed = end;
                self.pending = Some((result, raw));
            }
            None => self.consumed = self.input.len(),
        }

        self.blank_lines > 0 || self.pending.is_some()
    }

    fn parsed(&self, result: Result<StringRecord, csv::Error>, raw: String) -> IngestResult<ParsedRow> {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                return Err(IngestError::Decode { row: self.row });
            }
            Err(e) => return Err(IngestError::Csv(e)),
        };

        Ok(match parse_row(&record) {
            Ok(player) => ParsedRow::Valid(player),
            Err(reason) => ParsedRow::Rejected(RejectedRow {
                row: self.row,
                raw,
                reason,
            }),
        })
    }
}

impl Iterator for CsvRowReader<'_> {
    type Item = IngestResult<ParsedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.blank_lines == 0 && self.pending.is_none() && !self.fill() {
            return None;
        }
        self.row += 1;

        if self.blank_lines > 0 {
            self.blank_lines -= 1;
            return Some(Ok(ParsedRow::Rejected(RejectedRow {
                row: self.row,
                raw: String::new(),
                reason: RowRejection::ColumnCount(0),
            })));
        }

        let (result, raw) = self.pending.take()?;
        Some(self.parsed(result, raw))
    }
}

fn offset(position: &csv::Position) -> usize {
    usize::try_from(position.byte()).unwrap_or(usize::MAX)
}

/// Counts empty lines starting at `from` and returns where the next record
/// begins. A `\n` right after the `\r` that ended the previous record belongs
/// to that record's terminator.
fn skip_blank_lines(input: &[u8], from: usize) -> (usize, usize) {
    let mut idx = from;
    if idx > 0 && input.get(idx - 1) == Some(&b'\r') && input.get(idx) == Some(&b'\n') {
        idx += 1;
    }

    let mut blanks = 0;
    while let Some(&byte) = input.get(idx) {
        match byte {
            b'\n' => idx += 1,
            b'\r' => {
                idx += 1;
                if input.get(idx) == Some(&b'\n') {
                    idx += 1;
                }
            }
            _ => break,
        }
        blanks += 1;
    }

    (blanks, idx)
}

fn raw_span(bytes: &[u8]) -> String {
    let line = bytes
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(&bytes[..0], |last| &bytes[..=last]);
    String::from_utf8_lossy(line).into_owned()
}

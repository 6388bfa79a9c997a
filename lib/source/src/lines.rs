use flate2::read::GzDecoder;
use rankx_core::{Error, Record, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// True for items living in a named namespace: a leading run of ASCII
/// alphanumerics (possibly empty) followed by `:`, e.g. `Special:Search`
/// or `Talk:Rust`. Such pages are excluded from ranking.
pub fn is_namespace_page(item: &str) -> bool {
    for c in item.chars() {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() => continue,
            _ => return false,
        }
    }
    false
}

fn parse_line(line: &str, line_no: u64) -> Result<Record> {
    let mut fields = line.split_whitespace();
    let (Some(category), Some(item), Some(raw_score)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::InvalidRecord(format!(
            "line {}: expected at least 3 fields, got '{}'",
            line_no, line
        )));
    };
    // Any trailing columns (the pagecounts bytes-transferred field) are
    // dropped here so they never occupy memory downstream.
    let score = raw_score.parse::<u64>().map_err(|_| {
        Error::InvalidRecord(format!("line {}: invalid score '{}'", line_no, raw_score))
    })?;
    Ok(Record::new(category, item, score))
}

/// A pull-based record source over pagecounts-style lines.
///
/// Each line is `category item score [bytes]`, whitespace-delimited.
/// Blank lines and namespace pages are skipped; malformed lines surface
/// as [`Error::InvalidRecord`] with the line number, which aborts the
/// run rather than silently dropping data. End of stream is the
/// iterator's `None`.
pub struct LineSource<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: u64,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl LineSource<BufReader<Box<dyn Read + Send>>> {
    /// Opens a pagecounts file, decompressing transparently when the
    /// path ends in `.gz`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader: Box<dyn Read + Send> =
            if path.extension().is_some_and(|ext| ext == "gz") {
                Box::new(GzDecoder::new(file))
            } else {
                Box::new(file)
            };
        Ok(Self::new(BufReader::new(reader)))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line, self.line_no) {
                Ok(record) if is_namespace_page(&record.item) => continue,
                other => return Some(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(input: &str) -> Result<Vec<Record>> {
        LineSource::new(Cursor::new(input.to_string())).collect()
    }

    #[test]
    fn test_parse_basic_line() {
        let records = collect("en Main_Page 242332 4737756101\n").unwrap();
        assert_eq!(records, vec![Record::new("en", "Main_Page", 242332)]);
    }

    #[test]
    fn test_bytes_column_optional() {
        let records = collect("fr Accueil 50\n").unwrap();
        assert_eq!(records, vec![Record::new("fr", "Accueil", 50)]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let records = collect("\nen A 1\n\n  \nen B 2\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_namespace_pages_filtered() {
        let input = "en Special:Search 900 1\n\
                     en Talk:Rust 800 1\n\
                     en Category:Languages 700 1\n\
                     en :Colon_Start 600 1\n\
                     en Main_Page 500 1\n";
        let records = collect(input).unwrap();
        assert_eq!(records, vec![Record::new("en", "Main_Page", 500)]);
    }

    #[test]
    fn test_non_namespace_colon_kept() {
        // A non-alphanumeric character before the colon breaks the
        // namespace shape, so the page is kept.
        assert!(!is_namespace_page("C++_(language)"));
        assert!(!is_namespace_page("Who_Framed_Roger_Rabbit?:_Part_2"));
        assert!(is_namespace_page("User:Bob"));
    }

    #[test]
    fn test_too_few_fields_rejected() {
        let err = collect("en OnlyTwoFields\n").unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_non_numeric_score_rejected() {
        let err = collect("en Page not_a_number 1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(err.to_string().contains("not_a_number"));
    }

    #[test]
    fn test_open_plain_and_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let body = b"en Main_Page 100 1\nfr Accueil 50 1\n";

        let plain = dir.path().join("pagecounts");
        std::fs::write(&plain, body).unwrap();
        let records: Vec<Record> = LineSource::open(&plain)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);

        let gz = dir.path().join("pagecounts.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(body).unwrap();
        encoder.finish().unwrap();
        let gz_records: Vec<Record> = LineSource::open(&gz)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(gz_records, records);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LineSource::open("/no/such/pagecounts").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

use std::io::Write;

use anyhow::Result;

use crate::models::Song;
use crate::reports::ReportWriter;

/// `library.csv`: 헤더 없이 제목, 아티스트, 앨범 순서로 한 줄에 한 곡.
pub struct CsvReport;

impl ReportWriter for CsvReport {
    fn name(&self) -> &str {
        "CSV"
    }

    fn file_name(&self) -> &str {
        "library.csv"
    }

    fn render(&self, songs: &[Song], out: &mut dyn Write) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        for song in songs {
            writer.write_record(song.columns())?;
        }
        writer.flush()?;
        Ok(())
    }
}

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// MP3 파일 하나에서 읽은 곡 정보. 각 필드는 비어있을 수 있다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub artist: String,
    pub title: String,
    pub album: String,
}

impl Song {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
        }
    }

    /// 제목, 아티스트, 앨범이 모두 비어있으면 true.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.artist.is_empty() && self.album.is_empty()
    }

    /// 출력 컬럼 순서(제목, 아티스트, 앨범)대로 필드를 반환한다.
    pub fn columns(&self) -> [&str; 3] {
        [&self.title, &self.artist, &self.album]
    }
}

/// 정렬 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Artist,
}

impl SortKey {
    pub fn from_by_title(by_title: bool) -> Self {
        if by_title {
            SortKey::Title
        } else {
            SortKey::Artist
        }
    }
}

/// 출력 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Csv, OutputFormat::Html];
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_empty_only_when_all_fields_empty() {
        assert!(Song::default().is_empty());
        assert!(!Song::new("", "", "Album").is_empty());
        assert!(!Song::new("Title", "", "").is_empty());
    }

    #[test]
    fn test_columns_order() {
        let song = Song::new("Title", "Artist", "Album");
        assert_eq!(song.columns(), ["Title", "Artist", "Album"]);
    }

    #[test]
    fn test_format_rejects_pdf() {
        assert!(OutputFormat::from_str("pdf", true).is_err());
        assert_eq!(OutputFormat::from_str("HTML", true), Ok(OutputFormat::Html));
    }

    #[test]
    fn test_sort_key_from_by_title() {
        assert_eq!(SortKey::from_by_title(true), SortKey::Title);
        assert_eq!(SortKey::from_by_title(false), SortKey::Artist);
    }
}

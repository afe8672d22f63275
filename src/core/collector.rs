use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::tagger;
use crate::models::Song;

/// 수집 결과. 읽은 곡과 건너뛴 파일 정보를 함께 담는다.
#[derive(Debug, Default)]
pub struct Collection {
    pub songs: Vec<Song>,
    /// 태그를 읽지 못한 파일
    pub unreadable: Vec<PathBuf>,
    /// 태그는 읽었지만 제목/아티스트/앨범이 모두 빈 파일 수
    pub empty: usize,
}

/// 경로가 `.mp3`로 끝나는지 확인한다 (대소문자 무시).
pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// 파일 목록에서 MP3만 골라 태그를 읽는다.
pub fn collect_songs(paths: &[PathBuf], on_file: impl FnMut(&Path)) -> Collection {
    collect_songs_with(paths, on_file, tagger::read_song)
}

/// `collect_songs`와 같지만 태그 리더를 주입받는다.
/// 처리 순서를 유지하며, 읽기에 실패하거나 모든 필드가 빈 곡은 제외한다.
pub fn collect_songs_with<F>(
    paths: &[PathBuf],
    mut on_file: impl FnMut(&Path),
    mut read: F,
) -> Collection
where
    F: FnMut(&Path) -> Result<Song>,
{
    let mut collection = Collection::default();

    for path in paths {
        on_file(path);
        if !is_mp3(path) {
            continue;
        }

        match read(path) {
            Ok(song) if song.is_empty() => collection.empty += 1,
            Ok(song) => collection.songs.push(song),
            Err(_) => collection.unreadable.push(path.clone()),
        }
    }

    collection
}

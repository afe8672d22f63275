use std::path::Path;

use anyhow::{Context, Result};
use id3::TagLike;

use crate::models::Song;

/// MP3 파일에서 태그를 읽어 Song으로 변환한다.
/// ID3v2 태그를 우선하고, 없으면 ID3v1 태그를 사용한다.
/// 태그가 없는 프레임은 빈 문자열이 된다. 파일을 열 수 없거나
/// 태그가 없거나 손상되었으면 에러를 반환한다.
pub fn read_song(path: &Path) -> Result<Song> {
    let tag = id3::v1v2::read_from_path(path)
        .with_context(|| format!("태그를 읽을 수 없습니다: {}", path.display()))?;

    Ok(Song::new(
        tag.title().unwrap_or_default(),
        tag.artist().unwrap_or_default(),
        tag.album().unwrap_or_default(),
    ))
}

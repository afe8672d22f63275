use std::cmp::Ordering;

use crate::models::{Song, SortKey};

/// 곡 목록을 제목 또는 아티스트 기준 오름차순으로 정렬한다.
/// 문자열은 로케일 없이 코드포인트 순서로 비교한다.
/// 기준 값이 같으면 나머지 필드(아티스트 또는 제목, 그 다음 앨범) 순으로 비교한다.
pub fn sort_songs(songs: &mut [Song], key: SortKey) {
    songs.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Song, b: &Song, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Title => a.title.cmp(&b.title).then_with(|| a.artist.cmp(&b.artist)),
        SortKey::Artist => a.artist.cmp(&b.artist).then_with(|| a.title.cmp(&b.title)),
    };
    primary.then_with(|| a.album.cmp(&b.album))
}

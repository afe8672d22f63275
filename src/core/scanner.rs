use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// 탐색에서 제외할 경로 접두사 목록. 비교는 대소문자를 무시한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    prefixes: Vec<String>,
}

impl IgnoreList {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { prefixes }
    }

    /// `"a, b,c"` 형태의 쉼표 구분 문자열을 파싱한다. 빈 항목은 버린다.
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    /// 경로가 목록의 접두사 중 하나로 시작하면 true.
    pub fn matches(&self, path: &Path) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let path = path.to_string_lossy().to_lowercase();
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// 루트 디렉토리 아래의 모든 일반 파일 경로를 반환한다.
/// 무시 목록에 걸리는 경로는 하위 트리째 건너뛴다.
/// 루트를 읽을 수 없거나 탐색 중 오류가 나면 에러를 반환한다.
pub fn walk_files(root: &Path, ignore: &IgnoreList) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("{}은(는) 디렉토리가 아닙니다", root.display());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !ignore.matches(e.path()));

    for entry in walker {
        let entry = entry.with_context(|| format!("{} 탐색에 실패했습니다", root.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

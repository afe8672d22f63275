pub mod csv_file;
pub mod html_page;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Song;

/// 곡 목록 출력 형식 트레이트.
/// CSV, HTML 등 각 형식은 이 트레이트로 추상화한다.
pub trait ReportWriter {
    /// 출력 형식 이름 (메시지 표시용).
    fn name(&self) -> &str;
    /// 출력 디렉토리에 생성할 파일명.
    fn file_name(&self) -> &str;
    /// 정렬된 곡 목록을 `out`에 기록한다.
    fn render(&self, songs: &[Song], out: &mut dyn Write) -> Result<()>;
}

/// 출력 디렉토리에 리포트 파일을 생성(또는 덮어쓰기)하고 경로를 반환한다.
/// 파일 핸들은 함수가 끝날 때 에러 경로를 포함해 항상 닫힌다.
pub fn write_report(report: &dyn ReportWriter, songs: &[Song], output_dir: &Path) -> Result<PathBuf> {
    let target = output_dir.join(report.file_name());
    let file = File::create(&target)
        .with_context(|| format!("출력 파일을 만들 수 없습니다: {}", target.display()))?;

    let mut out = BufWriter::new(file);
    report
        .render(songs, &mut out)
        .with_context(|| format!("출력 파일에 쓸 수 없습니다: {}", target.display()))?;
    out.flush()
        .with_context(|| format!("출력 파일에 쓸 수 없습니다: {}", target.display()))?;

    println!(
        "성공: {} 파일이 생성되었습니다: {}",
        report.name(),
        target.display()
    );
    Ok(target)
}

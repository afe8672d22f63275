use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::{Confirm, Input, Select};

use crate::config::{self, Defaults};
use crate::core::collector::{self, Collection};
use crate::core::scanner::{self, IgnoreList};
use crate::core::sorter;
use crate::models::{OutputFormat, SortKey};
use crate::reports::csv_file::CsvReport;
use crate::reports::html_page::{HtmlReport, HtmlTemplate};
use crate::reports::write_report;

#[derive(Parser)]
#[command(
    name = "music-library",
    about = "MP3 태그를 읽어 음악 목록을 CSV 또는 HTML로 만드는 도구"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 음악 목록 파일 생성 (빠진 값은 프롬프트로 묻는다)
    Export(ExportArgs),
    /// 디렉토리를 스캔하여 곡 목록을 표로 표시
    List {
        /// 스캔할 디렉토리
        directory: PathBuf,
        /// 제외할 경로 접두사 (쉼표 구분)
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<String>,
        /// 정렬 기준
        #[arg(long, value_enum, default_value_t = SortKey::Title)]
        sort: SortKey,
        /// 검사하는 파일 경로를 모두 출력
        #[arg(short, long)]
        verbose: bool,
    },
    /// 기본값 설정
    Config,
}

#[derive(Args, Default)]
pub struct ExportArgs {
    /// 음악이 있는 디렉토리
    pub directory: Option<PathBuf>,
    /// 제외할 경로 접두사 (쉼표 구분)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,
    /// 정렬 기준
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,
    /// 출력 형식
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// 출력 파일을 만들 디렉토리
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// 프롬프트 없이 설정 파일의 기본값을 사용
    #[arg(long)]
    pub no_prompt: bool,
    /// 검사하는 파일 경로를 모두 출력
    #[arg(short, long)]
    pub verbose: bool,
}

/// 한 번의 내보내기 실행에 필요한 값.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub directory: PathBuf,
    pub ignore: IgnoreList,
    pub sort: SortKey,
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub verbose: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Export(args)) => cmd_export(args),
        Some(Commands::List {
            directory,
            ignore,
            sort,
            verbose,
        }) => cmd_list(&directory, &IgnoreList::new(ignore), sort, verbose),
        Some(Commands::Config) => cmd_config(),
        None => {
            print_banner();
            cmd_export(ExportArgs::default())
        }
    }
}

fn print_banner() {
    println!("Music Library Compiler");
    println!("======================\n");
    println!("디렉토리 안의 모든 곡 목록을 CSV 파일 또는 HTML 페이지로 만듭니다.");
    println!("현재는 MP3 파일만 처리합니다.\n");
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let interactive = !args.no_prompt;
    let options = resolve_options(args, &cfg.defaults, interactive)?;

    let template = match (&options.format, &cfg.defaults.html_template) {
        (OutputFormat::Html, Some(path)) => HtmlTemplate::from_path(path)?,
        _ => HtmlTemplate::bundled(),
    };

    export(&options, &template)?;
    Ok(())
}

/// CLI 인자, 프롬프트, 설정 파일 순으로 실행 값을 결정한다.
/// 필수 경로가 비어있으면 에러를 반환한다.
fn resolve_options(args: ExportArgs, defaults: &Defaults, interactive: bool) -> Result<ExportOptions> {
    let directory = match args.directory {
        Some(dir) => dir,
        None if interactive => prompt_path(
            "음악이 있는 디렉토리 경로를 입력하세요 (예: C:\\Music)",
            defaults.directory.as_deref(),
        )?,
        None => defaults
            .directory
            .clone()
            .context("음악 디렉토리가 지정되지 않았습니다")?,
    };
    let directory = require_path(directory)?;

    let ignore = match args.ignore {
        Some(prefixes) => IgnoreList::new(prefixes),
        None if interactive => {
            let input: String = Input::new()
                .with_prompt("제외할 디렉토리 경로 (쉼표 구분, 없으면 비워두세요)")
                .with_initial_text(defaults.ignore.join(","))
                .allow_empty(true)
                .interact_text()?;
            IgnoreList::parse(&input)
        }
        None => IgnoreList::new(&defaults.ignore),
    };

    let sort = match args.sort {
        Some(sort) => sort,
        None if interactive => {
            let by_title = Confirm::new()
                .with_prompt("제목순으로 정렬할까요? 아니오를 선택하면 아티스트순으로 정렬합니다")
                .default(defaults.sort.unwrap_or_default() == SortKey::Title)
                .interact()?;
            SortKey::from_by_title(by_title)
        }
        None => defaults.sort.unwrap_or_default(),
    };

    let format = match args.format {
        Some(format) => format,
        None if interactive => {
            let items: Vec<String> = OutputFormat::ALL.iter().map(|f| f.to_string()).collect();
            let current = defaults.format.unwrap_or_default();
            let default_index = OutputFormat::ALL
                .iter()
                .position(|f| *f == current)
                .unwrap_or(0);
            let selection = Select::new()
                .with_prompt("목록을 어떤 형식으로 만들까요?")
                .items(&items)
                .default(default_index)
                .interact()?;
            OutputFormat::ALL[selection]
        }
        None => defaults.format.unwrap_or_default(),
    };

    let output_directory = match args.output {
        Some(dir) => dir,
        None if interactive => prompt_path(
            "출력 파일을 저장할 디렉토리를 입력하세요",
            defaults.output_directory.as_deref(),
        )?,
        None => defaults
            .output_directory
            .clone()
            .context("출력 디렉토리가 지정되지 않았습니다")?,
    };
    let output_directory = require_path(output_directory)?;

    Ok(ExportOptions {
        directory,
        ignore,
        sort,
        format,
        output_directory,
        verbose: args.verbose,
    })
}

fn prompt_path(prompt: &str, default: Option<&Path>) -> Result<PathBuf> {
    let initial = default
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(PathBuf::from(input.trim()))
}

fn require_path(path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("유효한 경로를 입력해야 합니다");
    }
    Ok(path)
}

/// 스캔, 태그 읽기, 정렬 후 선택한 형식으로 파일을 만든다. 생성된 파일 경로를 반환한다.
pub fn export(options: &ExportOptions, template: &HtmlTemplate) -> Result<PathBuf> {
    let collection = scan_library(&options.directory, &options.ignore, options.sort, options.verbose)?;

    print_summary(&collection);

    match options.format {
        OutputFormat::Csv => write_report(&CsvReport, &collection.songs, &options.output_directory),
        OutputFormat::Html => write_report(
            &HtmlReport::new(template),
            &collection.songs,
            &options.output_directory,
        ),
    }
}

fn scan_library(directory: &Path, ignore: &IgnoreList, sort: SortKey, verbose: bool) -> Result<Collection> {
    let files = scanner::walk_files(directory, ignore)?;

    let mut collection = collector::collect_songs(&files, |path| {
        if verbose {
            println!("{}", path.display());
        }
    });
    for path in &collection.unreadable {
        eprintln!("태그를 읽을 수 없습니다: {}", path.display());
    }

    sorter::sort_songs(&mut collection.songs, sort);
    Ok(collection)
}

fn print_summary(collection: &Collection) {
    println!(
        "\n총 {} 곡 (태그 읽기 실패: {}, 빈 태그: {})",
        collection.songs.len(),
        collection.unreadable.len(),
        collection.empty,
    );
}

fn cmd_list(directory: &Path, ignore: &IgnoreList, sort: SortKey, verbose: bool) -> Result<()> {
    let collection = scan_library(directory, ignore, sort, verbose)?;

    if collection.songs.is_empty() {
        println!("{}에서 곡을 찾을 수 없습니다", directory.display());
    } else {
        let mut table = Table::new();
        table.set_header(vec!["제목", "아티스트", "앨범"]);
        for song in &collection.songs {
            table.add_row(song.columns().map(Cell::new));
        }
        println!("{table}");
    }

    print_summary(&collection);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let mut cfg = config::load_config()?;
    let current = cfg.defaults.clone();

    println!("기본값 설정");
    println!("(비워두면 해당 값은 매번 묻습니다)\n");

    let directory = prompt_optional_path("음악 디렉토리", current.directory.as_deref())?;

    let ignore: String = Input::new()
        .with_prompt("제외할 디렉토리 경로 (쉼표 구분)")
        .with_initial_text(current.ignore.join(","))
        .allow_empty(true)
        .interact_text()?;

    let by_title = Confirm::new()
        .with_prompt("제목순으로 정렬할까요?")
        .default(current.sort.unwrap_or_default() == SortKey::Title)
        .interact()?;

    let items: Vec<String> = OutputFormat::ALL.iter().map(|f| f.to_string()).collect();
    let current_format = current.format.unwrap_or_default();
    let selection = Select::new()
        .with_prompt("출력 형식")
        .items(&items)
        .default(
            OutputFormat::ALL
                .iter()
                .position(|f| *f == current_format)
                .unwrap_or(0),
        )
        .interact()?;

    let output_directory = prompt_optional_path("출력 디렉토리", current.output_directory.as_deref())?;

    cfg.defaults = Defaults {
        directory,
        ignore: ignore
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        sort: Some(SortKey::from_by_title(by_title)),
        format: Some(OutputFormat::ALL[selection]),
        output_directory,
        html_template: current.html_template,
    };

    let path = config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다: {}", path.display());
    Ok(())
}

fn prompt_optional_path(prompt: &str, current: Option<&Path>) -> Result<Option<PathBuf>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current.map(|p| p.display().to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    Ok((!input.is_empty()).then(|| PathBuf::from(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tagger::tests::write_mp3;

    fn options(root: &Path, out: &Path, format: OutputFormat) -> ExportOptions {
        ExportOptions {
            directory: root.to_path_buf(),
            ignore: IgnoreList::default(),
            sort: SortKey::Title,
            format,
            output_directory: out.to_path_buf(),
            verbose: false,
        }
    }

    #[test]
    fn test_export_csv_sorted_by_title() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_mp3(&root.path().join("a.mp3"), "Zeta", "A", "One");
        write_mp3(&root.path().join("b.mp3"), "Alpha", "B", "Two");
        std::fs::write(root.path().join("c.txt"), "irrelevant").unwrap();

        let path = export(
            &options(root.path(), out.path(), OutputFormat::Csv),
            &HtmlTemplate::bundled(),
        )
        .unwrap();

        assert_eq!(path, out.path().join("library.csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Alpha,B,Two\nZeta,A,One\n"
        );
    }

    #[test]
    fn test_export_skips_unparsable_mp3() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("broken.mp3"), [0xABu8; 300]).unwrap();

        let path = export(
            &options(root.path(), out.path(), OutputFormat::Html),
            &HtmlTemplate::bundled(),
        )
        .unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(path, out.path().join("library.html"));
        assert_eq!(html.matches("<tr><td>").count(), 0);
    }

    #[test]
    fn test_export_html_by_artist_with_ignore() {
        let root = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("Podcasts")).unwrap();
        write_mp3(&root.path().join("x.mp3"), "Song", "Zed", "");
        write_mp3(&root.path().join("y.MP3"), "Tune", "Amy & Co", "");
        write_mp3(&root.path().join("Podcasts/ep.mp3"), "Episode", "Host", "");

        let mut opts = options(root.path(), out.path(), OutputFormat::Html);
        opts.sort = SortKey::Artist;
        opts.ignore = IgnoreList::new([root.path().join("podcasts").to_string_lossy()]);

        let path = export(&opts, &HtmlTemplate::bundled()).unwrap();
        let html = std::fs::read_to_string(path).unwrap();

        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(!html.contains("Episode"));
        let amy = html.find("<tr><td>Tune</td><td>Amy &amp; Co</td>").unwrap();
        let zed = html.find("<tr><td>Song</td><td>Zed</td>").unwrap();
        assert!(amy < zed);
    }

    #[test]
    fn test_export_missing_root_is_error() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("missing");
        assert!(export(
            &options(&missing, out.path(), OutputFormat::Csv),
            &HtmlTemplate::bundled()
        )
        .is_err());
    }

    #[test]
    fn test_resolve_without_prompt_uses_args_then_defaults() {
        let defaults = Defaults {
            directory: Some(PathBuf::from("/music")),
            ignore: vec!["/music/skip".to_string()],
            sort: Some(SortKey::Artist),
            format: Some(OutputFormat::Html),
            output_directory: Some(PathBuf::from("/out")),
            html_template: None,
        };
        let args = ExportArgs {
            format: Some(OutputFormat::Csv),
            ..Default::default()
        };

        let opts = resolve_options(args, &defaults, false).unwrap();
        assert_eq!(opts.directory, PathBuf::from("/music"));
        assert_eq!(opts.ignore, IgnoreList::new(["/music/skip"]));
        assert_eq!(opts.sort, SortKey::Artist);
        assert_eq!(opts.format, OutputFormat::Csv);
        assert_eq!(opts.output_directory, PathBuf::from("/out"));
    }

    #[test]
    fn test_resolve_without_prompt_requires_paths() {
        let args = ExportArgs {
            directory: Some(PathBuf::from("/music")),
            ..Default::default()
        };
        assert!(resolve_options(args, &Defaults::default(), false).is_err());

        let args = ExportArgs {
            directory: Some(PathBuf::new()),
            output: Some(PathBuf::from("/out")),
            ..Default::default()
        };
        assert!(resolve_options(args, &Defaults::default(), false).is_err());
    }

    #[test]
    fn test_cli_rejects_pdf_format() {
        assert!(Cli::try_parse_from(["music-library", "export", "--format", "pdf"]).is_err());
        assert!(Cli::try_parse_from(["music-library", "export", "--format", "html"]).is_ok());
    }

    #[test]
    fn test_cli_parses_ignore_list() {
        let cli = Cli::try_parse_from([
            "music-library",
            "export",
            "/music",
            "--ignore",
            "/music/a,/music/b",
            "--no-prompt",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Export(args)) => {
                assert_eq!(
                    args.ignore,
                    Some(vec!["/music/a".to_string(), "/music/b".to_string()])
                );
                assert!(args.no_prompt);
            }
            _ => panic!("expected export command"),
        }
    }
}

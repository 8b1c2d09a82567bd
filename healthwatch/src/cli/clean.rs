//! clean サブコマンド
//!
//! 指定日数より古いファイルを検索し、確認の上で削除します。

use crate::cleanup::{delete_files, find_old_files};
use chrono::{DateTime, Local};
use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 一覧表示する最大件数
const PREVIEW_LIMIT: usize = 5;

/// clean サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    /// Directory to search in
    pub directory: PathBuf,

    /// File extension to look for (empty matches every file)
    #[arg(short, long, default_value = ".log")]
    pub extension: String,

    /// Delete files older than N days
    #[arg(short, long, default_value_t = 7)]
    pub days: u64,

    /// Show what would be deleted without actually deleting
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,
}

/// clean コマンドを実行（標準入出力を使用）
pub fn execute(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(args, &mut stdin.lock(), &mut stdout.lock())
}

/// 入出力を差し替え可能な clean 本体
pub fn run<R: BufRead, W: Write>(
    args: &CleanArgs,
    input: &mut R,
    out: &mut W,
) -> Result<(), anyhow::Error> {
    writeln!(
        out,
        "Searching for {} files older than {} days in {}",
        args.extension,
        args.days,
        args.directory.display()
    )?;

    let old_files = find_old_files(&args.directory, Some(args.extension.as_str()), args.days)?;
    if old_files.is_empty() {
        writeln!(out, "No matching files found.")?;
        return Ok(());
    }

    writeln!(out, "Found {} file(s) matching criteria:", old_files.len())?;
    for path in old_files.iter().take(PREVIEW_LIMIT) {
        let modified = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map(|time| {
                DateTime::<Local>::from(time)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| "unknown".to_string());
        writeln!(out, "  - {} (modified: {})", path.display(), modified)?;
    }
    if old_files.len() > PREVIEW_LIMIT {
        writeln!(out, "  ... and {} more", old_files.len() - PREVIEW_LIMIT)?;
    }

    if !args.dry_run && !args.yes {
        write!(out, "\nDelete {} file(s)? [y/N]: ", old_files.len())?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }

    let summary = delete_files(&old_files, args.dry_run, out)?;
    if args.dry_run {
        writeln!(out, "\n[DRY RUN] Would delete {} file(s)", summary.deleted)?;
    } else {
        writeln!(
            out,
            "\nDeleted {} file(s), failed to delete {} file(s)",
            summary.deleted, summary.failed
        )?;
    }
    Ok(())
}

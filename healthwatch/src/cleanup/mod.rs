//! 古いファイルのクリーンアップ
//!
//! 指定ディレクトリ以下を再帰的に走査し、拡張子と最終更新時刻で
//! 対象ファイルを選び出して削除する。

use crate::error::{HealthwatchError, HealthwatchResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::warn;

/// 1日の秒数
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// 削除結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    /// 削除した（ドライラン時は削除予定の）ファイル数
    pub deleted: usize,
    /// 削除に失敗したファイル数
    pub failed: usize,
}

/// `days_old` 日前の時刻を返す
pub fn cutoff_time(now: SystemTime, days_old: u64) -> SystemTime {
    let age = Duration::from_secs(days_old.saturating_mul(SECS_PER_DAY));
    now.checked_sub(age).unwrap_or(SystemTime::UNIX_EPOCH)
}

/// ファイル名が拡張子条件に一致するか（空・未指定は全一致）
pub fn matches_extension(path: &Path, extension: Option<&str>) -> bool {
    match extension {
        None | Some("") => true,
        Some(ext) => path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(ext))
            .unwrap_or(false),
    }
}

/// `directory` 以下で、`extension` に一致し `days_old` 日より古いファイルを探す
///
/// 読み取れないサブディレクトリは警告を出してスキップする。結果はパス順。
pub fn find_old_files(
    directory: &Path,
    extension: Option<&str>,
    days_old: u64,
) -> HealthwatchResult<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(HealthwatchError::Config(format!(
            "Directory '{}' does not exist",
            directory.display()
        )));
    }

    let cutoff = cutoff_time(SystemTime::now(), days_old);
    let mut old_files = Vec::new();
    let mut pending = vec![directory.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if dir == directory => return Err(err.into()),
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "Skipping unreadable directory");
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                pending.push(path);
                continue;
            }
            if !path.is_file() || !matches_extension(&path, extension) {
                continue;
            }
            match fs::metadata(&path).and_then(|meta| meta.modified()) {
                Ok(modified) if modified < cutoff => old_files.push(path),
                Ok(_) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Cannot read modification time");
                }
            }
        }
    }

    old_files.sort();
    Ok(old_files)
}

/// ファイルを削除し、進捗を `out` へ出力する
///
/// ドライラン時は削除せず、削除予定として数える。
pub fn delete_files<W: Write>(
    files: &[PathBuf],
    dry_run: bool,
    out: &mut W,
) -> std::io::Result<DeleteSummary> {
    let mut summary = DeleteSummary::default();

    for path in files {
        if dry_run {
            writeln!(out, "[DRY RUN] Would delete: {}", path.display())?;
            summary.deleted += 1;
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => {
                writeln!(out, "Deleted: {}", path.display())?;
                summary.deleted += 1;
            }
            Err(err) => {
                writeln!(out, "Failed to delete {}: {}", path.display(), err)?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

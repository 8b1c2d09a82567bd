//! ロギング初期化ユーティリティ
//!
//! すべてのレコードは `<timestamp> - <LEVEL> - <message>` 形式の1行として、
//! [`FanoutSink`] に登録された全出力先（標準出力・ログファイル）へ同時に書き込まれる。

use crate::config;
use crate::error::{HealthwatchError, HealthwatchResult};
use crate::health::RECORD_TARGET;
use chrono::Local;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// タイムスタンプ書式（例: `2024-05-01 12:34:56,789`）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// `<timestamp> - <LEVEL> - <message>` 形式のイベントフォーマッタ
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// 1レコードを複数の出力先へ複製するログシンク
///
/// ある出力先への書き込みが失敗しても、他の出力先には同じレコードが届く。
/// 全出力先で失敗した場合のみエラーを返す。
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Arc<Vec<Sink>>,
}

impl FanoutSink {
    /// 出力先一覧から作成
    pub fn new(sinks: Vec<Box<dyn Write + Send>>) -> Self {
        Self {
            sinks: Arc::new(sinks.into_iter().map(Mutex::new).collect()),
        }
    }

    /// 標準出力のみ
    pub fn stdout() -> Self {
        Self::new(vec![Box::new(io::stdout())])
    }

    /// 標準出力 + 追記専用ログファイル（ローテーションなし）
    pub fn stdout_and_file(path: &Path) -> HealthwatchResult<Self> {
        let file = open_log_file(path)?;
        Ok(Self::new(vec![Box::new(io::stdout()), Box::new(file)]))
    }

    /// 登録されている出力先の数
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// 出力先が1つもない場合 true
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// [`FanoutSink`] が1レコードごとに払い出すライター
pub struct FanoutWriter<'a> {
    sinks: &'a [Sink],
}

impl Write for FanoutWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut delivered = false;
        let mut last_err = None;

        for sink in self.sinks {
            let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
            match sink.write_all(buf) {
                Ok(()) => delivered = true,
                Err(err) => last_err = Some(err),
            }
        }

        match last_err {
            Some(err) if !delivered => Err(err),
            _ => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in self.sinks {
            let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = sink.flush();
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FanoutSink {
    type Writer = FanoutWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FanoutWriter {
            sinks: self.sinks.as_slice(),
        }
    }
}

fn open_log_file(path: &Path) -> HealthwatchResult<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        HealthwatchError::Logging(format!("invalid log file path: {}", path.display()))
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(directory)
        .map_err(|err| {
            HealthwatchError::Logging(format!(
                "failed to open log file {}: {}",
                path.display(),
                err
            ))
        })
}

/// フィルタとシンクからサブスクライバーを組み立てる
///
/// グローバル登録はしないため、テストでは `tracing::subscriber::set_default` と組み合わせて使う。
pub fn build_subscriber(
    sink: FanoutSink,
    filter: EnvFilter,
) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_ansi(false)
            .with_writer(sink),
    )
}

/// ログレベル文字列から EnvFilter を作成（不正な値は `info`）
///
/// ヘルスレコードは出力契約の一部なので、ディレクティブが
/// [`RECORD_TARGET`] を明示しない限り `info` 以上を常に通す。
pub fn env_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    if directive.contains(RECORD_TARGET) {
        return filter;
    }
    match format!("{RECORD_TARGET}=info").parse() {
        Ok(floor) => filter.add_directive(floor),
        Err(_) => filter,
    }
}

/// グローバルロガーを初期化
///
/// `log_file` が指定された場合は標準出力とファイルの両方へ、
/// それ以外は標準出力のみへ出力する。
pub fn init(log_file: Option<&Path>) -> HealthwatchResult<()> {
    let sink = match log_file {
        Some(path) => FanoutSink::stdout_and_file(path)?,
        None => FanoutSink::stdout(),
    };
    let subscriber = build_subscriber(sink, env_filter(&config::get_log_level()));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| HealthwatchError::Logging(err.to_string()))
}

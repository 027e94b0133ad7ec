use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::numerical::optimization::bracket_search::config::SearchTask;
use crate::numerical::optimization::bracket_search::errors::ConfigError;
use crate::numerical::optimization::bracket_search::trace::{HEADERS, TraceTable};

/// `off`, `error`, `warn`, `info`, `debug` or `trace`
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(ConfigError::InvalidLogLevel(level.to_string())),
    }
}

/// `log_<date>_<time>.txt`
pub fn default_log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Install a terminal logger and, with `file`, a file logger at the same level.
/// Returns `false` when a logger was already installed, which is not an error.
pub fn init_logger(level: &str, file: Option<&Path>) -> Result<bool, ConfigError> {
    let log_option = parse_level(level)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = file {
        let log_file = File::create(path).map_err(|e| ConfigError::LogFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        loggers.push(WriteLogger::new(log_option, Config::default(), log_file));
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}

/// tab separated, numbers formatted as in the printed table
pub fn save_trace_to_file(table: &TraceTable, filename: &Path) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", HEADERS.join("\t"))?;
    for row in table.rows() {
        writeln!(file, "{}", row.to_strings().join("\t"))?;
    }
    Ok(())
}

/// full precision values, one record per iteration
pub fn save_trace_to_csv(table: &TraceTable, filename: &Path) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(HEADERS)?;
    for row in table.rows() {
        writer.write_record(&[
            row.step.to_string(),
            row.a.to_string(),
            row.b.to_string(),
            row.lambda.to_string(),
            row.mu.to_string(),
            row.f_lambda.to_string(),
            row.f_mu.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the trace of a finished task to the files named by its `output` and `csv` keys.
pub fn save_task_trace(task: &SearchTask, table: &TraceTable) -> Result<(), ConfigError> {
    let failed = |path: &Path, e: io::Error| ConfigError::TraceFile {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(path) = &task.output {
        save_trace_to_file(table, path).map_err(|e| failed(path, e))?;
    }
    if let Some(path) = &task.csv {
        save_trace_to_csv(table, path).map_err(|e| failed(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::optimization::bracket_search::config::SearchConfig;
    use crate::numerical::optimization::bracket_search::objective::ClosureFunction;
    use crate::numerical::optimization::bracket_search::solver::SearchMethod;
    use crate::numerical::optimization::bracket_search::trace::TraceRow;
    use crate::numerical::optimization::bracket_search::{fibonacci, golden_section};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn table() -> TraceTable {
        let mut table = TraceTable::new();
        for step in 1..=3 {
            let b = 1.0 / step as f64;
            table.push(TraceRow {
                step,
                a: 0.0,
                b,
                lambda: 0.4 * b,
                mu: 0.6 * b,
                f_lambda: 0.16 * b * b,
                f_mu: 0.36 * b * b,
            });
        }
        table
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" Warn ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert_eq!(
            parse_level("loud").unwrap_err(),
            ConfigError::InvalidLogLevel("loud".to_string())
        );
    }

    #[test]
    fn test_default_log_file_name() {
        let name = default_log_file_name();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_init_logger_rejects_bad_level_and_path() {
        assert!(init_logger("chatty", None).is_err());
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("log.txt");
        assert!(matches!(
            init_logger("info", Some(&missing)),
            Err(ConfigError::LogFile { .. })
        ));
    }

    #[test]
    fn test_save_trace_to_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.csv");
        save_trace_to_csv(&table(), &path).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 7);
        assert_eq!(&headers[3], "λ[k]");
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[1][2], "0.5");
        let mu: f64 = records[2][4].parse().unwrap();
        approx::assert_relative_eq!(mu, 0.2);
    }

    #[test]
    fn test_save_trace_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        save_trace_to_file(&table(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("K\ta[k]"));
        assert_eq!(lines[3].split('\t').nth(2), Some("0.33333333"));
    }

    fn task(output: Option<PathBuf>, csv: Option<PathBuf>) -> SearchTask {
        SearchTask {
            name: "parabola".to_string(),
            method: SearchMethod::GoldenSection,
            function: "x^2".to_string(),
            config: SearchConfig::default(),
            output,
            csv,
        }
    }

    #[test]
    fn test_save_task_trace_writes_requested_files() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("trace.txt");
        let csv = dir.path().join("trace.csv");
        save_task_trace(&task(Some(output.clone()), Some(csv.clone())), &table()).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 4);
        assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 4);

        // nothing requested, nothing written
        save_task_trace(&task(None, None), &table()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);

        let missing = dir.path().join("no_such_dir").join("trace.csv");
        assert!(matches!(
            save_task_trace(&task(None, Some(missing)), &table()),
            Err(ConfigError::TraceFile { .. })
        ));
    }

    // the only test that installs a logger
    #[test]
    fn test_debug_log_holds_every_trace_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search.log");
        assert!(init_logger("debug", Some(&path)).unwrap());
        let config = SearchConfig::default();
        let mut func = ClosureFunction::new(|x| (x - 0.7).powi(2), "(x-0.7)^2");
        let golden = golden_section::search(&mut func, &config).unwrap();
        let fibonacci = fibonacci::search(&mut func, &config).unwrap();
        log::logger().flush();
        let text = fs::read_to_string(&path).unwrap();
        for row in golden.table.rows().iter().chain(fibonacci.table.rows()) {
            assert!(text.contains(&format!("{:?}", row)), "{:?} not logged", row);
        }
    }
}

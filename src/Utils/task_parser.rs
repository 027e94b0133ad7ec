/// parse a task document with structure like
/// ```text
/// title1
///   key1: value runs to the end of the line
///   key2: value2
/// title2
///   key3: value3
/// ```
/// into ordered sections. The section titled `logging` configures the logger,
/// every other section describes one search; its optional `output` and `csv` keys name
/// files that receive a copy of the trace table.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{
        alpha1, alphanumeric1, line_ending, multispace0, not_line_ending, space0,
    },
    combinator::{eof, map, recognize},
    multi::{many0, many1},
    sequence::{delimited, pair, terminated},
};
use std::fs;
use std::path::{Path, PathBuf};

use crate::numerical::optimization::bracket_search::config::{SearchConfig, SearchTask};
use crate::numerical::optimization::bracket_search::errors::ConfigError;
use crate::numerical::optimization::bracket_search::solver::SearchMethod;

/// title of the logger settings section
pub const LOGGING_SECTION: &str = "logging";
const TASK_KEYS: [&str; 10] = [
    "method", "function", "a", "b", "mode", "eps", "length", "variable", "output", "csv",
];
const LOGGING_KEYS: [&str; 2] = ["level", "file"];

/// A titled list of `key: value` pairs, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub pairs: Vec<(String, String)>,
}

impl Section {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Task {
            section: self.title.clone(),
            message: message.into(),
        }
    }

    fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key)
            .ok_or_else(|| self.error(format!("missing key '{}'", key)))
    }

    fn float(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        self.get(key)
            .map(|value| {
                value.parse::<f64>().map_err(|_| {
                    self.error(format!("key '{}': '{}' is not a number", key, value))
                })
            })
            .transpose()
    }

    fn check_keys(&self, allowed: &[&str]) -> Result<(), ConfigError> {
        for (i, (key, _)) in self.pairs.iter().enumerate() {
            if !allowed.contains(&key.as_str()) {
                return Err(self.error(format!("unknown key '{}'", key)));
            }
            if self.pairs[..i].iter().any(|(k, _)| k == key) {
                return Err(self.error(format!("duplicate key '{}'", key)));
            }
        }
        Ok(())
    }
}

/// Logger settings: level name and optional log file (`auto` for a timestamped name)
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<String>,
}

/// Parsed task document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFile {
    pub logging: Option<LoggingSettings>,
    pub tasks: Vec<SearchTask>,
}

/// Parses a name (word characters without spaces)
pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// A title alone on its line
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_key(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = alt((line_ending, eof)).parse(input)?;
    Ok((input, title))
}

/// `key: value`; the value is the rest of the line, trimmed
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = space0(input)?;
    let (input, key) = parse_key(input)?;
    let (input, _) = delimited(space0, tag(":"), space0).parse(input)?;
    let (input, value) = not_line_ending(input)?;
    let (input, _) = alt((line_ending, eof)).parse(input)?;
    Ok((input, (key, value.trim().to_string())))
}

/// Parses a section with a title and zero or more key-value pairs
pub(crate) fn parse_section(input: &str) -> IResult<&str, Section> {
    let (input, title) = parse_title(input)?;
    let (input, pairs) = many0(terminated(parse_key_value_pair, multispace0)).parse(input)?;
    Ok((input, Section { title, pairs }))
}

/// Filters out comment lines (starting with //, # or %) and blank lines
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire (comment free) document into sections
pub fn parse_document(input: &str) -> IResult<&str, Vec<Section>> {
    let mut parser = many1(delimited(multispace0, parse_section, multispace0));
    parser.parse(input)
}

/// Sections of a document; the whole document must be consumed
pub fn parse_sections(input: &str) -> Result<Vec<Section>, ConfigError> {
    let filtered = filter_comments(input);
    let document_error = |message: String| ConfigError::Task {
        section: "<document>".to_string(),
        message,
    };
    match parse_document(&filtered) {
        Ok((remaining, sections)) => {
            if !remaining.trim().is_empty() {
                let line = remaining.lines().next().unwrap_or("").trim();
                return Err(document_error(format!("cannot parse line '{}'", line)));
            }
            Ok(sections)
        }
        Err(e) => Err(document_error(format!("parsing error: {:?}", e))),
    }
}

fn logging_settings(section: &Section) -> Result<LoggingSettings, ConfigError> {
    section.check_keys(&LOGGING_KEYS)?;
    Ok(LoggingSettings {
        level: section.get("level").unwrap_or("info").to_string(),
        file: section.get("file").map(str::to_string),
    })
}

fn search_task(section: &Section) -> Result<SearchTask, ConfigError> {
    section.check_keys(&TASK_KEYS)?;
    let method =
        SearchMethod::parse(section.require("method")?).map_err(|e| section.error(e.to_string()))?;
    let function = section.require("function")?.to_string();
    let defaults = SearchConfig::default();
    let a = section
        .float("a")?
        .ok_or_else(|| section.error("missing key 'a'"))?;
    let b = section
        .float("b")?
        .ok_or_else(|| section.error("missing key 'b'"))?;
    let mode = section.require("mode")?;
    let eps = section.float("eps")?.unwrap_or(defaults.eps);
    let length = section.float("length")?.unwrap_or(defaults.length);
    let mut config = SearchConfig::new(a, b, mode, eps, length)
        .map_err(|e| section.error(e.to_string()))?;
    if let Some(variable) = section.get("variable") {
        config = config.with_variable(variable);
    }
    config.validate().map_err(|e| section.error(e.to_string()))?;
    Ok(SearchTask {
        name: section.title.clone(),
        method,
        function,
        config,
        output: section.get("output").filter(|v| !v.is_empty()).map(PathBuf::from),
        csv: section.get("csv").filter(|v| !v.is_empty()).map(PathBuf::from),
    })
}

/// Parse a task document: an optional `logging` section and one section per search.
pub fn parse_tasks(input: &str) -> Result<TaskFile, ConfigError> {
    let mut task_file = TaskFile::default();
    for section in parse_sections(input)? {
        if section.title == LOGGING_SECTION {
            if task_file.logging.is_some() {
                return Err(section.error("duplicate logging section"));
            }
            task_file.logging = Some(logging_settings(&section)?);
        } else {
            task_file.tasks.push(search_task(&section)?);
        }
    }
    Ok(task_file)
}

pub fn load_task_file(path: &Path) -> Result<TaskFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::TaskFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_tasks(&content)
}

#![allow(non_snake_case)]
use log::{error, info};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

use RustedExtremum::Examples::search_examples::{N_EXAMPLES, search_examples};
use RustedExtremum::Utils::logger::{default_log_file_name, init_logger, save_task_trace};
use RustedExtremum::Utils::task_parser::load_task_file;
use RustedExtremum::numerical::optimization::bracket_search::errors::SearchError;
use RustedExtremum::numerical::optimization::bracket_search::solver::solve_tasks_parallel;

/// `RustedExtremum [task-file]`: run every search of the task file, or the built-in examples.
/// Trace tables go to the files named by a task's `output` and `csv` keys.
fn run(task_file: Option<&Path>) -> Result<(), SearchError> {
    let Some(path) = task_file else {
        init_logger("info", None)?;
        for example in 0..N_EXAMPLES {
            search_examples(example)?;
        }
        return Ok(());
    };
    let task_file = load_task_file(path)?;
    match &task_file.logging {
        Some(logging) => {
            let file = logging.file.as_ref().map(|name| {
                if name == "auto" {
                    PathBuf::from(default_log_file_name())
                } else {
                    PathBuf::from(name)
                }
            });
            init_logger(&logging.level, file.as_deref())?;
        }
        None => {
            init_logger("warn", None)?;
        }
    }
    info!("{} tasks loaded from {}", task_file.tasks.len(), path.display());
    let results = solve_tasks_parallel(&task_file.tasks);
    let mut failed = None;
    for (task, result) in task_file.tasks.iter().zip(results) {
        println!("{} ({} search of '{}')", task.name, task.method, task.function);
        let saved = result.and_then(|outcome| {
            println!("{}\n", outcome.printable());
            save_task_trace(task, &outcome.table).map_err(SearchError::from)
        });
        if let Err(e) = saved {
            error!("task '{}' failed: {}", task.name, e);
            println!("error: {}\n", e);
            if failed.is_none() {
                failed = Some(e);
            }
        }
    }
    match failed {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    let task_file = env::args().nth(1).map(PathBuf::from);
    if let Err(e) = run(task_file.as_deref()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

//! Source selection logic.

use std::sync::Arc;

use bestquote_core::registry::SourceFactory;
use bestquote_core::task::{FetchError, FetchTask};

/// Get fetch tasks to run based on the source selection: `"all"` or a
/// comma-separated list of source names.
pub fn get_tasks_to_run(
    selection: &str,
    factory: &dyn SourceFactory,
) -> Result<Vec<Arc<dyn FetchTask>>, FetchError> {
    match selection.trim() {
        "all" => {
            let names = factory.available();
            let mut tasks = Vec::with_capacity(names.len());
            for name in names {
                tasks.push(factory.get(name)?);
            }
            Ok(tasks)
        }
        list => {
            let mut tasks = Vec::new();
            for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                tasks.push(factory.get(name)?);
            }
            if tasks.is_empty() {
                return Err(FetchError::EmptyTaskSet);
            }
            Ok(tasks)
        }
    }
}

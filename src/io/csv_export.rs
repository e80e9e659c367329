use std::path::Path;

use super::error::StoreError;
use crate::model::{Project, Task};

/// Export projects and their tasks to a semicolon-delimited CSV file.
///
/// Columns: Project ; Task ; Start Date ; End Date ; Gap Days ; Status
/// Project rows leave the task column empty. Dates are YYYY-MM-DD.
/// Returns the number of data rows written.
pub fn export_csv(projects: &[Project], tasks: &[Task], path: &Path) -> Result<usize, StoreError> {
    let file = std::fs::File::create(path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let count = write_csv(projects, tasks, file)?;
    tracing::info!(path = %path.display(), rows = count, "exported CSV");
    Ok(count)
}

/// Write the CSV to any writer. Returns the number of data rows.
pub fn write_csv<W: std::io::Write>(
    projects: &[Project],
    tasks: &[Task],
    writer: W,
) -> Result<usize, StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["Project", "Task", "Start Date", "End Date", "Gap Days", "Status"])?;

    let mut count = 0;
    for project in projects {
        wtr.write_record([
            project.name.as_str(),
            "",
            &project.start.format("%Y-%m-%d").to_string(),
            &project.end.format("%Y-%m-%d").to_string(),
            "",
            status(project.archived),
        ])?;
        count += 1;

        for task in tasks.iter().filter(|t| t.project_id == project.id) {
            wtr.write_record([
                project.name.as_str(),
                task.name.as_str(),
                &task.start.format("%Y-%m-%d").to_string(),
                &task.end.format("%Y-%m-%d").to_string(),
                &task.gap_days.to_string(),
                status(task.archived),
            ])?;
            count += 1;
        }
    }

    wtr.flush()?;
    Ok(count)
}

fn status(archived: bool) -> &'static str {
    if archived {
        "Archived"
    } else {
        "Active"
    }
}

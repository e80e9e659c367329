//! Plain-text project report.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{Project, Task};

fn long_date(d: NaiveDate) -> String {
    d.format("%B %-d, %Y").to_string()
}

fn short_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Render a project and all of its tasks (archived ones included) as a text report.
pub fn export_project_text(project: &Project, tasks: &[&Task], exported_at: NaiveDateTime) -> String {
    let rule = "=".repeat(50);
    let mut out = String::new();

    out.push_str("PROJECT EXPORT\n");
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!("Project Title: {}\n", project.name));
    out.push_str(&format!(
        "Status: {}\n\n",
        if project.archived { "Archived" } else { "Active" }
    ));
    out.push_str("Timeline:\n");
    out.push_str(&format!("  Start Date: {}\n", long_date(project.start)));
    out.push_str(&format!("  End Date: {}\n\n", long_date(project.end)));

    if !project.notes.trim().is_empty() {
        out.push_str("Notes:\n");
        out.push_str(&format!("{}\n\n", project.notes));
    }

    out.push_str(&format!("Tasks ({}):\n", tasks.len()));
    out.push_str(&format!("{}\n", "-".repeat(50)));
    if tasks.is_empty() {
        out.push_str("  No tasks\n");
    }
    for (index, task) in tasks.iter().enumerate() {
        let days = task.duration_days();
        out.push_str(&format!("\n{}. {}\n", index + 1, task.name));
        out.push_str(&format!("   Start: {}\n", short_date(task.start)));
        out.push_str(&format!("   End: {}\n", short_date(task.end)));
        out.push_str(&format!("   Duration: {} day{}\n", days, plural(days)));
        if task.gap_days > 0 {
            out.push_str(&format!(
                "   Gap Before Task: {} day{}\n",
                task.gap_days,
                plural(task.gap_days as i64)
            ));
        }
        if task.archived {
            out.push_str("   Status: Archived\n");
        }
    }

    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!(
        "Exported on: {}\n",
        exported_at.format("%B %-d, %Y, %I:%M %p")
    ));
    out
}

/// File name for a project's export: non-alphanumerics become `_`.
pub fn export_file_name(project: &Project) -> String {
    let stem: String = project
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_export.txt", stem)
}

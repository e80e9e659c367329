//! Project timeline planning: projects, tasks and holidays on a Gantt chart.

pub mod config;
pub mod gantt;
pub mod io;
pub mod model;

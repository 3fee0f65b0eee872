//! Attendance records and the column layout the roster shows them with.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rowscope::{Align, Column, Record};
use serde::Deserialize;

/// One employee's attendance for the day.
#[derive(Debug, Clone, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[field(String)]
    pub id: String,
    #[field(String, rename = "employeeId")]
    pub employee_id: String,
    #[field(String)]
    pub name: String,
    #[field(String)]
    pub email: String,
    #[field(String)]
    pub role: String,
    #[field(String)]
    pub department: String,
    #[field(String, rename = "loginTime")]
    #[serde(default)]
    pub login_time: Option<String>,
    #[field(String, rename = "logoutTime")]
    #[serde(default)]
    pub logout_time: Option<String>,
    #[field(Number, rename = "totalHours")]
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[field(String, rename = "workMode")]
    pub work_mode: String,
    #[field(String)]
    pub status: String,
    #[field(String)]
    #[serde(default)]
    pub notes: Option<String>,
}

/// Loads records from a JSON array file.
pub fn load(path: &Path) -> Result<Vec<AttendanceRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<AttendanceRecord> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Columns of the attendance table.
pub fn columns() -> Vec<Column<AttendanceRecord>> {
    vec![
        Column::field("employeeId", "Employee ID", AttendanceRecord::EMPLOYEE_ID).sortable(),
        Column::field("name", "Employee", AttendanceRecord::NAME).sortable(),
        Column::field("department", "Department", AttendanceRecord::DEPARTMENT).sortable(),
        Column::field("role", "Role", AttendanceRecord::ROLE).hide_on_medium(),
        Column::field("loginTime", "Login", AttendanceRecord::LOGIN_TIME).hide_on_narrow(),
        Column::field("logoutTime", "Logout", AttendanceRecord::LOGOUT_TIME).hide_on_narrow(),
        Column::field("totalHours", "Total Hours", AttendanceRecord::TOTAL_HOURS)
            .sortable()
            .align(Align::Right)
            .compare_with(rowscope::compare_typed),
        Column::field("workMode", "Mode", AttendanceRecord::WORK_MODE).hide_on_narrow(),
        Column::field("status", "Status", AttendanceRecord::STATUS).sortable(),
        Column::field("notes", "Notes", AttendanceRecord::NOTES).hide_on_medium(),
    ]
}

/// Text the card list searches.
pub fn card_search_text(r: &AttendanceRecord) -> String {
    format!("{} {} {} {}", r.name, r.email, r.department, r.role)
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    role: &str,
    department: &str,
    times: Option<(&str, &str)>,
    hours: f64,
    mode: &str,
    status: &str,
    notes: Option<&str>,
) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        employee_id: format!("EMP-{:03}", id.parse::<u32>().unwrap_or(0)),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        role: role.to_string(),
        department: department.to_string(),
        login_time: times.map(|(login, _)| login.to_string()),
        logout_time: times.map(|(_, logout)| logout.to_string()),
        total_hours: Some(hours),
        work_mode: mode.to_string(),
        status: status.to_string(),
        notes: notes.map(str::to_string),
    }
}

/// The built-in sample sheet used when no data file is given.
pub fn seeded() -> Vec<AttendanceRecord> {
    vec![
        entry(
            "1",
            "Harini Rao",
            "Engineering Manager",
            "Management",
            Some(("09:02", "17:56")),
            8.9,
            "WFO",
            "Present",
            Some("Joined daily sync."),
        ),
        entry(
            "2",
            "Aarav Mehta",
            "HR Executive",
            "Human Resources",
            Some(("09:41", "18:11")),
            8.5,
            "WFO",
            "Late",
            Some("Traffic delay."),
        ),
        entry(
            "3",
            "Sneha Kapoor",
            "Software Engineer",
            "Engineering",
            Some(("08:55", "17:19")),
            8.4,
            "WFH",
            "Present",
            None,
        ),
        entry(
            "4",
            "Vikram Singh",
            "Product Analyst",
            "Product",
            None,
            0.0,
            "WFO",
            "On Leave",
            Some("Planned leave."),
        ),
        entry(
            "5",
            "Nisha Gupta",
            "Recruiter",
            "Human Resources",
            None,
            0.0,
            "WFH",
            "Absent",
            None,
        ),
    ]
}

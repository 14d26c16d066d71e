//! CSV export of the application pipeline.

use std::collections::BTreeMap;

use crate::applications::domain::Application;
use crate::catalog::{Department, DepartmentId};
use crate::postings::domain::{Posting, PostingId};
use crate::users::domain::{User, UserId};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer finalization failed: {0}")]
    Buffer(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),
}

const HEADERS: [&str; 10] = [
    "Application ID",
    "Student Name",
    "Student Email",
    "Department",
    "Grad Year",
    "GPA",
    "Posting Title",
    "Company",
    "Status",
    "Applied Date",
];

/// Render one CSV row per application, joined against its student and
/// posting. Rows whose student, student profile, or posting cannot be
/// resolved are skipped rather than emitted half-filled.
pub fn export_applications(
    applications: &[Application],
    users: &[User],
    postings: &[Posting],
    departments: &[Department],
) -> Result<Vec<u8>, ExportError> {
    let users_by_id: BTreeMap<&UserId, &User> =
        users.iter().map(|user| (&user.id, user)).collect();
    let postings_by_id: BTreeMap<&PostingId, &Posting> =
        postings.iter().map(|posting| (&posting.id, posting)).collect();
    let departments_by_id: BTreeMap<&DepartmentId, &Department> = departments
        .iter()
        .map(|department| (&department.id, department))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for application in applications {
        let Some(student) = users_by_id.get(&application.student_id) else {
            continue;
        };
        let Some(profile) = student.student_profile.as_ref() else {
            continue;
        };
        let Some(posting) = postings_by_id.get(&application.posting_id) else {
            continue;
        };

        let department = profile
            .department_id
            .as_ref()
            .and_then(|id| departments_by_id.get(id))
            .map(|department| department.name.as_str())
            .unwrap_or("N/A");
        let applied = application
            .applied_at()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        writer.write_record([
            application.id.0.as_str(),
            student.name.as_str(),
            student.email.as_str(),
            department,
            &profile.grad_year.to_string(),
            &profile.gpa.to_string(),
            posting.title.as_str(),
            posting.company.as_str(),
            application.stage.label(),
            &applied,
        ])?;
    }

    Ok(writer.into_inner()?)
}

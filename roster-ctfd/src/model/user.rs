use anyhow::bail;
use serde_json::Value;

use crate::model::wire::UserDetail;

pub type UserId = u64;

/// Column headers of the staging sheet, in row order.
pub const SHEET_COLUMNS: [&str; 9] = [
    "Name",
    "Email",
    "Phone Number",
    "School",
    "Dietary Requirements",
    "Course and Year",
    "Discord",
    "Date of Birth",
    "Student ID",
];

/// Profile slots filled from CTFd custom registration fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Phone,
    School,
    Dietary,
    Course,
    Discord,
    DateOfBirth,
    StudentId,
}

impl ProfileField {
    /// Map a CTFd field name to its slot. Matching is exact.
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "Phone Number" => Some(Self::Phone),
            "School/Educational Institute" => Some(Self::School),
            "Dietary Requirements" => Some(Self::Dietary),
            "Current Course and Year" => Some(Self::Course),
            "Discord username" => Some(Self::Discord),
            "What is your date of birth? (DD/MM/YYYY)" => Some(Self::DateOfBirth),
            "Student ID" => Some(Self::StudentId),
            _ => None,
        }
    }
}

/// One sheet row worth of user data. Absent values are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub school: String,
    pub dietary: String,
    pub course: String,
    pub discord: String,
    pub dob: String,
    pub student_id: String,
}

impl UserRecord {
    fn slot_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Phone => &mut self.phone,
            ProfileField::School => &mut self.school,
            ProfileField::Dietary => &mut self.dietary,
            ProfileField::Course => &mut self.course,
            ProfileField::Discord => &mut self.discord,
            ProfileField::DateOfBirth => &mut self.dob,
            ProfileField::StudentId => &mut self.student_id,
        }
    }

    /// Values in [`SHEET_COLUMNS`] order.
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.name,
            self.email,
            self.phone,
            self.school,
            self.dietary,
            self.course,
            self.discord,
            self.dob,
            self.student_id,
        ]
    }
}

/// Unknown fields are skipped whatever their value; a known field must hold a
/// string or `null`.
impl TryFrom<UserDetail> for UserRecord {
    type Error = anyhow::Error;

    fn try_from(detail: UserDetail) -> anyhow::Result<Self> {
        let mut record = UserRecord {
            name: detail.name.unwrap_or_default(),
            email: detail.email.unwrap_or_default(),
            ..Default::default()
        };

        for field in detail.fields {
            let Some(slot) = ProfileField::from_field_name(&field.name) else {
                continue;
            };

            *record.slot_mut(slot) = match field.value {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(value)) => value,
                Some(other) => bail!(
                    "field `{}` has a non-string value: {}",
                    field.name,
                    other
                ),
            };
        }

        Ok(record)
    }
}

use std::collections::BTreeMap;

use async_graphql::Enum;

/// A semantic column of the job postings table, backed by whichever
/// physical column matches first.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) enum LogicalField {
    JobTitle,
    Location,
    Experience,
    Skills,
    Company,
    RemoteRatio,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum FieldKind {
    /// Free or categorical text, compared as strings.
    Text,
    /// Integer codes such as a remote ratio of 0, 50 or 100.
    NumericCode,
}

impl LogicalField {
    pub(crate) const ALL: [LogicalField; 6] = [
        LogicalField::JobTitle,
        LogicalField::Location,
        LogicalField::Experience,
        LogicalField::Skills,
        LogicalField::Company,
        LogicalField::RemoteRatio,
    ];

    pub(crate) fn kind(self) -> FieldKind {
        match self {
            LogicalField::RemoteRatio => FieldKind::NumericCode,
            _ => FieldKind::Text,
        }
    }

    /// Acceptable header names, highest priority first.
    pub(crate) fn candidates(self) -> &'static [&'static str] {
        match self {
            LogicalField::JobTitle => &["job_title", "title", "jobTitle", "Job Title"],
            LogicalField::Location => &[
                "country",
                "company_location",
                "location",
                "company_location_name",
            ],
            LogicalField::Experience => &[
                "experience_level",
                "experience",
                "years_experience",
                "exp_level",
            ],
            LogicalField::Skills => &["required_skills", "skills", "requirements", "skillset"],
            LogicalField::Company => &["company_name", "company", "employer"],
            LogicalField::RemoteRatio => &[
                "remote_ratio",
                "remote",
                "remote_status",
                "work_setting",
                "onsite_remote_hybrid",
            ],
        }
    }
}

/// Returns the first candidate that names one of `columns`. Matching is
/// exact and case-sensitive.
pub(crate) fn first_existing_column<'a, S>(columns: &[S], candidates: &[&'a str]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    candidates
        .iter()
        .find(|candidate| columns.iter().any(|c| c.as_ref() == **candidate))
        .copied()
}

/// The physical column bound to each logical field. Fields without an
/// entry are inert.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ColumnBindings(BTreeMap<LogicalField, String>);

impl ColumnBindings {
    /// Resolves every logical field against the built-in candidate lists.
    pub(crate) fn resolve<S: AsRef<str>>(columns: &[S]) -> Self {
        Self::resolve_with(
            columns,
            LogicalField::ALL
                .iter()
                .map(|&field| (field, field.candidates())),
        )
    }

    /// Resolves each field independently; two fields may end up bound to
    /// the same column.
    pub(crate) fn resolve_with<'c, S, I>(columns: &[S], candidates: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (LogicalField, &'c [&'c str])>,
    {
        Self(
            candidates
                .into_iter()
                .filter_map(|(field, names)| {
                    first_existing_column(columns, names).map(|name| (field, name.to_string()))
                })
                .collect(),
        )
    }

    pub(crate) fn get(&self, field: LogicalField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (LogicalField, &str)> {
        self.0.iter().map(|(field, name)| (*field, name.as_str()))
    }
}

//! Table layout of the feedback store.
//!
//! Queries in [`crate::repositories`] are assembled from these names, so a
//! column rename happens here and in a migration, nowhere else.

/// Table holding one row per feedback record
pub const FEEDBACK_TABLE: &str = "feedback";

/// Column names of [`FEEDBACK_TABLE`].
pub mod columns {
    pub const ID: &str = "id";
    pub const SENDER_NAME: &str = "sender_name";
    pub const EMAIL: &str = "email";
    pub const STATUS: &str = "status";
    pub const SUBJECT: &str = "subject";
    pub const CONTENT: &str = "content";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
}

/// Every column, in the order used by `SELECT` and `INSERT`.
pub const FEEDBACK_COLUMNS: [&str; 8] = [
    columns::ID,
    columns::SENDER_NAME,
    columns::EMAIL,
    columns::STATUS,
    columns::SUBJECT,
    columns::CONTENT,
    columns::CREATED_AT,
    columns::UPDATED_AT,
];

/// Comma separated column list for `SELECT` and `RETURNING`.
pub fn select_list() -> String {
    FEEDBACK_COLUMNS.join(", ")
}

/// `$1, $2, ...` placeholders matching [`FEEDBACK_COLUMNS`].
pub fn insert_placeholders() -> String {
    (1..=FEEDBACK_COLUMNS.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_list() {
        assert_eq!(
            select_list(),
            "id, sender_name, email, status, subject, content, created_at, updated_at"
        );
    }

    #[test]
    fn test_placeholders_match_columns() {
        assert_eq!(insert_placeholders(), "$1, $2, $3, $4, $5, $6, $7, $8");
    }
}

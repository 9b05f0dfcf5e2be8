use serde::{Deserialize, Serialize};

/// Caller-supplied donator identity. Authentication lives in the external
/// auth collaborator; this core only needs a stable id plus display fields
/// to snapshot into tracking and ledger rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donator {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Donator {
    /// Full name, falling back to the mailbox part of the email address
    /// when both name fields are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();

        if name.is_empty() {
            self.email.split('@').next().unwrap_or_default().to_string()
        } else {
            name
        }
    }
}

use crate::schema::clients;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

/// A client of the day-care facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = clients)]
pub struct Client {
    /// Unique identifier
    pub id: String,
    /// Display name used in reports
    pub name: String,
    /// Timestamp when the record was created
    pub created_at: String,
}

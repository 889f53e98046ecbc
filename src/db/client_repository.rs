use crate::db::models::Client;
use crate::errors::Error;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Repository for client records in the SQLite database
pub struct ClientRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> ClientRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        ClientRepository { conn }
    }

    /// Lists all clients ordered by name
    pub fn list_clients(&mut self) -> Result<Vec<Client>, Error> {
        use crate::schema::clients::dsl::*;

        let result = clients
            .order(name.asc())
            .select(Client::as_select())
            .load(self.conn)?;
        Ok(result)
    }

    /// Finds a client by exact display name
    pub fn find_by_name(&mut self, client_name: &str) -> Result<Option<Client>, Error> {
        use crate::schema::clients::dsl::*;

        let result = clients
            .filter(name.eq(client_name.trim()))
            .select(Client::as_select())
            .first(self.conn)
            .optional()?;
        Ok(result)
    }

    /// Inserts a client, or returns the existing record with the same name
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidClientName` for a blank name, or a database error
    pub fn add_client(&mut self, client_name: &str) -> Result<Client, Error> {
        use crate::schema::clients;

        let trimmed = client_name.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidClientName(client_name.to_string()));
        }

        if let Some(existing) = self.find_by_name(trimmed)? {
            return Ok(existing);
        }

        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: trimmed.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        diesel::insert_into(clients::table)
            .values(&client)
            .execute(self.conn)?;
        Ok(client)
    }
}

//! MongoDB client construction.

use mongodb::bson::doc;
use mongodb::{Client, Database};

/// Connect to MongoDB and return a handle to the named database.
///
/// Issues a `ping` so a bad URI fails at startup rather than on the first
/// request.
pub async fn connect(uri: &str, database_name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    let database = client.database(database_name);
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(database)
}

use crate::common::sqlite::SqliteConnection;
use crate::common::error::ServiceError;
use async_trait::async_trait;
use crate::debug;

const LOG_TAG: &str = "dao";

/// table lifecycle shared by every dao
#[async_trait]
pub trait Dao {
    fn connection(&self) -> &SqliteConnection;

    fn table_name(&self) -> &'static str;

    /// column definitions, without the surrounding CREATE TABLE
    fn columns(&self) -> &'static str;

    /// check whether the table exists
    async fn check_table(&self) -> Result<bool, ServiceError> {
        let table_name = self.table_name();
        let count = self.connection().call(move |conn| {
            conn.query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get::<usize, i64>(0),
            )
        }).await?;
        Ok(count > 0)
    }

    /// create the table
    async fn create_table(&self) -> Result<(), ServiceError> {
        let sql = format!("CREATE TABLE {} ({})", self.table_name(), self.columns());
        self.connection().call(move |conn| conn.execute(sql.as_str(), ())).await?;
        Ok(())
    }

    /// drop the table
    #[cfg(test)]
    async fn drop_table(&self) -> Result<(), ServiceError> {
        let sql = format!("DROP TABLE IF EXISTS {}", self.table_name());
        self.connection().call(move |conn| conn.execute(sql.as_str(), ())).await?;
        Ok(())
    }

    async fn ensure_table_exist(&self) -> Result<(), ServiceError> {
        if self.check_table().await? {
            debug!(LOG_TAG, "table {} exist", self.table_name());
        } else {
            self.create_table().await?;
            debug!(LOG_TAG, "table {} created", self.table_name());
        }
        Ok(())
    }
}

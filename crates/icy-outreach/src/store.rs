use std::sync::Arc;

use anyhow::anyhow;
use icy_db::Database;

use crate::error::Result;

/// Run a database closure off the async runtime.
pub async fn blocking<F, T>(db: &Arc<Database>, f: F) -> Result<T>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = db.clone();
    let out = tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|e| anyhow!("spawn_blocking join error: {}", e))??;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutreachError;

    #[tokio::test]
    async fn test_closure_errors_become_store_errors() {
        let db = Arc::new(Database::open_in_memory().unwrap());

        let users = blocking(&db, |db| Ok(db.get_user_by_username("nobody")?.is_none())).await;
        assert!(users.unwrap());

        let failed: Result<()> = blocking(&db, |_| Err(anyhow!("constraint failed"))).await;
        assert!(matches!(failed, Err(OutreachError::Store(_))));
    }
}

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait};

use journal_core::error::RepoError;
use journal_core::ports::BaseRepository;

/// Generic SeaORM repository implementation.
pub struct SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Map a failed query, keeping constraint violations distinguishable.
pub(crate) fn query_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err_str),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        _ if err_str.contains("duplicate")
            || err_str.contains("unique")
            || err_str.contains("UNIQUE")
            || err_str.contains("foreign key")
            || err_str.contains("FOREIGN KEY") =>
        {
            RepoError::Constraint(err_str)
        }
        _ => RepoError::Query(err_str),
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for SeaOrmBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

// src/common/db_utils.rs

use sqlx::{PgPool, Postgres, Transaction};

use crate::common::error::AppError;

// ---
// Helper de Transação: abre a transação com política de reconexão
// ---
/// Abre uma transação na pool compartilhada.
///
/// Se a aquisição da conexão falhar por I/O ou timeout (banco reiniciado, conexão
/// derrubada), a pool descarta a conexão quebrada e tentamos mais uma vez.
/// Os comandos SQL em si nunca são repetidos.
pub async fn begin_transaction(pool: &PgPool) -> Result<Transaction<'static, Postgres>, AppError> {
    match pool.begin().await {
        Ok(tx) => Ok(tx),
        Err(e) if is_connection_failure(&e) => {
            tracing::warn!("Falha ao obter conexão ({}), reconectando...", e);
            Ok(pool.begin().await?)
        }
        Err(e) => Err(e.into()),
    }
}

fn is_connection_failure(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_))
}

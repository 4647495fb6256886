use sqlx::PgPool;

use crate::database::JobRepository;

/// Shared handler state. Cloned per request; the pool inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub jobs: JobRepository,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            jobs: JobRepository::new(pool),
        }
    }
}

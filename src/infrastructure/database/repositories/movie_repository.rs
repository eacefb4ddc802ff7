//! SeaORM implementation of MovieRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::{Decimal, FromPrimitive, ToPrimitive};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::domain::movie::{ListQuery, Movie, MovieFilter, MovieRepository, ValidMovie};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::movie;
use crate::shared::PaginatedResult;

/// Escape character used in every LIKE pattern built here.
const LIKE_ESCAPE: char = '!';

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn model_to_domain(m: movie::Model) -> Movie {
    Movie {
        id: m.id,
        title: m.title,
        director: m.director,
        year: m.year,
        genre: m.genre,
        rating: m.rating.and_then(Decimal::from_f64).map(|r| r.round_dp(1)),
        synopsis: m.synopsis,
        poster_url: m.poster_url,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn rating_to_column(rating: Option<Decimal>) -> Option<f64> {
    rating.and_then(|r| r.to_f64())
}

fn new_active_model(m: &ValidMovie, now: DateTime<Utc>) -> movie::ActiveModel {
    movie::ActiveModel {
        id: NotSet,
        title: Set(m.title().to_string()),
        director: Set(m.director().to_string()),
        year: Set(m.year()),
        genre: Set(m.genre().to_string()),
        rating: Set(rating_to_column(m.rating())),
        synopsis: Set(m.synopsis().map(str::to_string)),
        poster_url: Set(m.poster_url().map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ── Predicate fragments ─────────────────────────────────────────

/// Make `%`, `_` and the escape character itself match literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

fn lower(column: movie::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

/// Fold a needle exactly like SQLite's `LOWER()`, which only maps ASCII
/// letters. Both sides of every comparison must fold the same way.
fn fold(needle: &str) -> String {
    needle.to_ascii_lowercase()
}

fn contains_ci(column: movie::Column, needle: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&fold(needle)));
    Condition::all().add(lower(column).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)))
}

fn predicate(filter: &MovieFilter) -> Condition {
    match filter {
        MovieFilter::Genre(genre) => {
            Condition::all().add(lower(movie::Column::Genre).eq(fold(genre)))
        }
        MovieFilter::Year(year) => Condition::all().add(movie::Column::Year.eq(*year)),
        MovieFilter::Search(q) => Condition::any()
            .add(contains_ci(movie::Column::Title, q))
            .add(contains_ci(movie::Column::Director, q)),
    }
}

/// AND of all fragments. No fragments means no restriction.
fn condition(filters: &[MovieFilter]) -> Condition {
    filters
        .iter()
        .fold(Condition::all(), |acc, f| acc.add(predicate(f)))
}

// ── SeaOrmMovieRepository ───────────────────────────────────────

#[derive(Clone)]
pub struct SeaOrmMovieRepository {
    db: DatabaseConnection,
}

impl SeaOrmMovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepository for SeaOrmMovieRepository {
    async fn list(&self, query: &ListQuery) -> DomainResult<PaginatedResult<Movie>> {
        let select = movie::Entity::find().filter(condition(&query.filters));

        let total = select.clone().count(&self.db).await.map_err(db_err)?;
        let offset = query.page.offset();

        // Past the last row there is nothing to fetch.
        let models = if offset >= total {
            Vec::new()
        } else {
            select
                .order_by_desc(movie::Column::CreatedAt)
                .order_by_desc(movie::Column::Id)
                .offset(offset)
                .limit(query.page.per_page)
                .all(&self.db)
                .await
                .map_err(db_err)?
        };

        debug!(
            "Listed {} of {} movies (page {}, per_page {}, {} filter(s))",
            models.len(),
            total,
            query.page.page,
            query.page.per_page,
            query.filters.len()
        );

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            query.page,
        ))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Movie>> {
        let model = movie::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn count(&self) -> DomainResult<u64> {
        movie::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn create(&self, m: ValidMovie) -> DomainResult<Movie> {
        let result = new_active_model(&m, Utc::now())
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        debug!("Movie row inserted: {}", result.id);
        Ok(model_to_domain(result))
    }

    async fn update(&self, id: i32, m: ValidMovie) -> DomainResult<Movie> {
        let existing = movie::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::movie_not_found(id.to_string()))?;

        let mut active = existing.into_active_model();
        active.title = Set(m.title().to_string());
        active.director = Set(m.director().to_string());
        active.year = Set(m.year());
        active.genre = Set(m.genre().to_string());
        active.rating = Set(rating_to_column(m.rating()));
        active.synopsis = Set(m.synopsis().map(str::to_string));
        active.poster_url = Set(m.poster_url().map(str::to_string));
        active.updated_at = Set(Utc::now());

        let result = active.update(&self.db).await.map_err(db_err)?;
        debug!("Movie row updated: {}", result.id);
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = movie::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::movie_not_found(id.to_string()));
        }
        info!("Movie deleted: {}", id);
        Ok(())
    }

    async fn replace_all(&self, movies: Vec<ValidMovie>) -> DomainResult<u64> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let removed = movie::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;

        let now = Utc::now();
        for m in &movies {
            new_active_model(m, now)
                .insert(&txn)
                .await
                .map_err(db_err)?;
        }

        // Dropping `txn` on an early return rolls everything back.
        txn.commit().await.map_err(db_err)?;
        debug!(
            "Replaced {} movie row(s) with {}",
            removed,
            movies.len()
        );
        Ok(movies.len() as u64)
    }
}

// ── Tests ──────────────────────────────────────────────────────

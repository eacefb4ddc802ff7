//! Movie record, the candidate state used for writes, and its validation rules.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::shared::FieldErrors;

/// Earliest release year accepted anywhere in the catalog.
pub const MIN_YEAR: i32 = 1930;
/// How many years past the current one a release may be scheduled.
pub const MAX_YEARS_AHEAD: i32 = 5;

const BLANK: &str = "can't be blank";

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn max_year(current_year: i32) -> i32 {
    current_year + MAX_YEARS_AHEAD
}

/// A persisted movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub genre: String,
    /// 0.0–10.0, one decimal place
    pub rating: Option<Decimal>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The full candidate state of a record before it is written.
///
/// Create starts from `MovieDraft::default()`, update from the stored record;
/// a [`MoviePatch`] is applied on top and the whole draft is validated.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MovieDraft {
    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub title: String,
    #[validate(length(max = 255, message = "is too long (maximum is 255 characters)"))]
    pub director: String,
    pub year: Option<i32>,
    pub genre: String,
    pub rating: Option<Decimal>,
    pub synopsis: Option<String>,
    pub poster_url: Option<String>,
}

impl From<Movie> for MovieDraft {
    fn from(m: Movie) -> Self {
        Self {
            title: m.title,
            director: m.director,
            year: Some(m.year),
            genre: m.genre,
            rating: m.rating,
            synopsis: m.synopsis,
            poster_url: m.poster_url,
        }
    }
}

impl MovieDraft {
    /// Run every rule against the draft. `current_year` bounds `year`.
    pub fn check(&self, current_year: i32) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => e,
        };

        if is_blank(&self.title) {
            errors.add("title", rule("blank", BLANK));
        }
        if is_blank(&self.director) {
            errors.add("director", rule("blank", BLANK));
        }
        if is_blank(&self.genre) {
            errors.add("genre", rule("blank", BLANK));
        }

        match self.year {
            None => errors.add("year", rule("blank", BLANK)),
            Some(year) if year < MIN_YEAR => errors.add(
                "year",
                rule("range", format!("must be greater than or equal to {}", MIN_YEAR)),
            ),
            Some(year) if year > max_year(current_year) => errors.add(
                "year",
                rule(
                    "range",
                    format!("must be less than or equal to {}", max_year(current_year)),
                ),
            ),
            Some(_) => {}
        }

        if let Some(rating) = self.rating {
            if rating < Decimal::ZERO {
                errors.add("rating", rule("range", "must be greater than or equal to 0"));
            } else if rating > Decimal::TEN {
                errors.add("rating", rule("range", "must be less than or equal to 10"));
            }
        }

        if let Some(url) = self.poster_url.as_deref() {
            if !is_blank(url) && !is_web_url(url) {
                errors.add("poster_url", rule("url", "must be a valid URL"));
            }
        }

        let errors = FieldErrors::from(errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and normalize the draft into something the store accepts.
    ///
    /// A blank `poster_url` becomes `None`; `rating` is rounded half away
    /// from zero to one decimal place.
    pub fn validated(self, current_year: i32) -> Result<ValidMovie, FieldErrors> {
        self.check(current_year)?;

        let MovieDraft {
            title,
            director,
            year,
            genre,
            rating,
            synopsis,
            poster_url,
        } = self;

        Ok(ValidMovie {
            title,
            director,
            year: year.unwrap_or_default(),
            genre,
            rating: rating
                .map(|r| r.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)),
            synopsis,
            poster_url: poster_url.filter(|u| !is_blank(u)),
        })
    }
}

/// A draft that passed [`MovieDraft::validated`]. Repositories only accept
/// this type, so nothing unvalidated reaches storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMovie {
    title: String,
    director: String,
    year: i32,
    genre: String,
    rating: Option<Decimal>,
    synopsis: Option<String>,
    poster_url: Option<String>,
}

impl ValidMovie {
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn director(&self) -> &str {
        &self.director
    }
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn genre(&self) -> &str {
        &self.genre
    }
    pub fn rating(&self) -> Option<Decimal> {
        self.rating
    }
    pub fn synopsis(&self) -> Option<&str> {
        self.synopsis.as_deref()
    }
    pub fn poster_url(&self) -> Option<&str> {
        self.poster_url.as_deref()
    }
}

/// Allow-listed changes coming from a client.
///
/// Outer `None`: key absent, keep the current value.
/// `Some(None)`: explicit `null`, clear the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<Option<String>>,
    pub director: Option<Option<String>>,
    pub year: Option<Option<i32>>,
    pub genre: Option<Option<String>>,
    pub rating: Option<Option<Decimal>>,
    pub synopsis: Option<Option<String>>,
    pub poster_url: Option<Option<String>>,
}

impl MoviePatch {
    pub fn apply_to(self, mut draft: MovieDraft) -> MovieDraft {
        if let Some(title) = self.title {
            draft.title = title.unwrap_or_default();
        }
        if let Some(director) = self.director {
            draft.director = director.unwrap_or_default();
        }
        if let Some(year) = self.year {
            draft.year = year;
        }
        if let Some(genre) = self.genre {
            draft.genre = genre.unwrap_or_default();
        }
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(synopsis) = self.synopsis {
            draft.synopsis = synopsis;
        }
        if let Some(poster_url) = self.poster_url {
            draft.poster_url = poster_url;
        }
        draft
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn is_web_url(raw: &str) -> bool {
    match url::Url::parse(raw.trim()) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host().is_some(),
        Err(_) => false,
    }
}

fn rule(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

// ── Tests ──────────────────────────────────────────────────────

//! Bundled starter catalog

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::movie::{MovieDraft, MovieRepository};
use crate::domain::{DomainError, DomainResult};

struct SeedMovie {
    title: &'static str,
    director: &'static str,
    year: i32,
    genre: &'static str,
    /// Rating times ten, so 9.3 is `93`.
    rating_tenths: i64,
    synopsis: &'static str,
    poster_url: &'static str,
}

impl SeedMovie {
    fn draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.to_string(),
            director: self.director.to_string(),
            year: Some(self.year),
            genre: self.genre.to_string(),
            rating: Some(Decimal::new(self.rating_tenths, 1)),
            synopsis: Some(self.synopsis.to_string()),
            poster_url: Some(self.poster_url.to_string()),
        }
    }
}

const CATALOG: &[SeedMovie] = &[
    SeedMovie {
        title: "The Shawshank Redemption",
        director: "Frank Darabont",
        year: 1994,
        genre: "Drama",
        rating_tenths: 93,
        synopsis: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        poster_url: "https://image.tmdb.org/t/p/w500/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
    },
    SeedMovie {
        title: "The Godfather",
        director: "Francis Ford Coppola",
        year: 1972,
        genre: "Crime",
        rating_tenths: 92,
        synopsis: "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
        poster_url: "https://image.tmdb.org/t/p/w500/3bhkrj58Vtu7enYsRolD1fZdja1.jpg",
    },
    SeedMovie {
        title: "The Dark Knight",
        director: "Christopher Nolan",
        year: 2008,
        genre: "Action",
        rating_tenths: 90,
        synopsis: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests.",
        poster_url: "https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
    },
    SeedMovie {
        title: "Pulp Fiction",
        director: "Quentin Tarantino",
        year: 1994,
        genre: "Crime",
        rating_tenths: 89,
        synopsis: "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
        poster_url: "https://image.tmdb.org/t/p/w500/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
    },
    SeedMovie {
        title: "Forrest Gump",
        director: "Robert Zemeckis",
        year: 1994,
        genre: "Drama",
        rating_tenths: 88,
        synopsis: "The presidencies of Kennedy and Johnson, the Vietnam War, and other historical events unfold from the perspective of an Alabama man.",
        poster_url: "https://image.tmdb.org/t/p/w500/arw2vcBveWOVZr6pxd9XTd1TdQa.jpg",
    },
    SeedMovie {
        title: "Inception",
        director: "Christopher Nolan",
        year: 2010,
        genre: "Sci-Fi",
        rating_tenths: 88,
        synopsis: "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea.",
        poster_url: "https://image.tmdb.org/t/p/w500/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg",
    },
    SeedMovie {
        title: "The Matrix",
        director: "Lana Wachowski, Lilly Wachowski",
        year: 1999,
        genre: "Sci-Fi",
        rating_tenths: 87,
        synopsis: "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.",
        poster_url: "https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
    },
    SeedMovie {
        title: "Goodfellas",
        director: "Martin Scorsese",
        year: 1990,
        genre: "Crime",
        rating_tenths: 87,
        synopsis: "The story of Henry Hill and his life in the mob, covering his relationship with his wife and his partners in crime.",
        poster_url: "https://image.tmdb.org/t/p/w500/aKuFiU82s5ISJpGZp7YkIr3kCUd.jpg",
    },
    SeedMovie {
        title: "Interstellar",
        director: "Christopher Nolan",
        year: 2014,
        genre: "Sci-Fi",
        rating_tenths: 86,
        synopsis: "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
        poster_url: "https://image.tmdb.org/t/p/w500/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
    },
    SeedMovie {
        title: "Parasite",
        director: "Bong Joon Ho",
        year: 2019,
        genre: "Thriller",
        rating_tenths: 86,
        synopsis: "Greed and class discrimination threaten the newly formed symbiotic relationship between the wealthy Park family and the destitute Kim clan.",
        poster_url: "https://image.tmdb.org/t/p/w500/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg",
    },
    SeedMovie {
        title: "The Lion King",
        director: "Roger Allers, Rob Minkoff",
        year: 1994,
        genre: "Animation",
        rating_tenths: 85,
        synopsis: "Lion prince Simba flees his kingdom after the murder of his father, only to learn the true meaning of responsibility and bravery.",
        poster_url: "https://image.tmdb.org/t/p/w500/sKCr78MXSLixwmZ8DyJLrpMsd15.jpg",
    },
    SeedMovie {
        title: "Gladiator",
        director: "Ridley Scott",
        year: 2000,
        genre: "Action",
        rating_tenths: 85,
        synopsis: "A former Roman General sets out to exact vengeance against the corrupt emperor who murdered his family and sent him into slavery.",
        poster_url: "https://image.tmdb.org/t/p/w500/ty8TGRuvJLPUmAR1H1nRIsgwvim.jpg",
    },
    SeedMovie {
        title: "Spirited Away",
        director: "Hayao Miyazaki",
        year: 2001,
        genre: "Animation",
        rating_tenths: 86,
        synopsis: "During her family's move to the suburbs, a sullen 10-year-old girl wanders into a world ruled by gods, witches, and spirits.",
        poster_url: "https://image.tmdb.org/t/p/w500/39wmItIWsg5sZMyRUHLkWBcuVCM.jpg",
    },
    SeedMovie {
        title: "Whiplash",
        director: "Damien Chazelle",
        year: 2014,
        genre: "Drama",
        rating_tenths: 85,
        synopsis: "A promising young drummer enrolls at a cut-throat music conservatory where his dreams of greatness are mentored by an instructor who will stop at nothing.",
        poster_url: "https://image.tmdb.org/t/p/w500/7fn624j5lj3xTme2SgiLCeuedmO.jpg",
    },
    SeedMovie {
        title: "The Prestige",
        director: "Christopher Nolan",
        year: 2006,
        genre: "Mystery",
        rating_tenths: 85,
        synopsis: "After a tragic accident, two stage magicians engage in a battle to create the ultimate illusion while sacrificing everything they have to outwit each other.",
        poster_url: "https://image.tmdb.org/t/p/w500/bdN3gXuIZYaJP7ftKK2sU0nPtEA.jpg",
    },
];

/// Number of records [`seed_movies`] inserts.
pub fn catalog_len() -> usize {
    CATALOG.len()
}

/// Replace the movies table with the bundled catalog.
///
/// Every record goes through the same validation as API writes. The whole
/// catalog is validated before anything is written, and the replacement is
/// a single transaction, so a failed run leaves the previous rows in place.
pub async fn seed_movies<R>(repo: &R, current_year: i32) -> DomainResult<usize>
where
    R: MovieRepository + ?Sized,
{
    let movies = CATALOG
        .iter()
        .map(|entry| entry.draft().validated(current_year))
        .collect::<Result<Vec<_>, _>>()
        .map_err(DomainError::Validation)?;

    let previous = repo.count().await?;
    if previous > 0 {
        warn!("Seed replaces {} existing movie(s)", previous);
    }

    let inserted = repo.replace_all(movies).await?;
    info!("Seed complete: {} movies", inserted);
    Ok(inserted as usize)
}

// ── Tests ──────────────────────────────────────────────────────

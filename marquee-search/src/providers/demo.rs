//! Demo provider serving a built-in catalogue.
//!
//! Lets the full search workflow run offline: search, pagination, prefetch
//! and the detail endpoint all behave like the real API, only over a small
//! fixed data set.

use async_trait::async_trait;

use super::MovieApi;
use crate::errors::MovieSearchError;
use crate::types::{Genre, MovieDetail, MovieDiscovery, MovieSummary};

/// Results per demo page; small so pagination shows up with few matches.
pub const DEMO_PAGE_SIZE: usize = 4;

struct DemoMovie {
    id: u64,
    title: &'static str,
    release_date: &'static str,
    runtime: u32,
    tagline: &'static str,
    overview: &'static str,
    vote_average: f64,
    genres: &'static [(u32, &'static str)],
}

const ACTION: (u32, &str) = (28, "Action");
const ADVENTURE: (u32, &str) = (12, "Adventure");
const CRIME: (u32, &str) = (80, "Crime");
const DRAMA: (u32, &str) = (18, "Drama");
const SCIENCE_FICTION: (u32, &str) = (878, "Science Fiction");
const THRILLER: (u32, &str) = (53, "Thriller");

const CATALOGUE: &[DemoMovie] = &[
    DemoMovie {
        id: 603,
        title: "The Matrix",
        release_date: "1999-03-30",
        runtime: 136,
        tagline: "Welcome to the Real World.",
        overview: "A hacker learns the world he lives in is a simulation.",
        vote_average: 8.2,
        genres: &[ACTION, SCIENCE_FICTION],
    },
    DemoMovie {
        id: 604,
        title: "The Matrix Reloaded",
        release_date: "2003-05-15",
        runtime: 138,
        tagline: "Free your mind.",
        overview: "Neo and the rebels race to defend Zion.",
        vote_average: 7.0,
        genres: &[ACTION, SCIENCE_FICTION],
    },
    DemoMovie {
        id: 605,
        title: "The Matrix Revolutions",
        release_date: "2003-11-05",
        runtime: 129,
        tagline: "Everything that has a beginning has an end.",
        overview: "The war between humans and machines reaches its climax.",
        vote_average: 6.7,
        genres: &[ACTION, SCIENCE_FICTION],
    },
    DemoMovie {
        id: 624860,
        title: "The Matrix Resurrections",
        release_date: "2021-12-16",
        runtime: 148,
        tagline: "Return to the source.",
        overview: "Neo lives an ordinary life until Morpheus returns.",
        vote_average: 6.4,
        genres: &[ACTION, SCIENCE_FICTION],
    },
    DemoMovie {
        id: 55931,
        title: "The Animatrix",
        release_date: "2003-05-09",
        runtime: 102,
        tagline: "Nine stories from the world of the Matrix.",
        overview: "Animated shorts set in the world of the Matrix.",
        vote_average: 7.1,
        genres: &[SCIENCE_FICTION],
    },
    DemoMovie {
        id: 27205,
        title: "Inception",
        release_date: "2010-07-15",
        runtime: 148,
        tagline: "Your mind is the scene of the crime.",
        overview: "A thief steals secrets from deep within dreams.",
        vote_average: 8.4,
        genres: &[ACTION, SCIENCE_FICTION, ADVENTURE],
    },
    DemoMovie {
        id: 157336,
        title: "Interstellar",
        release_date: "2014-11-05",
        runtime: 169,
        tagline: "Mankind was born on Earth. It was never meant to die here.",
        overview: "Explorers travel through a wormhole in search of a new home.",
        vote_average: 8.4,
        genres: &[ADVENTURE, DRAMA, SCIENCE_FICTION],
    },
    DemoMovie {
        id: 949,
        title: "Heat",
        release_date: "1995-12-15",
        runtime: 170,
        tagline: "A Los Angeles crime saga.",
        overview: "A detective hunts a master thief across Los Angeles.",
        vote_average: 7.9,
        genres: &[ACTION, CRIME, DRAMA, THRILLER],
    },
    DemoMovie {
        id: 348,
        title: "Alien",
        release_date: "1979-05-25",
        runtime: 117,
        tagline: "In space no one can hear you scream.",
        overview: "A commercial crew meets a deadly lifeform.",
        vote_average: 8.2,
        genres: &[SCIENCE_FICTION, THRILLER],
    },
    DemoMovie {
        id: 679,
        title: "Aliens",
        release_date: "1986-07-18",
        runtime: 137,
        tagline: "This time it's war.",
        overview: "Ripley returns to the moon where her crew met the creature.",
        vote_average: 7.9,
        genres: &[ACTION, SCIENCE_FICTION, THRILLER],
    },
    DemoMovie {
        id: 78,
        title: "Blade Runner",
        release_date: "1982-06-25",
        runtime: 117,
        tagline: "Man has made his match... now it's his problem.",
        overview: "A blade runner hunts replicants in a future Los Angeles.",
        vote_average: 7.9,
        genres: &[SCIENCE_FICTION, DRAMA, THRILLER],
    },
    DemoMovie {
        id: 335984,
        title: "Blade Runner 2049",
        release_date: "2017-10-04",
        runtime: 164,
        tagline: "The key to the future is finally unearthed.",
        overview: "A young blade runner uncovers a long-buried secret.",
        vote_average: 7.6,
        genres: &[SCIENCE_FICTION, DRAMA],
    },
];

impl DemoMovie {
    fn summary(&self) -> MovieSummary {
        MovieSummary {
            original_title: Some(self.title.to_string()),
            overview: Some(self.overview.to_string()),
            release_date: Some(self.release_date.to_string()),
            vote_average: Some(self.vote_average),
            original_language: Some("en".to_string()),
            genre_ids: self.genres.iter().map(|(id, _)| *id).collect(),
            ..MovieSummary::new(self.id, self.title)
        }
    }

    fn detail(&self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            title: self.title.to_string(),
            overview: Some(self.overview.to_string()),
            tagline: Some(self.tagline.to_string()),
            runtime: Some(self.runtime),
            release_date: Some(self.release_date.to_string()),
            genres: self
                .genres
                .iter()
                .map(|(id, name)| Genre {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
            vote_average: Some(self.vote_average),
            poster_path: None,
            homepage: None,
            status: Some("Released".to_string()),
        }
    }
}

/// Offline provider over a fixed catalogue, for development mode.
#[derive(Debug, Default, Clone)]
pub struct DemoProvider;

impl DemoProvider {
    /// Provider over the built-in catalogue.
    pub fn new() -> Self {
        Self
    }

    fn matches(query: &str) -> Vec<&'static DemoMovie> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        CATALOGUE
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect()
    }
}

#[async_trait]
impl MovieApi for DemoProvider {
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<MovieDiscovery, MovieSearchError> {
        let matches = Self::matches(query);
        let total_pages = matches.len().div_ceil(DEMO_PAGE_SIZE).max(1) as u32;
        let page = page.max(1);

        let results = matches
            .iter()
            .skip((page as usize - 1) * DEMO_PAGE_SIZE)
            .take(DEMO_PAGE_SIZE)
            .map(|movie| movie.summary())
            .collect();

        let discovery = MovieDiscovery {
            page,
            results,
            total_pages,
            total_results: matches.len() as u64,
        };
        discovery.validate()?;
        Ok(discovery)
    }

    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, MovieSearchError> {
        CATALOGUE
            .iter()
            .find(|movie| movie.id == id)
            .map(DemoMovie::detail)
            .ok_or_else(|| MovieSearchError::NotFound {
                resource: format!("movie/{id}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_search_paginates() {
        let provider = DemoProvider::new();

        let first = provider.search_movies("matrix", 1).await.unwrap();
        assert_eq!(first.total_results, 5);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.results.len(), DEMO_PAGE_SIZE);

        let second = provider.search_movies("MATRIX", 2).await.unwrap();
        assert_eq!(second.results.len(), 1);
        assert_eq!(second.page, 2);
    }

    #[tokio::test]
    async fn test_demo_blank_query_is_empty() {
        let provider = DemoProvider::new();
        let discovery = provider.search_movies("   ", 1).await.unwrap();

        assert!(discovery.is_empty());
        assert_eq!(discovery.total_pages, 1);
    }

    #[tokio::test]
    async fn test_demo_detail_lookup() {
        let provider = DemoProvider::new();

        let heat = provider.movie_detail(949).await.unwrap();
        assert_eq!(heat.title, "Heat");
        assert_eq!(heat.runtime, Some(170));
        assert!(provider.movie_detail(1).await.unwrap_err().is_not_found());
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Number of attributes in a movie feature row: one flag per genre, then
/// the IMDb score.
pub const FEATURE_DIMENSION: usize = Genre::ALL.len() + 1;

/// IMDb genres, in feature-row column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    #[serde(rename = "Film-Noir")]
    FilmNoir,
    #[serde(rename = "Game-Show")]
    GameShow,
    History,
    Horror,
    Music,
    Musical,
    Mystery,
    News,
    #[serde(rename = "Reality-TV")]
    RealityTv,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Short,
    Sport,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// Every genre, indexed by feature column.
    pub const ALL: [Genre; 26] = [
        Self::Action,
        Self::Adventure,
        Self::Animation,
        Self::Biography,
        Self::Comedy,
        Self::Crime,
        Self::Documentary,
        Self::Drama,
        Self::Family,
        Self::Fantasy,
        Self::FilmNoir,
        Self::GameShow,
        Self::History,
        Self::Horror,
        Self::Music,
        Self::Musical,
        Self::Mystery,
        Self::News,
        Self::RealityTv,
        Self::Romance,
        Self::SciFi,
        Self::Short,
        Self::Sport,
        Self::Thriller,
        Self::War,
        Self::Western,
    ];

    /// Column of this genre's flag in a feature row.
    #[must_use]
    pub fn column(self) -> usize {
        self as usize
    }

    /// IMDb spelling of the genre.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Animation => "Animation",
            Self::Biography => "Biography",
            Self::Comedy => "Comedy",
            Self::Crime => "Crime",
            Self::Documentary => "Documentary",
            Self::Drama => "Drama",
            Self::Family => "Family",
            Self::Fantasy => "Fantasy",
            Self::FilmNoir => "Film-Noir",
            Self::GameShow => "Game-Show",
            Self::History => "History",
            Self::Horror => "Horror",
            Self::Music => "Music",
            Self::Musical => "Musical",
            Self::Mystery => "Mystery",
            Self::News => "News",
            Self::RealityTv => "Reality-TV",
            Self::Romance => "Romance",
            Self::SciFi => "Sci-Fi",
            Self::Short => "Short",
            Self::Sport => "Sport",
            Self::Thriller => "Thriller",
            Self::War => "War",
            Self::Western => "Western",
        }
    }

    /// Genres whose flag is set in a feature row.
    #[must_use]
    pub fn flagged_in(row: &[f64]) -> Vec<Genre> {
        Self::ALL
            .iter()
            .copied()
            .filter(|genre| row.get(genre.column()).is_some_and(|&flag| flag > 0.5))
            .collect()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    /// Case-insensitive; hyphens and spaces are interchangeable
    /// ("sci fi", "Sci-Fi", "SCI-FI").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|genre| normalize(genre.as_str()) == wanted)
            .ok_or_else(|| CatalogError::UnknownGenre(s.trim().to_owned()))
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | ' ' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_declaration_order() {
        assert_eq!(Genre::Action.column(), 0);
        assert_eq!(Genre::SciFi.column(), 20);
        assert_eq!(Genre::Western.column(), 25);
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.column(), i);
        }
        assert_eq!(FEATURE_DIMENSION, 27);
    }

    #[test]
    fn genre_display() {
        assert_eq!(Genre::FilmNoir.to_string(), "Film-Noir");
        assert_eq!(Genre::RealityTv.to_string(), "Reality-TV");
        assert_eq!(Genre::Drama.to_string(), "Drama");
    }

    #[test]
    fn genre_parsing_is_lenient() {
        assert_eq!("Sci-Fi".parse::<Genre>().unwrap(), Genre::SciFi);
        assert_eq!("sci fi".parse::<Genre>().unwrap(), Genre::SciFi);
        assert_eq!(" THRILLER ".parse::<Genre>().unwrap(), Genre::Thriller);
        assert_eq!("game_show".parse::<Genre>().unwrap(), Genre::GameShow);
    }

    #[test]
    fn unknown_genre_is_rejected() {
        let err = "Anime".parse::<Genre>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGenre(name) if name == "Anime"));
    }

    #[test]
    fn music_and_musical_stay_distinct() {
        assert_eq!("music".parse::<Genre>().unwrap(), Genre::Music);
        assert_eq!("musical".parse::<Genre>().unwrap(), Genre::Musical);
    }

    #[test]
    fn flagged_genres_from_row() {
        let mut row = vec![0.0; FEATURE_DIMENSION];
        row[Genre::Action.column()] = 1.0;
        row[Genre::SciFi.column()] = 1.0;
        row[FEATURE_DIMENSION - 1] = 7.9;
        assert_eq!(Genre::flagged_in(&row), vec![Genre::Action, Genre::SciFi]);
    }

    #[test]
    fn genre_serializes_with_imdb_spelling() {
        let json = serde_json::to_string(&Genre::SciFi).unwrap();
        assert_eq!(json, "\"Sci-Fi\"");
    }
}

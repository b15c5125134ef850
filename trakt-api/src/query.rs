//! Typed vocabulary for request query parameters.
//!
//! Everything here serializes to `(key, value)` string pairs in
//! [`crate::route::Route::final_query`]; none of these types touch the
//! network themselves.

use std::fmt;

/// How much detail the server should embed in returned entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedType {
    /// Default minimal payload.
    Min,
    /// Complete metadata for each entity.
    Full,
    /// Collection-only metadata (resolution, audio, and the like).
    Metadata,
    /// All episodes, on season endpoints.
    Episodes,
    /// Exclude seasons from show payloads.
    NoSeasons,
    /// Guest stars, on cast endpoints.
    GuestStars,
}

impl ExtendedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtendedType::Min => "min",
            ExtendedType::Full => "full",
            ExtendedType::Metadata => "metadata",
            ExtendedType::Episodes => "episodes",
            ExtendedType::NoSeasons => "noseasons",
            ExtendedType::GuestStars => "guest_stars",
        }
    }

    /// Join a set of levels into the comma-separated wire form.
    pub fn join(levels: &[ExtendedType]) -> String {
        levels
            .iter()
            .map(ExtendedType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for ExtendedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity kinds accepted by the search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Movie,
    Show,
    Episode,
    Person,
    List,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Movie => "movie",
            SearchType::Show => "show",
            SearchType::Episode => "episode",
            SearchType::Person => "person",
            SearchType::List => "list",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity kinds accepted by watched/collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedType {
    Movies,
    Shows,
    Seasons,
    Episodes,
}

impl WatchedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchedType::Movies => "movies",
            WatchedType::Shows => "shows",
            WatchedType::Seasons => "seasons",
            WatchedType::Episodes => "episodes",
        }
    }
}

impl fmt::Display for WatchedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window for the most-watched / most-played style endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external-database identifier for ID lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupType {
    Trakt(u64),
    Imdb(String),
    Tmdb(u64),
    Tvdb(u64),
    TvRage(u64),
}

impl LookupType {
    /// The `id_type` path segment.
    pub fn name(&self) -> &'static str {
        match self {
            LookupType::Trakt(_) => "trakt",
            LookupType::Imdb(_) => "imdb",
            LookupType::Tmdb(_) => "tmdb",
            LookupType::Tvdb(_) => "tvdb",
            LookupType::TvRage(_) => "tvrage",
        }
    }

    /// The `id` path segment.
    pub fn id(&self) -> String {
        match self {
            LookupType::Trakt(id)
            | LookupType::Tmdb(id)
            | LookupType::Tvdb(id)
            | LookupType::TvRage(id) => id.to_string(),
            LookupType::Imdb(id) => id.clone(),
        }
    }
}

/// Server-side result filters for list endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Free-text title/overview match.
    Query(String),
    /// Release years, e.g. `"2016"` or `"2014-2016"`.
    Years(String),
    Genres(Vec<String>),
    Languages(Vec<String>),
    Countries(Vec<String>),
    /// Runtime range in minutes.
    Runtimes { min: u32, max: u32 },
    /// Rating range on the 0-100 scale.
    Ratings { min: u32, max: u32 },
    Certifications(Vec<String>),
    /// Show networks.
    Networks(Vec<String>),
    /// Show statuses, e.g. `"returning series"`.
    Status(Vec<String>),
}

impl Filter {
    /// The `(key, value)` pair this filter contributes to the query string.
    pub fn pair(&self) -> (&'static str, String) {
        match self {
            Filter::Query(q) => ("query", q.clone()),
            Filter::Years(y) => ("years", y.clone()),
            Filter::Genres(slugs) => ("genres", slugs.join(",")),
            Filter::Languages(codes) => ("languages", codes.join(",")),
            Filter::Countries(codes) => ("countries", codes.join(",")),
            Filter::Runtimes { min, max } => ("runtimes", format!("{min}-{max}")),
            Filter::Ratings { min, max } => ("ratings", format!("{min}-{max}")),
            Filter::Certifications(slugs) => ("certifications", slugs.join(",")),
            Filter::Networks(names) => ("networks", names.join(",")),
            Filter::Status(statuses) => ("status", statuses.join(",")),
        }
    }
}

use std::fmt::Display;

use chrono::{DateTime, Utc};

use super::{Artist, EanCode, Genre, Id, Name, Price, RecordCompany, Username, ValidationError};

/// Placeholder identity of a CD that has not been stored yet.
pub const DEFAULT_ID: u32 = 1898989;
/// Placeholder publisher of a CD that has not been stored yet.
pub const DEFAULT_PUBLISHER: &str = "music-library";

const TIMESTAMP_DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M";

/// A CD record: six validated attributes plus identity, owner and audit timestamps.
///
/// A freshly built CD carries placeholder identity, publisher and timestamps;
/// the server overwrites all of them when the record is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cd {
    id: Id,
    name: Name,
    artist: Artist,
    record_company: RecordCompany,
    genre: Genre,
    ean_code: EanCode,
    price: Price,
    published_by: Username,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>
}

impl AsRef<Cd> for Cd {
    fn as_ref(&self) -> &Cd {
        self
    }
}

impl Cd {

    pub fn new(name: Name, artist: Artist, record_company: RecordCompany, genre: Genre, ean_code: EanCode, price: Price) -> Self {
        let now = Utc::now();

        Self {
            id: Id::from(DEFAULT_ID),
            name,
            artist,
            record_company,
            genre,
            ean_code,
            price,
            published_by: Username::new_unchecked(DEFAULT_PUBLISHER),
            created_at: now,
            updated_at: now
        }
    }

    /// Builds a CD from raw text, failing on the first field that does not validate.
    pub fn parse(name: &str, artist: &str, record_company: &str, genre: &str, ean_code: &str, price: &str) -> Result<Self, ValidationError> {
        Ok(
            Self::new(
                Name::new(name)?,
                Artist::new(artist)?,
                RecordCompany::new(record_company)?,
                Genre::new(genre)?,
                EanCode::new(ean_code)?,
                Price::parse(price)?
            )
        )
    }

    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    pub fn with_publisher(mut self, published_by: Username) -> Self {
        self.published_by = published_by;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn artist(&self) -> &Artist {
        &self.artist
    }

    pub fn record_company(&self) -> &RecordCompany {
        &self.record_company
    }

    pub fn genre(&self) -> &Genre {
        &self.genre
    }

    pub fn ean_code(&self) -> &EanCode {
        &self.ean_code
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn published_by(&self) -> &Username {
        &self.published_by
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn created_at_display(&self) -> String {
        self.created_at.format(TIMESTAMP_DISPLAY_FORMAT).to_string()
    }

    pub fn updated_at_display(&self) -> String {
        self.updated_at.format(TIMESTAMP_DISPLAY_FORMAT).to_string()
    }
}

impl Display for Cd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CD Name: {} Artist: {} Record Company: {} Genre: {} EANCode: {} Price: {}",
            self.name, self.artist, self.record_company, self.genre, self.ean_code, self.price
        )
    }
}

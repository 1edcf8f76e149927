use serde::{Deserialize, Serialize};

use crate::domain::{Artist, AuthenticatedUser, Cd, EanCode, Genre, Id, Name, Price, RecordCompany, Username};
use super::{format_timestamp, parse_timestamp, MappingError};

/// Owner of a record as sent by the API: either the bare username or a nested user object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Username(String),
    Nested { username: String }
}

impl UserRef {
    pub fn username(&self) -> &str {
        match self {
            UserRef::Username(username) => username,
            UserRef::Nested { username } => username
        }
    }
}

/// A CD record as returned by the API. Extra keys (`price_currency`, `published_by`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdPayload {
    pub id: i64,
    pub name: String,
    pub artist: String,
    pub record_company: String,
    pub genre: String,
    pub ean_code: String,
    pub price: String,
    pub user: UserRef,
    pub created_at: String,
    pub updated_at: String
}

impl TryFrom<CdPayload> for Cd {
    type Error = MappingError;

    fn try_from(payload: CdPayload) -> Result<Self, Self::Error> {
        let cd = Cd::new(
            Name::new(payload.name).map_err(MappingError::field("name"))?,
            Artist::new(payload.artist).map_err(MappingError::field("artist"))?,
            RecordCompany::new(payload.record_company).map_err(MappingError::field("record_company"))?,
            Genre::new(payload.genre).map_err(MappingError::field("genre"))?,
            EanCode::new(&payload.ean_code).map_err(MappingError::field("ean_code"))?,
            Price::parse(&payload.price).map_err(MappingError::field("price"))?
        );

        Ok(
            cd.with_id(Id::new(payload.id).map_err(MappingError::field("id"))?)
                .with_publisher(Username::new(payload.user.username()).map_err(MappingError::field("user"))?)
                .with_timestamps(
                    parse_timestamp("created_at", &payload.created_at)?,
                    parse_timestamp("updated_at", &payload.updated_at)?
                )
        )
    }
}

impl From<&Cd> for CdPayload {
    fn from(cd: &Cd) -> Self {
        Self {
            id: cd.id().value(),
            name: cd.name().to_string(),
            artist: cd.artist().to_string(),
            record_company: cd.record_company().to_string(),
            genre: cd.genre().to_string(),
            ean_code: cd.ean_code().to_string(),
            price: cd.price().to_string(),
            user: UserRef::Username(cd.published_by().to_string()),
            created_at: format_timestamp(cd.created_at()),
            updated_at: format_timestamp(cd.updated_at())
        }
    }
}

/// Request body for creating or updating a CD.
///
/// `published_by` always carries the id of the authenticated user; the server
/// sets the real owner itself and never transfers ownership on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub artist: String,
    pub record_company: String,
    pub genre: String,
    pub ean_code: String,
    pub price: String,
    pub published_by: i64
}

impl CdSubmission {
    pub fn for_create(cd: &Cd, user: &AuthenticatedUser) -> Self {
        Self::build(None, cd, user)
    }

    pub fn for_update(cd: &Cd, user: &AuthenticatedUser) -> Self {
        Self::build(Some(cd.id().value()), cd, user)
    }

    fn build(id: Option<i64>, cd: &Cd, user: &AuthenticatedUser) -> Self {
        Self {
            id,
            name: cd.name().to_string(),
            artist: cd.artist().to_string(),
            record_company: cd.record_company().to_string(),
            genre: cd.genre().to_string(),
            ean_code: cd.ean_code().to_string(),
            price: cd.price().to_string(),
            published_by: user.id().value()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::ValidationError;
    use crate::utils::ean::EanError;

    fn api_record() -> serde_json::Value {
        json!({
            "id": 39,
            "name": "Ciao",
            "artist": "Ciao2",
            "record_company": "Ciao",
            "genre": "Ciao",
            "ean_code": "978020137962",
            "price": "10.00",
            "price_currency": "EUR",
            "published_by": 3,
            "user": "ssdsbm2",
            "created_at": "2022-01-10T11:34:56.123456Z",
            "updated_at": "2022-01-11 08:00:00"
        })
    }

    #[test]
    fn maps_api_record() -> Result<(), Box<dyn std::error::Error>> {
        let payload: CdPayload = serde_json::from_value(api_record())?;
        let cd = Cd::try_from(payload)?;

        assert_eq!(cd.id(), &Id::from(39));
        assert_eq!(cd.name().as_str(), "Ciao");
        assert_eq!(cd.artist().as_str(), "Ciao2");
        assert_eq!(cd.price(), &Price::create(10, 0)?);
        assert_eq!(cd.published_by().as_str(), "ssdsbm2");
        assert_eq!(cd.updated_at_display(), "11-01-2022 08:00");

        Ok(())
    }

    #[test]
    fn reads_nested_user_reference() -> Result<(), Box<dyn std::error::Error>> {
        let mut record = api_record();
        record["user"] = json!({ "id": 3, "username": "nested-owner" });

        let cd = Cd::try_from(serde_json::from_value::<CdPayload>(record)?)?;
        assert_eq!(cd.published_by().as_str(), "nested-owner");

        Ok(())
    }

    #[test]
    fn round_trip_preserves_every_field() -> Result<(), Box<dyn std::error::Error>> {
        let payload: CdPayload = serde_json::from_value(api_record())?;
        let cd = Cd::try_from(payload)?;

        let back = CdPayload::from(&cd);
        assert_eq!(back.id, 39);
        assert_eq!(back.price, "10.00");
        assert_eq!(back.user, UserRef::Username("ssdsbm2".to_string()));
        assert_eq!(Cd::try_from(back)?, cd);

        Ok(())
    }

    #[test]
    fn first_invalid_field_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let mut record = api_record();
        record["genre"] = json!("rock");
        record["ean_code"] = json!("978020137963");

        let result = Cd::try_from(serde_json::from_value::<CdPayload>(record)?);
        assert_eq!(result, Err(MappingError::InvalidField { field: "genre", source: ValidationError::NotCapitalized }));

        let mut record = api_record();
        record["ean_code"] = json!("978020137963");
        let result = Cd::try_from(serde_json::from_value::<CdPayload>(record)?);
        assert_eq!(result, Err(MappingError::InvalidField { field: "ean_code", source: ValidationError::Ean(EanError::ChecksumFails) }));

        Ok(())
    }

    #[test]
    fn largest_id_survives_the_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let mut record = api_record();
        record["id"] = json!(i64::MAX);

        let cd = Cd::try_from(serde_json::from_value::<CdPayload>(record)?)?;
        let back = CdPayload::from(&cd);
        assert_eq!(back.id, i64::MAX);
        assert_eq!(Cd::try_from(back)?, cd);

        Ok(())
    }

    #[test]
    fn submission_carries_author_id_and_optional_id() -> Result<(), Box<dyn std::error::Error>> {
        let cd = Cd::try_from(serde_json::from_value::<CdPayload>(api_record())?)?;
        let user = AuthenticatedUser::new("key", Id::from(7), Username::new("someone")?, false, ["publishers"]);

        let create = serde_json::to_value(CdSubmission::for_create(&cd, &user))?;
        assert_eq!(create["published_by"], json!(7));
        assert_eq!(create["price"], json!("10.00"));
        assert!(create.get("id").is_none());

        let update = serde_json::to_value(CdSubmission::for_update(&cd, &user))?;
        assert_eq!(update["id"], json!(39));

        Ok(())
    }
}

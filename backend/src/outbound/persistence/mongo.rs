//! MongoDB storage adapter.
//!
//! Ids are ObjectId values carried through the port as their 24-character
//! hex form. A port id that does not parse as an ObjectId reads as absent,
//! mirroring how the relational adapter treats non-numeric ids. Insertion
//! order queries sort on `_id`, which is monotonic for ObjectId.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{Storage, StorageError};
use crate::domain::{Booking, EntityId, Game, NewBooking, NewGame, NewUser, User, day_bounds};

const USERS: &str = "users";
const GAMES: &str = "games";
const BOOKINGS: &str = "bookings";

/// Document-backed implementation of the storage port.
#[derive(Clone)]
pub struct MongoStorage {
    database: Database,
}

impl MongoStorage {
    /// Connect to the MongoDB deployment behind `uri` and select `database`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the client cannot be
    /// constructed from the URI.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|err| StorageError::unavailable(err.to_string()))?;
        Ok(Self {
            database: client.database(database),
        })
    }

    /// Create the unique username index.
    ///
    /// Collections themselves are created lazily on first insert; only the
    /// uniqueness constraint needs to exist up front so duplicate
    /// registrations fail atomically.
    ///
    /// # Errors
    ///
    /// Returns the mapped error when index creation fails.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        let options = IndexOptions::builder().unique(true).build();
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(options)
            .build();
        self.users()
            .create_index(index)
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    fn users(&self) -> Collection<UserDocument> {
        self.database.collection(USERS)
    }

    fn games(&self) -> Collection<GameDocument> {
        self.database.collection(GAMES)
    }

    fn bookings(&self) -> Collection<BookingDocument> {
        self.database.collection(BOOKINGS)
    }
}

/// Map driver errors to port errors.
fn map_mongo_error(error: mongodb::error::Error) -> StorageError {
    use mongodb::error::{ErrorKind, WriteFailure};

    debug!(error = %error, "mongodb operation failed");

    match *error.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write)) if write.code == 11000 => {
            StorageError::conflict("Username already taken")
        }
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            StorageError::unavailable(error.to_string())
        }
        _ => StorageError::query(error.to_string()),
    }
}

fn parse_object_id(id: &EntityId) -> Option<ObjectId> {
    ObjectId::parse_str(id.as_str()).ok()
}

fn to_bson_date(date: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(date.timestamp_millis())
}

fn from_bson_date(date: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    username: String,
    password: String,
    email: String,
    phone_number: String,
}

impl UserDocument {
    fn into_domain(self) -> Option<User> {
        let id = object_id_to_entity(self.id?)?;
        Some(User {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            phone_number: self.phone_number,
        })
    }
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            username: user.username,
            password: user.password,
            email: user.email,
            phone_number: user.phone_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GameDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    description: String,
    image_url: String,
    min_players: i32,
    max_players: i32,
}

impl GameDocument {
    fn into_domain(self) -> Option<Game> {
        let id = object_id_to_entity(self.id?)?;
        Some(Game {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            min_players: self.min_players,
            max_players: self.max_players,
        })
    }
}

impl From<NewGame> for GameDocument {
    fn from(game: NewGame) -> Self {
        Self {
            id: None,
            name: game.name,
            description: game.description,
            image_url: game.image_url,
            min_players: game.min_players,
            max_players: game.max_players,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BookingDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: String,
    game_id: String,
    date: bson::DateTime,
    team_size: i32,
    total_amount: i32,
    is_paid: bool,
    location: String,
    status: String,
}

impl BookingDocument {
    fn into_domain(self) -> Option<Booking> {
        let id = object_id_to_entity(self.id?)?;
        Some(Booking {
            id,
            // References are stored as the port-level string form so they
            // survive regardless of which backend minted them.
            user_id: EntityId::new(self.user_id).ok()?,
            game_id: EntityId::new(self.game_id).ok()?,
            date: from_bson_date(self.date),
            team_size: self.team_size,
            total_amount: self.total_amount,
            is_paid: self.is_paid,
            location: self.location,
            status: self.status,
        })
    }
}

impl From<NewBooking> for BookingDocument {
    fn from(booking: NewBooking) -> Self {
        Self {
            id: None,
            user_id: booking.user_id.to_string(),
            game_id: booking.game_id.to_string(),
            date: to_bson_date(booking.date),
            team_size: booking.team_size,
            total_amount: booking.total_amount,
            is_paid: booking.is_paid,
            location: booking.location,
            status: booking.status,
        }
    }
}

/// An ObjectId's hex form is always a valid id; `None` cannot occur in
/// practice but callers treat it as an absent or corrupt record.
fn object_id_to_entity(id: ObjectId) -> Option<EntityId> {
    EntityId::new(id.to_hex()).ok()
}

#[async_trait]
impl Storage for MongoStorage {
    async fn get_user(&self, id: &EntityId) -> Result<Option<User>, StorageError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };
        let document = self
            .users()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_error)?;
        Ok(document.and_then(UserDocument::into_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let document = self
            .users()
            .find_one(doc! { "username": username })
            .await
            .map_err(map_mongo_error)?;
        Ok(document.and_then(UserDocument::into_domain))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let document = UserDocument::from(user.clone());
        let result = self
            .users()
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;
        let id = result
            .inserted_id
            .as_object_id()
            .and_then(object_id_to_entity)
            .ok_or_else(|| StorageError::query("insert returned a non-ObjectId key"))?;
        Ok(user.into_user(id))
    }

    async fn get_games(&self) -> Result<Vec<Game>, StorageError> {
        let cursor = self
            .games()
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<GameDocument> =
            cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(documents
            .into_iter()
            .filter_map(GameDocument::into_domain)
            .collect())
    }

    async fn get_game(&self, id: &EntityId) -> Result<Option<Game>, StorageError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };
        let document = self
            .games()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_error)?;
        Ok(document.and_then(GameDocument::into_domain))
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, StorageError> {
        let document = GameDocument::from(game.clone());
        let result = self
            .games()
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;
        let id = result
            .inserted_id
            .as_object_id()
            .and_then(object_id_to_entity)
            .ok_or_else(|| StorageError::query("insert returned a non-ObjectId key"))?;
        Ok(game.into_game(id))
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StorageError> {
        let document = BookingDocument::from(booking.clone());
        let result = self
            .bookings()
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;
        let id = result
            .inserted_id
            .as_object_id()
            .and_then(object_id_to_entity)
            .ok_or_else(|| StorageError::query("insert returned a non-ObjectId key"))?;
        Ok(booking.into_booking(id))
    }

    async fn get_booking(&self, id: &EntityId) -> Result<Option<Booking>, StorageError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(None);
        };
        let document = self
            .bookings()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_error)?;
        Ok(document.and_then(BookingDocument::into_domain))
    }

    async fn get_bookings_by_date(&self, day: NaiveDate) -> Result<Vec<Booking>, StorageError> {
        let (start, end) = day_bounds(day);
        let filter = doc! {
            "date": {
                "$gte": to_bson_date(start),
                "$lte": to_bson_date(end),
            }
        };
        let cursor = self
            .bookings()
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<BookingDocument> =
            cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(documents
            .into_iter()
            .filter_map(BookingDocument::into_domain)
            .collect())
    }

    async fn get_user_bookings(&self, user_id: &EntityId) -> Result<Vec<Booking>, StorageError> {
        let cursor = self
            .bookings()
            .find(doc! { "user_id": user_id.as_str() })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<BookingDocument> =
            cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(documents
            .into_iter()
            .filter_map(BookingDocument::into_domain)
            .collect())
    }

    async fn update_booking_payment(
        &self,
        id: &EntityId,
        is_paid: bool,
    ) -> Result<(), StorageError> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(());
        };
        // Matching zero documents is the contract's no-op case.
        self.bookings()
            .update_one(doc! { "_id": oid }, doc! { "$set": { "is_paid": is_paid } })
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }
}

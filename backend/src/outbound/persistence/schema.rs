//! Diesel table definitions for the MySQL schema.
//!
//! These definitions must match the DDL issued by
//! [`super::mysql::MysqlStorage::initialize`] exactly. They are used by
//! Diesel for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    ///
    /// `username` carries a unique index so duplicate registrations fail at
    /// the insert rather than in a racy pre-check.
    users (id) {
        /// Primary key: BIGINT AUTO_INCREMENT.
        id -> Bigint,
        /// Unique login name.
        #[max_length = 255]
        username -> Varchar,
        /// Plaintext password (preserved defect of the replaced system).
        #[max_length = 255]
        password -> Varchar,
        /// Contact address for notifications.
        #[max_length = 255]
        email -> Varchar,
        /// Free-form contact phone number.
        #[max_length = 32]
        phone_number -> Varchar,
    }
}

diesel::table! {
    /// Seeded game catalogue.
    games (id) {
        /// Primary key: BIGINT AUTO_INCREMENT.
        id -> Bigint,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Marketing description.
        description -> Text,
        /// Cover image URL.
        image_url -> Text,
        /// Smallest supported team.
        min_players -> Integer,
        /// Largest supported team.
        max_players -> Integer,
    }
}

diesel::table! {
    /// Booked game slots.
    bookings (id) {
        /// Primary key: BIGINT AUTO_INCREMENT.
        id -> Bigint,
        /// Owning user id.
        user_id -> Bigint,
        /// Booked game id.
        game_id -> Bigint,
        /// Slot timestamp, stored as DATETIME(3) in UTC.
        date -> Datetime,
        /// Number of attending players.
        team_size -> Integer,
        /// Total price in integer currency units.
        total_amount -> Integer,
        /// Payment flag.
        is_paid -> Bool,
        /// Free-text venue location.
        #[max_length = 255]
        location -> Varchar,
        /// Free-text status, `"pending"` until paid.
        #[max_length = 32]
        status -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, games, bookings);

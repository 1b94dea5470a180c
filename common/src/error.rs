//! Error types shared by the client crates.
//!
//! The progress and cart-identity models are total and have no error type.
//! What can fail is persistence, form validation and checkout
//! preconditions; each has its own enum whose `Display` text is what the
//! user sees in a toast.

/// Failures of the key-value store behind the application context.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A persisted value could not be (de)serialized.
    #[error("invalid persisted value under {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The storage backend refused the operation (quota, privacy mode...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Reasons a reservation form is rejected before it reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Please enter a valid name (at least 2 characters, letters only).")]
    InvalidName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter a valid Ghanaian phone number.")]
    InvalidPhone,

    #[error("Please select a valid date and time.")]
    InvalidDateTime,

    #[error("Please select a future date and time.")]
    NotInFuture,

    #[error("Reservations must be made at least 1 hour in advance.")]
    TooSoon,

    #[error("Please select a time between 9:00 AM and 11:00 PM.")]
    OutsideBusinessHours,
}

/// Checkout preconditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("User not logged in")]
    NotLoggedIn,

    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Please provide contact and address.")]
    MissingContact,
}

/// Sign-up form checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    #[error("Please choose an available username.")]
    UsernameTaken,

    #[error("Username must be at least 3 characters long.")]
    UsernameTooShort,

    #[error("Please enter a valid Ghanaian phone number.")]
    InvalidPhone,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please fill in all required fields.")]
    MissingFields,
}

use std::fmt;

/// An admin PIN the server has accepted.
///
/// Only [`Client::verify_pin`](crate::client::Client::verify_pin) creates one.
/// It lives in memory for the duration of the command and is handed to every
/// mutating call explicitly.
#[derive(Clone)]
pub struct AdminSession {
    pin: String,
}

impl AdminSession {
    pub(crate) fn new(pin: impl Into<String>) -> Self {
        Self { pin: pin.into() }
    }

    pub(crate) fn pin(&self) -> &str {
        &self.pin
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("pin", &"****")
            .finish()
    }
}

/// Identity of the signed-in citizen.
///
/// The phone number is the owner key on every stored record. Operations take
/// the session explicitly; there is no ambient current-user state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitizenSession {
    pub phone: String,
}

impl CitizenSession {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.phone
    }
}

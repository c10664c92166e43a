/// In-memory view of who is logged in. The UI renders whatever is in here;
/// nothing else is derived from it.
#[derive(Debug, Default)]
pub struct SessionStore {
    email: Option<String>,
    first_name: Option<String>,
    token: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Log out: forget everything.
    pub fn clear(&mut self) {
        self.email = None;
        self.first_name = None;
        self.token = None;
    }
}

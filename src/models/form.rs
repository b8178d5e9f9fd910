/// Pending signup input. Both fields are required before submitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub activity: Option<String>,
    pub email: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `(activity, email)` when the form can be submitted.
    pub fn submission(&self) -> Option<(String, String)> {
        let activity = self.activity.as_ref()?;
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        Some((activity.clone(), email.to_string()))
    }
}

use std::time::Duration;
use tracing::{debug, error, info};

use crate::api::activities::{ActivityApi, ApiReply};
use crate::models::cache::CatalogCache;
use crate::models::clock::Clock;
use crate::models::form::SignupForm;
use crate::models::message::{Message, MessageArea};
use crate::models::view::{render_model, RemoveAction, Screen, LOAD_FAILED};

pub const GENERIC_API_ERROR: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server's success message.
    Succeeded(String),
    /// The server's detail, or `GENERIC_API_ERROR`.
    Rejected(String),
    /// Transport or decoding failure; carries the generic user message.
    Failed(String),
}

impl MutationOutcome {
    pub fn message(&self) -> Message {
        match self {
            MutationOutcome::Succeeded(text) => Message::success(text.as_str()),
            MutationOutcome::Rejected(text) | MutationOutcome::Failed(text) => {
                Message::error(text.as_str())
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Succeeded(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    fn failure_text(self) -> &'static str {
        match self {
            Mutation::Signup => SIGNUP_FAILED,
            Mutation::Unregister => UNREGISTER_FAILED,
        }
    }
}

/// Ties the cache, screen, signup form and message area together.
pub struct ActivityClient<A, C> {
    api: A,
    clock: C,
    cache: CatalogCache<C>,
    screen: Screen,
    form: SignupForm,
    messages: MessageArea,
}

impl<A: ActivityApi, C: Clock + Clone> ActivityClient<A, C> {
    pub fn new(api: A, clock: C, cache_duration: Duration) -> Self {
        Self {
            api,
            cache: CatalogCache::new(clock.clone(), cache_duration),
            clock,
            screen: Screen::default(),
            form: SignupForm::default(),
            messages: MessageArea::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn visible_message(&self) -> Option<&Message> {
        self.messages.visible(self.clock.now())
    }

    /// Repaints the screen from the cache. Never fails: a load error replaces
    /// the list with `LOAD_FAILED` and keeps the current options.
    pub async fn render(&mut self) {
        match self.cache.get_catalog(&self.api).await {
            Ok(catalog) => {
                let model = render_model(&catalog);
                debug!("Rendered {} activities", model.cards.len());
                self.screen.apply(model);
            }
            Err(e) => {
                error!("Error fetching activities: {}", e);
                self.screen.fail(LOAD_FAILED);
            }
        }
    }

    /// Picks an activity in the signup form. Only current options are accepted.
    pub fn select_activity(&mut self, name: &str) -> bool {
        if !self.screen.has_option(name) {
            return false;
        }
        self.form.activity = Some(name.to_string());
        true
    }

    pub fn set_email(&mut self, email: &str) {
        self.form.email = email.trim().to_string();
    }

    /// Submits the signup form. `None` when a required field is missing.
    pub async fn submit_signup(&mut self) -> Option<MutationOutcome> {
        let (activity, email) = self.form.submission()?;
        Some(self.signup(&activity, &email).await)
    }

    pub async fn signup(&mut self, activity: &str, email: &str) -> MutationOutcome {
        info!("Signing up {} for {}", email, activity);
        let outcome = self.mutate(Mutation::Signup, activity, email).await;
        if outcome.is_success() {
            self.form.reset();
        }
        self.show(&outcome);
        outcome
    }

    pub async fn unregister(&mut self, activity: &str, email: &str) -> MutationOutcome {
        info!("Unregistering {} from {}", email, activity);
        let outcome = self.mutate(Mutation::Unregister, activity, email).await;
        if outcome.is_success() {
            self.render().await;
        }
        self.show(&outcome);
        outcome
    }

    /// Runs the removal control numbered `index` (1-based) on the screen.
    pub async fn remove(&mut self, index: usize) -> Option<MutationOutcome> {
        let RemoveAction { activity, email } = index
            .checked_sub(1)
            .and_then(|i| self.screen.remove_actions().get(i).map(|a| (*a).clone()))?;
        Some(self.unregister(&activity, &email).await)
    }

    async fn mutate(&mut self, mutation: Mutation, activity: &str, email: &str) -> MutationOutcome {
        let reply = match mutation {
            Mutation::Signup => self.api.signup(activity, email).await,
            Mutation::Unregister => self.api.unregister(activity, email).await,
        };

        match reply {
            Ok(ApiReply::Confirmed(message)) => {
                self.cache.invalidate();
                MutationOutcome::Succeeded(message)
            }
            Ok(ApiReply::Rejected(detail)) => {
                info!("{:?} rejected for {} on {}: {:?}", mutation, email, activity, detail);
                MutationOutcome::Rejected(detail.unwrap_or_else(|| GENERIC_API_ERROR.to_string()))
            }
            Err(e) => {
                error!("Error during {:?} of {} for {}: {}", mutation, email, activity, e);
                MutationOutcome::Failed(mutation.failure_text().to_string())
            }
        }
    }

    fn show(&mut self, outcome: &MutationOutcome) {
        self.messages.show(outcome.message(), self.clock.now());
    }
}

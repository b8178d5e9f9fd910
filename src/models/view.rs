use crate::models::activity::ActivityCatalog;

pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveAction {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    pub remove: RemoveAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantsView {
    /// Shown as the single `NO_PARTICIPANTS` line.
    Empty,
    Listed(Vec<ParticipantRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: ParticipantsView,
}

impl ActivityCard {
    pub fn availability(&self) -> String {
        format!("{} spots left", self.spots_left)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
            disabled: true,
        }
    }

    fn activity(name: &str) -> Self {
        Self {
            value: name.to_string(),
            label: name.to_string(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub cards: Vec<ActivityCard>,
    pub options: Vec<SelectOption>,
}

pub fn render_model(catalog: &ActivityCatalog) -> ViewModel {
    let mut cards = Vec::with_capacity(catalog.len());
    let mut options = Vec::with_capacity(catalog.len() + 1);
    options.push(SelectOption::placeholder());

    for activity in catalog.iter() {
        let participants = if activity.participants.is_empty() {
            ParticipantsView::Empty
        } else {
            ParticipantsView::Listed(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        email: email.clone(),
                        remove: RemoveAction {
                            activity: activity.name.clone(),
                            email: email.clone(),
                        },
                    })
                    .collect(),
            )
        };

        cards.push(ActivityCard {
            name: activity.name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            participants,
        });
        options.push(SelectOption::activity(&activity.name));
    }

    ViewModel { cards, options }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPane {
    Loading,
    Cards(Vec<ActivityCard>),
    Failed(String),
}

/// What is currently painted: the activity list and the select options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub list: ListPane,
    pub options: Vec<SelectOption>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            list: ListPane::Loading,
            options: vec![SelectOption::placeholder()],
        }
    }
}

impl Screen {
    pub fn apply(&mut self, model: ViewModel) {
        *self = Self {
            list: ListPane::Cards(model.cards),
            options: model.options,
        };
    }

    /// Replaces the list with `message`. Options stay as they were.
    pub fn fail(&mut self, message: &str) {
        self.list = ListPane::Failed(message.to_string());
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| !o.disabled && o.value == value)
    }

    /// Removal controls in display order; `remove <n>` addresses index `n - 1`.
    pub fn remove_actions(&self) -> Vec<&RemoveAction> {
        let ListPane::Cards(cards) = &self.list else {
            return Vec::new();
        };
        cards
            .iter()
            .filter_map(|card| match &card.participants {
                ParticipantsView::Listed(rows) => Some(rows.iter().map(|row| &row.remove)),
                ParticipantsView::Empty => None,
            })
            .flatten()
            .collect()
    }
}

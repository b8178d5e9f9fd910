use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use crate::models::form::SignupForm;
use crate::models::message::{Message, MessageKind};
use crate::models::view::{ActivityCard, ListPane, ParticipantsView, Screen, NO_PARTICIPANTS};

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_message(&self, message: &Message) -> String {
        match message.kind {
            MessageKind::Success => message.text.green().to_string(),
            MessageKind::Error => message.text.red().to_string(),
        }
    }

    /// `first_control` is the number given to the card's first removal control.
    pub fn format_card(&self, card: &ActivityCard, first_control: usize) -> String {
        let mut output = Vec::new();
        output.push(self.format_header(&card.name));
        output.push(card.description.clone());
        output.push(format!("{} {}", "Schedule:".bold(), card.schedule));
        output.push(format!("{} {}", "Availability:".bold(), card.availability()));
        output.push("Current Participants:".to_string());

        match &card.participants {
            ParticipantsView::Empty => output.push(format!("  {}", NO_PARTICIPANTS.dimmed())),
            ParticipantsView::Listed(rows) => {
                for (offset, row) in rows.iter().enumerate() {
                    output.push(format!("  [{}] {}", first_control + offset, row.email));
                }
            }
        }

        output.join("\n")
    }

    pub fn format_options(&self, screen: &Screen) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(vec![
            Cell::new("Activity").style_spec("b"),
            Cell::new("Value").style_spec("b"),
        ]));

        for option in &screen.options {
            let value = if option.disabled { "" } else { option.value.as_str() };
            table.add_row(Row::new(vec![Cell::new(&option.label), Cell::new(value)]));
        }

        table.to_string()
    }

    pub fn format_form(&self, form: &SignupForm) -> String {
        let activity = form.activity.as_deref().unwrap_or("(none)");
        let email = if form.email.is_empty() {
            "(none)"
        } else {
            form.email.as_str()
        };
        format!("Selected: {}  Email: {}", activity, email)
    }

    pub fn format_screen(
        &self,
        screen: &Screen,
        form: &SignupForm,
        message: Option<&Message>,
    ) -> String {
        let mut output = Vec::new();
        output.push(self.format_header("Activities"));

        match &screen.list {
            ListPane::Loading => output.push("Loading activities...".to_string()),
            ListPane::Failed(text) => output.push(text.red().to_string()),
            ListPane::Cards(cards) => {
                let mut next_control = 1;
                for card in cards {
                    output.push(self.format_card(card, next_control));
                    if let ParticipantsView::Listed(rows) = &card.participants {
                        next_control += rows.len();
                    }
                }
            }
        }

        output.push(self.format_header("Sign Up for an Activity"));
        output.push(self.format_options(screen));
        output.push(self.format_form(form));

        if let Some(message) = message {
            output.push(String::new());
            output.push(self.format_message(message));
        }

        output.join("\n")
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-FileCopyrightText: 2026 Voxtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu command recognition.
//!
//! Commands are the exact Russian labels of the reply-keyboard buttons
//! (plus `/start`); anything else is plain text and may answer a pending
//! prompt. Matching is byte-exact: the labels are what the keyboard
//! sends back, so no trimming or case folding is applied.

use voxtask_core::PlanPeriod;

/// A recognized menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    CreateTask,
    EditText,
    Plans(PlanPeriod),
    SetWebhook,
    SetUserId,
}

impl Command {
    /// Parse a text message as a menu command, if it matches a label.
    pub fn parse(text: &str) -> Option<Command> {
        match text {
            "/start" => Some(Command::Start),
            "Создать задачу" => Some(Command::CreateTask),
            "Изменить текст" => Some(Command::EditText),
            "Планы на день" => Some(Command::Plans(PlanPeriod::Day)),
            "Планы на неделю" => Some(Command::Plans(PlanPeriod::Week)),
            "Планы на месяц" => Some(Command::Plans(PlanPeriod::Month)),
            "Установить Webhook URL" => Some(Command::SetWebhook),
            "Установить User ID" => Some(Command::SetUserId),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_label() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("Создать задачу"), Some(Command::CreateTask));
        assert_eq!(Command::parse("Изменить текст"), Some(Command::EditText));
        assert_eq!(
            Command::parse("Планы на день"),
            Some(Command::Plans(PlanPeriod::Day))
        );
        assert_eq!(
            Command::parse("Планы на неделю"),
            Some(Command::Plans(PlanPeriod::Week))
        );
        assert_eq!(
            Command::parse("Планы на месяц"),
            Some(Command::Plans(PlanPeriod::Month))
        );
        assert_eq!(
            Command::parse("Установить Webhook URL"),
            Some(Command::SetWebhook)
        );
        assert_eq!(
            Command::parse("Установить User ID"),
            Some(Command::SetUserId)
        );
    }

    #[test]
    fn free_text_is_not_a_command() {
        assert_eq!(Command::parse("Groceries"), None);
        assert_eq!(Command::parse("2025-01-01 10:00:00"), None);
        // Whitespace and case matter: the keyboard sends exact labels.
        assert_eq!(Command::parse(" Создать задачу"), None);
        assert_eq!(Command::parse("создать задачу"), None);
    }
}
